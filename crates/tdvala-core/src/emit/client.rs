//! The client façade: one method per function, plus a `_sync` twin when the
//! call may run synchronously.

use super::doc::doc_block;
use super::{CLIENT_ERROR, argument_type, constructor_class_name, tag_table, vala_type};
use crate::config::EmitSettings;
use crate::model::{FunctionDescriptor, Model};
use crate::naming::{TypeRef, disambiguate};

/// Suffix of the synchronous twin of a client method.
pub const SYNC_SUFFIX: &str = "_sync";

/// Field holding the dispatcher inside the client class.
const DISPATCHER_FIELD: &str = "requests_manager";

/// Members the client class declares itself; function methods never reuse them.
const CLIENT_MEMBERS: &[&str] = &["client_id", "timeout", DISPATCHER_FIELD, "init"];

/// How a façade method reaches TDLib.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CallMode {
    Async,
    Sync,
}

/// How a response is turned into the declared return type.
#[derive(Debug, Clone, PartialEq, Eq)]
enum ResponseShape {
    /// Tag → class table, one row per constructor that may come back.
    Tagged(Vec<(String, String)>),

    /// Primitive or collection decoded directly.
    Value(String),
}

impl ResponseShape {
    fn of(model: &Model, return_type: &TypeRef) -> Self {
        let Some(ty) = model.lookup(return_type) else {
            return ResponseShape::Value(vala_type(return_type));
        };

        ResponseShape::Tagged(tag_table(ty))
    }
}

/// Render the client façade file.
pub fn render_client(model: &Model, settings: &EmitSettings) -> String {
    let client = &settings.client_class;
    let dispatcher = &settings.dispatcher_class;

    let mut code = doc_block(&[format!("{} client", settings.namespace)], 0);
    code.push_str(&format!(
        "public sealed class {}.{client} : Object {{\n",
        settings.namespace
    ));

    code.push('\n');
    code.push_str(&doc_block(&["Identifier of the TDLib client instance".to_string()], 1));
    code.push_str("    public int client_id { get; private set; }\n");

    code.push('\n');
    code.push_str(&doc_block(
        &["Seconds to wait for a response before giving up".to_string()],
        1,
    ));
    code.push_str("    public double timeout { get; construct; }\n");

    code.push('\n');
    code.push_str(&format!("    {dispatcher} {DISPATCHER_FIELD};\n"));

    code.push('\n');
    code.push_str(&doc_block(
        &["@param timeout Seconds to wait for a response before giving up".to_string()],
        1,
    ));
    code.push_str(&format!(
        "    public {client} (double timeout = 10.0) {{\n        Object (timeout: timeout);\n    }}\n"
    ));

    code.push('\n');
    code.push_str(&doc_block(
        &["Create the TDLib client id and the requests manager".to_string()],
        1,
    ));
    code.push_str(&format!(
        "    public void init () {{\n        client_id = TDJsonApi.create_client_id ();\n        {DISPATCHER_FIELD} = new {dispatcher} (client_id, timeout);\n    }}\n"
    ));

    for function in model.functions.values() {
        let response = ResponseShape::of(model, &function.return_type);

        code.push('\n');
        code.push_str(&render_method(function, &response, CallMode::Async));

        if function.can_be_sync {
            code.push('\n');
            code.push_str(&render_method(function, &response, CallMode::Sync));
        }
    }

    code.push_str("}\n");
    code
}

/// Names used inside one client method body.
struct MethodScope {
    method: String,
    params: Vec<String>,
    request: String,
    response: String,
}

impl MethodScope {
    fn new(function: &FunctionDescriptor) -> Self {
        let method = disambiguate(&function.name, |name| CLIENT_MEMBERS.contains(&name));

        let mut params: Vec<String> = Vec::with_capacity(function.constructor.args.len());
        for arg in function.constructor.args.values() {
            let param = disambiguate(&arg.name, |name| {
                name == DISPATCHER_FIELD || params.iter().any(|p| p == name)
            });
            params.push(param);
        }

        let request = disambiguate("request", |name| params.iter().any(|p| p == name));
        let response = disambiguate("response", |name| params.iter().any(|p| p == name));

        Self {
            method,
            params,
            request,
            response,
        }
    }
}

fn method_doc(function: &FunctionDescriptor, scope: &MethodScope) -> Vec<String> {
    let mut lines = function.constructor.description.clone();
    if !scope.params.is_empty() {
        lines.push(String::new());
    }
    for (arg, param) in function.constructor.args.values().zip(&scope.params) {
        let text = arg.description.join(" ");
        if text.is_empty() {
            lines.push(format!("@param {param}"));
        } else {
            lines.push(format!("@param {param} {text}"));
        }
    }
    lines
}

fn render_method(function: &FunctionDescriptor, response: &ResponseShape, mode: CallMode) -> String {
    let scope = MethodScope::new(function);
    let (modifier, name) = match mode {
        CallMode::Async => ("async ", scope.method.clone()),
        CallMode::Sync => ("", format!("{}{SYNC_SUFFIX}", scope.method)),
    };

    let params: Vec<String> = function
        .constructor
        .args
        .values()
        .zip(&scope.params)
        .map(|(arg, param)| format!("{} {param}", argument_type(arg)))
        .collect();

    let mut code = doc_block(&method_doc(function, &scope), 1);
    code.push_str(&format!(
        "    public {modifier}{} {name} ",
        vala_type(&function.return_type)
    ));
    if params.is_empty() {
        code.push_str(&format!("() throws {CLIENT_ERROR} {{\n"));
    } else {
        code.push_str(&format!(
            "(\n        {}\n    ) throws {CLIENT_ERROR} {{\n",
            params.join(",\n        ")
        ));
    }

    let request = &scope.request;
    let request_class = constructor_class_name(&function.constructor);
    if scope.params.is_empty() {
        code.push_str(&format!("        var {request} = new {request_class} ();\n"));
    } else {
        code.push_str(&format!(
            "        var {request} = new {request_class} (\n            {}\n        );\n",
            scope.params.join(",\n            ")
        ));
    }

    let response_local = &scope.response;
    match mode {
        CallMode::Async => code.push_str(&format!(
            "        string {response_local} = yield {DISPATCHER_FIELD}.send_async (\n            {request}.tdlib_extra,\n            TDJson.serialize ({request})\n        );\n"
        )),
        CallMode::Sync => code.push_str(&format!(
            "        string {response_local} = {DISPATCHER_FIELD}.execute (TDJson.serialize ({request}));\n"
        )),
    }

    code.push_str(&render_response(response, response_local));
    code.push_str("    }\n");
    code
}

fn render_response(response: &ResponseShape, local: &str) -> String {
    match response {
        ResponseShape::Value(ty) => {
            format!("        return TDJson.deserialize_value<{ty}> ({local});\n")
        }
        ResponseShape::Tagged(cases) => {
            let mut code = format!("        switch (TDJson.get_tdlib_type ({local})) {{\n");
            for (tag, class) in cases {
                code.push_str(&format!(
                    "            case \"{tag}\":\n                return ({class}) TDJson.deserialize (typeof ({class}), {local});\n"
                ));
            }
            code.push_str("            default:\n                assert_not_reached ();\n");
            code.push_str("        }\n");
            code
        }
    }
}
