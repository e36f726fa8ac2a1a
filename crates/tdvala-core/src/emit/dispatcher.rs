//! The requests manager that demultiplexes TDLib responses.
//!
//! The routing skeleton is fixed boilerplate kept in a template. Only the
//! names and the update table are filled in from the model.

use super::tag_table;
use crate::config::EmitSettings;
use crate::model::{Model, TypeShape};

const TEMPLATE: &str = include_str!("../../templates/requests-manager.vala.tmpl");

/// Family whose variants are surfaced through the update signal.
pub const UPDATE_TYPE: &str = "Update";

/// Placeholder values for the dispatcher template.
struct TemplateContext {
    /// Vala namespace (e.g., "TDLib")
    namespace: String,
    /// Dispatcher class name (e.g., "RequestsManager")
    class_name: String,
    /// Root object class (e.g., "TDObject")
    root_class: String,
    /// Indented body handling objects that answer no request
    update_dispatch: String,
}

impl TemplateContext {
    fn new(model: &Model, settings: &EmitSettings) -> Self {
        Self {
            namespace: settings.namespace.clone(),
            class_name: settings.dispatcher_class.clone(),
            root_class: settings.root_class.clone(),
            update_dispatch: render_update_dispatch(model),
        }
    }

    /// Apply placeholder substitutions to template content
    fn apply(&self, template: &str) -> String {
        template
            .replace("{{update-dispatch}}\n", &self.update_dispatch)
            .replace("{{namespace}}", &self.namespace)
            .replace("{{class-name}}", &self.class_name)
            .replace("{{root-class}}", &self.root_class)
    }
}

/// Render the dispatcher file.
pub fn render_dispatcher(model: &Model, settings: &EmitSettings) -> String {
    TemplateContext::new(model, settings).apply(TEMPLATE)
}

fn render_update_dispatch(model: &Model) -> String {
    let update = model
        .types
        .get(UPDATE_TYPE)
        .filter(|ty| matches!(ty.shape(), TypeShape::Family) && !ty.constructors.is_empty());

    let Some(update) = update else {
        return "        debug (\"Unhandled object: %s\", response);\n".to_string();
    };

    let mut code = String::from("        switch (TDJson.get_tdlib_type (response)) {\n");
    for (tag, class) in tag_table(update) {
        code.push_str(&format!(
            "            case \"{tag}\":\n                update_received (({class}) TDJson.deserialize (typeof ({class}), response));\n                break;\n"
        ));
    }
    code.push_str(
        "            default:\n                debug (\"Unhandled object: %s\", response);\n                break;\n",
    );
    code.push_str("        }\n");
    code
}
