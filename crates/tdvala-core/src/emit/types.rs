//! Type files: concrete leaves, variant families and the root object.

use super::doc::doc_block;
use super::{argument_type, constructor_class_name, vala_type};
use crate::config::EmitSettings;
use crate::model::{ArgumentDescriptor, ConstructorDescriptor, TypeDescriptor, TypeShape};
use crate::naming::{Primitive, TypeRef};

/// Property on the root object holding the constructor tag.
pub const TYPE_TAG_PROPERTY: &str = "tdlib_type";

/// Property on the root object holding the request correlation id.
pub const EXTRA_PROPERTY: &str = "tdlib_extra";

const CORRELATION_ID: &str = "Uuid.string_random ()";

/// Visibility of an emitted class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Visibility {
    Public,
    Internal,
}

impl Visibility {
    fn keyword(self) -> &'static str {
        match self {
            Visibility::Public => "public",
            Visibility::Internal => "internal",
        }
    }
}

/// One non-abstract class built from a single constructor.
pub(super) struct ClassShape<'a> {
    pub visibility: Visibility,
    pub name: String,
    pub parent: &'a str,
    pub constructor: &'a ConstructorDescriptor,

    /// Whether the constructor also assigns the type tag and correlation id.
    pub tagged: bool,
}

impl ClassShape<'_> {
    pub(super) fn render(&self, namespace: &str) -> String {
        let mut code = doc_block(&self.constructor.description, 0);
        code.push_str(&format!(
            "{} class {namespace}.{} : {} {{\n",
            self.visibility.keyword(),
            self.name,
            self.parent
        ));

        for arg in self.constructor.args.values() {
            code.push('\n');
            code.push_str(&doc_block(&arg.description, 1));
            code.push_str(&render_property(arg));
        }

        code.push('\n');
        code.push_str(&self.render_constructor());
        code.push_str("}\n");
        code
    }

    fn render_constructor(&self) -> String {
        let params: Vec<String> = self
            .constructor
            .args
            .values()
            .map(|arg| format!("{} {}", argument_type(arg), arg.name))
            .collect();

        let mut assigned: Vec<ArgumentDescriptor> =
            self.constructor.args.values().cloned().collect();
        if self.tagged {
            assigned.extend(synthesized_arguments(self.constructor));
        }
        let assignments: Vec<String> = assigned
            .iter()
            .map(|arg| {
                let value = arg.literal.as_deref().unwrap_or(arg.name.as_str());
                format!("{}: {value}", arg.name)
            })
            .collect();

        let mut code = format!("    public {} ", self.name);
        if params.is_empty() {
            code.push_str("() {\n");
        } else {
            code.push_str(&format!(
                "(\n        {}\n    ) {{\n",
                params.join(",\n        ")
            ));
        }

        if assignments.is_empty() {
            code.push_str("        Object ();\n");
        } else {
            code.push_str(&format!(
                "        Object (\n            {}\n        );\n",
                assignments.join(",\n            ")
            ));
        }

        code.push_str("    }\n");
        code
    }
}

/// Type tag and correlation id assigned by every tagged constructor.
fn synthesized_arguments(constructor: &ConstructorDescriptor) -> [ArgumentDescriptor; 2] {
    let string = TypeRef::Primitive(Primitive::String);
    [
        ArgumentDescriptor::synthesized(
            TYPE_TAG_PROPERTY,
            string.clone(),
            format!("\"{}\"", constructor.name),
        ),
        ArgumentDescriptor::synthesized(EXTRA_PROPERTY, string, CORRELATION_ID.to_string()),
    ]
}

fn render_property(arg: &ArgumentDescriptor) -> String {
    let default = if arg.ty.is_vector() {
        format!("default = new {} (); ", vala_type(&arg.ty))
    } else {
        String::new()
    };
    format!(
        "    public {} {} {{ get; set; {default}}}\n",
        argument_type(arg),
        arg.name
    )
}

/// Render the file for one declared type.
pub fn render_type(ty: &TypeDescriptor, settings: &EmitSettings) -> String {
    let tagged = ty.name != settings.error_type;

    match ty.shape() {
        TypeShape::Concrete(constructor) => ClassShape {
            visibility: Visibility::Public,
            name: ty.name.clone(),
            parent: &settings.root_class,
            constructor,
            tagged,
        }
        .render(&settings.namespace),
        TypeShape::Family => {
            let mut code = doc_block(&ty.description, 0);
            code.push_str(&format!(
                "public abstract class {}.{} : {} {{}}\n",
                settings.namespace, ty.name, settings.root_class
            ));

            for constructor in ty.constructors.values() {
                code.push('\n');
                code.push_str(
                    &ClassShape {
                        visibility: Visibility::Public,
                        name: constructor_class_name(constructor),
                        parent: &ty.name,
                        constructor,
                        tagged,
                    }
                    .render(&settings.namespace),
                );
            }

            code
        }
    }
}

/// Render the abstract root every emitted object inherits.
pub fn render_root_object(settings: &EmitSettings) -> String {
    let mut code = doc_block(&[format!("Base {} object", settings.namespace)], 0);
    code.push_str(&format!(
        "public abstract class {}.{} : Object {{\n",
        settings.namespace, settings.root_class
    ));

    code.push('\n');
    code.push_str(&doc_block(&["Constructor name of the object".to_string()], 1));
    code.push_str(&format!("    internal string {TYPE_TAG_PROPERTY} {{ get; set; }}\n"));

    code.push('\n');
    code.push_str(&doc_block(
        &["Identifier matching a response to its request".to_string()],
        1,
    ));
    code.push_str(&format!("    internal string {EXTRA_PROPERTY} {{ get; set; }}\n"));

    code.push_str("}\n");
    code
}
