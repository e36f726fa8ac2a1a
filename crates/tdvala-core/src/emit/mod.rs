//! Vala source generation from a finished [`Model`].
//!
//! Each output shape has its own render function that takes the descriptor it
//! needs and returns a text block:
//!
//! ```text
//!  Model
//!    ├─→ [types]      → objects/<type>.vala      (one per TypeDescriptor)
//!    ├─→ [types]      → objects/t-d-object.vala  (root object)
//!    ├─→ [functions]  → functions/<call>.vala    (one per FunctionDescriptor)
//!    ├─→ [client]     → client.vala
//!    └─→ [dispatcher] → requests-manager.vala
//! ```
//!
//! Emission only reads the model, in its recorded insertion order, so the same
//! model always yields byte-identical output.

mod client;
mod dispatcher;
mod doc;
mod functions;
mod types;

pub use doc::{DOC_WIDTH, GENERATED_NOTICE, doc_block, file_header, wrap_words};

use crate::config::EmitSettings;
use crate::model::{ArgumentDescriptor, ConstructorDescriptor, Model, TypeDescriptor, TypeShape};
use crate::naming::{Primitive, TypeRef, to_kebab_case, to_pascal_case};
use std::path::PathBuf;

/// Directory holding type and root-object files.
pub const OBJECTS_DIR: &str = "objects";

/// Directory holding request-object files.
pub const FUNCTIONS_DIR: &str = "functions";

/// Client façade file name.
pub const CLIENT_FILE: &str = "client.vala";

/// Dispatcher file name.
pub const DISPATCHER_FILE: &str = "requests-manager.vala";

/// Error domain every emitted client method throws.
pub const CLIENT_ERROR: &str = "ClientError";

const SOURCE_EXTENSION: &str = "vala";

/// One generated file, relative to the output root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputUnit {
    pub path: PathBuf,
    pub contents: String,
}

/// Renders every output unit for one model.
pub struct Emitter<'a> {
    model: &'a Model,
    settings: &'a EmitSettings,
}

impl<'a> Emitter<'a> {
    pub fn new(model: &'a Model, settings: &'a EmitSettings) -> Self {
        Self { model, settings }
    }

    /// Render the complete output set.
    ///
    /// Order: root object, types, request objects, client, dispatcher.
    pub fn emit_all(&self) -> Vec<OutputUnit> {
        let mut units =
            Vec::with_capacity(self.model.types.len() + self.model.functions.len() + 3);

        units.push(self.unit(
            object_path(&self.settings.root_class),
            types::render_root_object(self.settings),
        ));

        for ty in self.model.types.values() {
            units.push(self.unit(object_path(&ty.name), types::render_type(ty, self.settings)));
        }

        for function in self.model.functions.values() {
            units.push(self.unit(
                function_path(&function.name),
                functions::render_function(function, self.settings),
            ));
        }

        units.push(self.unit(
            PathBuf::from(CLIENT_FILE),
            client::render_client(self.model, self.settings),
        ));
        units.push(self.unit(
            PathBuf::from(DISPATCHER_FILE),
            dispatcher::render_dispatcher(self.model, self.settings),
        ));

        for unit in &units {
            tracing::debug!(path = %unit.path.display(), bytes = unit.contents.len(), "rendered");
        }

        units
    }

    fn unit(&self, path: PathBuf, body: String) -> OutputUnit {
        let mut contents = file_header(self.settings);
        contents.push_str("\n\n");
        contents.push_str(&body);
        OutputUnit { path, contents }
    }
}

/// `objects/<kebab name>.vala` for a type or the root object.
pub fn object_path(type_name: &str) -> PathBuf {
    PathBuf::from(OBJECTS_DIR).join(format!("{}.{SOURCE_EXTENSION}", to_kebab_case(type_name)))
}

/// `functions/<kebab name>.vala` for a snake-cased function name.
pub fn function_path(function_name: &str) -> PathBuf {
    PathBuf::from(FUNCTIONS_DIR)
        .join(format!("{}.{SOURCE_EXTENSION}", to_kebab_case(function_name)))
}

/// Class name emitted for a family variant or a request object.
pub fn constructor_class_name(constructor: &ConstructorDescriptor) -> String {
    to_pascal_case(&constructor.name)
}

/// Runtime tag → emitted class, one row per constructor of `ty`.
///
/// A concrete leaf decodes into the type itself; a family into its variants.
pub fn tag_table(ty: &TypeDescriptor) -> Vec<(String, String)> {
    match ty.shape() {
        TypeShape::Concrete(constructor) => vec![(constructor.name.clone(), ty.name.clone())],
        TypeShape::Family => ty
            .constructors
            .values()
            .map(|c| (c.name.clone(), constructor_class_name(c)))
            .collect(),
    }
}

/// Map a resolved type to its Vala spelling.
///
/// # Examples
///
/// ```
/// use tdvala_core::emit::vala_type;
/// use tdvala_core::naming::resolve_type;
///
/// assert_eq!(vala_type(&resolve_type("int53")), "int64");
/// assert_eq!(vala_type(&resolve_type("vector<string>")), "Gee.ArrayList<string?>");
/// assert_eq!(vala_type(&resolve_type("chatPhoto")), "ChatPhoto");
/// ```
pub fn vala_type(ty: &TypeRef) -> String {
    match ty {
        TypeRef::Primitive(primitive) => primitive_name(*primitive).to_string(),
        TypeRef::Vector(inner) => format!("Gee.ArrayList<{}?>", vala_type(inner)),
        TypeRef::Named(name) => name.clone(),
    }
}

fn primitive_name(primitive: Primitive) -> &'static str {
    match primitive {
        Primitive::Double => "double",
        Primitive::String => "string",
        Primitive::Int32 => "int32",
        Primitive::Int64 => "int64",
        Primitive::Bytes => "Bytes",
        Primitive::Bool => "bool",
    }
}

/// Declared type of a property or parameter, nullable form included.
pub fn argument_type(arg: &ArgumentDescriptor) -> String {
    let ty = vala_type(&arg.ty);
    if arg.nullable { format!("{ty}?") } else { ty }
}
