//! Request-object files, one per function.

use super::constructor_class_name;
use super::types::{ClassShape, Visibility};
use crate::config::EmitSettings;
use crate::model::FunctionDescriptor;

/// Render the internal request class for one function.
///
/// Shaped like a concrete leaf whose fields are the call's arguments. Request
/// objects always carry the type tag and correlation id.
pub fn render_function(function: &FunctionDescriptor, settings: &EmitSettings) -> String {
    ClassShape {
        visibility: Visibility::Internal,
        name: constructor_class_name(&function.constructor),
        parent: &settings.root_class,
        constructor: &function.constructor,
        tagged: true,
    }
    .render(&settings.namespace)
}
