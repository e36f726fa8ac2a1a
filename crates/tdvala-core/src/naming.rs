//! Naming convention utilities for code generation.
//!
//! This module converts schema identifiers into the names used by the emitted
//! Vala sources, escapes identifiers that collide with reserved words, and
//! resolves raw schema type tokens into [`TypeRef`] values.
//!
//! # Supported Conversions
//!
//! | Input | Function | Output |
//! |-------|----------|--------|
//! | `camelCase` / `snake_case` | [`to_pascal_case`] | `PascalCase` |
//! | `camelCase` | [`to_snake_case`] | `snake_case` |
//! | `PascalCase` / `snake_case` | [`to_kebab_case`] | `kebab-case` |
//! | `type` | [`escape_name`] | `type_` |

use serde::Serialize;

/// Identifiers that cannot be used verbatim as Vala property or parameter names.
///
/// `type`, `id` and `object_type` clash with GObject members; the rest are
/// Vala keywords that the schema uses as argument names.
pub const RESERVED_WORDS: &[&str] = &[
    "type",
    "id",
    "object_type",
    "class",
    "default",
    "out",
    "ref",
    "namespace",
    "interface",
    "delegate",
    "signal",
    "lock",
    "owned",
    "unowned",
    "weak",
    "var",
    "new",
    "base",
    "this",
    "params",
    "construct",
];

/// Suffix appended to identifiers that collide with [`RESERVED_WORDS`].
pub const ESCAPE_SUFFIX: char = '_';

/// Primitive types understood by the generated runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Primitive {
    Double,
    String,
    Int32,
    Int64,
    Bytes,
    Bool,
}

impl Primitive {
    /// Look up a raw schema token in the primitive table.
    ///
    /// `int53` widens to [`Primitive::Int64`].
    pub fn from_schema(token: &str) -> Option<Self> {
        match token {
            "double" => Some(Primitive::Double),
            "string" => Some(Primitive::String),
            "int32" => Some(Primitive::Int32),
            "int53" | "int64" => Some(Primitive::Int64),
            "bytes" => Some(Primitive::Bytes),
            "Bool" => Some(Primitive::Bool),
            _ => None,
        }
    }
}

/// A resolved argument type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "of", rename_all = "snake_case")]
pub enum TypeRef {
    /// One of the fixed primitive types.
    Primitive(Primitive),

    /// Generic collection of another resolved type (`vector<T>`).
    Vector(Box<TypeRef>),

    /// Reference to a declared type, by its pascal-cased name.
    Named(String),
}

impl TypeRef {
    /// The declared type this reference ultimately points at, if any.
    ///
    /// Collections are unwrapped, so `vector<vector<Chat>>` yields `Chat`.
    pub fn referenced_name(&self) -> Option<&str> {
        match self {
            TypeRef::Primitive(_) => None,
            TypeRef::Vector(inner) => inner.referenced_name(),
            TypeRef::Named(name) => Some(name),
        }
    }

    /// Whether this is a generic collection.
    pub fn is_vector(&self) -> bool {
        matches!(self, TypeRef::Vector(_))
    }
}

/// Resolve a raw schema type token.
///
/// Primitive table first, then `vector<...>` unwrap-and-recurse, otherwise a
/// reference to another declared type.
///
/// # Examples
///
/// ```
/// use tdvala_core::naming::{resolve_type, Primitive, TypeRef};
///
/// assert_eq!(resolve_type("int53"), TypeRef::Primitive(Primitive::Int64));
/// assert_eq!(
///     resolve_type("vector<string>"),
///     TypeRef::Vector(Box::new(TypeRef::Primitive(Primitive::String)))
/// );
/// assert_eq!(resolve_type("chatType"), TypeRef::Named("ChatType".to_string()));
/// ```
pub fn resolve_type(token: &str) -> TypeRef {
    if let Some(primitive) = Primitive::from_schema(token) {
        return TypeRef::Primitive(primitive);
    }

    if let Some(inner) = token
        .strip_prefix("vector<")
        .and_then(|rest| rest.strip_suffix('>'))
    {
        return TypeRef::Vector(Box::new(resolve_type(inner)));
    }

    TypeRef::Named(to_pascal_case(token))
}

/// Convert camelCase, snake_case or kebab-case to PascalCase.
///
/// # Examples
///
/// ```
/// use tdvala_core::naming::to_pascal_case;
///
/// assert_eq!(to_pascal_case("getOption"), "GetOption");
/// assert_eq!(to_pascal_case("get_option"), "GetOption");
/// assert_eq!(to_pascal_case("Update"), "Update");
/// ```
pub fn to_pascal_case(s: &str) -> String {
    s.split(['-', '_'])
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                None => String::new(),
                Some(first) => first.to_uppercase().chain(chars).collect(),
            }
        })
        .collect()
}

/// Convert camelCase or PascalCase to snake_case.
///
/// Every uppercase letter after the first character starts a new word.
///
/// # Examples
///
/// ```
/// use tdvala_core::naming::to_snake_case;
///
/// assert_eq!(to_snake_case("getOption"), "get_option");
/// assert_eq!(to_snake_case("setTdlibParameters"), "set_tdlib_parameters");
/// ```
pub fn to_snake_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len() + 8);

    for (i, c) in s.chars().enumerate() {
        if c.is_uppercase() && i != 0 {
            result.push('_');
        }
        result.extend(c.to_lowercase());
    }

    result
}

/// Convert PascalCase or snake_case to kebab-case, for output file names.
///
/// # Examples
///
/// ```
/// use tdvala_core::naming::to_kebab_case;
///
/// assert_eq!(to_kebab_case("OptionValue"), "option-value");
/// assert_eq!(to_kebab_case("get_option"), "get-option");
/// assert_eq!(to_kebab_case("TDObject"), "t-d-object");
/// ```
pub fn to_kebab_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len() + 8);

    for (i, c) in s.chars().enumerate() {
        if c == '_' {
            result.push('-');
            continue;
        }
        if c.is_uppercase() && i != 0 {
            result.push('-');
        }
        result.extend(c.to_lowercase());
    }

    result
}

/// Whether `name` collides with a reserved identifier.
pub fn is_reserved(name: &str) -> bool {
    RESERVED_WORDS.contains(&name)
}

/// Escape a name against [`RESERVED_WORDS`] by appending [`ESCAPE_SUFFIX`].
///
/// Idempotent: an escaped name is never reserved, so escaping it again is a no-op.
///
/// # Examples
///
/// ```
/// use tdvala_core::naming::escape_name;
///
/// assert_eq!(escape_name("type"), "type_");
/// assert_eq!(escape_name("type_"), "type_");
/// assert_eq!(escape_name("chat_id"), "chat_id");
/// ```
pub fn escape_name(name: &str) -> String {
    if is_reserved(name) {
        format!("{name}{ESCAPE_SUFFIX}")
    } else {
        name.to_string()
    }
}

/// Append [`ESCAPE_SUFFIX`] to `name` until `taken` no longer claims it.
///
/// # Examples
///
/// ```
/// use tdvala_core::naming::disambiguate;
///
/// let used = ["type_", "type__"];
/// assert_eq!(disambiguate("type_", |n| used.contains(&n)), "type___");
/// assert_eq!(disambiguate("chat_id", |n| used.contains(&n)), "chat_id");
/// ```
pub fn disambiguate(name: &str, taken: impl Fn(&str) -> bool) -> String {
    let mut candidate = name.to_string();
    while taken(&candidate) {
        candidate.push(ESCAPE_SUFFIX);
    }
    candidate
}
