//! Object model built from a TDLib schema.
//!
//! The model is built in two phases. Documentation lines are staged in a
//! pending constructor; the definition line that follows consumes it, resolves
//! argument types and attaches the finished [`ConstructorDescriptor`] to its
//! type (or wraps it in a [`FunctionDescriptor`]). Finished descriptors are
//! never touched again until [`ModelBuilder::finish`] runs the escaping
//! post-pass and the cross-model checks.
//!
//! # Examples
//!
//! ```
//! use tdvala_core::model::{Model, TypeShape};
//!
//! let schema = "\
//! //@class OptionValue @description Represents the value of an option
//! //@description Represents a string option @value The value of the option
//! optionValueString value:string = OptionValue;
//! //@description Represents an unknown option
//! optionValueEmpty = OptionValue;
//! ---functions---
//! //@description Returns the value of an option. Can be called synchronously @name The name of the option
//! getOption name:string = OptionValue;
//! ";
//!
//! let model = Model::parse(schema).unwrap();
//!
//! assert!(matches!(model.types["OptionValue"].shape(), TypeShape::Family));
//! assert!(model.functions["getOption"].can_be_sync);
//! ```

use crate::error::{SchemaError, SchemaResult};
use crate::naming::{TypeRef, disambiguate, escape_name, resolve_type, to_pascal_case, to_snake_case};
use crate::schema::{Definition, DocTarget, ParamDoc, ParserState, SchemaLine, Section};
use indexmap::IndexMap;
use serde::Serialize;

/// Phrase in a function's documentation that marks it as synchronously callable.
pub const SYNC_MARKER: &str = "Can be called synchronously";

/// One argument of a constructor or function.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArgumentDescriptor {
    /// Escaped argument name.
    pub name: String,

    /// Resolved type.
    pub ty: TypeRef,

    /// Whether the documentation said the value may be null.
    pub nullable: bool,

    /// Documentation lines.
    pub description: Vec<String>,

    /// Literal expression the emitted constructor assigns instead of a parameter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub literal: Option<String>,
}

impl ArgumentDescriptor {
    /// A synthesized argument whose value is always `literal`.
    pub fn synthesized(name: &str, ty: TypeRef, literal: String) -> Self {
        Self {
            name: name.to_string(),
            ty,
            nullable: false,
            description: Vec::new(),
            literal: Some(literal),
        }
    }
}

/// One declared constructor: a variant of a type, or the shape of a function call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConstructorDescriptor {
    /// Name as declared in the schema; also the runtime type tag.
    pub name: String,

    /// Documentation lines.
    pub description: Vec<String>,

    /// Arguments keyed by their schema name, in declaration order.
    pub args: IndexMap<String, ArgumentDescriptor>,
}

/// A declared type and its constructors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeDescriptor {
    /// Escaped, pascal-cased type name.
    pub name: String,

    /// Documentation lines.
    pub description: Vec<String>,

    /// Constructors keyed by their schema name, in declaration order.
    pub constructors: IndexMap<String, ConstructorDescriptor>,
}

/// How a type is emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeShape<'a> {
    /// One class built from the sole constructor.
    Concrete(&'a ConstructorDescriptor),

    /// Abstract base plus one subclass per constructor.
    Family,
}

impl TypeDescriptor {
    fn new(name: String, description: Vec<String>) -> Self {
        Self {
            name,
            description,
            constructors: IndexMap::new(),
        }
    }

    /// Concrete leaf when the only constructor matches the type name, ignoring case.
    pub fn shape(&self) -> TypeShape<'_> {
        match self.constructors.values().next() {
            Some(only)
                if self.constructors.len() == 1 && only.name.eq_ignore_ascii_case(&self.name) =>
            {
                TypeShape::Concrete(only)
            }
            _ => TypeShape::Family,
        }
    }

    fn has_leaf_constructor(&self) -> bool {
        self.constructors
            .values()
            .any(|c| c.name.eq_ignore_ascii_case(&self.name))
    }
}

/// A remote-callable function.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FunctionDescriptor {
    /// Snake-cased call name.
    pub name: String,

    /// Arguments and documentation of the call.
    pub constructor: ConstructorDescriptor,

    /// Declared return type.
    pub return_type: TypeRef,

    /// Whether the documentation contains [`SYNC_MARKER`].
    pub can_be_sync: bool,
}

/// Counts reported after a parse.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ModelSummary {
    pub types: usize,
    pub families: usize,
    pub concrete: usize,
    pub constructors: usize,
    pub functions: usize,
    pub sync_functions: usize,
}

/// The complete, read-only result of one parse.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Model {
    /// Types keyed by their escaped name.
    pub types: IndexMap<String, TypeDescriptor>,

    /// Functions keyed by their schema name.
    pub functions: IndexMap<String, FunctionDescriptor>,
}

impl Model {
    /// Parse schema text into a validated model.
    pub fn parse(schema: &str) -> SchemaResult<Model> {
        let mut builder = ModelBuilder::new();
        for (i, line) in schema.lines().enumerate() {
            builder.feed_line(i + 1, line)?;
        }
        builder.finish()
    }

    /// The declared type a reference points at, if it is a direct named reference.
    pub fn lookup(&self, ty: &TypeRef) -> Option<&TypeDescriptor> {
        match ty {
            TypeRef::Named(name) => self.types.get(name),
            _ => None,
        }
    }

    pub fn summary(&self) -> ModelSummary {
        let families = self
            .types
            .values()
            .filter(|t| matches!(t.shape(), TypeShape::Family))
            .count();

        ModelSummary {
            types: self.types.len(),
            families,
            concrete: self.types.len() - families,
            constructors: self.types.values().map(|t| t.constructors.len()).sum(),
            functions: self.functions.len(),
            sync_functions: self.functions.values().filter(|f| f.can_be_sync).count(),
        }
    }
}

#[derive(Debug, Default)]
struct PendingArgument {
    description: Vec<String>,
    nullable: bool,
}

/// Documentation staged for the next definition line.
#[derive(Debug, Default)]
struct PendingConstructor {
    description: Vec<String>,
    args: IndexMap<String, PendingArgument>,
}

impl PendingConstructor {
    fn add_params(&mut self, params: Vec<ParamDoc>) {
        for param in params {
            let arg = self.args.entry(param.name).or_default();
            arg.nullable |= param.nullable;
            arg.description.push(param.text);
        }
    }
}

/// Streaming model builder, fed one schema line at a time.
#[derive(Debug, Default)]
pub struct ModelBuilder {
    state: ParserState,
    pending: Option<PendingConstructor>,
    types: IndexMap<String, TypeDescriptor>,
    functions: IndexMap<String, FunctionDescriptor>,
}

impl ModelBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Classify and apply one raw schema line. Blank lines are skipped.
    pub fn feed_line(&mut self, line_no: usize, raw: &str) -> SchemaResult<()> {
        let line = raw.trim();
        if line.is_empty() {
            return Ok(());
        }

        let state = std::mem::take(&mut self.state);
        let (state, classified) = state.step(line_no, line)?;
        let section = state.section;
        let target = state.target.clone();
        self.state = state;

        self.apply(line_no, section, target, classified)
    }

    fn apply(
        &mut self,
        line_no: usize,
        section: Section,
        target: Option<DocTarget>,
        line: SchemaLine,
    ) -> SchemaResult<()> {
        match line {
            SchemaLine::Preamble | SchemaLine::Comment => {}
            SchemaLine::SectionDelimiter => {
                tracing::debug!(line = line_no, "entering function declarations");
            }
            SchemaLine::ClassDoc { name, description } => {
                let name = to_pascal_case(&name);
                tracing::debug!(type_name = %name, "class documentation");
                self.types
                    .entry(name.clone())
                    .or_insert_with(|| TypeDescriptor::new(name, Vec::new()))
                    .description = vec![description];
            }
            SchemaLine::EntityDoc {
                description,
                params,
            } => {
                if let Some(stale) = self.pending.take() {
                    tracing::warn!(
                        line = line_no,
                        description = ?stale.description,
                        "documentation block has no definition line"
                    );
                }
                let mut pending = PendingConstructor {
                    description: vec![description],
                    args: IndexMap::new(),
                };
                pending.add_params(params);
                self.pending = Some(pending);
            }
            SchemaLine::ParamDoc(params) => {
                let pending = self.pending_for(line_no, params.first().map(|p| p.name.as_str()))?;
                pending.add_params(params);
            }
            SchemaLine::Continuation(text) => self.continue_doc(line_no, target, text)?,
            SchemaLine::Definition(definition) => match section {
                Section::Types => self.register_constructor(definition),
                Section::Functions => self.register_function(definition),
            },
        }

        Ok(())
    }

    fn pending_for(
        &mut self,
        line_no: usize,
        name: Option<&str>,
    ) -> SchemaResult<&mut PendingConstructor> {
        self.pending
            .as_mut()
            .ok_or_else(|| SchemaError::MissingConstructor {
                line: line_no,
                constructor: name.unwrap_or_default().to_string(),
            })
    }

    fn continue_doc(
        &mut self,
        line_no: usize,
        target: Option<DocTarget>,
        text: String,
    ) -> SchemaResult<()> {
        match target {
            Some(DocTarget::Type(name)) => {
                let name = to_pascal_case(&name);
                if let Some(ty) = self.types.get_mut(&name) {
                    ty.description.push(text);
                }
            }
            Some(DocTarget::Constructor) => {
                self.pending_for(line_no, None)?.description.push(text);
            }
            Some(DocTarget::Argument(arg)) => {
                let pending = self.pending_for(line_no, Some(&arg))?;
                pending.args.entry(arg).or_default().description.push(text);
            }
            None => {
                return Err(SchemaError::MalformedDoc {
                    line: line_no,
                    text,
                });
            }
        }
        Ok(())
    }

    /// Consume the staged documentation and resolve the definition's arguments.
    fn build_constructor(&mut self, definition: &Definition) -> ConstructorDescriptor {
        let mut pending = self.pending.take().unwrap_or_default();

        let mut args = IndexMap::with_capacity(definition.args.len());
        for raw in &definition.args {
            let doc = pending.args.shift_remove(&raw.name).unwrap_or_default();
            let escaped = escape_name(&raw.name);
            let name = disambiguate(&escaped, |candidate| {
                args.values()
                    .any(|arg: &ArgumentDescriptor| arg.name == candidate)
            });
            if name != raw.name {
                tracing::debug!(
                    constructor = %definition.constructor,
                    from = %raw.name,
                    to = %name,
                    "renamed argument"
                );
            }
            args.insert(
                raw.name.clone(),
                ArgumentDescriptor {
                    name,
                    ty: resolve_type(&raw.ty),
                    nullable: doc.nullable,
                    description: doc.description,
                    literal: None,
                },
            );
        }

        for leftover in pending.args.keys() {
            tracing::warn!(
                constructor = %definition.constructor,
                param = %leftover,
                "documented parameter is not declared"
            );
        }

        ConstructorDescriptor {
            name: definition.constructor.clone(),
            description: pending.description,
            args,
        }
    }

    fn register_constructor(&mut self, definition: Definition) {
        let constructor = self.build_constructor(&definition);
        let type_name = to_pascal_case(&definition.result);

        if constructor.name.eq_ignore_ascii_case(&type_name) {
            tracing::debug!(type_name = %type_name, "concrete type");
        } else if !self.types.contains_key(&type_name) {
            tracing::debug!(type_name = %type_name, "undocumented type family");
        }

        self.types
            .entry(type_name.clone())
            .or_insert_with(|| TypeDescriptor::new(type_name, Vec::new()))
            .constructors
            .insert(constructor.name.clone(), constructor);
    }

    fn register_function(&mut self, definition: Definition) {
        let constructor = self.build_constructor(&definition);
        let can_be_sync = constructor
            .description
            .iter()
            .any(|line| line.contains(SYNC_MARKER));

        let function = FunctionDescriptor {
            name: to_snake_case(&definition.constructor),
            constructor,
            return_type: resolve_type(&definition.result),
            can_be_sync,
        };
        tracing::debug!(function = %function.name, can_be_sync, "function");

        self.functions.insert(definition.constructor, function);
    }

    /// Run the escaping post-pass and the cross-model checks.
    pub fn finish(mut self) -> SchemaResult<Model> {
        if let Some(stale) = self.pending.take() {
            tracing::warn!(description = ?stale.description, "trailing documentation block");
        }

        let types = self
            .types
            .into_values()
            .map(|mut ty| {
                ty.name = escape_name(&ty.name);
                for constructor in ty.constructors.values_mut() {
                    escape_arguments(constructor);
                }
                (ty.name.clone(), ty)
            })
            .collect();

        let mut functions = self.functions;
        for function in functions.values_mut() {
            if let TypeRef::Named(name) = &function.return_type {
                function.return_type = TypeRef::Named(escape_name(name));
            }
            escape_arguments(&mut function.constructor);
        }

        let model = Model { types, functions };
        validate(&model)?;

        let summary = model.summary();
        tracing::info!(
            types = summary.types,
            families = summary.families,
            functions = summary.functions,
            "schema parsed"
        );

        Ok(model)
    }
}

fn escape_arguments(constructor: &mut ConstructorDescriptor) {
    for arg in constructor.args.values_mut() {
        arg.name = escape_name(&arg.name);
    }
}

fn validate(model: &Model) -> SchemaResult<()> {
    for ty in model.types.values() {
        if ty.has_leaf_constructor() && ty.constructors.len() > 1 {
            return Err(SchemaError::StructuralViolation {
                type_name: ty.name.clone(),
                constructors: ty.constructors.len(),
            });
        }

        for constructor in ty.constructors.values() {
            check_arguments(model, constructor)?;
        }
    }

    for function in model.functions.values() {
        check_arguments(model, &function.constructor)?;
        check_reference(
            model,
            &function.return_type,
            || format!("return type of {}", function.constructor.name),
        )?;
    }

    Ok(())
}

fn check_arguments(model: &Model, constructor: &ConstructorDescriptor) -> SchemaResult<()> {
    for arg in constructor.args.values() {
        check_reference(model, &arg.ty, || {
            format!("argument '{}' of {}", arg.name, constructor.name)
        })?;
    }
    Ok(())
}

fn check_reference(
    model: &Model,
    ty: &TypeRef,
    entity: impl FnOnce() -> String,
) -> SchemaResult<()> {
    match ty.referenced_name() {
        Some(name) if !model.types.contains_key(name) => Err(SchemaError::UnresolvedType {
            entity: entity(),
            name: name.to_string(),
        }),
        _ => Ok(()),
    }
}
