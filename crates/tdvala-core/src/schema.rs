//! Schema line classifier and documentation parser.
//!
//! The TDLib schema is line oriented. Each trimmed, non-blank line is one of:
//!
//! ```text
//! //@class AuthorizationState @description Represents the current state   <- class doc
//! //@description Some text @param_a About a @b About b                    <- entity doc
//! //@c About c                                                            <- parameter doc
//! //-continued text for the last documented entity                        <- continuation
//! ---functions---                                                         <- section delimiter
//! setOption name:string value:OptionValue = Ok;                           <- definition
//! ```
//!
//! Classification is a pure function of the line and an explicit
//! [`ParserState`], which is threaded by value through [`ParserState::step`]
//! and returned updated. Nothing here builds the model; see
//! [`crate::model::ModelBuilder`] for that.

use crate::error::{SchemaError, SchemaResult};

/// Literal marking the start of the function declarations.
pub const FUNCTIONS_DELIMITER: &str = "---functions---";

/// Phrase in a parameter description that makes the argument nullable.
pub const NULLABLE_MARKER: &str = "may be null";

const COMMENT_PREFIX: &str = "//";
const TAG_PREFIX: &str = "//@";
const CLASS_TAG: &str = "//@class";
const DESCRIPTION_TAG: &str = "//@description";
const CONTINUATION_PREFIX: &str = "//-";
const DESCRIPTION_KEYWORD: &str = "description";
const PARAM_KEYWORD_PREFIX: &str = "param_";

/// Which half of the schema is being read. The transition is one-way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Section {
    #[default]
    Types,
    Functions,
}

/// The entity that continuation lines attach to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocTarget {
    /// A type introduced by a class doc line.
    Type(String),

    /// The pending constructor introduced by the last description line.
    Constructor,

    /// A documented parameter of the pending constructor.
    Argument(String),
}

/// Parser state threaded through line classification.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParserState {
    /// Current schema half.
    pub section: Section,

    /// Whether the first comment line has been seen. Lines before it are the
    /// built-in primitive declarations and are skipped.
    pub started: bool,

    /// Where the next continuation line goes.
    pub target: Option<DocTarget>,
}

/// One documented parameter fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamDoc {
    /// Parameter name with any `param_` prefix removed.
    pub name: String,

    /// Free text following the name.
    pub text: String,

    /// Whether the text contains [`NULLABLE_MARKER`].
    pub nullable: bool,
}

impl ParamDoc {
    fn new(name: &str, text: &str) -> Self {
        let name = name.strip_prefix(PARAM_KEYWORD_PREFIX).unwrap_or(name);
        let text = text.trim();

        Self {
            name: name.to_string(),
            text: text.to_string(),
            nullable: text.contains(NULLABLE_MARKER),
        }
    }
}

/// A `name:type` token of a definition line, unresolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawArgument {
    pub name: String,
    pub ty: String,
}

/// A tokenized definition line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Definition {
    /// Declared constructor (or function) name, first token.
    pub constructor: String,

    /// Arguments in declaration order.
    pub args: Vec<RawArgument>,

    /// Declared type (or return type) name, last token.
    pub result: String,
}

/// A classified schema line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaLine {
    /// A line before the first comment.
    Preamble,

    /// The functions delimiter.
    SectionDelimiter,

    /// `//@class <Name> @description <text>`
    ClassDoc { name: String, description: String },

    /// `//@description <text> [@param_<name> <text>]...`
    EntityDoc {
        description: String,
        params: Vec<ParamDoc>,
    },

    /// `//@param_<name> <text>` or `//@<name> <text>`, possibly several on one line.
    ParamDoc(Vec<ParamDoc>),

    /// `//-<text>`
    Continuation(String),

    /// Any other comment.
    Comment,

    /// A type or function declaration.
    Definition(Definition),
}

impl ParserState {
    /// Classify one trimmed, non-blank line and return the updated state.
    ///
    /// `line_no` is 1-based and only used in diagnostics.
    pub fn step(self, line_no: usize, line: &str) -> SchemaResult<(ParserState, SchemaLine)> {
        let classified = self.classify(line_no, line)?;
        let next = self.advance(line_no, &classified)?;
        Ok((next, classified))
    }

    fn classify(&self, line_no: usize, line: &str) -> SchemaResult<SchemaLine> {
        if line.contains(FUNCTIONS_DELIMITER) {
            return Ok(SchemaLine::SectionDelimiter);
        }

        let is_comment = line.starts_with(COMMENT_PREFIX);
        if !self.started && !is_comment {
            return Ok(SchemaLine::Preamble);
        }

        if line.starts_with(CLASS_TAG) {
            return parse_class_doc(line_no, line);
        }

        if line.starts_with(DESCRIPTION_TAG) {
            let mut description = String::new();
            let mut params = Vec::new();
            for tag in split_tags(&line[TAG_PREFIX.len()..]) {
                match tag {
                    Tag::Description(text) => description = text,
                    Tag::Param(param) => params.push(param),
                }
            }
            return Ok(SchemaLine::EntityDoc {
                description,
                params,
            });
        }

        if line.starts_with(TAG_PREFIX) {
            let params = split_tags(&line[TAG_PREFIX.len()..])
                .into_iter()
                .filter_map(|tag| match tag {
                    Tag::Param(param) => Some(param),
                    Tag::Description(_) => None,
                })
                .collect();
            return Ok(SchemaLine::ParamDoc(params));
        }

        if let Some(text) = line.strip_prefix(CONTINUATION_PREFIX) {
            return Ok(SchemaLine::Continuation(text.trim().to_string()));
        }

        if is_comment {
            return Ok(SchemaLine::Comment);
        }

        parse_definition(line_no, line).map(SchemaLine::Definition)
    }

    fn advance(mut self, line_no: usize, line: &SchemaLine) -> SchemaResult<ParserState> {
        match line {
            SchemaLine::Preamble => {}
            SchemaLine::Comment => {
                self.started = true;
            }
            SchemaLine::SectionDelimiter => {
                self.section = Section::Functions;
                self.target = None;
            }
            SchemaLine::ClassDoc { name, .. } => {
                self.started = true;
                self.target = Some(DocTarget::Type(name.clone()));
            }
            SchemaLine::EntityDoc { params, .. } => {
                self.started = true;
                self.target = Some(match params.last() {
                    Some(param) => DocTarget::Argument(param.name.clone()),
                    None => DocTarget::Constructor,
                });
            }
            SchemaLine::ParamDoc(params) => {
                self.started = true;
                if let Some(param) = params.last() {
                    self.target = Some(DocTarget::Argument(param.name.clone()));
                }
            }
            SchemaLine::Continuation(text) => {
                if self.target.is_none() {
                    return Err(SchemaError::MalformedDoc {
                        line: line_no,
                        text: format!("{CONTINUATION_PREFIX}{text}"),
                    });
                }
            }
            SchemaLine::Definition(_) => {
                self.target = None;
            }
        }

        Ok(self)
    }
}

enum Tag {
    Description(String),
    Param(ParamDoc),
}

/// Split the body of a tag line (everything after the leading `//@`) into tags.
///
/// A new tag starts at an `@` that follows whitespace and is immediately
/// followed by an identifier character; any other `@` is part of the text.
fn split_tags(body: &str) -> Vec<Tag> {
    let mut fragments = Vec::new();
    let mut start = 0;
    let bytes = body.as_bytes();

    for (i, &b) in bytes.iter().enumerate() {
        if b != b'@' || i == 0 {
            continue;
        }
        let after_space = bytes[i - 1].is_ascii_whitespace();
        let starts_ident = bytes
            .get(i + 1)
            .is_some_and(|c| c.is_ascii_alphabetic() || *c == b'_');
        if after_space && starts_ident {
            fragments.push(&body[start..i]);
            start = i + 1;
        }
    }
    fragments.push(&body[start..]);

    fragments
        .into_iter()
        .filter_map(|fragment| {
            let fragment = fragment.trim();
            let (name, text) = fragment
                .split_once(char::is_whitespace)
                .unwrap_or((fragment, ""));
            if name.is_empty() {
                return None;
            }
            if name == DESCRIPTION_KEYWORD {
                Some(Tag::Description(text.trim().to_string()))
            } else {
                Some(Tag::Param(ParamDoc::new(name, text)))
            }
        })
        .collect()
}

fn parse_class_doc(line_no: usize, line: &str) -> SchemaResult<SchemaLine> {
    let body = &line[CLASS_TAG.len()..];
    let (head, description) = match body.split_once("@description") {
        Some((head, description)) => (head, description.trim()),
        None => (body, ""),
    };

    let name = head
        .split_whitespace()
        .last()
        .ok_or_else(|| SchemaError::MalformedDoc {
            line: line_no,
            text: line.to_string(),
        })?;

    Ok(SchemaLine::ClassDoc {
        name: name.to_string(),
        description: description.to_string(),
    })
}

/// Tokenize `<Name> <arg>:<type> ... = <Type>;`.
pub fn parse_definition(line_no: usize, line: &str) -> SchemaResult<Definition> {
    let body = line.trim_end().trim_end_matches(';');
    let tokens: Vec<&str> = body.split_whitespace().filter(|t| *t != "=").collect();

    let (constructor, rest) = tokens
        .split_first()
        .ok_or_else(|| SchemaError::Tokenization {
            line: line_no,
            token: line.to_string(),
        })?;
    let (result, middle) = rest.split_last().ok_or_else(|| SchemaError::Tokenization {
        line: line_no,
        token: line.to_string(),
    })?;

    let args = middle
        .iter()
        .map(|token| {
            token
                .split_once(':')
                .map(|(name, ty)| RawArgument {
                    name: name.to_string(),
                    ty: ty.to_string(),
                })
                .ok_or_else(|| SchemaError::Tokenization {
                    line: line_no,
                    token: token.to_string(),
                })
        })
        .collect::<SchemaResult<Vec<_>>>()?;

    Ok(Definition {
        constructor: constructor.to_string(),
        args,
        result: result.to_string(),
    })
}
