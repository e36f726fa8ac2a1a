//! File headers and doc-comment blocks.

use crate::config::EmitSettings;

/// Column at which documentation text is wrapped.
pub const DOC_WIDTH: usize = 70;

/// Notice stamped under the license header of every generated file.
pub const GENERATED_NOTICE: &str = "// THIS CODE WAS GENERATED, DON'T MODIFY IT";

const INDENT: &str = "    ";

/// License header plus the generated-file notice, without a trailing newline.
pub fn file_header(settings: &EmitSettings) -> String {
    let holder = match (settings.year, settings.author.trim()) {
        (Some(year), "") => Some(year.to_string()),
        (Some(year), author) => Some(format!("{year} {author}")),
        (None, "") => None,
        (None, author) => Some(author.to_string()),
    };

    let mut header = String::from("/*\n");
    if let Some(holder) = holder {
        header.push_str(&format!(" * Copyright (C) {holder}\n *\n"));
    }
    header.push_str(&format!(" * SPDX-License-Identifier: {}\n", settings.license));
    header.push_str(" */\n\n");
    header.push_str(GENERATED_NOTICE);
    header
}

/// Greedy word wrap at `width` columns.
///
/// A single word longer than `width` is kept whole on its own line. Blank
/// input yields one empty line.
///
/// # Examples
///
/// ```
/// use tdvala_core::emit::wrap_words;
///
/// assert_eq!(wrap_words("one two three", 7), vec!["one two", "three"]);
/// assert_eq!(wrap_words("", 7), vec![""]);
/// ```
pub fn wrap_words(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
        } else if current.chars().count() + 1 + word.chars().count() <= width {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
        }
    }

    lines.push(current);
    lines
}

/// A `/** ... */` block at `depth` levels of indentation, one wrapped line per
/// row. Empty when every documentation line is blank.
pub fn doc_block(lines: &[String], depth: usize) -> String {
    if lines.iter().all(|line| line.trim().is_empty()) {
        return String::new();
    }

    let indent = INDENT.repeat(depth);
    let mut block = format!("{indent}/**\n");
    for line in lines {
        for row in wrap_words(line, DOC_WIDTH) {
            if row.is_empty() {
                block.push_str(&format!("{indent} *\n"));
            } else {
                block.push_str(&format!("{indent} * {row}\n"));
            }
        }
    }
    block.push_str(&format!("{indent} */\n"));
    block
}
