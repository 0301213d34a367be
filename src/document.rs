//! Whole-document scanning and rewriting.
//!
//! Commands are found left to right without overlap; the first match wins.
//! Text outside of commands is never touched, and a command that is missing
//! its closing brace is simply not a match.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::command::{reorder_single_command, CitationCommand, COMMAND_PATTERN};

static COMMAND_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(COMMAND_PATTERN).unwrap());

/// Finds every citation command in the document.
///
/// # Examples
///
/// ```
/// use citesort::scan_commands;
///
/// let commands = scan_commands(r"See \citep[p.~4]{b2000, a1999} and \cite{c2001}.");
/// assert_eq!(commands.len(), 2);
/// assert_eq!(commands[0].prefix, r"\citep[p.~4]");
/// assert_eq!(commands[0].raw_keys, "b2000, a1999");
/// ```
pub fn scan_commands(document: &str) -> Vec<CitationCommand> {
    COMMAND_RE
        .captures_iter(document)
        .filter_map(|cap| {
            let full_match = cap.get(0)?;
            Some(CitationCommand {
                prefix: cap.get(1)?.as_str().to_string(),
                raw_keys: cap.get(2)?.as_str().to_string(),
                span: (full_match.start(), full_match.end()),
            })
        })
        .collect()
}

/// A command whose text changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Replacement {
    /// Start and end byte positions in the original document
    pub span: (usize, usize),
    /// The rewritten command
    pub text: String,
}

/// The result of rewriting a document.
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    /// The rewritten document
    pub output: String,
    /// Number of citation commands found
    pub commands: usize,
    /// Commands whose text changed, in document order
    pub changes: Vec<Replacement>,
}

impl Transform {
    /// True when the document was already in sorted, normalized form.
    pub fn is_unchanged(&self) -> bool {
        self.changes.is_empty()
    }
}

/// Rewrites every citation command and reports what changed.
///
/// Commands come out of the scanner in order and never overlap, so the
/// output is built in one pass: the text before each command, then the
/// command (rewritten or not), then whatever follows the last one.
pub fn transform(document: &str) -> Transform {
    let commands = scan_commands(document);

    let mut output = String::with_capacity(document.len());
    let mut changes = Vec::new();
    let mut last_end = 0;

    for command in &commands {
        let (start, end) = command.span;
        let original = &document[start..end];
        output.push_str(&document[last_end..start]);

        match reorder_single_command(original) {
            Cow::Owned(text) if text != original => {
                log::trace!("{} -> {}", original, text);
                output.push_str(&text);
                changes.push(Replacement {
                    span: command.span,
                    text,
                });
            }
            _ => output.push_str(original),
        }

        last_end = end;
    }
    output.push_str(&document[last_end..]);

    log::debug!(
        "found {} citation command(s), {} rewritten",
        commands.len(),
        changes.len()
    );

    Transform {
        output,
        commands: commands.len(),
        changes,
    }
}

/// Sorts the keys of every citation command in the document.
///
/// This never fails: anything that does not parse as a command is copied
/// through as-is.
///
/// # Examples
///
/// ```
/// use citesort::transform_document;
///
/// assert_eq!(
///     transform_document(r"Some text \cite{b2000,a1999} more text."),
///     r"Some text \cite{a1999,b2000} more text."
/// );
/// ```
pub fn transform_document(document: &str) -> String {
    transform(document).output
}

/// One-based line number of a byte offset.
pub fn line_number(document: &str, offset: usize) -> usize {
    let offset = offset.min(document.len());
    document.as_bytes()[..offset]
        .iter()
        .filter(|&&b| b == b'\n')
        .count()
        + 1
}
