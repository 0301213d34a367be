//! Per-command view of a document, showing how each key ranks.

use serde::Serialize;

use crate::command::{reorder_single_command, CitationKey};
use crate::document::{line_number, scan_commands};

/// A citation command with its keys, ranks and sorted form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InspectedCommand {
    /// One-based line the command starts on
    pub line: usize,
    /// The command as written
    pub original: String,
    /// Marker and decoration
    pub prefix: String,
    /// Keys in their original order
    pub keys: Vec<CitationKey>,
    /// The command as it would be rewritten
    pub sorted: String,
}

impl InspectedCommand {
    pub fn is_sorted(&self) -> bool {
        self.original == self.sorted
    }
}

/// Describes every citation command in the document.
pub fn inspect(document: &str) -> Vec<InspectedCommand> {
    scan_commands(document)
        .into_iter()
        .map(|command| {
            let (start, end) = command.span;
            let original = &document[start..end];
            InspectedCommand {
                line: line_number(document, start),
                original: original.to_string(),
                keys: command.keys(),
                sorted: reorder_single_command(original).into_owned(),
                prefix: command.prefix,
            }
        })
        .collect()
}

/// Renders inspected commands as indented plain text.
///
/// ```text
/// line 3: \cite{smith2021,doe2010}
///   prefix: \cite
///   smith2021  smith2021
///   doe2010    doe2010
///   -> \cite{doe2010,smith2021}
/// ```
pub fn render_text(commands: &[InspectedCommand]) -> String {
    let mut out = String::new();

    for command in commands {
        out.push_str(&format!("line {}: {}\n", command.line, command.original));
        out.push_str(&format!("  prefix: {}\n", command.prefix));

        let width = command
            .keys
            .iter()
            .map(|key| key.text.chars().count())
            .max()
            .unwrap_or(0);
        for key in &command.keys {
            out.push_str(&format!("  {:<width$}  {}\n", key.text, key.rank, width = width));
        }

        if !command.is_sorted() {
            out.push_str(&format!("  -> {}\n", command.sorted));
        }
    }

    out
}
