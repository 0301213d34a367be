//! citesort: sort the keys inside LaTeX citation commands by author and year.
//!
//! This library provides functionality to:
//! - Find `\cite`-style commands in free-form text
//! - Derive an author/year rank for each citation key
//! - Rewrite each key list in rank order, leaving all other text untouched
//! - Read and write documents for the command-line front end

pub mod command;
pub mod document;
pub mod inspect;
pub mod sortkey;
pub mod source;

pub use command::{reorder_single_command, CitationCommand, CitationKey};
pub use document::{scan_commands, transform, transform_document, Replacement, Transform};
pub use inspect::{inspect, render_text, InspectedCommand};
pub use sortkey::extract_sort_key;
pub use source::{read_document, write_document, SourceError};
