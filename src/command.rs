//! Single citation command parsing and key reordering.
//!
//! A command is the marker `\cite`, an optional decoration (`p`, `t`, `*`,
//! `[p.~5]`, ...) and a brace-delimited, comma-separated key list, as in
//! `\citep[see][p.~12]{jones2019b, adams2005}`. Everything up to the opening
//! brace is the prefix; the text between the braces is the raw key list.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::sortkey::extract_sort_key;

/// Body of the command pattern shared by the document scanner.
///
/// Neither the decoration nor the key list may contain a line break, so a
/// command still missing its closing brace never reaches into later lines.
/// The key list runs up to the first closing brace.
pub(crate) const COMMAND_PATTERN: &str = r"(\\cite[^{}\n]*)\{([^}\n]*)\}";

static SINGLE_COMMAND_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!("^{}$", COMMAND_PATTERN)).unwrap()
});

/// A citation key together with the rank it is ordered by.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CitationKey {
    /// The trimmed key text (e.g. "smith2020a")
    pub text: String,
    /// Author fragment plus year (e.g. "smith2020")
    pub rank: String,
}

impl CitationKey {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            rank: extract_sort_key(text),
        }
    }
}

/// A citation command found in a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CitationCommand {
    /// Marker and decoration, everything before the opening brace
    pub prefix: String,
    /// Verbatim text between the braces
    pub raw_keys: String,
    /// Start and end byte positions in the source text
    pub span: (usize, usize),
}

impl CitationCommand {
    /// The trimmed keys in their original order.
    ///
    /// An empty key list still yields one (empty) key, the same way splitting
    /// an empty string on commas yields one piece.
    pub fn keys(&self) -> Vec<CitationKey> {
        split_keys(&self.raw_keys)
            .into_iter()
            .map(CitationKey::new)
            .collect()
    }
}

/// Splits a raw key list on commas and trims every piece.
fn split_keys(raw_keys: &str) -> Vec<&str> {
    raw_keys.split(',').map(str::trim).collect()
}

/// Returns the keys sorted by rank, or `None` for zero or one key.
///
/// `sort_by` is stable, so keys of equal rank keep their relative order.
fn sorted_keys(raw_keys: &str) -> Option<Vec<&str>> {
    let keys = split_keys(raw_keys);
    if keys.len() <= 1 {
        return None;
    }

    let mut ranked: Vec<(String, &str)> = keys
        .into_iter()
        .map(|key| (extract_sort_key(key), key))
        .collect();
    ranked.sort_by(|a, b| a.0.cmp(&b.0));

    Some(ranked.into_iter().map(|(_, key)| key).collect())
}

/// Reorders the keys of one citation command by author/year rank.
///
/// The input must be exactly one command, marker through closing brace.
/// Anything else, and any command with fewer than two keys, is returned
/// unchanged without being rebuilt. Keys in a rebuilt command are trimmed
/// and joined with bare commas.
///
/// # Examples
///
/// ```
/// use citesort::reorder_single_command;
///
/// assert_eq!(
///     reorder_single_command(r"\citep{jones2019b, adams2005}"),
///     r"\citep{adams2005,jones2019b}"
/// );
/// assert_eq!(reorder_single_command(r"\cite{ solo2020 }"), r"\cite{ solo2020 }");
/// ```
pub fn reorder_single_command(raw: &str) -> Cow<'_, str> {
    let Some(cap) = SINGLE_COMMAND_RE.captures(raw) else {
        return Cow::Borrowed(raw);
    };
    let prefix = cap.get(1).map_or("", |m| m.as_str());
    let body = cap.get(2).map_or("", |m| m.as_str());

    match sorted_keys(body) {
        Some(keys) => Cow::Owned(format!("{}{{{}}}", prefix, keys.join(","))),
        None => Cow::Borrowed(raw),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_keys_swapped() {
        assert_eq!(
            reorder_single_command(r"\cite{smith2021,doe2010}"),
            r"\cite{doe2010,smith2021}"
        );
    }

    #[test]
    fn test_prefix_is_preserved() {
        // Given: a command with optional arguments in its prefix
        let raw = r"\citep[see][p.~12]{jones2019b,adams2005}";

        // When: we reorder it
        let result = reorder_single_command(raw);

        // Then: only the key list changes
        assert_eq!(result, r"\citep[see][p.~12]{adams2005,jones2019b}");
    }

    #[test]
    fn test_whitespace_is_normalized_when_rebuilt() {
        assert_eq!(
            reorder_single_command("\\cite{ b2000 ,\t  a1999 }"),
            r"\cite{a1999,b2000}"
        );
    }

    #[test]
    fn test_already_sorted_is_still_normalized() {
        assert_eq!(
            reorder_single_command(r"\cite{a1999, b2000}"),
            r"\cite{a1999,b2000}"
        );
    }

    #[test]
    fn test_single_key_passthrough() {
        let raw = r"\cite{  onlyone2020  }";
        let result = reorder_single_command(raw);
        assert!(matches!(result, Cow::Borrowed(_)));
        assert_eq!(result, raw);
    }

    #[test]
    fn test_empty_key_list_passthrough() {
        assert_eq!(reorder_single_command(r"\cite{}"), r"\cite{}");
        assert_eq!(reorder_single_command(r"\cite{   }"), r"\cite{   }");
    }

    #[test]
    fn test_not_a_command_passthrough() {
        assert_eq!(reorder_single_command("plain text"), "plain text");
        assert_eq!(reorder_single_command(r"\cite{a2000,b1999"), r"\cite{a2000,b1999");
        assert_eq!(
            reorder_single_command(r"x \cite{b2000,a1999}"),
            r"x \cite{b2000,a1999}"
        );
        assert_eq!(
            reorder_single_command("\\cite{b2000,\na1999}"),
            "\\cite{b2000,\na1999}"
        );
    }

    #[test]
    fn test_keys_without_year_come_first() {
        assert_eq!(
            reorder_single_command(r"\cite{xx,smith2020}"),
            r"\cite{xx,smith2020}"
        );
        assert_eq!(
            reorder_single_command(r"\cite{smith2020,xx}"),
            r"\cite{xx,smith2020}"
        );
    }

    #[test]
    fn test_equal_ranks_keep_original_order() {
        // Given: keys that differ only in their suffix
        // When: we reorder them
        // Then: they stay in the order they were written
        assert_eq!(
            reorder_single_command(r"\cite{smith2020b,abel1990,smith2020a}"),
            r"\cite{abel1990,smith2020b,smith2020a}"
        );
        assert_eq!(
            reorder_single_command(r"\cite{zz,smith2020,aa}"),
            r"\cite{zz,aa,smith2020}"
        );
    }

    #[test]
    fn test_empty_entries_are_kept() {
        assert_eq!(
            reorder_single_command(r"\cite{b1999,,a2000}"),
            r"\cite{,a2000,b1999}"
        );
    }

    #[test]
    fn test_rank_uses_author_before_year() {
        // Alphabetical by author first, year only breaks ties
        assert_eq!(
            reorder_single_command(r"\cite{baker1990,adams2020,adams2001}"),
            r"\cite{adams2001,adams2020,baker1990}"
        );
    }

    #[test]
    fn test_command_keys() {
        let command = CitationCommand {
            prefix: r"\cite".to_string(),
            raw_keys: " smith2020a , xx".to_string(),
            span: (0, 23),
        };

        let keys = command.keys();

        assert_eq!(keys.len(), 2);
        assert_eq!(keys[0].text, "smith2020a");
        assert_eq!(keys[0].rank, "smith2020");
        assert_eq!(keys[1].text, "xx");
        assert_eq!(keys[1].rank, "0");
    }
}
