//! Author/year rank derivation for citation keys.
//!
//! Citation keys such as `smith2020a` conventionally carry an author name
//! followed by a four-digit year. The rank built here is only ever used to
//! compare keys against each other; it is never written back to the document.

use std::sync::LazyLock;

use regex::Regex;

/// Author word characters, a four-digit year, then an optional word suffix.
///
/// Classes are ASCII only, so keys like `müller2019` rank on `ller2019`.
static AUTHOR_YEAR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([A-Za-z0-9_]+)([0-9]{4})(?:[A-Za-z0-9_]+)?").unwrap()
});

/// Derives the comparison rank for a single (already trimmed) citation key.
///
/// The rank is the author fragment concatenated with the year rendered as a
/// plain integer. Keys with no recognizable year rank as `"0"`, which sorts
/// before any key starting with a letter.
///
/// # Examples
///
/// ```
/// use citesort::extract_sort_key;
///
/// assert_eq!(extract_sort_key("smith2020a"), "smith2020");
/// assert_eq!(extract_sort_key("smith2020"), "smith2020");
/// assert_eq!(extract_sort_key("xx"), "0");
/// ```
pub fn extract_sort_key(key: &str) -> String {
    let (author, year) = match AUTHOR_YEAR_RE.captures(key) {
        Some(cap) => {
            let author = cap.get(1).map_or("", |m| m.as_str());
            let year = cap
                .get(2)
                .and_then(|m| m.as_str().parse::<u32>().ok())
                .unwrap_or(0);
            (author, year)
        }
        None => ("", 0),
    };

    format!("{}{}", author, year)
}
