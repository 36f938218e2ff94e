// crates/tapaterra-core/src/text.rs

/// Convert a string into a folded key suitable for indexing and comparison.
///
/// This performs:
/// 1\) Transliterate Unicode → ASCII (e.g. `Côte d'Ivoire` -> `Cote d'Ivoire`)
/// 2\) Normalize to lowercase
/// 3\) Trim surrounding whitespace
///
/// # Examples
///
/// ```rust
/// use tapaterra_core::text::fold_key;
///
/// assert_eq!(fold_key("Côte d'Ivoire"), "cote d'ivoire");
/// assert_eq!(fold_key(" Åland Islands "), "aland islands");
/// ```
pub fn fold_key(s: &str) -> String {
    deunicode::deunicode(s.trim()).to_lowercase()
}

/// Compares two strings for equality after Unicode folding.
///
/// ```rust
/// use tapaterra_core::text::equals_folded;
///
/// assert!(equals_folded("Curaçao", "curacao"));
/// assert!(!equals_folded("Niger", "Nigeria"));
/// ```
pub fn equals_folded(a: &str, b: &str) -> bool {
    fold_key(a) == fold_key(b)
}

/// First character upper-cased, the rest lower-cased (`"north-america"` ->
/// `"North-america"`).
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// `"a, b, c..."` preview of at most `max` names.
pub fn preview(names: &[String], max: usize) -> String {
    let shown = names
        .iter()
        .take(max)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ");
    if names.len() > max {
        format!("{shown}...")
    } else {
        shown
    }
}
