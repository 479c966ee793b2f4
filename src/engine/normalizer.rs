// src/engine/normalizer.rs - Prepares raw text for pattern matching

/// Normalize raw text for matching.
///
/// Lowercases (ordinal, not locale-sensitive), strips control characters
/// except `\n` and `\t`, trims leading/trailing whitespace, and pads the
/// result with exactly one leading and one trailing space so that
/// boundary-sensitive patterns (e.g. `" daddy"`) can match terms at the very
/// start or end of the text. Interior whitespace runs and repeated
/// punctuation are preserved; the low-quality shape checks depend on them.
///
/// `None`, empty, or all-whitespace input normalizes to a single space, which
/// scores zero rather than erroring.
pub fn normalize(raw: Option<&str>) -> String {
    let raw = match raw {
        Some(text) => text,
        None => return " ".to_string(),
    };

    let lowered: String = raw
        .chars()
        .filter(|c| !c.is_control() || *c == '\n' || *c == '\t')
        .flat_map(char::to_lowercase)
        .collect();

    let trimmed = lowered.trim();
    if trimmed.is_empty() {
        return " ".to_string();
    }
    format!(" {} ", trimmed)
}

/// Length of the normalized text in characters, excluding the padding spaces.
pub fn content_len(normalized: &str) -> usize {
    normalized.trim().chars().count()
}
