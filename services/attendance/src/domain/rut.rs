//! Chilean national ID (RUT) normalization.
//!
//! Users are stored and looked up by the normalized form: digits plus the
//! check character, uppercase, no punctuation.

/// Strip dots, hyphens, and whitespace; uppercase the check character.
pub fn normalize_rut(rut: &str) -> String {
    rut.chars()
        .filter(|c| !matches!(c, '.' | '-') && !c.is_whitespace())
        .flat_map(char::to_uppercase)
        .collect()
}

/// Re-insert the single hyphen before the check digit for display.
pub fn format_rut(rut: &str) -> String {
    let normalized = normalize_rut(rut);
    if normalized.len() < 2 {
        return normalized;
    }
    let (body, dv) = normalized.split_at(normalized.len() - 1);
    format!("{body}-{dv}")
}
