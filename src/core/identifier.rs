/// Strip every non-digit character from a company number
///
/// `"BE 0769.377.373"` becomes `"0769377373"`. Only ASCII digits are kept.
pub fn normalize_identifier(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Normalize a list of raw identifiers, keeping order and length
///
/// Entries with no digits at all come out empty and are still looked up.
pub fn normalize_all<I, S>(raw: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    raw.into_iter()
        .map(|r| normalize_identifier(r.as_ref()))
        .collect()
}
