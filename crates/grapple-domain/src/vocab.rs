//! Shared parsing rules for the closed vocabularies

/// Compare a user-supplied spelling against a canonical display name.
///
/// Case, spaces, hyphens and underscores are ignored, so `"no-gi"`,
/// `"NoGi"` and `"No-Gi"` all name the same value.
pub(crate) fn matches(input: &str, canonical: &str) -> bool {
    let mut lhs = input.chars().filter(|c| is_significant(*c));
    let mut rhs = canonical.chars().filter(|c| is_significant(*c));
    loop {
        match (lhs.next(), rhs.next()) {
            (None, None) => return true,
            (Some(a), Some(b)) if a.eq_ignore_ascii_case(&b) => continue,
            _ => return false,
        }
    }
}

fn is_significant(c: char) -> bool {
    !matches!(c, ' ' | '-' | '_')
}
