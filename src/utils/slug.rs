//! Slug derivation
//!
//! URL-safe identifiers derived from record names. Uniqueness is handled by
//! the repositories (suffix probing against the stored records).

/// Derive a URL-safe slug from a name or title.
///
/// Lowercases, maps every non-alphanumeric run to a single `-`, and trims
/// leading/trailing dashes. An input with no usable characters yields `"item"`
/// so callers always get a non-empty routing segment.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut last_dash = true;

    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
            last_dash = false;
        } else if !last_dash {
            slug.push('-');
            last_dash = true;
        }
    }

    while slug.ends_with('-') {
        slug.pop();
    }

    if slug.is_empty() {
        "item".to_string()
    } else {
        slug
    }
}

/// Candidate slug for the nth collision: `base`, `base-2`, `base-3`, ...
pub fn slug_candidate(base: &str, attempt: u32) -> String {
    if attempt <= 1 {
        base.to_string()
    } else {
        format!("{}-{}", base, attempt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_names() {
        assert_eq!(slugify("Roasted Cashew 250g"), "roasted-cashew-250g");
        assert_eq!(slugify("  Salted   Almonds  "), "salted-almonds");
    }

    #[test]
    fn punctuation_collapses() {
        assert_eq!(slugify("Mom's Trail-Mix (Deluxe)!"), "mom-s-trail-mix-deluxe");
    }

    #[test]
    fn non_ascii_is_dropped() {
        assert_eq!(slugify("Café Blend"), "caf-blend");
    }

    #[test]
    fn empty_input_gets_fallback() {
        assert_eq!(slugify("!!!"), "item");
        assert_eq!(slugify(""), "item");
    }

    #[test]
    fn collision_candidates() {
        assert_eq!(slug_candidate("cashew", 1), "cashew");
        assert_eq!(slug_candidate("cashew", 2), "cashew-2");
        assert_eq!(slug_candidate("cashew", 3), "cashew-3");
    }
}
