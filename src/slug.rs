//! Deterministic slug derivation for workspace names.

/// Derive a URL-safe slug from a display name.
///
/// Lowercases the input and collapses every run of non-alphanumeric
/// characters into a single `-`, with no leading or trailing separator.
/// The same name always yields the same slug.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_separator = false;

    for ch in name.chars() {
        if ch.is_alphanumeric() {
            if pending_separator && !slug.is_empty() {
                slug.push('-');
            }
            pending_separator = false;
            slug.extend(ch.to_lowercase());
        } else {
            pending_separator = true;
        }
    }

    slug
}

#[cfg(test)]
mod tests {
    use super::slugify;

    #[test]
    fn lowercases_and_joins_words() {
        assert_eq!(slugify("Acme Analytics"), "acme-analytics");
        assert_eq!(slugify("workspace"), "workspace");
    }

    #[test]
    fn collapses_runs_of_punctuation() {
        assert_eq!(slugify("Data -- Team!!"), "data-team");
        assert_eq!(slugify("a   b"), "a-b");
    }

    #[test]
    fn trims_leading_and_trailing_separators() {
        assert_eq!(slugify("  spaced out  "), "spaced-out");
        assert_eq!(slugify("!!bang!!"), "bang");
    }

    #[test]
    fn identical_names_collide() {
        assert_eq!(slugify("My Workspace"), slugify("my,workspace"));
    }

    #[test]
    fn empty_and_symbol_only_names_yield_empty_slug() {
        assert_eq!(slugify(""), "");
        assert_eq!(slugify("!!!"), "");
    }
}
