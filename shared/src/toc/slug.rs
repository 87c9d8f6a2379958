//! Heading text to anchor id.

/// Derive an anchor id from heading text.
///
/// Lowercases, collapses every run of characters outside `[a-z0-9]` into a
/// single `-`, and trims separators at both ends. May return an empty
/// string (e.g. for text made only of punctuation or non-Latin script).
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_separator = false;

    for ch in text.chars().flat_map(char::to_lowercase) {
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            if pending_separator && !slug.is_empty() {
                slug.push('-');
            }
            pending_separator = false;
            slug.push(ch);
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
        assert_eq!(slugify("Getting Started"), "getting-started");
        assert_eq!(slugify("FAQ"), "faq");
    }

    #[test]
    fn collapses_symbol_runs_and_trims_edges() {
        assert_eq!(slugify("  --What's new?!  "), "what-s-new");
        assert_eq!(slugify("C++ & Rust: 2024"), "c-rust-2024");
    }

    #[test]
    fn non_ascii_letters_act_as_separators() {
        assert_eq!(slugify("Café au lait"), "caf-au-lait");
        assert_eq!(slugify("目录"), "");
    }

    #[test]
    fn punctuation_only_is_empty() {
        assert_eq!(slugify("!!!"), "");
        assert_eq!(slugify(""), "");
    }
}
