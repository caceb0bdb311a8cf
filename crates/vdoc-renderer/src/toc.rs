//! Heading anchors.

use std::collections::HashSet;

/// Id given to headings whose title has no ASCII letters or digits.
const FALLBACK_ID: &str = "section";

/// Hands out heading ids that are unique within one document.
///
/// The first "Installation" heading gets `installation`, the next
/// `installation-1`, and so on. Every id handed out is reserved, so a later
/// heading titled "Installation 1" moves on to `installation-1-1`.
#[derive(Debug, Default)]
pub(crate) struct Anchors {
    taken: HashSet<String>,
}

impl Anchors {
    pub(crate) fn assign(&mut self, title: &str) -> String {
        let mut base = slugify(title);
        if base.is_empty() {
            base.push_str(FALLBACK_ID);
        }

        let mut id = base.clone();
        let mut n = 1;
        while self.taken.contains(&id) {
            id = format!("{base}-{n}");
            n += 1;
        }
        self.taken.insert(id.clone());
        id
    }
}

/// Lowercase ASCII slug of `text`.
///
/// Runs of whitespace, `-` and `_` collapse to a single dash; every other
/// non-alphanumeric character is dropped.
pub(crate) fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_dash = false;

    for c in text.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c.to_ascii_lowercase());
        } else if c.is_whitespace() || c == '-' || c == '_' {
            pending_dash = true;
        }
    }

    slug
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Hello World"), "hello-world");
        assert_eq!(slugify("What's New?"), "whats-new");
        assert_eq!(slugify("  Spaces  "), "spaces");
        assert_eq!(slugify("Multiple   Spaces"), "multiple-spaces");
        assert_eq!(slugify("kebab-case"), "kebab-case");
        assert_eq!(slugify("snake_case"), "snake-case");
        assert_eq!(slugify("Laravel 5.4 - Upgrade"), "laravel-54-upgrade");
        assert_eq!(slugify("¿?"), "");
    }

    #[test]
    fn test_anchors_are_unique() {
        let mut anchors = Anchors::default();

        assert_eq!(anchors.assign("Installation"), "installation");
        assert_eq!(anchors.assign("Installation"), "installation-1");
        assert_eq!(anchors.assign("installation"), "installation-2");
        assert_eq!(anchors.assign("Routing"), "routing");
    }

    #[test]
    fn test_suffixed_ids_are_reserved() {
        let mut anchors = Anchors::default();

        assert_eq!(anchors.assign("FAQ"), "faq");
        assert_eq!(anchors.assign("FAQ"), "faq-1");
        assert_eq!(anchors.assign("FAQ 1"), "faq-1-1");
        assert_eq!(anchors.assign("FAQ"), "faq-2");
    }

    #[test]
    fn test_title_suffix_taken_before_duplicate() {
        let mut anchors = Anchors::default();

        assert_eq!(anchors.assign("Step 1"), "step-1");
        assert_eq!(anchors.assign("Step"), "step");
        assert_eq!(anchors.assign("Step"), "step-2");
    }

    #[test]
    fn test_titles_without_ascii_get_fallback() {
        let mut anchors = Anchors::default();

        assert_eq!(anchors.assign("日本語"), "section");
        assert_eq!(anchors.assign("¿?"), "section-1");
        assert_eq!(anchors.assign("Überblick"), "berblick");
    }
}
