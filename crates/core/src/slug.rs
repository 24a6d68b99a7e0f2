// Slug generation
//
// Slugs are derived from event titles and used as the public, URL-safe
// identifier of an event. Uniqueness is not checked here; the store's unique
// index on slug is the only guard.

/// Generate a URL-friendly slug from a string.
///
/// Lowercases and trims the input, drops every character that is not an ASCII
/// word character, whitespace or hyphen, collapses runs of whitespace,
/// underscores and hyphens into a single hyphen, and strips hyphens from both
/// ends.
///
/// A title made only of special characters produces an empty slug.
pub fn generate_slug(text: &str) -> String {
    let lowered = text.to_lowercase();

    let mut slug = String::with_capacity(lowered.len());
    let mut in_separator = false;
    for c in lowered.trim().chars() {
        if is_separator(c) {
            if !in_separator {
                slug.push('-');
                in_separator = true;
            }
        } else if c.is_ascii_alphanumeric() {
            slug.push(c);
            in_separator = false;
        }
        // Anything else is stripped without ending the current separator run,
        // so "a - + - b" still collapses to "a-b".
    }

    slug.trim_matches('-').to_string()
}

fn is_separator(c: char) -> bool {
    c.is_whitespace() || c == '_' || c == '-'
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_generate_slug_basic() {
        assert_eq!(
            generate_slug("KubeCon + CloudNativeCon Europe 2026"),
            "kubecon-cloudnativecon-europe-2026"
        );
        assert_eq!(generate_slug("React Summit US 2025"), "react-summit-us-2025");
        assert_eq!(generate_slug("AWS re:Invent 2025"), "aws-reinvent-2025");
        assert_eq!(generate_slug("Next.js Conf 2025"), "nextjs-conf-2025");
    }

    #[test]
    fn test_generate_slug_separators() {
        assert_eq!(generate_slug("  rust___meetup -- berlin  "), "rust-meetup-berlin");
        assert_eq!(
            generate_slug("ETHGlobal Hackathon: Paris 2026"),
            "ethglobal-hackathon-paris-2026"
        );
        assert_eq!(generate_slug("-leading and trailing-"), "leading-and-trailing");
        assert_eq!(generate_slug("tab\tand\nnewline"), "tab-and-newline");
    }

    #[test]
    fn test_generate_slug_only_special_characters() {
        assert_eq!(generate_slug("!!!"), "");
        assert_eq!(generate_slug("   "), "");
        assert_eq!(generate_slug("+ - +"), "");
    }

    #[test]
    fn test_generate_slug_drops_non_ascii_word_characters() {
        assert_eq!(generate_slug("Café Conf"), "caf-conf");
        assert_eq!(generate_slug("Zürich Rust"), "zrich-rust");
    }

    proptest! {
        #[test]
        fn prop_generate_slug_is_idempotent(title in "\\PC{0,64}") {
            let once = generate_slug(&title);
            prop_assert_eq!(generate_slug(&once), once);
        }

        #[test]
        fn prop_generate_slug_is_url_safe(title in "\\PC{0,64}") {
            let slug = generate_slug(&title);
            prop_assert!(slug
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_'));
            prop_assert!(!slug.starts_with('-'));
            prop_assert!(!slug.ends_with('-'));
            prop_assert!(!slug.contains("--"));
        }
    }
}
