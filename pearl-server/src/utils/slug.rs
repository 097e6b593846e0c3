//! Slug derivation for content collections
//!
//! Slugs are derived from titles on every write: lowercase ASCII,
//! non-alphanumeric runs collapsed to single hyphens. Matches the URL
//! shape the storefront expects ("Big Cover Pack!" -> "big-cover-pack").

/// Derive a URL slug from a title
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut last_was_hyphen = true; // suppress leading hyphen

    for c in title.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
            last_was_hyphen = false;
        } else if !last_was_hyphen {
            slug.push('-');
            last_was_hyphen = true;
        }
    }

    // strip trailing hyphen
    if slug.ends_with('-') {
        slug.pop();
    }

    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_and_hyphenates() {
        assert_eq!(slugify("Big Cover Pack"), "big-cover-pack");
        assert_eq!(slugify("Modular Kitchen 3D"), "modular-kitchen-3d");
    }

    #[test]
    fn collapses_punctuation_runs() {
        assert_eq!(slugify("Hello,  World!!"), "hello-world");
        assert_eq!(slugify("--already--slugged--"), "already-slugged");
    }

    #[test]
    fn drops_non_ascii() {
        assert_eq!(slugify("Café & Crème"), "caf-cr-me");
    }

    #[test]
    fn empty_title_gives_empty_slug() {
        assert_eq!(slugify(""), "");
        assert_eq!(slugify("!!!"), "");
    }
}
