//! Name keys for grouping, sorting and searching
//!
//! A key is an opaque comparison token, not a display string.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Leading article, trailing ", article" suffix, and punctuation, removed in one pass.
    static ref KEY_PATTERN: Regex =
        Regex::new(r"(?i)^\s*(?:the |an |a )|(?:, the|, an|, a)\s*$|[\[\]()!?.,']")
            .expect("name key pattern is valid");
}

/// Convert an artist or album name to a key.
///
/// Removes `[ ] ( ) ! ? . , '`, a leading "the "/"an "/"a " and a trailing
/// ", the"/", an"/", a", then trims and lowercases. Accents are kept.
/// Absent or empty names give an empty key.
pub fn key_for(name: Option<&str>) -> String {
    match name {
        Some(name) if !name.is_empty() => KEY_PATTERN
            .replace_all(name, "")
            .trim()
            .to_lowercase(),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input() {
        assert_eq!(key_for(None), "");
        assert_eq!(key_for(Some("")), "");
    }

    #[test]
    fn test_leading_articles() {
        assert_eq!(key_for(Some("The Beatles")), "beatles");
        assert_eq!(key_for(Some("A Perfect Circle")), "perfect circle");
        assert_eq!(key_for(Some("An Horse")), "horse");
        assert_eq!(key_for(Some("  the Who  ")), "who");
    }

    #[test]
    fn test_trailing_articles() {
        assert_eq!(key_for(Some("Artist, The")), "artist");
        assert_eq!(key_for(Some("Beatles, THE ")), "beatles");
        assert_eq!(key_for(Some("Tribe Called Quest, A")), "tribe called quest");
    }

    #[test]
    fn test_only_boundary_articles_are_stripped() {
        assert_eq!(key_for(Some("The A Team")), "a team");
        assert_eq!(key_for(Some("Theatre of Tragedy")), "theatre of tragedy");
        assert_eq!(key_for(Some("Anathema")), "anathema");
        assert_eq!(key_for(Some("Rage Against the Machine")), "rage against the machine");
    }

    #[test]
    fn test_punctuation() {
        assert_eq!(key_for(Some("Guns N' Roses")), "guns n roses");
        assert_eq!(
            key_for(Some("(What's the Story) Morning Glory?")),
            "whats the story morning glory"
        );
        assert_eq!(key_for(Some("[Live!] Mr. Bungle, Vol. 1")), "live mr bungle vol 1");
    }

    #[test]
    fn test_accents_are_kept() {
        assert_eq!(key_for(Some("Sigur Rós")), "sigur rós");
        assert_eq!(key_for(Some("Beyoncé")), "beyoncé");
    }

    #[test]
    fn test_idempotent() {
        for name in ["The Beatles", "Artist, The", "Guns N' Roses", "Sigur Rós", "Mr. Bungle"] {
            let once = key_for(Some(name));
            assert_eq!(key_for(Some(&once)), once, "key of {:?} is not stable", name);
        }
    }
}
