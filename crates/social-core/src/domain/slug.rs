use std::sync::LazyLock;

use regex::Regex;

static SEPARATOR_RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[-\s]+").expect("Invalid slug separator regex"));

/// Turn arbitrary text into a URL/file-name safe slug.
///
/// Non-ASCII characters are dropped, the rest is lowercased, anything other
/// than letters, digits, underscores, dashes and whitespace is removed, runs of
/// dashes/whitespace collapse to a single dash and leading/trailing dashes and
/// underscores are stripped.
pub fn slugify(value: &str) -> String {
    let cleaned: String = value
        .chars()
        .filter(|c| c.is_ascii())
        .map(|c| c.to_ascii_lowercase())
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-' || c.is_ascii_whitespace())
        .collect();

    SEPARATOR_RUNS
        .replace_all(&cleaned, "-")
        .trim_matches(|c| c == '-' || c == '_')
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_username_unchanged() {
        assert_eq!(slugify("alice"), "alice");
    }

    #[test]
    fn test_case_and_spaces() {
        assert_eq!(slugify("  Alice   Smith "), "alice-smith");
    }

    #[test]
    fn test_punctuation_removed() {
        assert_eq!(slugify("bob.o'neil+dev@x"), "boboneildevx");
        assert_eq!(slugify("__joe--doe__"), "joe-doe");
    }

    #[test]
    fn test_non_ascii_dropped() {
        assert_eq!(slugify("zoë"), "zo");
    }
}
