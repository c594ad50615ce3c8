//! Display-name rules.
//!
//! Records with GitHub identity are named after their repository; records
//! without it keep their own `name`, provided it is not a placeholder such
//! as `"test"`, a bare number, a blank name, or a one- or two-character stub.

use std::sync::LazyLock;

use regex::Regex;

/// Name used when a GitHub full name yields no usable segment.
pub const UNKNOWN_NAME: &str = "Unknown";

static RE_NUMERIC: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]+$").unwrap());

static RE_TEST: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)^test$").unwrap());

/// Whether `name` is a usable display name for a record without GitHub
/// identity.
pub fn is_valid_name(name: Option<&str>) -> bool {
    let Some(name) = name else {
        return false;
    };
    if name.is_empty() || RE_NUMERIC.is_match(name) || RE_TEST.is_match(name) {
        return false;
    }
    !matches!(name.trim().chars().count(), 0..=2)
}

/// Repository segment of an `owner/repo` full name.
///
/// Returns [`UNKNOWN_NAME`] when the input is absent or empty, or when its
/// last segment is empty (e.g. `"owner/"`).
pub fn display_name_from_full_name(full_name: Option<&str>) -> String {
    full_name
        .and_then(|name| name.rsplit('/').next())
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| UNKNOWN_NAME.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_placeholders() {
        for name in ["42", "0", "TEST", "test", "Test", "a", "ab", " ab ", "", "x ", "   ", "\t"] {
            assert!(!is_valid_name(Some(name)), "{name:?} should be rejected");
        }
        assert!(!is_valid_name(None));
    }

    #[test]
    fn accepts_real_names() {
        for name in ["abc", "My Tool", "test-server", "tests", "mcp.rs", "42a"] {
            assert!(is_valid_name(Some(name)), "{name:?} should be accepted");
        }
    }

    #[test]
    fn numeric_check_covers_whole_string() {
        assert!(!is_valid_name(Some("12345")));
        assert!(is_valid_name(Some("v12345")));
    }

    #[test]
    fn only_ascii_digits_count_as_numeric() {
        assert!(is_valid_name(Some("٤٢٣")));
        assert!(is_valid_name(Some("１２３")));
        assert!(!is_valid_name(Some("0123")));
    }

    #[test]
    fn counts_characters_not_bytes() {
        // Two CJK characters are six bytes but still a two-character stub.
        assert!(!is_valid_name(Some("工具")));
        assert!(is_valid_name(Some("工具箱")));
    }

    #[test]
    fn display_name_takes_repo_segment() {
        assert_eq!(display_name_from_full_name(Some("owner/repo")), "repo");
        assert_eq!(display_name_from_full_name(Some("repo")), "repo");
        assert_eq!(display_name_from_full_name(Some("a/b/c")), "c");
    }

    #[test]
    fn display_name_falls_back_to_unknown() {
        assert_eq!(display_name_from_full_name(Some("")), "Unknown");
        assert_eq!(display_name_from_full_name(Some("owner/")), "Unknown");
        assert_eq!(display_name_from_full_name(None), "Unknown");
    }
}
