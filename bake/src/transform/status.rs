//! Release status check.
//!
//! Exports write the status inconsistently: `Released`, `"released"`,
//! `["Released"]`, `['RELEASED']`. All of these count as released.

const RELEASED: &str = "released";

fn is_decoration(c: char) -> bool {
    matches!(c, '"' | '[' | ']' | '\'')
}

/// Strip whitespace, then any run of `"`, `[`, `]`, `'` from both ends, and
/// lower-case.
pub fn normalize_status(status: &str) -> String {
    status.trim().trim_matches(is_decoration).to_lowercase()
}

/// Whether a raw status value means "released".
pub fn is_released(status: &str) -> bool {
    normalize_status(status) == RELEASED
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_values() {
        assert!(is_released("released"));
        assert!(is_released("Released"));
        assert!(is_released("  RELEASED\t"));
        assert!(!is_released("Draft"));
        assert!(!is_released(""));
    }

    #[test]
    fn test_decorated_values() {
        assert!(is_released(r#"["Released"]"#));
        assert!(is_released("['released']"));
        assert!(is_released(r#""Released""#));
        assert!(is_released(r#"[["'Released'"]]"#));
    }

    #[test]
    fn test_not_an_exact_match() {
        assert!(!is_released("Released soon"));
        assert!(!is_released("unreleased"));
        assert!(!is_released(r#"["Released", "Draft"]"#));
        // inner padding is not trimmed away
        assert!(!is_released(r#"[ "Released" ]"#));
    }

    #[test]
    fn test_normalize_status() {
        assert_eq!(normalize_status(r#" ["Draft"] "#), "draft");
        assert_eq!(normalize_status("[]"), "");
    }
}
