use std::sync::LazyLock;

use regex::Regex;

static WS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Literal stand-in authors put in otherwise empty cells.
pub const PLACEHOLDER: &str = "&nbsp;";

/// Collapse whitespace runs to one space and trim. `\s` is Unicode-aware, so a
/// decoded non-breaking space (U+00A0) is collapsed like any other blank.
pub fn normalize(s: &str) -> String {
    WS_RE.replace_all(s, " ").trim().to_string()
}

/// True when a normalized value carries no content.
pub fn is_blank(s: &str) -> bool {
    s.is_empty() || s == PLACEHOLDER
}

/// Optional fields keep their text unless it is the placeholder.
pub fn or_empty(s: String) -> String {
    if s == PLACEHOLDER {
        String::new()
    } else {
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_and_trims() {
        assert_eq!(normalize("  Jan\n\t 5,\r\n 2024 "), "Jan 5, 2024");
        assert_eq!(normalize("\u{a0}"), "");
        assert_eq!(normalize("A\u{a0}\u{a0}B"), "A B");
    }

    #[test]
    fn normalize_is_idempotent() {
        for s in ["", "x", " a  b ", "Ünïcödé\n text", "&nbsp;"] {
            let once = normalize(s);
            assert_eq!(normalize(&once), once);
        }
    }

    #[test]
    fn placeholder_handling() {
        assert!(is_blank(""));
        assert!(is_blank("&nbsp;"));
        assert!(!is_blank("TBA"));
        assert_eq!(or_empty("&nbsp;".into()), "");
        assert_eq!(or_empty("Talk".into()), "Talk");
    }
}
