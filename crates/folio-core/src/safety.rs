//! Input guard for free-text chat messages.
//!
//! Screens user input before it is sent anywhere or rendered. This is a
//! fixed blocklist of markup, script and SQL shapes matched with regular
//! expressions, not an HTML parser, so it cannot catch every injection
//! vector. `validate` and `sanitize` are both applied before any downstream
//! use of a message.

use regex::{Regex, RegexSet};

/// Maximum accepted message length, in characters.
pub const MAX_INPUT_CHARS: usize = 500;

/// Validates and sanitizes chat input against a fixed denylist.
pub struct InputGuard {
    denylist: RegexSet,
    strip: Vec<Regex>,
}

impl Default for InputGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl InputGuard {
    /// Compile the denylist and the strip patterns.
    pub fn new() -> Self {
        let denylist = RegexSet::new([
            r"(?i)<script",
            r"(?i)javascript:",
            r"(?i)onerror=",
            r"(?i)onload=",
            r"(?i)<iframe",
            r"(?i)<object",
            r"(?i)<embed",
            r"(?i)SELECT.*FROM",
            r"(?i)INSERT.*INTO",
            r"(?i)UPDATE.*SET",
            r"(?i)DELETE.*FROM",
        ])
        .expect("Invalid denylist regex");

        // Complete script elements go first so their bodies are removed
        // along with the tags. A stray tag is removed up to its own `>`,
        // and an unterminated one loses only the `<script` token.
        let strip = [
            r"(?is)<script\b.*?</script>",
            r"(?i)</?script\b[^<>]*>",
            r"(?i)</?script",
            r"(?i)javascript:",
            r"(?i)on[a-z0-9_]+\s*=",
            r"(?i)<(?:iframe|object|embed)",
        ]
        .iter()
        .map(|pat| Regex::new(pat).expect("Invalid strip regex"))
        .collect();

        Self { denylist, strip }
    }

    /// Return `true` when the text may be sent.
    ///
    /// Rejects blank input, input longer than [`MAX_INPUT_CHARS`], and input
    /// matching any denylisted pattern.
    pub fn validate(&self, text: &str) -> bool {
        if self.denylist.is_match(text) {
            return false;
        }
        text.chars().count() <= MAX_INPUT_CHARS && !text.trim().is_empty()
    }

    /// Strip dangerous fragments, cap the length and trim.
    ///
    /// Stripping repeats until nothing matches, so removing one fragment can
    /// never leave a freshly spliced one behind and the result is stable
    /// under a second pass.
    pub fn sanitize(&self, text: &str) -> String {
        let mut current = text.to_string();
        loop {
            let next = self.strip.iter().fold(current.clone(), |acc, re| {
                re.replace_all(&acc, "").into_owned()
            });
            if next == current {
                break;
            }
            current = next;
        }

        let truncated: String = current.chars().take(MAX_INPUT_CHARS).collect();
        truncated.trim().to_string()
    }

    /// Validate, then sanitize. `None` means the input was rejected.
    pub fn admit(&self, text: &str) -> Option<String> {
        if self.validate(text) {
            Some(self.sanitize(text))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn guard() -> InputGuard {
        InputGuard::new()
    }

    // -- validate --

    #[test]
    fn test_plain_question_is_valid() {
        assert!(guard().validate("What projects has Gabriel done?"));
    }

    #[test]
    fn test_blank_input_is_invalid() {
        let g = guard();
        assert!(!g.validate(""));
        assert!(!g.validate("   \t\n"));
    }

    #[test]
    fn test_length_boundary() {
        let g = guard();
        assert!(g.validate(&"a".repeat(MAX_INPUT_CHARS)));
        assert!(!g.validate(&"a".repeat(MAX_INPUT_CHARS + 1)));
        assert!(!g.validate(&"a".repeat(5_000)));
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        // 500 three-byte characters is still 500 characters.
        assert!(guard().validate(&"项".repeat(MAX_INPUT_CHARS)));
    }

    #[test]
    fn test_script_tag_any_case_is_invalid() {
        let g = guard();
        for input in [
            "<script>alert(1)</script>",
            "hello <SCRIPT src=x>",
            "<ScRiPt",
        ] {
            assert!(!g.validate(input), "should reject {input:?}");
        }
    }

    #[test]
    fn test_markup_denylist() {
        let g = guard();
        for input in [
            "click javascript:alert(1)",
            "<img onerror=alert(1)>",
            "<body ONLOAD=run()>",
            "<iframe src=x>",
            "<object data=x>",
            "<embed src=x>",
        ] {
            assert!(!g.validate(input), "should reject {input:?}");
        }
    }

    #[test]
    fn test_sql_shaped_text_is_invalid() {
        let g = guard();
        for input in [
            "select name from users",
            "INSERT something INTO table",
            "update profile set admin",
            "Delete everything from here",
        ] {
            assert!(!g.validate(input), "should reject {input:?}");
        }
    }

    #[test]
    fn test_sql_keyword_alone_is_valid() {
        // Only the statement shape is denied, not the keyword.
        assert!(guard().validate("Which projects did you select?"));
    }

    // -- sanitize --

    #[test]
    fn test_sanitize_removes_script_element() {
        let out = guard().sanitize("hi <script>alert('x')</script> there");
        assert_eq!(out, "hi  there");
    }

    #[test]
    fn test_sanitize_removes_script_substring_any_case() {
        let g = guard();
        for input in [
            "<SCRIPT>alert(1)</SCRIPT>tail",
            "lead <script src=x> tail",
            "open <Script",
            "</script> closing only",
        ] {
            let out = g.sanitize(input);
            assert!(
                !out.to_lowercase().contains("<script"),
                "{input:?} -> {out:?}"
            );
        }
    }

    #[test]
    fn test_sanitize_keeps_text_after_unterminated_tag() {
        let g = guard();
        let question = "what does </script mean in html and how is it used";
        assert!(g.validate(question));
        assert_eq!(
            g.sanitize(question),
            "what does  mean in html and how is it used"
        );
        assert_eq!(g.sanitize("a </script b <strong>c"), "a  b <strong>c");
        assert_eq!(g.sanitize("x <script src=y> z"), "x  z");
    }

    #[test]
    fn test_sanitize_multiline_script_element() {
        let out = guard().sanitize("a<script>\nline1\nline2\n</script>b");
        assert_eq!(out, "ab");
    }

    #[test]
    fn test_sanitize_strips_scheme_and_handlers() {
        let g = guard();
        assert_eq!(g.sanitize("go JavaScript:alert(1)"), "go alert(1)");
        assert_eq!(g.sanitize("<img onclick = x>"), "<img  x>");
        assert_eq!(g.sanitize("<iframe src=x>"), "src=x>");
    }

    #[test]
    fn test_sanitize_truncates_then_trims() {
        let g = guard();
        let long = format!("  {}", "b".repeat(600));
        let out = g.sanitize(&long);
        // Two leading spaces count toward the cap, then get trimmed.
        assert_eq!(out.chars().count(), MAX_INPUT_CHARS - 2);
    }

    #[test]
    fn test_sanitize_removal_cannot_splice_new_match() {
        let g = guard();
        assert_eq!(g.sanitize("jajavascript:vascript:alert"), "alert");
        assert_eq!(g.sanitize("<ifr<iframeame"), "");
    }

    #[test]
    fn test_sanitize_is_idempotent() {
        let g = guard();
        let long = "z".repeat(700);
        for input in [
            "plain text",
            "   padded   ",
            "jajavascript:vascript:x",
            "<scr<script>x</script>ipt>y</script>",
            "oonclick=nclick=",
            "<ob<objectject",
            long.as_str(),
            "  <embed> onload = go javascript: ",
        ] {
            let once = g.sanitize(input);
            assert_eq!(g.sanitize(&once), once, "not idempotent for {input:?}");
        }
    }

    #[test]
    fn test_admit() {
        let g = guard();
        assert_eq!(g.admit("  hello  ").as_deref(), Some("hello"));
        assert!(g.admit("<script>x</script>").is_none());
        assert!(g.admit(" ").is_none());
    }
}
