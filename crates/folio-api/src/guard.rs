//! Server-side request validation and response tag allowlisting.
//!
//! The request rules are stricter than the chat client's: on top of the
//! markup patterns they refuse SQL keywords, tautologies and quote or
//! comment tokens. Like the client guard this is a regex blocklist, not a
//! parser.

use regex::{Captures, Regex, RegexSet};

use folio_core::MAX_INPUT_CHARS;

/// Tags a chat answer may keep. Everything else is stripped.
pub const ALLOWED_TAGS: &[&str] = &[
    "a", "strong", "em", "p", "br", "ul", "ol", "li", "h1", "h2", "h3", "h4", "h5", "h6",
];

/// Escape `&`, `<`, `>`, `"` and `'` for inclusion in HTML.
pub fn html_escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Validates and sanitizes incoming chat messages.
pub struct RequestGuard {
    denylist: RegexSet,
    script: Regex,
    event_handler: Regex,
}

impl Default for RequestGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl RequestGuard {
    pub fn new() -> Self {
        let denylist = RegexSet::new([
            // SQL
            r"(?i)\b(SELECT|INSERT|UPDATE|DELETE|DROP|CREATE|ALTER|EXEC|EXECUTE)\b",
            r"(?i)\b(UNION|OR|AND)\s+\d+\s*=\s*\d+",
            r#"'|"|;|--|/\*|\*/"#,
            // Markup
            r"(?i)<script",
            r"(?i)javascript:",
            r"(?i)onerror=",
            r"(?i)onload=",
            r"(?i)<iframe",
            r"(?i)<object",
            r"(?i)<embed",
        ])
        .expect("Invalid request denylist regex");

        Self {
            denylist,
            script: Regex::new(r"(?is)<script[^>]*>.*?</script>").expect("Invalid script regex"),
            event_handler: Regex::new(r"(?i)on\w+\s*=").expect("Invalid event handler regex"),
        }
    }

    /// `false` when the message matches any denylisted pattern.
    pub fn validate(&self, text: &str) -> bool {
        !text.is_empty() && !self.denylist.is_match(text)
    }

    /// Escape, drop script elements and handler patterns, cap, trim.
    pub fn sanitize(&self, text: &str) -> String {
        let escaped = html_escape(text);
        let no_script = self.script.replace_all(&escaped, "");
        let no_handlers = self.event_handler.replace_all(&no_script, "");
        let capped: String = no_handlers.chars().take(MAX_INPUT_CHARS).collect();
        capped.trim().to_string()
    }
}

/// Strips answer markup down to [`ALLOWED_TAGS`].
pub struct ResponseSanitizer {
    anchor_attrs: Regex,
}

impl Default for ResponseSanitizer {
    fn default() -> Self {
        Self::new()
    }
}

impl ResponseSanitizer {
    pub fn new() -> Self {
        Self {
            anchor_attrs: Regex::new(r"(?i)<a\s+[^>]*?(href|class)=")
                .expect("Invalid anchor attribute regex"),
        }
    }

    /// Remove disallowed tags, then drop anchor attributes that come before
    /// the first `href=` or `class=`.
    pub fn sanitize(&self, text: &str) -> String {
        let tags_only = strip_disallowed_tags(text);
        self.anchor_attrs
            .replace_all(&tags_only, |caps: &Captures<'_>| format!("<a {}=", &caps[1]))
            .into_owned()
    }
}

/// Remove every `<...>` (at least one character inside) whose name is not
/// allowlisted. An allowed opener is kept and scanning resumes right after
/// its `<`.
fn strip_disallowed_tags(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(start) = rest.find('<') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];

        if !is_allowed_tag(after) {
            if let Some(end) = after.find('>') {
                if end > 0 {
                    rest = &after[end + 1..];
                    continue;
                }
            }
        }

        out.push('<');
        rest = after;
    }

    out.push_str(rest);
    out
}

/// `true` when `after` (the text following a `<`) opens or closes an
/// allowlisted tag, with the name ending at a word boundary.
fn is_allowed_tag(after: &str) -> bool {
    let name_start = after.strip_prefix('/').unwrap_or(after);
    ALLOWED_TAGS.iter().any(|tag| {
        let Some(head) = name_start.get(..tag.len()) else {
            return false;
        };
        if !head.eq_ignore_ascii_case(tag) {
            return false;
        }
        match name_start[tag.len()..].chars().next() {
            Some(next) => !(next.is_alphanumeric() || next == '_'),
            None => true,
        }
    })
}
