//! Plain-text rendering of agent HTML fragments for the terminal.
//!
//! Anchors become `text (path)`, list items become bullets, block ends
//! become line breaks and every other tag is dropped.

use regex::Regex;

pub struct TerminalRenderer {
    anchor: Regex,
    list_item: Regex,
    block_end: Regex,
    tag: Regex,
    blank_lines: Regex,
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            anchor: Regex::new(r#"(?is)<a\s[^>]*?href="([^"]*)"[^>]*>(.*?)</a>"#)
                .expect("Invalid anchor regex"),
            list_item: Regex::new(r"(?i)<li[^>]*>").expect("Invalid list item regex"),
            block_end: Regex::new(r"(?i)<br\s*/?>|</(?:p|ul|ol|li|h[1-6])>")
                .expect("Invalid block regex"),
            tag: Regex::new(r"<[^>]+>").expect("Invalid tag regex"),
            blank_lines: Regex::new(r"\n\s*\n").expect("Invalid blank line regex"),
        }
    }

    pub fn render(&self, fragment: &str) -> String {
        let text = self.anchor.replace_all(fragment, "$2 ($1)");
        let text = self.list_item.replace_all(&text, "\n• ");
        let text = self.block_end.replace_all(&text, "\n");
        let text = self.tag.replace_all(&text, "");
        let text = unescape(&text);

        let mut collapsed = text;
        while self.blank_lines.is_match(&collapsed) {
            collapsed = self.blank_lines.replace_all(&collapsed, "\n").into_owned();
        }

        collapsed
            .lines()
            .map(str::trim_end)
            .collect::<Vec<_>>()
            .join("\n")
            .trim()
            .to_string()
    }
}

fn unescape(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#x27;", "'")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anchor_shows_target() {
        let out = TerminalRenderer::new()
            .render(r#"See <a href="/#about" class="chatbot-link">About Gabriel</a>"#);
        assert_eq!(out, "See About Gabriel (/#about)");
    }

    #[test]
    fn test_list_becomes_bullets() {
        let out = TerminalRenderer::new()
            .render("<strong>Certs:</strong><ul><li>One</li><li>Two</li></ul>done");
        assert_eq!(out, "Certs:\n• One\n• Two\ndone");
    }

    #[test]
    fn test_entities_are_decoded() {
        let out = TerminalRenderer::new().render("a &lt; b &amp;&amp; c");
        assert_eq!(out, "a < b && c");
    }

    #[test]
    fn test_plain_text_is_unchanged() {
        let out = TerminalRenderer::new().render("Invalid input detected.");
        assert_eq!(out, "Invalid input detected.");
    }
}
