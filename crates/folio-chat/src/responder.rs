//! Offline keyword responder.
//!
//! Answers from a static rule table when no chat endpoint could be reached.
//! Matching is plain substring containment against the lowercased message;
//! the first rule (in declaration order) with any keyword present wins.

/// A keyword set and the canned HTML answer it selects.
#[derive(Debug, Clone, Copy)]
pub struct KeywordRule {
    pub keywords: &'static [&'static str],
    pub response: &'static str,
}

impl KeywordRule {
    /// `true` when any keyword occurs in the already lowercased message.
    fn matches(&self, lowered: &str) -> bool {
        self.keywords.iter().any(|keyword| lowered.contains(keyword))
    }
}

const RULES: &[KeywordRule] = &[
    KeywordRule {
        keywords: &[
            "certification",
            "certifications",
            "certificate",
            "certified",
            "credential",
            "sertipikasyon",
            "cert",
        ],
        response: concat!(
            "<strong>Certifications:</strong>",
            "<ul>",
            "<li>Cisco DevNet Associate (Dec 2023)</li>",
            "<li>CCNA: Introduction to Networks (Jul 2023)</li>",
            "<li>IT Specialist - Python (Nov 2022)</li>",
            "<li>IT Specialist - Java (Nov 2022)</li>",
            "<li>Accelerate Your Job Search with AI - Google (2025)</li>",
            "<li>Discover the Art of Prompting - Google (2025)</li>",
            "<li>Google Project Management Professional Certificate (v2) - Coursera (2025)</li>",
            "<li>Introduction to AI - Google (2025)</li>",
            "</ul>",
            "<a href=\"/journey#education\" class=\"chatbot-link\">View education and certifications</a>",
        ),
    },
    KeywordRule {
        keywords: &["project", "projects", "portfolio", "work"],
        response: concat!(
            "Gabriel has completed 15+ projects across AI, data analytics, and full-stack development.",
            " <a href=\"/portfolio#projects\" class=\"chatbot-link\">View projects</a>",
        ),
    },
    KeywordRule {
        keywords: &["experience", "work", "job", "intern", "role"],
        response: concat!(
            "Gabriel has 4+ years of combined experience across AI development, data analysis, and QA.",
            " <a href=\"/portfolio#experience\" class=\"chatbot-link\">View experience</a>",
        ),
    },
    KeywordRule {
        keywords: &["skills", "technologies", "tech stack", "tools", "stack"],
        response: concat!(
            "He works with Python, JavaScript, React, Node.js, testing tools, and AI/ML frameworks.",
            " <a href=\"/portfolio#skills\" class=\"chatbot-link\">View skills</a>",
        ),
    },
    KeywordRule {
        keywords: &["contact", "email", "reach", "hire"],
        response: concat!(
            "You can reach Gabriel at gabrielparasabiog@gmail.com.",
            " <a href=\"/contact#contact\" class=\"chatbot-link\">Contact page</a>",
        ),
    },
    KeywordRule {
        keywords: &["education", "degree", "school", "university"],
        response: concat!(
            "Gabriel is completing a BS in Computer Science at FEU Institute of Technology.",
            " <a href=\"/journey#education\" class=\"chatbot-link\">View education</a>",
        ),
    },
    KeywordRule {
        keywords: &["who", "gabriel", "about", "bio"],
        response: concat!(
            "Gabriel Paras Abiog is an AI Developer and Data Analyst focused on intelligent systems and data-driven solutions.",
            " <a href=\"/#about\" class=\"chatbot-link\">About Gabriel</a>",
        ),
    },
];

const DEFAULT_RESPONSE: &str = concat!(
    "I can help you learn about Gabriel's background, projects, skills, experience, and certifications.",
    " <a href=\"/#about\" class=\"chatbot-link\">Start here</a>",
);

/// Static keyword table answering without any I/O.
#[derive(Debug, Clone, Copy)]
pub struct LocalResponder {
    rules: &'static [KeywordRule],
    default_response: &'static str,
}

impl Default for LocalResponder {
    fn default() -> Self {
        Self::new()
    }
}

impl LocalResponder {
    pub fn new() -> Self {
        Self {
            rules: RULES,
            default_response: DEFAULT_RESPONSE,
        }
    }

    pub fn rules(&self) -> &'static [KeywordRule] {
        self.rules
    }

    /// The fragment returned when no rule matches.
    pub fn default_response(&self) -> &'static str {
        self.default_response
    }

    /// Pick the answer fragment for a message.
    pub fn resolve(&self, message: &str) -> &'static str {
        let lowered = message.to_lowercase();
        self.rules
            .iter()
            .find(|rule| rule.matches(&lowered))
            .map(|rule| rule.response)
            .unwrap_or(self.default_response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule_with(keyword: &str) -> &'static KeywordRule {
        RULES
            .iter()
            .find(|rule| rule.keywords.iter().any(|k| *k == keyword))
            .unwrap()
    }

    #[test]
    fn test_projects_question_hits_project_rule() {
        let responder = LocalResponder::new();
        let answer = responder.resolve("What projects has Gabriel done?");
        assert_eq!(answer, rule_with("project").response);
        assert_ne!(answer, responder.default_response());
    }

    #[test]
    fn test_unrelated_message_gets_default() {
        let responder = LocalResponder::new();
        assert_eq!(
            responder.resolve("asdasd completely unrelated"),
            responder.default_response()
        );
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        let responder = LocalResponder::new();
        assert_eq!(
            responder.resolve("HOW CAN I CONTACT HIM"),
            rule_with("contact").response
        );
    }

    #[test]
    fn test_declaration_order_breaks_ties() {
        // "work" appears in both the project and experience rules.
        let responder = LocalResponder::new();
        assert_eq!(
            responder.resolve("tell me about his work"),
            rule_with("portfolio").response
        );
    }

    #[test]
    fn test_certification_rule_comes_first() {
        // "Gabriel" would match the about rule, but certifications are declared first.
        let responder = LocalResponder::new();
        assert_eq!(
            responder.resolve("What certifications does Gabriel have?"),
            rule_with("cert").response
        );
    }

    #[test]
    fn test_substring_containment_not_tokens() {
        // "whoever" contains "who".
        let responder = LocalResponder::new();
        assert_eq!(responder.resolve("whoever"), rule_with("bio").response);
    }

    #[test]
    fn test_tagalog_keyword() {
        let responder = LocalResponder::new();
        assert_eq!(
            responder.resolve("Ano ang mga sertipikasyon?"),
            rule_with("cert").response
        );
    }

    #[test]
    fn test_every_answer_carries_a_link() {
        let responder = LocalResponder::new();
        for rule in responder.rules() {
            assert!(rule.response.contains("<a href=\"/"));
        }
        assert!(responder.default_response().contains("<a href=\"/#about\""));
    }
}
