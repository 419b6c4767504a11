//! Question/answer table behind `POST /api/chat`.
//!
//! Each entry scores one point per keyword contained in the lowercased
//! message. The highest score wins; on a tie the entry declared first wins.
//! A message that scores nothing gets the default answer.

/// One topic of the knowledge base.
#[derive(Debug, Clone, Copy)]
pub struct KnowledgeEntry {
    pub topic: &'static str,
    pub keywords: &'static [&'static str],
    pub response: &'static str,
}

impl KnowledgeEntry {
    /// Number of keywords contained in the already lowercased message.
    pub fn score(&self, lowered: &str) -> usize {
        self.keywords
            .iter()
            .filter(|keyword| lowered.contains(**keyword))
            .count()
    }
}

const ENTRIES: &[KnowledgeEntry] = &[
    KnowledgeEntry {
        topic: "who_is_gabriel",
        keywords: &[
            "who", "gabriel", "introduce", "about gabriel", "tell me about", "sino si gabriel",
            "sino ka", "who are you", "introduce yourself", "tell me about yourself",
            "what do you do", "what is your name", "name", "background", "bio", "biography",
        ],
        response: concat!(
            "Gabriel Paras Abiog is an <strong>AI Developer and Data Analyst</strong> completing a ",
            "BS in Computer Science at FEU Institute of Technology.",
            "<ul><li>15+ projects completed</li><li>8 certifications</li>",
            "<li>95%+ test coverage</li><li>4 AI/ML projects</li></ul>",
            "<a href=\"#about\" class=\"chatbot-link\">Read more about Gabriel</a>",
        ),
    },
    KnowledgeEntry {
        topic: "experience",
        keywords: &[
            "experience", "worked", "work", "job", "position", "role", "intern", "developer",
            "employment", "work history", "career", "professional experience",
            "employment history", "work experience", "previous job", "current job",
            "where do you work", "where have you worked", "companies", "employer",
        ],
        response: concat!(
            "<strong>Current role:</strong> AI Developer Intern (Fullstack) at FEU Institute of Technology.",
            "<ul><li>AI Developer and Data Analyst: deployed 5+ ML models</li>",
            "<li>Web Developer: 100% cross-browser compatibility</li>",
            "<li>Customer Service Representative: 95%+ satisfaction rate</li></ul>",
            "<a href=\"#experience\" class=\"chatbot-link\">View detailed experience</a>",
        ),
    },
    KnowledgeEntry {
        topic: "projects",
        keywords: &[
            "project", "projects", "built", "developed", "created", "work", "portfolio",
            "application", "app", "applications", "what have you built", "what did you build",
            "show me projects", "your projects", "portfolio projects", "github", "code",
            "programming projects", "software projects", "what projects", "examples", "demos",
        ],
        response: concat!(
            "Gabriel has worked on 15+ AI and software projects. <strong>Featured:</strong>",
            "<ul><li>TALA: AI-powered calendar assistant</li>",
            "<li>FEU Tech AI Chatbot: 98%+ accuracy</li>",
            "<li>AI Skill Assessment: 5000+ assessments processed</li></ul>",
            "<a href=\"#projects\" class=\"chatbot-link\">View all projects</a>",
        ),
    },
    KnowledgeEntry {
        topic: "technologies",
        keywords: &[
            "technology", "technologies", "tech", "skills", "programming", "languages", "tools",
            "stack", "framework", "what tech", "what tools",
        ],
        response: concat!(
            "<ul><li><strong>Programming:</strong> Python, JavaScript, Java, C++</li>",
            "<li><strong>Frontend:</strong> React.js, HTML, CSS</li>",
            "<li><strong>Backend:</strong> Node.js, Express.js, REST APIs</li>",
            "<li><strong>Testing:</strong> Postman, PyTest, JUnit, Selenium</li>",
            "<li><strong>AI/ML:</strong> GPT-4, LangChain, OpenAI API</li></ul>",
            "<a href=\"#skills\" class=\"chatbot-link\">View skills and proficiency</a>",
        ),
    },
    KnowledgeEntry {
        topic: "contact",
        keywords: &[
            "contact", "email", "reach", "get in touch", "hire", "available", "connect",
            "how to contact", "email address", "phone",
        ],
        response: concat!(
            "<strong>Email:</strong> gabrielparasabiog@gmail.com<br>",
            "He is open to new opportunities, projects and collaborations. ",
            "<a href=\"#contact\" class=\"chatbot-link\">Contact information</a>",
        ),
    },
    KnowledgeEntry {
        topic: "certifications",
        keywords: &[
            "certification", "certifications", "certified", "certificate", "credentials",
            "qualifications", "cert",
        ],
        response: concat!(
            "Gabriel holds 8 certifications:",
            "<ul><li><strong>Cisco:</strong> DevNet Associate, CCNA Introduction to Networks</li>",
            "<li><strong>IT Specialist:</strong> Python, Java</li>",
            "<li><strong>Google (2025):</strong> Job Search with AI, Art of Prompting, Introduction to AI</li>",
            "<li><strong>Coursera:</strong> Google Project Management Professional Certificate</li></ul>",
            "<a href=\"#education\" class=\"chatbot-link\">View certifications and education</a>",
        ),
    },
    KnowledgeEntry {
        topic: "education",
        keywords: &[
            "education", "degree", "university", "college", "school", "studied", "graduate",
            "student", "academic",
        ],
        response: concat!(
            "Gabriel is completing a <strong>BS in Computer Science</strong> at FEU Institute of Technology.",
            "<ul><li>Software Quality Assurance</li><li>Software Engineering</li>",
            "<li>Database Management</li><li>Artificial Intelligence</li></ul>",
            "<a href=\"#education\" class=\"chatbot-link\">View education and activities</a>",
        ),
    },
    KnowledgeEntry {
        topic: "skills",
        keywords: &[
            "skill", "skills", "expertise", "proficient", "good at", "specialize", "what can",
            "capabilities",
        ],
        response: concat!(
            "<strong>Technical skills:</strong> Python (90%), JavaScript (85%), Node.js (85%), ",
            "React.js (80%), Postman (90%), PyTest (90%), Selenium (85%).<br>",
            "He specializes in AI development, data analysis and quality assurance. ",
            "<a href=\"#skills\" class=\"chatbot-link\">View all skills</a>",
        ),
    },
    KnowledgeEntry {
        topic: "achievements",
        keywords: &[
            "achievement", "achievements", "accomplishment", "stats", "statistics", "metrics",
            "results", "success",
        ],
        response: concat!(
            "<ul><li>15+ projects completed</li><li>10+ technologies mastered</li>",
            "<li>Improved chatbot accuracy by 15%</li><li>Reduced API response time by 40-68%</li>",
            "<li>Processed 100,000+ data points</li></ul>",
            "<a href=\"#stats\" class=\"chatbot-link\">View achievements and metrics</a>",
        ),
    },
    KnowledgeEntry {
        topic: "ai_projects",
        keywords: &[
            "ai project", "ai projects", "machine learning", "ml project", "deep learning",
            "dl project", "chatbot", "ai chatbot",
        ],
        response: concat!(
            "<ol><li><strong>FEU Tech AI Chatbot</strong>: GPT-4 powered, 98%+ accuracy</li>",
            "<li><strong>AI Skill Assessment</strong>: automated evaluation</li>",
            "<li><strong>AI Tutor</strong>: personalized learning</li>",
            "<li><strong>TALA</strong>: AI-powered scheduling</li></ol>",
            "<a href=\"#projects\" class=\"chatbot-link\">View AI projects</a>",
        ),
    },
    KnowledgeEntry {
        topic: "testing_qa",
        keywords: &[
            "testing", "qa", "quality assurance", "test coverage", "automated testing",
            "manual testing", "selenium", "pytest",
        ],
        response: concat!(
            "<ul><li>95%+ test coverage across projects</li>",
            "<li>Automated testing with Selenium, PyTest and JUnit</li>",
            "<li>API testing with Postman</li><li>500+ unit and integration tests written</li></ul>",
            "<a href=\"#skills\" class=\"chatbot-link\">View testing skills</a>",
        ),
    },
    KnowledgeEntry {
        topic: "location",
        keywords: &["where", "location", "address", "live", "based", "from", "residence"],
        response: concat!(
            "Gabriel is based in Quezon City, Philippines, and is available for remote work. ",
            "<a href=\"#contact\" class=\"chatbot-link\">Full contact information</a>",
        ),
    },
    KnowledgeEntry {
        topic: "availability",
        keywords: &[
            "available", "hire", "hiring", "job", "opportunity", "open to work", "looking for",
            "recruiting",
        ],
        response: concat!(
            "Gabriel is open to full-time, part-time, freelance and internship roles in ",
            "AI/ML development, data analysis, full-stack development and QA. ",
            "<a href=\"#contact\" class=\"chatbot-link\">Get in touch</a>",
        ),
    },
    KnowledgeEntry {
        topic: "help",
        keywords: &[
            "help", "what can you do", "what questions", "how to use", "commands", "assistance",
        ],
        response: concat!(
            "<strong>You can ask about:</strong>",
            "<ul><li>Who Gabriel is</li><li>His experience and projects</li>",
            "<li>Skills and technologies</li><li>How to contact him</li></ul>",
        ),
    },
    KnowledgeEntry {
        topic: "greetings",
        keywords: &[
            "hello", "hi", "hey", "greetings", "good morning", "good afternoon", "good evening",
        ],
        response: concat!(
            "Hello! I can help you learn about Gabriel Paras Abiog, an AI Developer and Data Analyst. ",
            "What would you like to know?",
        ),
    },
    KnowledgeEntry {
        topic: "thanks",
        keywords: &["thank", "thanks", "thank you", "appreciate", "grateful"],
        response: "You're welcome! Is there anything else you would like to know?",
    },
    KnowledgeEntry {
        topic: "goodbye",
        keywords: &["bye", "goodbye", "see you", "farewell", "later"],
        response: "Goodbye! Thanks for visiting Gabriel's portfolio.",
    },
];

const DEFAULT_RESPONSE: &str = concat!(
    "I'm here to help you learn about Gabriel Paras Abiog.",
    "<ul><li>Who is Gabriel?</li><li>Tell me about your projects</li>",
    "<li>What technologies do you use?</li><li>How can I contact you?</li></ul>",
    "<a href=\"#about\" class=\"chatbot-link\">Start here</a>",
);

/// Keyword-scored answer table.
#[derive(Debug, Clone, Copy)]
pub struct KnowledgeBase {
    entries: &'static [KnowledgeEntry],
    default_response: &'static str,
}

impl Default for KnowledgeBase {
    fn default() -> Self {
        Self::new()
    }
}

impl KnowledgeBase {
    pub fn new() -> Self {
        Self::with_entries(ENTRIES, DEFAULT_RESPONSE)
    }

    pub fn with_entries(entries: &'static [KnowledgeEntry], default_response: &'static str) -> Self {
        Self {
            entries,
            default_response,
        }
    }

    pub fn entries(&self) -> &'static [KnowledgeEntry] {
        self.entries
    }

    pub fn default_response(&self) -> &'static str {
        self.default_response
    }

    /// The highest scoring entry, or `None` when nothing scores.
    pub fn best_entry(&self, message: &str) -> Option<&'static KnowledgeEntry> {
        let lowered = message.to_lowercase();
        let mut best: Option<(&'static KnowledgeEntry, usize)> = None;
        for entry in self.entries {
            let score = entry.score(&lowered);
            if score == 0 {
                continue;
            }
            // Strictly greater, so earlier entries keep ties.
            if best.map_or(true, |(_, top)| score > top) {
                best = Some((entry, score));
            }
        }
        best.map(|(entry, _)| entry)
    }

    /// Answer for a message, falling back to the default.
    pub fn find_best_match(&self, message: &str) -> &'static str {
        self.best_entry(message)
            .map(|entry| entry.response)
            .unwrap_or(self.default_response)
    }
}
