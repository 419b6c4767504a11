//! Language tags and the localized strings the chat interface shows.
//!
//! Three languages are known: English, Tagalog and Chinese. Any other tag is
//! carried through to the backend untouched and reads English strings.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A language tag as selected by the user.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Locale(String);

impl Locale {
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    /// The raw tag, exactly as supplied.
    pub fn tag(&self) -> &str {
        &self.0
    }

    /// Localized interface strings for this tag.
    pub fn strings(&self) -> &'static LocalizedStrings {
        match self.0.as_str() {
            "tl" => &TAGALOG,
            "zh" => &CHINESE,
            _ => &ENGLISH,
        }
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self::new("en")
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Locale {
    fn from(tag: &str) -> Self {
        Self::new(tag)
    }
}

/// System strings of the chat widget in one language.
#[derive(Debug)]
pub struct LocalizedStrings {
    pub title: &'static str,
    pub welcome: &'static str,
    pub placeholder: &'static str,
    pub pre_questions_label: &'static str,
    pub rate_limit: &'static str,
    pub pre_questions: &'static [&'static str],
}

static ENGLISH: LocalizedStrings = LocalizedStrings {
    title: "Chat with Gabriel's Assistant",
    welcome: "Hi! I can answer questions about Gabriel's background, projects, skills and experience.",
    placeholder: "Type your question...",
    pre_questions_label: "Quick questions:",
    rate_limit: "You're sending messages too quickly. Please wait a moment and try again.",
    pre_questions: &[
        "Who is Gabriel?",
        "Tell me about Gabriel's projects",
        "What are Gabriel's achievements?",
        "What technologies does Gabriel use?",
        "How can I contact Gabriel?",
        "What is Gabriel's experience?",
        "Tell me about Gabriel's AI projects",
        "What certifications does Gabriel have?",
    ],
};

static TAGALOG: LocalizedStrings = LocalizedStrings {
    title: "Makipag-chat sa Assistant ni Gabriel",
    welcome: "Kumusta! Masasagot ko ang mga tanong tungkol sa background, proyekto, kasanayan at karanasan ni Gabriel.",
    placeholder: "I-type ang iyong tanong...",
    pre_questions_label: "Mabilisang tanong:",
    rate_limit: "Masyadong mabilis ang pagpapadala mo ng mensahe. Maghintay sandali at subukang muli.",
    pre_questions: &[
        "Sino si Gabriel?",
        "Sabihin mo sa akin ang tungkol sa mga proyekto ni Gabriel",
        "Ano ang mga tagumpay ni Gabriel?",
        "Ano ang mga teknolohiya na ginagamit ni Gabriel?",
        "Paano ko macocontact si Gabriel?",
        "Ano ang karanasan ni Gabriel?",
        "Sabihin mo sa akin ang tungkol sa AI projects ni Gabriel",
        "Ano ang mga sertipikasyon ni Gabriel?",
    ],
};

static CHINESE: LocalizedStrings = LocalizedStrings {
    title: "与Gabriel的助手聊天",
    welcome: "你好！我可以回答关于Gabriel的背景、项目、技能和经验的问题。",
    placeholder: "输入你的问题...",
    pre_questions_label: "快速提问：",
    rate_limit: "你发送消息太快了，请稍等片刻再试。",
    pre_questions: &[
        "Gabriel是谁？",
        "告诉我Gabriel的项目",
        "Gabriel的成就是什么？",
        "Gabriel使用什么技术？",
        "如何联系Gabriel？",
        "Gabriel的经验是什么？",
        "告诉我Gabriel的AI项目",
        "Gabriel有什么认证？",
    ],
};
