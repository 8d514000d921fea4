use std::fmt;

use chrono::{DateTime, Utc};
use serde::{de::IgnoredAny, Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// Stored question. Decoding never fails on a malformed `question_type` or
/// answer key: such questions load and grade as incorrect.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Question {
    pub id: String,
    pub quiz_id: String,
    pub text: String,
    #[serde(default, deserialize_with = "lenient_question_type")]
    pub question_type: QuestionType,
    #[serde(default)]
    pub options: Vec<String>, // empty for write questions
    /// Non-string entries load as `""`, which never matches.
    #[serde(default, deserialize_with = "lenient_answer_key")]
    pub correct_answers: Vec<String>,
    pub order: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Question {
    pub fn new(
        quiz_id: &str,
        text: &str,
        question_type: QuestionType,
        options: Vec<String>,
        correct_answers: Vec<String>,
        order: i32,
    ) -> Self {
        Question {
            id: Uuid::new_v4().to_string(),
            quiz_id: quiz_id.to_string(),
            text: text.to_string(),
            question_type,
            options,
            correct_answers,
            order,
            created_at: Some(Utc::now()),
        }
    }
}

/// Stored as a plain string. Strings outside the known set are kept as
/// `Unknown` so that old or hand-edited documents still load; they never grade
/// as correct.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(from = "String", into = "String")]
pub enum QuestionType {
    Single,   // one correct option
    Multiple, // a correct subset of options
    Write,    // free text matched against accepted strings
    Unknown(String),
}

impl QuestionType {
    pub fn as_str(&self) -> &str {
        match self {
            QuestionType::Single => "single",
            QuestionType::Multiple => "multiple",
            QuestionType::Write => "write",
            QuestionType::Unknown(raw) => raw,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, QuestionType::Unknown(_))
    }

    /// Whether answers are option identifiers rather than free text.
    pub fn uses_options(&self) -> bool {
        matches!(self, QuestionType::Single | QuestionType::Multiple)
    }
}

impl Default for QuestionType {
    fn default() -> Self {
        QuestionType::Unknown(String::new())
    }
}

#[allow(dead_code)]
#[derive(Deserialize)]
#[serde(untagged)]
enum StoredText {
    Text(String),
    Other(IgnoredAny),
}

impl StoredText {
    fn into_text(self) -> String {
        match self {
            StoredText::Text(text) => text,
            StoredText::Other(_) => String::new(),
        }
    }
}

#[allow(dead_code)]
#[derive(Deserialize)]
#[serde(untagged)]
enum StoredAnswerKey {
    List(Vec<StoredText>),
    Other(IgnoredAny),
}

fn lenient_question_type<'de, D>(deserializer: D) -> Result<QuestionType, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<StoredText>::deserialize(deserializer)?;
    Ok(raw
        .map(|raw| QuestionType::from(raw.into_text()))
        .unwrap_or_default())
}

fn lenient_answer_key<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let key = match Option::<StoredAnswerKey>::deserialize(deserializer)? {
        Some(StoredAnswerKey::List(entries)) => {
            entries.into_iter().map(StoredText::into_text).collect()
        }
        Some(StoredAnswerKey::Other(_)) | None => Vec::new(),
    };
    Ok(key)
}

impl From<String> for QuestionType {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "single" => QuestionType::Single,
            "multiple" => QuestionType::Multiple,
            "write" => QuestionType::Write,
            _ => QuestionType::Unknown(raw),
        }
    }
}

impl From<&str> for QuestionType {
    fn from(raw: &str) -> Self {
        QuestionType::from(raw.to_string())
    }
}

impl From<QuestionType> for String {
    fn from(question_type: QuestionType) -> Self {
        match question_type {
            QuestionType::Unknown(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
