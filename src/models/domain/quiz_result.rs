use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// A graded submission. Created once at submission time and never mutated;
/// `score` is the grade at that moment and is re-derived for display.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct QuizResult {
    pub id: String,
    pub quiz_id: String,
    pub user_id: String,
    pub answers: Vec<SubmittedAnswer>,
    pub score: u32,
    pub total_questions: u32,
    /// Stored as a BSON datetime so that sorting follows time order.
    #[serde(with = "bson_datetime")]
    pub submitted_at: DateTime<Utc>,
}

impl QuizResult {
    pub fn new(
        quiz_id: &str,
        user_id: &str,
        answers: Vec<SubmittedAnswer>,
        score: u32,
        total_questions: u32,
    ) -> Self {
        QuizResult {
            id: Uuid::new_v4().to_string(),
            quiz_id: quiz_id.to_string(),
            user_id: user_id.to_string(),
            answers,
            score,
            total_questions,
            submitted_at: Utc::now(),
        }
    }
}

mod bson_datetime {
    use chrono::{DateTime, Utc};
    use mongodb::bson;
    use serde::{de::Error, Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        bson::DateTime::from_millis(value.timestamp_millis()).serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let stored = bson::DateTime::deserialize(deserializer)?;
        DateTime::from_timestamp_millis(stored.timestamp_millis())
            .ok_or_else(|| D::Error::custom("submitted_at is out of range"))
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct SubmittedAnswer {
    pub question_id: String,
    #[serde(default)]
    pub selected_option: Option<SelectedOption>,
}

impl SubmittedAnswer {
    pub fn new(question_id: &str, selected_option: Option<SelectedOption>) -> Self {
        SubmittedAnswer {
            question_id: question_id.to_string(),
            selected_option,
        }
    }
}

/// The raw value a user picked or typed. Anything that is neither a string nor
/// a list of strings lands in `Other` and is kept as-is.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum SelectedOption {
    Text(String),
    Choices(Vec<String>),
    Other(Value),
}

impl SelectedOption {
    pub fn text(value: &str) -> Self {
        SelectedOption::Text(value.to_string())
    }

    pub fn choices<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        SelectedOption::Choices(values.into_iter().map(Into::into).collect())
    }

    /// Human readable form; lists are joined with `", "`.
    pub fn display(&self) -> String {
        match self {
            SelectedOption::Text(text) => text.clone(),
            SelectedOption::Choices(choices) => choices.join(", "),
            SelectedOption::Other(Value::Array(items)) => items
                .iter()
                .map(display_value)
                .collect::<Vec<_>>()
                .join(", "),
            SelectedOption::Other(value) => display_value(value),
        }
    }
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
