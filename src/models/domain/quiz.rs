use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Quiz {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub created_by: Option<String>, // author's user id, if known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified_at: Option<DateTime<Utc>>,
}

impl Quiz {
    pub fn new(title: &str, description: Option<&str>, created_by: Option<&str>) -> Self {
        let now = Utc::now();
        Quiz {
            id: Uuid::new_v4().to_string(),
            title: title.to_string(),
            description: description.map(str::to_string),
            created_by: created_by.map(str::to_string),
            created_at: Some(now),
            modified_at: Some(now),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_quiz_gets_unique_id_and_timestamps() {
        let a = Quiz::new("Geography", None, Some("author-1"));
        let b = Quiz::new("Geography", None, Some("author-1"));

        assert_ne!(a.id, b.id);
        assert!(a.created_at.is_some());
        assert_eq!(a.created_by.as_deref(), Some("author-1"));
    }
}
