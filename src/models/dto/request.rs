use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::Validate;

use crate::errors::{AppError, AppResult};
use crate::models::domain::{QuestionType, SelectedOption, SubmittedAnswer};

/// Body of `POST /api/results/submit`. Fields are optional so that a missing
/// id or a non-list `answers` is reported as a validation error instead of a
/// deserialization failure.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitQuizRequest {
    #[serde(default)]
    pub quiz_id: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub answers: Option<Value>,
}

/// A submission that passed request validation.
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub quiz_id: String,
    pub user_id: String,
    pub answers: Vec<SubmittedAnswer>,
}

impl SubmitQuizRequest {
    pub fn into_submission(self) -> AppResult<Submission> {
        let quiz_id = non_blank(self.quiz_id);
        let user_id = non_blank(self.user_id);

        let (Some(quiz_id), Some(user_id), Some(Value::Array(raw_answers))) =
            (quiz_id, user_id, self.answers)
        else {
            return Err(AppError::ValidationError("Invalid request data".to_string()));
        };

        let total = raw_answers.len();
        let answers: Vec<SubmittedAnswer> = raw_answers.iter().filter_map(parse_answer).collect();

        if answers.len() < total {
            log::warn!(
                "Dropped {} answer(s) without a question id from submission for quiz {}",
                total - answers.len(),
                quiz_id
            );
        }

        Ok(Submission {
            quiz_id,
            user_id,
            answers,
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Reads one element of `answers`. `questionId` may be a plain id or a
/// populated reference object carrying `_id` or `id`.
pub fn parse_answer(raw: &Value) -> Option<SubmittedAnswer> {
    let object = raw.as_object()?;

    let question_id = match object.get("questionId")? {
        Value::String(id) => id.clone(),
        Value::Object(reference) => reference
            .get("_id")
            .or_else(|| reference.get("id"))
            .and_then(Value::as_str)?
            .to_string(),
        _ => return None,
    };

    let selected_option = match object.get("selectedOption") {
        None | Some(Value::Null) => None,
        Some(value) => serde_json::from_value::<SelectedOption>(value.clone()).ok(),
    };

    Some(SubmittedAnswer {
        question_id,
        selected_option,
    })
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateQuizRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: String,

    #[validate(length(max = 2000))]
    pub description: Option<String>,

    pub created_by: Option<String>,

    #[validate(length(min = 1, max = 200), nested)]
    pub questions: Vec<CreateQuestionRequest>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateQuestionRequest {
    #[validate(length(min = 1, max = 1000))]
    pub text: String,

    #[serde(rename = "type")]
    pub question_type: QuestionType,

    #[serde(default)]
    pub options: Vec<String>,

    #[serde(default)]
    pub correct_answers: Vec<String>,
}

impl CreateQuestionRequest {
    /// Checks the answer key against the question type. `position` is only
    /// used in error messages.
    pub fn check_answer_key(&self, position: usize) -> AppResult<()> {
        let invalid = |reason: &str| {
            Err(AppError::ValidationError(format!(
                "Question {}: {}",
                position + 1,
                reason
            )))
        };

        if !self.question_type.is_known() {
            return invalid(&format!("unknown question type '{}'", self.question_type));
        }
        if self.correct_answers.is_empty() {
            return invalid("at least one correct answer is required");
        }
        if self.correct_answers.iter().any(|a| a.trim().is_empty()) {
            return invalid("correct answers must not be blank");
        }

        if self.question_type.uses_options() {
            if self.options.is_empty() {
                return invalid("options are required for choice questions");
            }
            if let Some(missing) = self
                .correct_answers
                .iter()
                .find(|answer| !self.options.contains(answer))
            {
                return invalid(&format!("correct answer '{}' is not one of the options", missing));
            }
        }

        if self.question_type == QuestionType::Single && self.correct_answers.len() != 1 {
            return invalid("single choice questions need exactly one correct answer");
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PaginationParams {
    #[validate(range(min = 0))]
    pub offset: Option<i64>,

    #[validate(range(min = 1, max = 100))]
    pub limit: Option<i64>,
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            offset: Some(0),
            limit: Some(20),
        }
    }
}

impl PaginationParams {
    pub fn offset(&self) -> i64 {
        self.offset.unwrap_or(0).max(0)
    }

    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(20).clamp(1, 100)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserQuery {
    pub user_id: Option<String>,
}

impl UserQuery {
    pub fn require_user_id(&self) -> AppResult<&str> {
        self.user_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .ok_or_else(|| AppError::ValidationError("userId query parameter is required".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request(body: Value) -> SubmitQuizRequest {
        serde_json::from_value(body).expect("request should deserialize")
    }

    #[test]
    fn submission_requires_ids_and_answer_list() {
        let cases = [
            json!({ "userId": "u", "answers": [] }),
            json!({ "quizId": "q", "answers": [] }),
            json!({ "quizId": "  ", "userId": "u", "answers": [] }),
            json!({ "quizId": "q", "userId": "u" }),
            json!({ "quizId": "q", "userId": "u", "answers": { "questionId": "1" } }),
            json!({ "quizId": "q", "userId": "u", "answers": "A" }),
        ];

        for body in cases {
            let err = request(body.clone()).into_submission().unwrap_err();
            assert!(
                matches!(err, AppError::ValidationError(ref m) if m == "Invalid request data"),
                "expected validation error for {}",
                body
            );
        }
    }

    #[test]
    fn submission_parses_answers_leniently() {
        let submission = request(json!({
            "quizId": "quiz-1",
            "userId": "user-1",
            "answers": [
                { "questionId": "1", "selectedOption": "A" },
                { "questionId": { "_id": "2", "text": "populated" }, "selectedOption": ["B", "C"] },
                { "questionId": "3" },
                { "selectedOption": "orphan" },
                "not an object",
                { "questionId": 4, "selectedOption": "A" },
                { "questionId": "5", "selectedOption": { "weird": true } }
            ]
        }))
        .into_submission()
        .expect("submission should validate");

        assert_eq!(submission.quiz_id, "quiz-1");
        assert_eq!(submission.answers.len(), 4);
        assert_eq!(
            submission.answers[0].selected_option,
            Some(SelectedOption::text("A"))
        );
        assert_eq!(submission.answers[1].question_id, "2");
        assert_eq!(
            submission.answers[1].selected_option,
            Some(SelectedOption::choices(["B", "C"]))
        );
        assert!(submission.answers[2].selected_option.is_none());
        assert!(matches!(
            submission.answers[3].selected_option,
            Some(SelectedOption::Other(_))
        ));
    }

    #[test]
    fn empty_answer_list_is_valid() {
        let submission = request(json!({ "quizId": "q", "userId": "u", "answers": [] }))
            .into_submission()
            .unwrap();
        assert!(submission.answers.is_empty());
    }

    fn question(question_type: &str, options: &[&str], correct: &[&str]) -> CreateQuestionRequest {
        CreateQuestionRequest {
            text: "prompt".to_string(),
            question_type: QuestionType::from(question_type),
            options: options.iter().map(|o| o.to_string()).collect(),
            correct_answers: correct.iter().map(|c| c.to_string()).collect(),
        }
    }

    #[test]
    fn answer_key_checks() {
        assert!(question("single", &["A", "B"], &["A"]).check_answer_key(0).is_ok());
        assert!(question("multiple", &["A", "B", "C"], &["A", "C"]).check_answer_key(0).is_ok());
        assert!(question("write", &[], &["Paris"]).check_answer_key(0).is_ok());

        assert!(question("essay", &[], &["x"]).check_answer_key(0).is_err());
        assert!(question("single", &["A"], &[]).check_answer_key(0).is_err());
        assert!(question("write", &[], &["  "]).check_answer_key(0).is_err());
        assert!(question("single", &["A", "B"], &["A", "B"]).check_answer_key(0).is_err());
        assert!(question("multiple", &[], &["A"]).check_answer_key(0).is_err());

        let err = question("multiple", &["A", "B"], &["A", "Z"])
            .check_answer_key(2)
            .unwrap_err();
        assert!(err.to_string().contains("Question 3"));
        assert!(err.to_string().contains("'Z'"));
    }

    #[test]
    fn create_quiz_request_validation() {
        let valid: CreateQuizRequest = serde_json::from_value(json!({
            "title": "Capitals",
            "questions": [
                { "text": "France?", "type": "write", "correctAnswers": ["Paris"] }
            ]
        }))
        .unwrap();
        assert!(valid.validate().is_ok());

        let no_questions: CreateQuizRequest =
            serde_json::from_value(json!({ "title": "Empty", "questions": [] })).unwrap();
        assert!(no_questions.validate().is_err());

        let blank_title: CreateQuizRequest = serde_json::from_value(json!({
            "title": "",
            "questions": [{ "text": "q", "type": "write", "correctAnswers": ["a"] }]
        }))
        .unwrap();
        assert!(blank_title.validate().is_err());

        let blank_text: CreateQuizRequest = serde_json::from_value(json!({
            "title": "t",
            "questions": [{ "text": "", "type": "write", "correctAnswers": ["a"] }]
        }))
        .unwrap();
        assert!(blank_text.validate().is_err());
    }

    #[test]
    fn create_quiz_request_caps_question_count() {
        let question = json!({ "text": "q", "type": "write", "correctAnswers": ["a"] });
        let at_limit: CreateQuizRequest = serde_json::from_value(json!({
            "title": "Long",
            "questions": vec![question.clone(); 200]
        }))
        .unwrap();
        assert!(at_limit.validate().is_ok());

        let over_limit: CreateQuizRequest = serde_json::from_value(json!({
            "title": "Too long",
            "questions": vec![question; 201]
        }))
        .unwrap();
        let errors = over_limit.validate().unwrap_err();
        assert!(errors.errors().contains_key("questions"));
    }

    #[test]
    fn pagination_defaults_and_clamps() {
        let params = PaginationParams {
            offset: None,
            limit: Some(500),
        };
        assert_eq!(params.offset(), 0);
        assert_eq!(params.limit(), 100);
        assert_eq!(PaginationParams::default().limit(), 20);
    }

    #[test]
    fn user_query_requires_user_id() {
        let query = UserQuery { user_id: Some(" ".to_string()) };
        assert!(query.require_user_id().is_err());

        let query = UserQuery { user_id: Some("user-1".to_string()) };
        assert_eq!(query.require_user_id().unwrap(), "user-1");
    }
}
