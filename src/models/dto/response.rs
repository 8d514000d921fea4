use async_graphql::{OutputType, SimpleObject};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::grading::VerdictStatus;
use crate::models::domain::{Question, Quiz, QuizResult, SelectedOption, SubmittedAnswer};

#[derive(Debug, Clone, Serialize, SimpleObject)]
#[serde(rename_all = "camelCase")]
pub struct QuizDto {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub created_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl From<Quiz> for QuizDto {
    fn from(quiz: Quiz) -> Self {
        QuizDto {
            id: quiz.id,
            title: quiz.title,
            description: quiz.description,
            created_by: quiz.created_by,
            created_at: quiz.created_at,
        }
    }
}

/// A question as shown to someone taking the quiz; the answer key is left out.
#[derive(Debug, Clone, Serialize, SimpleObject)]
#[serde(rename_all = "camelCase")]
pub struct QuestionForTakingDto {
    pub id: String,
    pub text: String,
    #[serde(rename = "type")]
    pub question_type: String,
    pub options: Vec<String>,
    pub order: i32,
}

impl From<Question> for QuestionForTakingDto {
    fn from(question: Question) -> Self {
        QuestionForTakingDto {
            id: question.id,
            text: question.text,
            question_type: question.question_type.to_string(),
            options: question.options,
            order: question.order,
        }
    }
}

#[derive(Debug, Clone, Serialize, SimpleObject)]
pub struct QuizForTakingDto {
    pub quiz: QuizDto,
    pub questions: Vec<QuestionForTakingDto>,
}

#[derive(Debug, Clone, Serialize, SimpleObject)]
#[serde(rename_all = "camelCase")]
pub struct CreateQuizResponse {
    pub message: String,
    pub quiz: QuizDto,
    pub question_count: u32,
}

#[derive(Debug, Clone, Serialize, SimpleObject)]
#[serde(rename_all = "camelCase")]
pub struct SubmitQuizResponse {
    pub message: String,
    pub result_id: String,
    pub score: u32,
    pub total_questions: u32,
}

#[derive(Debug, Clone, Serialize, SimpleObject)]
#[serde(rename_all = "camelCase")]
pub struct AnswerDto {
    pub question_id: String,
    #[graphql(skip)]
    pub selected_option: Option<SelectedOption>,
    /// Joined selection, empty when nothing was selected.
    pub answer_text: String,
}

impl From<SubmittedAnswer> for AnswerDto {
    fn from(answer: SubmittedAnswer) -> Self {
        let answer_text = answer
            .selected_option
            .as_ref()
            .map(SelectedOption::display)
            .unwrap_or_default();

        AnswerDto {
            question_id: answer.question_id,
            selected_option: answer.selected_option,
            answer_text,
        }
    }
}

#[derive(Debug, Clone, Serialize, SimpleObject)]
#[serde(rename_all = "camelCase")]
pub struct QuizResultDto {
    pub id: String,
    pub quiz_id: String,
    pub user_id: String,
    pub score: u32,
    pub total_questions: u32,
    pub submitted_at: DateTime<Utc>,
    pub answers: Vec<AnswerDto>,
}

impl From<QuizResult> for QuizResultDto {
    fn from(result: QuizResult) -> Self {
        QuizResultDto {
            id: result.id,
            quiz_id: result.quiz_id,
            user_id: result.user_id,
            score: result.score,
            total_questions: result.total_questions,
            submitted_at: result.submitted_at,
            answers: result.answers.into_iter().map(AnswerDto::from).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, SimpleObject)]
#[serde(rename_all = "camelCase")]
pub struct ResultSummaryDto {
    pub id: String,
    pub quiz_id: String,
    pub quiz_title: Option<String>,
    pub user_id: String,
    pub score: u32,
    pub total_questions: u32,
    pub submitted_at: DateTime<Utc>,
}

impl ResultSummaryDto {
    pub fn new(result: QuizResult, quiz_title: Option<String>) -> Self {
        ResultSummaryDto {
            id: result.id,
            quiz_id: result.quiz_id,
            quiz_title,
            user_id: result.user_id,
            score: result.score,
            total_questions: result.total_questions,
            submitted_at: result.submitted_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, SimpleObject)]
#[serde(rename_all = "camelCase")]
pub struct QuestionFeedbackDto {
    pub question_id: String,
    pub text: String,
    pub question_type: String,
    pub status: VerdictStatus,
    pub attempted: bool,
    pub correct: bool,
    pub your_answer: String,
    pub correct_answer: String,
}

/// Per-question feedback for a stored result, graded again from the raw answers.
#[derive(Debug, Clone, Serialize, SimpleObject)]
#[serde(rename_all = "camelCase")]
pub struct ResultReviewDto {
    pub result_id: String,
    pub quiz_id: String,
    /// `None` once the quiz has been deleted.
    pub quiz_title: Option<String>,
    pub user_id: String,
    pub score: u32,
    /// Score recorded at submission; differs from `score` if the quiz changed since.
    pub stored_score: u32,
    pub total_questions: u32,
    pub submitted_at: DateTime<Utc>,
    pub questions: Vec<QuestionFeedbackDto>,
}

#[derive(Debug, Clone, Serialize, SimpleObject)]
#[graphql(concrete(name = "PaginatedQuizzes", params(QuizDto)))]
#[graphql(concrete(name = "PaginatedResultSummaries", params(ResultSummaryDto)))]
pub struct Paginated<T: OutputType> {
    pub items: Vec<T>,
    pub total: i64,
    pub offset: i64,
    pub limit: i64,
}
