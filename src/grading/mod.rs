//! Answer grading shared by the submission path and the result review path.
//!
//! Everything here is pure and synchronous. Malformed input never fails a
//! grading pass: an answer that cannot be interpreted is simply not correct,
//! and a question without a matching answer is counted as skipped.

use std::collections::{HashMap, HashSet};

use async_graphql::Enum;
use serde::Serialize;

use crate::models::domain::{Question, QuestionType, SelectedOption, SubmittedAnswer};

/// Finds the submitted answer for a question id.
pub trait AnswerLookup {
    fn answer_for(&self, question_id: &str) -> Option<&SubmittedAnswer>;
}

/// First answer with a matching id wins.
impl AnswerLookup for [SubmittedAnswer] {
    fn answer_for(&self, question_id: &str) -> Option<&SubmittedAnswer> {
        self.iter().find(|answer| answer.question_id == question_id)
    }
}

impl AnswerLookup for Vec<SubmittedAnswer> {
    fn answer_for(&self, question_id: &str) -> Option<&SubmittedAnswer> {
        self.as_slice().answer_for(question_id)
    }
}

impl AnswerLookup for HashMap<String, SubmittedAnswer> {
    fn answer_for(&self, question_id: &str) -> Option<&SubmittedAnswer> {
        self.get(question_id)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct QuestionVerdict {
    pub question_id: String,
    pub attempted: bool,
    pub correct: bool,
}

impl QuestionVerdict {
    pub fn status(&self) -> VerdictStatus {
        if !self.attempted {
            VerdictStatus::Skipped
        } else if self.correct {
            VerdictStatus::Correct
        } else {
            VerdictStatus::Incorrect
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Enum)]
#[serde(rename_all = "lowercase")]
pub enum VerdictStatus {
    Correct,
    Incorrect,
    Skipped,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GradingResult {
    /// Number of questions answered correctly, always `<= total`.
    pub score: u32,
    pub total: u32,
    /// One entry per question, in question-list order.
    pub per_question: Vec<QuestionVerdict>,
}

impl GradingResult {
    pub fn verdict_for(&self, question_id: &str) -> Option<&QuestionVerdict> {
        self.per_question
            .iter()
            .find(|verdict| verdict.question_id == question_id)
    }
}

/// Trims surrounding whitespace and lower-cases.
pub fn normalize_text(value: &str) -> String {
    value.trim().to_lowercase()
}

/// A selection counts as attempted unless it is absent, an empty string or
/// an empty list.
pub fn is_attempted(selected: Option<&SelectedOption>) -> bool {
    match selected {
        None => false,
        Some(SelectedOption::Text(text)) => !text.is_empty(),
        Some(SelectedOption::Choices(choices)) => !choices.is_empty(),
        Some(SelectedOption::Other(value)) => match value {
            serde_json::Value::Null => false,
            serde_json::Value::Array(items) => !items.is_empty(),
            _ => true,
        },
    }
}

/// Blank key entries only come from malformed stored questions and never match.
fn is_usable_key(answer: &str) -> bool {
    !answer.trim().is_empty()
}

pub fn grade_one(question: &Question, selected: Option<&SelectedOption>) -> bool {
    let correct_answers = &question.correct_answers;
    if correct_answers.is_empty() {
        return false;
    }

    match (&question.question_type, selected) {
        (QuestionType::Single, Some(SelectedOption::Text(choice))) => correct_answers
            .iter()
            .any(|answer| is_usable_key(answer) && answer == choice),
        (QuestionType::Multiple, Some(SelectedOption::Choices(choices))) => {
            if !correct_answers.iter().all(|answer| is_usable_key(answer)) {
                return false;
            }
            // Compared as sets: repeated picks neither help nor hurt.
            let submitted: HashSet<&str> = choices.iter().map(String::as_str).collect();
            let expected: HashSet<&str> = correct_answers.iter().map(String::as_str).collect();
            submitted == expected
        }
        (QuestionType::Write, Some(SelectedOption::Text(text))) => {
            let normalized = normalize_text(text);
            correct_answers
                .iter()
                .filter(|answer| is_usable_key(answer))
                .any(|answer| normalize_text(answer) == normalized)
        }
        _ => false,
    }
}

/// Grades every question in `questions`, in order, against the answers reachable
/// through `answers`.
pub fn grade_all<A>(questions: &[Question], answers: &A) -> GradingResult
where
    A: AnswerLookup + ?Sized,
{
    let per_question: Vec<QuestionVerdict> = questions
        .iter()
        .map(|question| {
            let selected = answers
                .answer_for(&question.id)
                .and_then(|answer| answer.selected_option.as_ref());

            QuestionVerdict {
                question_id: question.id.clone(),
                attempted: is_attempted(selected),
                correct: grade_one(question, selected),
            }
        })
        .collect();

    let score = per_question.iter().filter(|verdict| verdict.correct).count();

    GradingResult {
        score: score as u32,
        total: per_question.len() as u32,
        per_question,
    }
}
