use std::collections::HashMap;
use std::sync::Arc;

use crate::{
    errors::{AppError, AppResult},
    grading::{self, GradingResult},
    models::{
        domain::{Question, QuizResult, SelectedOption},
        dto::{
            request::SubmitQuizRequest,
            response::{
                Paginated, QuestionFeedbackDto, QuizResultDto, ResultReviewDto, ResultSummaryDto,
                SubmitQuizResponse,
            },
        },
    },
    repositories::{QuestionRepository, QuizRepository, ResultRepository},
};

const NOT_ANSWERED: &str = "Not answered";

/// Submission and display of quiz results. Both paths score through
/// [`grading::grade_all`], so a review always agrees with how a fresh
/// submission would be graded.
pub struct ResultService {
    quizzes: Arc<dyn QuizRepository>,
    questions: Arc<dyn QuestionRepository>,
    results: Arc<dyn ResultRepository>,
}

impl ResultService {
    pub fn new(
        quizzes: Arc<dyn QuizRepository>,
        questions: Arc<dyn QuestionRepository>,
        results: Arc<dyn ResultRepository>,
    ) -> Self {
        Self {
            quizzes,
            questions,
            results,
        }
    }

    pub async fn submit(&self, request: SubmitQuizRequest) -> AppResult<SubmitQuizResponse> {
        let submission = request.into_submission()?;

        let quiz = self
            .quizzes
            .find_by_id(&submission.quiz_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Quiz with id '{}' not found", submission.quiz_id))
            })?;
        let questions = self.questions.find_by_quiz(&quiz.id).await?;

        let grading = grading::grade_all(&questions, submission.answers.as_slice());

        let result = QuizResult::new(
            &quiz.id,
            &submission.user_id,
            submission.answers,
            grading.score,
            grading.total,
        );
        let result = self.results.create(result).await?;

        log::info!(
            "Stored result {} for user {} on quiz {}: {}/{}",
            result.id,
            result.user_id,
            result.quiz_id,
            result.score,
            result.total_questions
        );

        Ok(SubmitQuizResponse {
            message: "Quiz submitted successfully".to_string(),
            result_id: result.id,
            score: result.score,
            total_questions: result.total_questions,
        })
    }

    pub async fn get_result(&self, id: &str) -> AppResult<QuizResultDto> {
        Ok(self.find_result(id).await?.into())
    }

    pub async fn latest_result(&self, user_id: &str, quiz_id: &str) -> AppResult<QuizResultDto> {
        Ok(self.find_latest(user_id, quiz_id).await?.into())
    }

    pub async fn review_result(&self, id: &str) -> AppResult<ResultReviewDto> {
        let result = self.find_result(id).await?;
        self.review(result).await
    }

    pub async fn review_latest(&self, user_id: &str, quiz_id: &str) -> AppResult<ResultReviewDto> {
        let result = self.find_latest(user_id, quiz_id).await?;
        self.review(result).await
    }

    pub async fn results_for_user(
        &self,
        user_id: &str,
        offset: i64,
        limit: i64,
    ) -> AppResult<Paginated<ResultSummaryDto>> {
        let (results, total) = self.results.list_by_user(user_id, offset, limit).await?;
        let items = self.summarize(results).await?;

        Ok(Paginated {
            items,
            total,
            offset,
            limit,
        })
    }

    pub async fn results_for_quiz(
        &self,
        quiz_id: &str,
        offset: i64,
        limit: i64,
    ) -> AppResult<Paginated<ResultSummaryDto>> {
        let (results, total) = self.results.list_by_quiz(quiz_id, offset, limit).await?;
        let items = self.summarize(results).await?;

        Ok(Paginated {
            items,
            total,
            offset,
            limit,
        })
    }

    async fn find_result(&self, id: &str) -> AppResult<QuizResult> {
        self.results
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Result with id '{}' not found", id)))
    }

    async fn find_latest(&self, user_id: &str, quiz_id: &str) -> AppResult<QuizResult> {
        self.results
            .find_latest_by_user_and_quiz(user_id, quiz_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "No result for user '{}' on quiz '{}'",
                    user_id, quiz_id
                ))
            })
    }

    async fn review(&self, result: QuizResult) -> AppResult<ResultReviewDto> {
        let quiz = self.quizzes.find_by_id(&result.quiz_id).await?;
        if quiz.is_none() {
            log::warn!(
                "Quiz {} of result {} no longer exists; reviewing against its remaining questions",
                result.quiz_id,
                result.id
            );
        }
        let questions = self.questions.find_by_quiz(&result.quiz_id).await?;

        let grading = grading::grade_all(&questions, result.answers.as_slice());
        if grading.score != result.score || grading.total != result.total_questions {
            log::warn!(
                "Stored score {}/{} for result {} differs from re-graded {}/{}",
                result.score,
                result.total_questions,
                result.id,
                grading.score,
                grading.total
            );
        }

        let feedback = question_feedback(&questions, &result, &grading);

        Ok(ResultReviewDto {
            result_id: result.id,
            quiz_id: result.quiz_id,
            quiz_title: quiz.map(|quiz| quiz.title),
            user_id: result.user_id,
            score: grading.score,
            stored_score: result.score,
            total_questions: grading.total,
            submitted_at: result.submitted_at,
            questions: feedback,
        })
    }

    async fn summarize(&self, results: Vec<QuizResult>) -> AppResult<Vec<ResultSummaryDto>> {
        let mut quiz_ids: Vec<String> = results.iter().map(|r| r.quiz_id.clone()).collect();
        quiz_ids.sort();
        quiz_ids.dedup();

        let titles: HashMap<String, String> = self
            .quizzes
            .find_by_ids(&quiz_ids)
            .await?
            .into_iter()
            .map(|quiz| (quiz.id, quiz.title))
            .collect();

        Ok(results
            .into_iter()
            .map(|result| {
                let title = titles.get(&result.quiz_id).cloned();
                ResultSummaryDto::new(result, title)
            })
            .collect())
    }
}

fn question_feedback(
    questions: &[Question],
    result: &QuizResult,
    grading: &GradingResult,
) -> Vec<QuestionFeedbackDto> {
    questions
        .iter()
        .zip(&grading.per_question)
        .map(|(question, verdict)| {
            let your_answer = if verdict.attempted {
                result
                    .answers
                    .iter()
                    .find(|answer| answer.question_id == question.id)
                    .and_then(|answer| answer.selected_option.as_ref())
                    .map(SelectedOption::display)
                    .unwrap_or_else(|| NOT_ANSWERED.to_string())
            } else {
                NOT_ANSWERED.to_string()
            };

            QuestionFeedbackDto {
                question_id: question.id.clone(),
                text: question.text.clone(),
                question_type: question.question_type.to_string(),
                status: verdict.status(),
                attempted: verdict.attempted,
                correct: verdict.correct,
                your_answer,
                correct_answer: question.correct_answers.join(", "),
            }
        })
        .collect()
}
