use std::sync::Arc;

use validator::Validate;

use crate::{
    errors::{AppError, AppResult},
    models::{
        domain::{Question, Quiz},
        dto::{
            request::CreateQuizRequest,
            response::{CreateQuizResponse, Paginated, QuestionForTakingDto, QuizDto, QuizForTakingDto},
        },
    },
    repositories::{QuestionRepository, QuizRepository},
};

pub struct QuizService {
    quizzes: Arc<dyn QuizRepository>,
    questions: Arc<dyn QuestionRepository>,
}

impl QuizService {
    pub fn new(quizzes: Arc<dyn QuizRepository>, questions: Arc<dyn QuestionRepository>) -> Self {
        Self { quizzes, questions }
    }

    pub async fn create_quiz(&self, request: CreateQuizRequest) -> AppResult<CreateQuizResponse> {
        request.validate()?;
        for (position, question) in request.questions.iter().enumerate() {
            question.check_answer_key(position)?;
        }

        let quiz = Quiz::new(
            request.title.trim(),
            request.description.as_deref(),
            request.created_by.as_deref(),
        );

        let questions: Vec<Question> = request
            .questions
            .into_iter()
            .enumerate()
            .map(|(order, q)| {
                Question::new(
                    &quiz.id,
                    q.text.trim(),
                    q.question_type,
                    q.options,
                    q.correct_answers,
                    order as i32,
                )
            })
            .collect();

        // A quiz is only stored once its questions are.
        let questions = self.questions.insert_many(questions).await?;
        let quiz = self.quizzes.create(quiz).await?;

        log::info!(
            "Created quiz {} with {} question(s)",
            quiz.id,
            questions.len()
        );

        Ok(CreateQuizResponse {
            message: "Quiz created successfully".to_string(),
            quiz: quiz.into(),
            question_count: questions.len() as u32,
        })
    }

    pub async fn get_quiz(&self, id: &str) -> AppResult<Quiz> {
        self.quizzes
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Quiz with id '{}' not found", id)))
    }

    pub async fn get_quiz_for_taking(&self, id: &str) -> AppResult<QuizForTakingDto> {
        let quiz = self.get_quiz(id).await?;
        let questions = self.questions.find_by_quiz(&quiz.id).await?;

        Ok(QuizForTakingDto {
            quiz: quiz.into(),
            questions: questions.into_iter().map(QuestionForTakingDto::from).collect(),
        })
    }

    pub async fn list_quizzes(&self, offset: i64, limit: i64) -> AppResult<Paginated<QuizDto>> {
        let (quizzes, total) = self.quizzes.list(offset, limit).await?;

        Ok(Paginated {
            items: quizzes.into_iter().map(QuizDto::from).collect(),
            total,
            offset,
            limit,
        })
    }
}
