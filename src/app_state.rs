use std::sync::Arc;

use crate::{
    config::Config,
    db::{Database, HealthCheck},
    errors::AppResult,
    repositories::{
        MongoQuestionRepository, MongoQuizRepository, MongoResultRepository, QuestionRepository,
        QuizRepository, ResultRepository,
    },
    services::{QuizService, ResultService},
};

#[derive(Clone)]
pub struct AppState {
    pub quiz_service: Arc<QuizService>,
    pub result_service: Arc<ResultService>,
    pub health: Arc<dyn HealthCheck>,
    pub config: Arc<Config>,
}

impl AppState {
    pub async fn new(config: Config) -> AppResult<Self> {
        let db = Database::connect(&config).await?;

        let quiz_repository = Arc::new(MongoQuizRepository::new(&db, &config.quizzes_collection));
        quiz_repository.ensure_indexes().await?;

        let question_repository =
            Arc::new(MongoQuestionRepository::new(&db, &config.questions_collection));
        question_repository.ensure_indexes().await?;

        let result_repository =
            Arc::new(MongoResultRepository::new(&db, &config.results_collection));
        result_repository.ensure_indexes().await?;

        Ok(Self::from_repositories(
            config,
            quiz_repository,
            question_repository,
            result_repository,
            Arc::new(db),
        ))
    }

    /// Wires services over any repository implementation.
    pub fn from_repositories(
        config: Config,
        quizzes: Arc<dyn QuizRepository>,
        questions: Arc<dyn QuestionRepository>,
        results: Arc<dyn ResultRepository>,
        health: Arc<dyn HealthCheck>,
    ) -> Self {
        let quiz_service = Arc::new(QuizService::new(quizzes.clone(), questions.clone()));
        let result_service = Arc::new(ResultService::new(quizzes, questions, results));

        Self {
            quiz_service,
            result_service,
            health,
            config: Arc::new(config),
        }
    }
}
