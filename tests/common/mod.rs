#![allow(dead_code)]

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::RwLock;

use quizmark_server::{
    app_state::AppState,
    config::Config,
    db::HealthCheck,
    errors::{AppError, AppResult},
    models::domain::{Question, Quiz, QuizResult},
    repositories::{QuestionRepository, QuizRepository, ResultRepository},
};

fn page<T: Clone>(items: &[T], offset: i64, limit: i64) -> Vec<T> {
    let start = offset.max(0) as usize;
    if start >= items.len() {
        return vec![];
    }
    let end = (start + limit.max(0) as usize).min(items.len());
    items[start..end].to_vec()
}

#[derive(Default)]
pub struct InMemoryQuizRepository {
    quizzes: RwLock<HashMap<String, Quiz>>,
}

#[async_trait]
impl QuizRepository for InMemoryQuizRepository {
    async fn create(&self, quiz: Quiz) -> AppResult<Quiz> {
        let mut quizzes = self.quizzes.write().await;
        if quizzes.contains_key(&quiz.id) {
            return Err(AppError::DatabaseError(format!(
                "Duplicate quiz id '{}'",
                quiz.id
            )));
        }
        quizzes.insert(quiz.id.clone(), quiz.clone());
        Ok(quiz)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<Quiz>> {
        Ok(self.quizzes.read().await.get(id).cloned())
    }

    async fn find_by_ids(&self, ids: &[String]) -> AppResult<Vec<Quiz>> {
        let quizzes = self.quizzes.read().await;
        Ok(ids.iter().filter_map(|id| quizzes.get(id).cloned()).collect())
    }

    async fn list(&self, offset: i64, limit: i64) -> AppResult<(Vec<Quiz>, i64)> {
        let quizzes = self.quizzes.read().await;
        let mut items: Vec<Quiz> = quizzes.values().cloned().collect();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));

        Ok((page(&items, offset, limit), items.len() as i64))
    }
}

#[derive(Default)]
pub struct InMemoryQuestionRepository {
    questions: RwLock<Vec<Question>>,
}

#[async_trait]
impl QuestionRepository for InMemoryQuestionRepository {
    async fn insert_many(&self, questions: Vec<Question>) -> AppResult<Vec<Question>> {
        self.questions.write().await.extend(questions.iter().cloned());
        Ok(questions)
    }

    async fn find_by_quiz(&self, quiz_id: &str) -> AppResult<Vec<Question>> {
        let mut items: Vec<Question> = self
            .questions
            .read()
            .await
            .iter()
            .filter(|q| q.quiz_id == quiz_id)
            .cloned()
            .collect();
        items.sort_by_key(|q| q.order);
        Ok(items)
    }
}

#[derive(Default)]
pub struct InMemoryResultRepository {
    results: RwLock<Vec<QuizResult>>,
}

impl InMemoryResultRepository {
    async fn newest_first<F>(&self, filter: F) -> Vec<QuizResult>
    where
        F: Fn(&QuizResult) -> bool,
    {
        let mut items: Vec<QuizResult> = self
            .results
            .read()
            .await
            .iter()
            .filter(|r| filter(r))
            .cloned()
            .collect();
        items.sort_by(|a, b| b.submitted_at.cmp(&a.submitted_at));
        items
    }
}

#[async_trait]
impl ResultRepository for InMemoryResultRepository {
    async fn create(&self, result: QuizResult) -> AppResult<QuizResult> {
        self.results.write().await.push(result.clone());
        Ok(result)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<QuizResult>> {
        Ok(self
            .results
            .read()
            .await
            .iter()
            .find(|r| r.id == id)
            .cloned())
    }

    async fn find_latest_by_user_and_quiz(
        &self,
        user_id: &str,
        quiz_id: &str,
    ) -> AppResult<Option<QuizResult>> {
        let items = self
            .newest_first(|r| r.user_id == user_id && r.quiz_id == quiz_id)
            .await;
        Ok(items.into_iter().next())
    }

    async fn list_by_user(
        &self,
        user_id: &str,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<QuizResult>, i64)> {
        let items = self.newest_first(|r| r.user_id == user_id).await;
        Ok((page(&items, offset, limit), items.len() as i64))
    }

    async fn list_by_quiz(
        &self,
        quiz_id: &str,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<QuizResult>, i64)> {
        let items = self.newest_first(|r| r.quiz_id == quiz_id).await;
        Ok((page(&items, offset, limit), items.len() as i64))
    }
}

pub struct StubHealth {
    pub healthy: bool,
}

#[async_trait]
impl HealthCheck for StubHealth {
    async fn health_check(&self) -> AppResult<()> {
        if self.healthy {
            Ok(())
        } else {
            Err(AppError::DatabaseError("connection refused".to_string()))
        }
    }
}

pub struct TestRepos {
    pub quizzes: Arc<InMemoryQuizRepository>,
    pub questions: Arc<InMemoryQuestionRepository>,
    pub results: Arc<InMemoryResultRepository>,
}

impl TestRepos {
    pub fn new() -> Self {
        Self {
            quizzes: Arc::new(InMemoryQuizRepository::default()),
            questions: Arc::new(InMemoryQuestionRepository::default()),
            results: Arc::new(InMemoryResultRepository::default()),
        }
    }

    pub fn state(&self, healthy: bool) -> AppState {
        AppState::from_repositories(
            Config::test_config(),
            self.quizzes.clone(),
            self.questions.clone(),
            self.results.clone(),
            Arc::new(StubHealth { healthy }),
        )
    }
}
