use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, Document},
    options::IndexOptions,
    Collection, IndexModel,
};

#[cfg(test)]
use mockall::automock;

use crate::{db::Database, errors::AppResult, models::domain::QuizResult};

#[cfg_attr(test, automock)]
#[async_trait]
pub trait ResultRepository: Send + Sync {
    async fn create(&self, result: QuizResult) -> AppResult<QuizResult>;
    async fn find_by_id(&self, id: &str) -> AppResult<Option<QuizResult>>;
    /// Most recently submitted result of a user for a quiz.
    async fn find_latest_by_user_and_quiz(
        &self,
        user_id: &str,
        quiz_id: &str,
    ) -> AppResult<Option<QuizResult>>;
    /// Newest first.
    async fn list_by_user(
        &self,
        user_id: &str,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<QuizResult>, i64)>;
    /// Newest first.
    async fn list_by_quiz(
        &self,
        quiz_id: &str,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<QuizResult>, i64)>;
}

pub struct MongoResultRepository {
    collection: Collection<QuizResult>,
}

impl MongoResultRepository {
    pub fn new(db: &Database, collection_name: &str) -> Self {
        let collection = db.get_collection(collection_name);
        Self { collection }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for results collection");

        let id_index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("id_unique".to_string())
                    .build(),
            )
            .build();

        let user_quiz_index = IndexModel::builder()
            .keys(doc! { "user_id": 1, "quiz_id": 1, "submitted_at": -1 })
            .options(
                IndexOptions::builder()
                    .name("user_quiz_submitted".to_string())
                    .build(),
            )
            .build();

        let quiz_index = IndexModel::builder()
            .keys(doc! { "quiz_id": 1, "submitted_at": -1 })
            .options(
                IndexOptions::builder()
                    .name("quiz_submitted".to_string())
                    .build(),
            )
            .build();

        self.collection.create_index(id_index).await?;
        self.collection.create_index(user_quiz_index).await?;
        self.collection.create_index(quiz_index).await?;

        log::info!("Successfully created indexes for results collection");
        Ok(())
    }

    async fn list_page(
        &self,
        filter: Document,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<QuizResult>, i64)> {
        let total = self.collection.count_documents(filter.clone()).await?;

        let results = self
            .collection
            .find(filter)
            .sort(doc! { "submitted_at": -1 })
            .skip(offset.max(0) as u64)
            .limit(limit)
            .await?
            .try_collect()
            .await?;

        Ok((results, total as i64))
    }
}

#[async_trait]
impl ResultRepository for MongoResultRepository {
    async fn create(&self, result: QuizResult) -> AppResult<QuizResult> {
        self.collection.insert_one(&result).await?;
        Ok(result)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<QuizResult>> {
        let result = self.collection.find_one(doc! { "id": id }).await?;
        Ok(result)
    }

    async fn find_latest_by_user_and_quiz(
        &self,
        user_id: &str,
        quiz_id: &str,
    ) -> AppResult<Option<QuizResult>> {
        let result = self
            .collection
            .find_one(doc! { "user_id": user_id, "quiz_id": quiz_id })
            .sort(doc! { "submitted_at": -1 })
            .await?;
        Ok(result)
    }

    async fn list_by_user(
        &self,
        user_id: &str,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<QuizResult>, i64)> {
        self.list_page(doc! { "user_id": user_id }, offset, limit)
            .await
    }

    async fn list_by_quiz(
        &self,
        quiz_id: &str,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<QuizResult>, i64)> {
        self.list_page(doc! { "quiz_id": quiz_id }, offset, limit)
            .await
    }
}
