use async_graphql::{Context, Object, ID};

use crate::{
    app_state::AppState,
    graphql::helpers::{gql, page_bounds, require_id},
    models::dto::response::{
        Paginated, QuizDto, QuizForTakingDto, QuizResultDto, ResultReviewDto, ResultSummaryDto,
    },
};

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    async fn quiz(&self, ctx: &Context<'_>, id: ID) -> async_graphql::Result<QuizForTakingDto> {
        let state = ctx.data::<AppState>()?;
        let id = gql(require_id("id", &id))?;
        gql(state.quiz_service.get_quiz_for_taking(id).await)
    }

    async fn quizzes(
        &self,
        ctx: &Context<'_>,
        offset: Option<i64>,
        limit: Option<i64>,
    ) -> async_graphql::Result<Paginated<QuizDto>> {
        let state = ctx.data::<AppState>()?;
        let (offset, limit) = page_bounds(offset, limit);
        gql(state.quiz_service.list_quizzes(offset, limit).await)
    }

    async fn result(&self, ctx: &Context<'_>, id: ID) -> async_graphql::Result<QuizResultDto> {
        let state = ctx.data::<AppState>()?;
        let id = gql(require_id("id", &id))?;
        gql(state.result_service.get_result(id).await)
    }

    /// Stored result graded again against the current questions.
    async fn result_review(
        &self,
        ctx: &Context<'_>,
        id: ID,
    ) -> async_graphql::Result<ResultReviewDto> {
        let state = ctx.data::<AppState>()?;
        let id = gql(require_id("id", &id))?;
        gql(state.result_service.review_result(id).await)
    }

    async fn results_for_user(
        &self,
        ctx: &Context<'_>,
        user_id: ID,
        offset: Option<i64>,
        limit: Option<i64>,
    ) -> async_graphql::Result<Paginated<ResultSummaryDto>> {
        let state = ctx.data::<AppState>()?;
        let user_id = gql(require_id("userId", &user_id))?;
        let (offset, limit) = page_bounds(offset, limit);
        gql(state
            .result_service
            .results_for_user(user_id, offset, limit)
            .await)
    }

    async fn results_for_quiz(
        &self,
        ctx: &Context<'_>,
        quiz_id: ID,
        offset: Option<i64>,
        limit: Option<i64>,
    ) -> async_graphql::Result<Paginated<ResultSummaryDto>> {
        let state = ctx.data::<AppState>()?;
        let quiz_id = gql(require_id("quizId", &quiz_id))?;
        let (offset, limit) = page_bounds(offset, limit);
        gql(state
            .result_service
            .results_for_quiz(quiz_id, offset, limit)
            .await)
    }
}
