use async_graphql::{Context, Json, Object, ID};

use crate::{
    app_state::AppState,
    graphql::helpers::gql,
    models::dto::{request::SubmitQuizRequest, response::SubmitQuizResponse},
};

pub struct MutationRoot;

#[Object]
impl MutationRoot {
    /// Same submission path as `POST /api/results/submit`; `answers` is the raw
    /// answer list.
    async fn submit_quiz(
        &self,
        ctx: &Context<'_>,
        quiz_id: ID,
        user_id: ID,
        answers: Json<serde_json::Value>,
    ) -> async_graphql::Result<SubmitQuizResponse> {
        let state = ctx.data::<AppState>()?;

        let request = SubmitQuizRequest {
            quiz_id: Some(quiz_id.to_string()),
            user_id: Some(user_id.to_string()),
            answers: Some(answers.0),
        };

        gql(state.result_service.submit(request).await)
    }
}
