use actix_web::{get, post, web, HttpResponse};
use validator::Validate;

use crate::{
    app_state::AppState,
    errors::AppError,
    models::dto::request::{PaginationParams, SubmitQuizRequest, UserQuery},
};

#[post("/api/results/submit")]
pub async fn submit_quiz(
    state: web::Data<AppState>,
    request: web::Json<SubmitQuizRequest>,
) -> Result<HttpResponse, AppError> {
    let response = state.result_service.submit(request.into_inner()).await?;
    Ok(HttpResponse::Created().json(response))
}

#[get("/api/results/user/{user_id}")]
pub async fn results_for_user(
    state: web::Data<AppState>,
    user_id: web::Path<String>,
    query: web::Query<PaginationParams>,
) -> Result<HttpResponse, AppError> {
    let pagination = query.into_inner();
    pagination.validate()?;

    let response = state
        .result_service
        .results_for_user(&user_id, pagination.offset(), pagination.limit())
        .await?;
    Ok(HttpResponse::Ok().json(response))
}

#[get("/api/results/user/{user_id}/quiz/{quiz_id}")]
pub async fn latest_result_for_user(
    state: web::Data<AppState>,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse, AppError> {
    let (user_id, quiz_id) = path.into_inner();
    let result = state.result_service.latest_result(&user_id, &quiz_id).await?;
    Ok(HttpResponse::Ok().json(result))
}

/// Every result submitted for a quiz, for admins.
#[get("/api/results/admin/{quiz_id}")]
pub async fn results_for_quiz(
    state: web::Data<AppState>,
    quiz_id: web::Path<String>,
    query: web::Query<PaginationParams>,
) -> Result<HttpResponse, AppError> {
    let pagination = query.into_inner();
    pagination.validate()?;

    let response = state
        .result_service
        .results_for_quiz(&quiz_id, pagination.offset(), pagination.limit())
        .await?;
    Ok(HttpResponse::Ok().json(response))
}

#[get("/api/results/quiz/{quiz_id}/review")]
pub async fn review_latest_result(
    state: web::Data<AppState>,
    quiz_id: web::Path<String>,
    query: web::Query<UserQuery>,
) -> Result<HttpResponse, AppError> {
    let user_id = query.require_user_id()?;
    let review = state.result_service.review_latest(user_id, &quiz_id).await?;
    Ok(HttpResponse::Ok().json(review))
}

#[get("/api/results/quiz/{quiz_id}")]
pub async fn latest_result_for_quiz(
    state: web::Data<AppState>,
    quiz_id: web::Path<String>,
    query: web::Query<UserQuery>,
) -> Result<HttpResponse, AppError> {
    let user_id = query.require_user_id()?;
    let result = state.result_service.latest_result(user_id, &quiz_id).await?;
    Ok(HttpResponse::Ok().json(result))
}

#[get("/api/results/{result_id}/review")]
pub async fn review_result(
    state: web::Data<AppState>,
    result_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let review = state.result_service.review_result(&result_id).await?;
    Ok(HttpResponse::Ok().json(review))
}

#[get("/api/results/{result_id}")]
pub async fn get_result(
    state: web::Data<AppState>,
    result_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let result = state.result_service.get_result(&result_id).await?;
    Ok(HttpResponse::Ok().json(result))
}
