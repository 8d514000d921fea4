pub mod health_handler;
pub mod quiz_handler;
pub mod result_handler;

use actix_web::web;

use crate::{errors::AppError, middleware::get_request_id};

pub use health_handler::{health_check, health_check_live, health_check_ready};
pub use quiz_handler::{create_quiz, get_quiz, list_quizzes};
pub use result_handler::{
    get_result, latest_result_for_quiz, latest_result_for_user, results_for_quiz,
    results_for_user, review_latest_result, review_result, submit_quiz,
};

/// Registers every REST route. Specific result paths go before `/{result_id}`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .app_data(query_config())
        .service(health_check)
        .service(health_check_ready)
        .service(health_check_live)
        .service(create_quiz)
        .service(list_quizzes)
        .service(get_quiz)
        .service(submit_quiz)
        .service(results_for_user)
        .service(latest_result_for_user)
        .service(results_for_quiz)
        .service(review_latest_result)
        .service(latest_result_for_quiz)
        .service(review_result)
        .service(get_result);
}

/// Malformed JSON bodies become the same 400 as a failed validation.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(256 * 1024)
        .error_handler(|err, req| {
            log::debug!(
                "Rejected JSON payload [{}]: {}",
                get_request_id(req).unwrap_or_default(),
                err
            );
            AppError::ValidationError("Invalid request data".to_string()).into()
        })
}

pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default()
        .error_handler(|err, _req| AppError::ValidationError(err.to_string()).into())
}
