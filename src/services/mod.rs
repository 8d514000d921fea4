pub mod quiz_service;
pub mod result_service;

pub use quiz_service::QuizService;
pub use result_service::ResultService;
