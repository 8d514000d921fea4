pub mod question;
pub mod quiz;
pub mod quiz_result;

pub use question::{Question, QuestionType};
pub use quiz::Quiz;
pub use quiz_result::{QuizResult, SelectedOption, SubmittedAnswer};
