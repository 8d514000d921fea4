#[cfg(test)]
pub mod fixtures {
    use crate::models::domain::{Question, QuestionType, Quiz};

    /// A question with a fixed id and no options.
    pub fn question(id: &str, question_type: &str, correct: &[&str]) -> Question {
        let mut question = Question::new(
            "quiz-1",
            "prompt",
            QuestionType::from(question_type),
            vec![],
            correct.iter().map(|c| c.to_string()).collect(),
            0,
        );
        question.id = id.to_string();
        question
    }

    /// Single, multiple and write questions with ids "1", "2" and "3".
    pub fn scenario_questions() -> Vec<Question> {
        let mut questions = vec![
            question("1", "single", &["A"]),
            question("2", "multiple", &["B", "C"]),
            question("3", "write", &["42"]),
        ];
        for (order, q) in questions.iter_mut().enumerate() {
            q.order = order as i32;
            q.text = format!("Question {}", q.id);
            if q.question_type.uses_options() {
                q.options = vec!["A".into(), "B".into(), "C".into(), "D".into()];
            }
        }
        questions
    }

    pub fn scenario_quiz() -> Quiz {
        let mut quiz = Quiz::new("Mixed bag", None, None);
        quiz.id = "quiz-1".to_string();
        quiz
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use crate::models::domain::QuestionType;

    #[test]
    fn test_fixtures_scenario_questions() {
        let questions = scenario_questions();
        assert_eq!(questions.len(), 3);
        assert_eq!(questions[1].question_type, QuestionType::Multiple);
        assert_eq!(questions[2].order, 2);
        assert!(questions[2].options.is_empty());
    }

    #[test]
    fn test_fixtures_scenario_quiz() {
        assert_eq!(scenario_quiz().id, "quiz-1");
    }
}
