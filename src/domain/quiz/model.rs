use crate::domain::ai::{parse_json_array, ResponseFormatError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const OPTIONS_PER_QUESTION: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestion {
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer_index: u8,
    pub explanation: String,
}

impl QuizQuestion {
    fn validate(&self) -> Result<(), String> {
        if self.question.trim().is_empty() {
            return Err("question must not be blank".to_string());
        }
        if self.options.len() != OPTIONS_PER_QUESTION {
            return Err(format!(
                "expected {} options, got {}",
                OPTIONS_PER_QUESTION,
                self.options.len()
            ));
        }
        if usize::from(self.correct_answer_index) >= OPTIONS_PER_QUESTION {
            return Err(format!(
                "correctAnswerIndex {} is out of range",
                self.correct_answer_index
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quiz {
    pub id: Uuid,
    pub user_id: String,
    pub topic: String,
    pub provider: String,
    pub questions: Vec<QuizQuestion>,
    pub created_at: DateTime<Utc>,
}

impl Quiz {
    pub fn new(
        user_id: String,
        topic: String,
        provider: String,
        questions: Vec<QuizQuestion>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            topic,
            provider,
            questions,
            created_at: Utc::now(),
        }
    }
}

/// Parse a provider payload into quiz questions.
///
/// The batch is atomic: one question with a missing field, the wrong number
/// of options or an out-of-range answer index rejects all of them.
pub fn parse_quiz_questions(raw: &str) -> Result<Vec<QuizQuestion>, ResponseFormatError> {
    let questions: Vec<QuizQuestion> = parse_json_array(raw)?;
    for (index, question) in questions.iter().enumerate() {
        question
            .validate()
            .map_err(|reason| ResponseFormatError::InvalidItem { index, reason })?;
    }
    Ok(questions)
}
