use serde::{Deserialize, Serialize};

use crate::model::ids::QuestionIndex;

/// Increment request produced by one confirmed answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerWrite {
    pub question_index: QuestionIndex,
    pub was_correct: bool,
}

impl AnswerWrite {
    #[must_use]
    pub fn new(question_index: QuestionIndex, was_correct: bool) -> Self {
        Self {
            question_index,
            was_correct,
        }
    }
}

/// Cumulative correct/incorrect tally for one question index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultRecord {
    pub question_index: QuestionIndex,
    pub correct_count: u32,
    pub incorrect_count: u32,
}

impl ResultRecord {
    /// A record with no attempts yet.
    #[must_use]
    pub fn empty(question_index: QuestionIndex) -> Self {
        Self {
            question_index,
            correct_count: 0,
            incorrect_count: 0,
        }
    }

    /// Returns this record with exactly one counter incremented.
    #[must_use]
    pub fn with_answer(self, was_correct: bool) -> Self {
        if was_correct {
            Self {
                correct_count: self.correct_count.saturating_add(1),
                ..self
            }
        } else {
            Self {
                incorrect_count: self.incorrect_count.saturating_add(1),
                ..self
            }
        }
    }

    #[must_use]
    pub fn total_attempts(&self) -> u64 {
        u64::from(self.correct_count) + u64::from(self.incorrect_count)
    }
}
