//! Read-time projection of result records into accuracy figures.

use crate::model::{QuestionIndex, ResultRecord};

/// Per-question accuracy breakdown.
#[derive(Debug, Clone, PartialEq)]
pub struct QuestionStats {
    pub question_index: QuestionIndex,
    pub correct_count: u32,
    pub incorrect_count: u32,
    pub total_attempts: u64,
    /// Percentage rounded to two decimals; `0.0` without attempts.
    pub accuracy: f64,
}

impl QuestionStats {
    #[must_use]
    pub fn from_record(record: &ResultRecord) -> Self {
        let total_attempts = record.total_attempts();
        Self {
            question_index: record.question_index,
            correct_count: record.correct_count,
            incorrect_count: record.incorrect_count,
            total_attempts,
            accuracy: accuracy_percent(u64::from(record.correct_count), total_attempts),
        }
    }

    #[must_use]
    pub fn tier(&self) -> AccuracyTier {
        AccuracyTier::for_accuracy(self.accuracy)
    }
}

/// Aggregate statistics over every tracked question.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AggregateStats {
    /// Number of distinct question indices with history.
    pub total_questions: usize,
    pub total_correct: u64,
    pub total_incorrect: u64,
    pub total_attempts: u64,
    /// Percentage rounded to two decimals; `0.0` without attempts.
    pub accuracy: f64,
    /// Sorted by question index.
    pub questions: Vec<QuestionStats>,
}

impl AggregateStats {
    #[must_use]
    pub fn from_records(records: &[ResultRecord]) -> Self {
        let mut questions: Vec<QuestionStats> =
            records.iter().map(QuestionStats::from_record).collect();
        questions.sort_by_key(|q| q.question_index);

        let total_correct = records.iter().map(|r| u64::from(r.correct_count)).sum();
        let total_incorrect = records.iter().map(|r| u64::from(r.incorrect_count)).sum();
        let total_attempts = total_correct + total_incorrect;

        Self {
            total_questions: records.len(),
            total_correct,
            total_incorrect,
            total_attempts,
            accuracy: accuracy_percent(total_correct, total_attempts),
            questions,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

/// Display band for a per-question accuracy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccuracyTier {
    /// 80% and above.
    High,
    /// 60% up to 80%.
    Medium,
    Low,
}

impl AccuracyTier {
    #[must_use]
    pub fn for_accuracy(accuracy: f64) -> Self {
        if accuracy >= 80.0 {
            Self::High
        } else if accuracy >= 60.0 {
            Self::Medium
        } else {
            Self::Low
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

/// `correct / total * 100`, rounded to two decimals. Zero attempts yield `0.0`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn accuracy_percent(correct: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    round2(correct as f64 / total as f64 * 100.0)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
