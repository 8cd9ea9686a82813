use quiz_core::{AccuracyTier, AggregateStats, QuestionStats};

#[derive(Clone, Debug, PartialEq)]
pub struct QuestionStatVm {
    pub key: u32,
    pub label: String,

    pub correct: u32,
    pub incorrect: u32,
    pub attempts: u64,
    pub accuracy_str: String,
    pub tier_class: &'static str,
}

impl From<&QuestionStats> for QuestionStatVm {
    fn from(stats: &QuestionStats) -> Self {
        Self {
            key: stats.question_index.value(),
            label: format!("Question {}", stats.question_index.ordinal()),
            correct: stats.correct_count,
            incorrect: stats.incorrect_count,
            attempts: stats.total_attempts,
            accuracy_str: format_accuracy(stats.accuracy),
            tier_class: tier_class(stats.tier()),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct StatsVm {
    pub total_questions: usize,
    pub total_attempts: u64,
    pub total_correct: u64,
    pub total_incorrect: u64,
    pub accuracy_str: String,

    pub rows: Vec<QuestionStatVm>,
}

impl StatsVm {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[must_use]
pub fn map_stats(stats: &AggregateStats) -> StatsVm {
    StatsVm {
        total_questions: stats.total_questions,
        total_attempts: stats.total_attempts,
        total_correct: stats.total_correct,
        total_incorrect: stats.total_incorrect,
        accuracy_str: format_accuracy(stats.accuracy),
        rows: stats.questions.iter().map(QuestionStatVm::from).collect(),
    }
}

/// Percent label with at most two decimals and no trailing zeros.
#[must_use]
pub fn format_accuracy(accuracy: f64) -> String {
    format!("{accuracy}%")
}

fn tier_class(tier: AccuracyTier) -> &'static str {
    match tier {
        AccuracyTier::High => "stat-row tier--high",
        AccuracyTier::Medium => "stat-row tier--medium",
        AccuracyTier::Low => "stat-row tier--low",
    }
}
