use thiserror::Error;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question prompt cannot be empty")]
    EmptyPrompt,

    #[error("question must have at least one option")]
    NoOptions,
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// One multiple-choice quiz item.
///
/// `answer` holds the text of the correct option. Scoring compares option
/// text against it, so an answer that matches none of the options makes the
/// question unanswerable; this is tolerated and reported by
/// [`Question::answer_in_options`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    section: String,
    question: String,
    options: Vec<String>,
    answer: String,
}

impl Question {
    /// Build a question from its parts.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError::EmptyPrompt` for a blank prompt and
    /// `QuestionError::NoOptions` when `options` is empty.
    pub fn new(
        section: impl Into<String>,
        question: impl Into<String>,
        options: Vec<String>,
        answer: impl Into<String>,
    ) -> Result<Self, QuestionError> {
        let question = question.into();
        if question.trim().is_empty() {
            return Err(QuestionError::EmptyPrompt);
        }
        if options.is_empty() {
            return Err(QuestionError::NoOptions);
        }

        Ok(Self {
            section: section.into(),
            question,
            options,
            answer: answer.into(),
        })
    }

    #[must_use]
    pub fn section(&self) -> &str {
        &self.section
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.question
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    #[must_use]
    pub fn option(&self, index: usize) -> Option<&str> {
        self.options.get(index).map(String::as_str)
    }

    #[must_use]
    pub fn answer(&self) -> &str {
        &self.answer
    }

    /// Whether the option at `index` carries the correct answer text.
    #[must_use]
    pub fn is_correct_option(&self, index: usize) -> bool {
        self.option(index).is_some_and(|text| text == self.answer)
    }

    #[must_use]
    pub fn answer_in_options(&self) -> bool {
        self.options.iter().any(|option| *option == self.answer)
    }
}
