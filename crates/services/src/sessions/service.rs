use std::fmt;

use quiz_core::model::{AnswerWrite, Question, QuestionIndex};

use super::progress::SessionProgress;
use crate::error::SessionError;

//
// ─── PHASE & OUTCOMES ──────────────────────────────────────────────────────────
//

/// Where the session stands with respect to the current question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// No answer locked in yet; a selection may or may not be pending.
    Answering,
    /// Answer locked in and there is a next question.
    Confirmed,
    /// Answer locked in on the last question.
    Finished,
}

/// Result of confirming the selected option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Confirmation {
    pub question_index: QuestionIndex,
    pub selected_option: usize,
    pub is_correct: bool,
    pub correct_answer: String,
}

impl Confirmation {
    /// The increment this confirmation asks the result store to apply.
    #[must_use]
    pub fn answer_write(&self) -> AnswerWrite {
        AnswerWrite::new(self.question_index, self.is_correct)
    }
}

/// Result of asking for a wrong-answers-only replay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestrictOutcome {
    /// The session now holds `count` previously missed questions.
    Restricted { count: usize },
    /// Nothing was missed; the session is unchanged.
    NothingWrong,
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// In-memory progress through a loaded question list.
///
/// Steps through the questions in order. Each question is answered by
/// selecting an option and confirming it; confirmation is final for that
/// question. Nothing here touches storage: persisting an answer is the
/// caller's job (see `QuizLoopService`).
pub struct QuizSession {
    questions: Vec<Question>,
    current: usize,
    selected: Option<usize>,
    confirmed: bool,
    last_correct: Option<bool>,
    score: u32,
    total_answered: u32,
    wrong: Vec<usize>,
}

impl QuizSession {
    #[must_use]
    pub fn new(questions: Vec<Question>) -> Self {
        Self {
            questions,
            current: 0,
            selected: None,
            confirmed: false,
            last_correct: None,
            score: 0,
            total_answered: 0,
            wrong: Vec::new(),
        }
    }

    /// Replace the question list wholesale and start over at the first question.
    pub fn load(&mut self, questions: Vec<Question>) {
        *self = Self::new(questions);
    }

    /// Start over on the current question list.
    pub fn restart(&mut self) {
        let questions = std::mem::take(&mut self.questions);
        self.load(questions);
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.current)
    }

    #[must_use]
    pub fn selected_option(&self) -> Option<usize> {
        self.selected
    }

    #[must_use]
    pub fn is_confirmed(&self) -> bool {
        self.confirmed
    }

    /// Correctness of the last confirmation; `None` until the current question is confirmed.
    #[must_use]
    pub fn is_correct(&self) -> Option<bool> {
        self.last_correct
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn total_answered(&self) -> u32 {
        self.total_answered
    }

    /// Positions missed in this session, in the order they were answered.
    #[must_use]
    pub fn wrong_indices(&self) -> &[usize] {
        &self.wrong
    }

    #[must_use]
    pub fn is_last(&self) -> bool {
        self.current + 1 >= self.questions.len()
    }

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        match (self.confirmed, self.is_last()) {
            (false, _) => SessionPhase::Answering,
            (true, false) => SessionPhase::Confirmed,
            (true, true) => SessionPhase::Finished,
        }
    }

    #[must_use]
    pub fn progress(&self) -> SessionProgress {
        SessionProgress {
            position: if self.is_empty() { 0 } else { self.current + 1 },
            total: self.len(),
            answered: self.total_answered,
            score: self.score,
            is_finished: self.phase() == SessionPhase::Finished,
        }
    }

    /// Mark an option of the current question as selected.
    ///
    /// Ignored once the current question is confirmed.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NoQuestions` for an empty session and
    /// `SessionError::OptionOutOfRange` for an option the question does not have.
    pub fn select_option(&mut self, option: usize) -> Result<(), SessionError> {
        let Some(question) = self.current_question() else {
            return Err(SessionError::NoQuestions);
        };
        if self.confirmed {
            tracing::trace!(option, "selection ignored after confirmation");
            return Ok(());
        }
        let len = question.options().len();
        if option >= len {
            return Err(SessionError::OptionOutOfRange { option, len });
        }
        self.selected = Some(option);
        Ok(())
    }

    /// Lock in the selected option and score it.
    ///
    /// Correctness compares the selected option's text with the question's answer.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NoQuestions`, `SessionError::AlreadyConfirmed`,
    /// or `SessionError::NothingSelected` when confirming is not legal.
    pub fn confirm(&mut self) -> Result<Confirmation, SessionError> {
        let Some(question) = self.questions.get(self.current) else {
            return Err(SessionError::NoQuestions);
        };
        if self.confirmed {
            return Err(SessionError::AlreadyConfirmed);
        }
        let Some(selected) = self.selected else {
            return Err(SessionError::NothingSelected);
        };
        let question_index =
            QuestionIndex::from_position(self.current).ok_or(SessionError::IndexOverflow {
                position: self.current,
            })?;

        let is_correct = question.is_correct_option(selected);
        let correct_answer = question.answer().to_owned();

        self.confirmed = true;
        self.last_correct = Some(is_correct);
        self.total_answered = self.total_answered.saturating_add(1);
        if is_correct {
            self.score = self.score.saturating_add(1);
        } else {
            self.wrong.push(self.current);
        }

        Ok(Confirmation {
            question_index,
            selected_option: selected,
            is_correct,
            correct_answer,
        })
    }

    /// Move to the next question after a confirmation.
    ///
    /// Returns `false` without changing anything when the current question is
    /// not confirmed or is the last one.
    pub fn advance(&mut self) -> bool {
        if !self.confirmed || self.is_last() {
            return false;
        }
        self.current += 1;
        self.selected = None;
        self.confirmed = false;
        self.last_correct = None;
        true
    }

    /// Replace the list with the questions missed so far, in their original
    /// order, and start over.
    pub fn restrict_to_wrong(&mut self) -> RestrictOutcome {
        if self.wrong.is_empty() {
            return RestrictOutcome::NothingWrong;
        }
        let missed: Vec<Question> = self
            .wrong
            .iter()
            .filter_map(|&index| self.questions.get(index).cloned())
            .collect();
        let count = missed.len();
        self.load(missed);
        RestrictOutcome::Restricted { count }
    }
}

impl fmt::Debug for QuizSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizSession")
            .field("questions_len", &self.questions.len())
            .field("current", &self.current)
            .field("selected", &self.selected)
            .field("confirmed", &self.confirmed)
            .field("score", &self.score)
            .field("total_answered", &self.total_answered)
            .field("wrong", &self.wrong)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
