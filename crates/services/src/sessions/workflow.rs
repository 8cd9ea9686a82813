use std::fmt;
use std::sync::Arc;

use quiz_core::model::{AnswerWrite, ResultRecord};
use storage::repository::{ResultRepository, StorageError};

use super::service::{Confirmation, QuizSession};
use crate::error::SessionError;

/// Durability half of a confirmed answer.
///
/// The session has already moved on by the time this exists. Spawn it to
/// persist in the background, or await `persist` directly when the caller
/// needs to know the write settled. Dropping it skips the write.
#[must_use = "the answer is not persisted until `persist` is awaited"]
pub struct PendingWrite {
    results: Arc<dyn ResultRepository>,
    write: AnswerWrite,
}

impl PendingWrite {
    /// Apply the increment to the result store.
    ///
    /// Failures are logged and returned; they never roll back session state.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the result store rejects the write.
    pub async fn persist(self) -> Result<ResultRecord, StorageError> {
        let index = self.write.question_index;
        match self.results.record_answer(self.write).await {
            Ok(record) => {
                tracing::debug!(
                    %index,
                    correct = record.correct_count,
                    incorrect = record.incorrect_count,
                    "persisted answer"
                );
                Ok(record)
            }
            Err(err) => {
                tracing::warn!(%index, error = %err, "failed to persist answer");
                Err(err)
            }
        }
    }
}

impl fmt::Debug for PendingWrite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PendingWrite")
            .field("write", &self.write)
            .finish_non_exhaustive()
    }
}

/// Result of confirming the current question through the loop service.
#[derive(Debug)]
pub struct ConfirmedAnswer {
    pub confirmation: Confirmation,
    pub write: PendingWrite,
}

/// Couples session confirmation with the result store.
#[derive(Clone)]
pub struct QuizLoopService {
    results: Arc<dyn ResultRepository>,
}

impl QuizLoopService {
    #[must_use]
    pub fn new(results: Arc<dyn ResultRepository>) -> Self {
        Self { results }
    }

    /// Confirm the selected option and hand back the write that records it.
    ///
    /// The session transition happens before this returns, independent of
    /// whether the write later succeeds.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` if confirming is not legal in the current state.
    pub fn confirm(&self, session: &mut QuizSession) -> Result<ConfirmedAnswer, SessionError> {
        let confirmation = session.confirm()?;
        tracing::debug!(
            index = %confirmation.question_index,
            option = confirmation.selected_option,
            correct = confirmation.is_correct,
            "confirmed answer"
        );
        let write = PendingWrite {
            results: Arc::clone(&self.results),
            write: confirmation.answer_write(),
        };
        Ok(ConfirmedAnswer {
            confirmation,
            write,
        })
    }

    /// Confirm and wait for the write to settle.
    ///
    /// Returns the confirmation together with the write outcome so a caller
    /// can report a storage failure without losing the answer's verdict.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` if confirming is not legal in the current state.
    pub async fn confirm_and_persist(
        &self,
        session: &mut QuizSession,
    ) -> Result<(Confirmation, Result<ResultRecord, StorageError>), SessionError> {
        let ConfirmedAnswer {
            confirmation,
            write,
        } = self.confirm(session)?;
        let persisted = write.persist().await;
        Ok((confirmation, persisted))
    }
}
