use async_trait::async_trait;
use quiz_core::model::{AnswerWrite, QuestionIndex, ResultRecord};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Repository contract for per-question answer tallies.
///
/// Every operation may suspend and may fail; callers report failures and
/// allow a retry rather than dropping data silently.
#[async_trait]
pub trait ResultRepository: Send + Sync {
    /// Fetch the tally for one question index.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    async fn get_result(&self, index: QuestionIndex) -> Result<Option<ResultRecord>, StorageError>;

    /// Fetch every stored tally. No ordering is guaranteed.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    async fn list_results(&self) -> Result<Vec<ResultRecord>, StorageError>;

    /// Increment the correct or incorrect counter for one index by exactly one,
    /// creating the record with zero counts first if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the record cannot be read or written.
    async fn record_answer(&self, write: AnswerWrite) -> Result<ResultRecord, StorageError>;

    /// Delete every record. Irreversible.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend rejects the operation.
    async fn clear_results(&self) -> Result<(), StorageError>;
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    results: Arc<Mutex<HashMap<QuestionIndex, ResultRecord>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self {
            results: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl ResultRepository for InMemoryRepository {
    async fn get_result(&self, index: QuestionIndex) -> Result<Option<ResultRecord>, StorageError> {
        let guard = self
            .results
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.get(&index).copied())
    }

    async fn list_results(&self) -> Result<Vec<ResultRecord>, StorageError> {
        let guard = self
            .results
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.values().copied().collect())
    }

    async fn record_answer(&self, write: AnswerWrite) -> Result<ResultRecord, StorageError> {
        let mut guard = self
            .results
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        let previous = guard
            .get(&write.question_index)
            .copied()
            .unwrap_or_else(|| ResultRecord::empty(write.question_index));
        let updated = previous.with_answer(write.was_correct);
        guard.insert(write.question_index, updated);
        Ok(updated)
    }

    async fn clear_results(&self) -> Result<(), StorageError> {
        let mut guard = self
            .results
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.clear();
        Ok(())
    }
}

/// Aggregates repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub results: Arc<dyn ResultRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let results: Arc<dyn ResultRepository> = Arc::new(InMemoryRepository::new());
        Self { results }
    }
}
