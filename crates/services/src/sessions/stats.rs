use std::sync::Arc;

use quiz_core::AggregateStats;
use storage::repository::ResultRepository;

use crate::error::StatsError;

/// Read-side facade over the result store.
///
/// Owns repository access for the statistics view and the reset action; it
/// does not own UI formatting.
#[derive(Clone)]
pub struct StatsService {
    results: Arc<dyn ResultRepository>,
}

impl StatsService {
    #[must_use]
    pub fn new(results: Arc<dyn ResultRepository>) -> Self {
        Self { results }
    }

    /// Read every record and derive aggregate and per-question accuracy.
    ///
    /// # Errors
    ///
    /// Returns `StatsError::Storage` on repository failures.
    pub async fn load_stats(&self) -> Result<AggregateStats, StatsError> {
        let records = self.results.list_results().await.inspect_err(|err| {
            tracing::warn!(error = %err, "failed to load statistics");
        })?;
        Ok(AggregateStats::from_records(&records))
    }

    /// Delete every stored record.
    ///
    /// # Errors
    ///
    /// Returns `StatsError::Storage` if the store rejects the operation.
    pub async fn clear_all(&self) -> Result<(), StatsError> {
        self.results.clear_results().await.inspect_err(|err| {
            tracing::warn!(error = %err, "failed to clear results");
        })?;
        tracing::info!("cleared all results");
        Ok(())
    }
}
