use std::sync::Arc;

use storage::repository::Storage;

use crate::error::AppServicesError;
use crate::question_source::{QuestionLoader, QuestionSource};
use crate::sessions::{QuizLoopService, StatsService};

/// Assembles app-facing services around one result store.
#[derive(Clone)]
pub struct AppServices {
    question_source: Option<QuestionSource>,
    question_loader: Arc<QuestionLoader>,
    quiz_loop: Arc<QuizLoopService>,
    stats: Arc<StatsService>,
}

impl AppServices {
    /// Build services backed by `SQLite` storage.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization fails.
    pub async fn new_sqlite(
        db_url: &str,
        question_source: Option<QuestionSource>,
    ) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        Ok(Self::from_storage(&storage, question_source))
    }

    #[must_use]
    pub fn from_storage(storage: &Storage, question_source: Option<QuestionSource>) -> Self {
        Self {
            question_source,
            question_loader: Arc::new(QuestionLoader::new()),
            quiz_loop: Arc::new(QuizLoopService::new(Arc::clone(&storage.results))),
            stats: Arc::new(StatsService::new(Arc::clone(&storage.results))),
        }
    }

    #[must_use]
    pub fn question_source(&self) -> Option<QuestionSource> {
        self.question_source.clone()
    }

    #[must_use]
    pub fn question_loader(&self) -> Arc<QuestionLoader> {
        Arc::clone(&self.question_loader)
    }

    #[must_use]
    pub fn quiz_loop(&self) -> Arc<QuizLoopService> {
        Arc::clone(&self.quiz_loop)
    }

    #[must_use]
    pub fn stats(&self) -> Arc<StatsService> {
        Arc::clone(&self.stats)
    }
}
