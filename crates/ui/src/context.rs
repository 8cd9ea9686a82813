use std::sync::Arc;

use dioxus::prelude::*;
use services::{AppServices, QuestionLoader, QuestionSource, QuizLoopService, StatsService};

use crate::vm::{Notice, QuizVm};

pub trait UiApp: Send + Sync {
    fn question_source(&self) -> Option<QuestionSource>;

    fn question_loader(&self) -> Arc<QuestionLoader>;
    fn quiz_loop(&self) -> Arc<QuizLoopService>;
    fn stats(&self) -> Arc<StatsService>;
}

impl UiApp for AppServices {
    fn question_source(&self) -> Option<QuestionSource> {
        AppServices::question_source(self)
    }

    fn question_loader(&self) -> Arc<QuestionLoader> {
        AppServices::question_loader(self)
    }

    fn quiz_loop(&self) -> Arc<QuizLoopService> {
        AppServices::quiz_loop(self)
    }

    fn stats(&self) -> Arc<StatsService> {
        AppServices::stats(self)
    }
}

#[derive(Clone)]
pub struct AppContext {
    question_source: Option<QuestionSource>,

    question_loader: Arc<QuestionLoader>,
    quiz_loop: Arc<QuizLoopService>,
    stats: Arc<StatsService>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            question_source: app.question_source(),
            question_loader: app.question_loader(),
            quiz_loop: app.quiz_loop(),
            stats: app.stats(),
        }
    }

    /// Where the initial question list comes from; `None` starts empty.
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

// This context is provided by the application composition root (e.g. `crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}

/// Quiz state shared by every route under the layout.
///
/// Lives above the router outlet so that visiting the statistics page does
/// not throw away an in-progress session.
#[derive(Clone, Copy)]
pub struct QuizStore {
    pub vm: Signal<Option<QuizVm>>,
    pub notice: Signal<Option<Notice>>,
}

impl QuizStore {
    /// Must be called from inside a component scope.
    #[must_use]
    pub fn new() -> Self {
        Self {
            vm: Signal::new(None),
            notice: Signal::new(None),
        }
    }
}
