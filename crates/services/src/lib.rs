#![forbid(unsafe_code)]

pub mod app_services;
pub mod error;
pub mod question_source;
pub mod sessions;

pub use app_services::AppServices;
pub use error::{AppServicesError, LoadError, SessionError, StatsError};
pub use question_source::{QuestionLoader, QuestionSource};
pub use sessions::{
    Confirmation, ConfirmedAnswer, PendingWrite, QuizLoopService, QuizSession, RestrictOutcome,
    SessionPhase, SessionProgress, StatsService,
};
