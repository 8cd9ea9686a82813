mod progress;
mod service;
mod stats;
mod workflow;

// Public API of the session subsystem.
pub use crate::error::SessionError;
pub use progress::SessionProgress;
pub use service::{Confirmation, QuizSession, RestrictOutcome, SessionPhase};
pub use stats::StatsService;
pub use workflow::{ConfirmedAnswer, PendingWrite, QuizLoopService};
