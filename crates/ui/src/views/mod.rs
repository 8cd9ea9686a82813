mod quiz;
mod state;
mod stats;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use quiz::{QuizIntent, QuizView};
pub use state::{ViewError, ViewState, view_state_from_resource};
pub use stats::{StatsPanel, StatsView};
