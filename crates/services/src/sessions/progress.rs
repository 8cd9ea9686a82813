/// Aggregated view of session progress, useful for UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionProgress {
    /// One-based position of the current question; `0` for an empty session.
    pub position: usize,
    pub total: usize,
    pub answered: u32,
    pub score: u32,
    pub is_finished: bool,
}

impl SessionProgress {
    /// Share of the list reached so far, in percent.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.position as f64 / self.total as f64 * 100.0
    }
}
