//! Deferred engine configuration.

use crate::solver::MessageLevel;

/// Engine parameters collected up front and pushed at the next solve.
///
/// Nothing here touches the engine when set; the adapter applies the whole
/// value immediately before each run so configuration is batched with the
/// other solve-time parameter pushes.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SolveOptions {
    /// How much engine log output to let through.
    pub message_level: MessageLevel,
    /// Wall-clock limit for a single solve, in seconds. `None` means no limit.
    pub time_limit: Option<f64>,
    /// Simplex iteration limit for a single solve. `None` means no limit.
    pub iteration_limit: Option<i32>,
}

impl SolveOptions {
    /// Create a configuration with all defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the message level.
    pub fn with_message_level(mut self, level: MessageLevel) -> Self {
        self.message_level = level;
        self
    }

    /// Set the time limit in seconds.
    pub fn with_time_limit(mut self, seconds: f64) -> Self {
        self.time_limit = Some(seconds);
        self
    }

    /// Set the simplex iteration limit.
    pub fn with_iteration_limit(mut self, count: i32) -> Self {
        self.iteration_limit = Some(count);
        self
    }
}
