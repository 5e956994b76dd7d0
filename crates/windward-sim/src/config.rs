//! Run configuration.

/// Parameters of one driver run, supplied by the embedding application.
#[derive(Debug, Clone, Copy)]
pub struct SimConfig {
    /// Seed for all per-owner RNGs.
    pub seed: u64,
    /// Number of turns to drive.
    pub total_turns: u64,
    /// Run the integrity sweep every this many turns.
    pub integrity_interval: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            total_turns: 100,
            integrity_interval: 10,
        }
    }
}
