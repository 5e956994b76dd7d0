//! Driver observer trait for progress reporting and diagnostics collection.

use windward_core::{Turn, UnitId};

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] at key points in the
/// turn loop.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example — progress printer
///
/// ```rust,ignore
/// struct ProgressPrinter { interval: u64 }
///
/// impl SimObserver for ProgressPrinter {
///     fn on_turn_end(&mut self, turn: Turn, stepped: usize) {
///         if turn.0 % self.interval == 0 {
///             println!("{turn}: stepped {stepped} missions");
///         }
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each turn, before any processing.
    fn on_turn_start(&mut self, _turn: Turn) {}

    /// Called at the end of each turn.
    ///
    /// `stepped` is the number of missions that ran a step this turn.
    fn on_turn_end(&mut self, _turn: Turn, _stepped: usize) {}

    /// Called by the integrity sweep for every agent whose bound unit no
    /// longer exists.  The agent is left in place; discarding it is the
    /// owner's decision.
    fn on_unhealthy_agent(&mut self, _turn: Turn, _unit: UnitId) {}

    /// Called once after the final turn completes.
    fn on_sim_end(&mut self, _final_turn: Turn) {}
}

/// A [`SimObserver`] that does nothing.  Use when you need to call `run`
/// but don't want progress callbacks.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
