//! `windward-sim` — the per-turn driver for the AI layer.
//!
//! # Turn loop
//!
//! ```text
//! for turn in 0..config.total_turns:
//!   ① Demand    — register unserved transportables on carrier waiting lists.
//!   ② Missions  — for every live agent, ascending owner then unit ID:
//!                 skip without a valid mission, otherwise step it.
//!                 Transport missions run their manifest in the same step.
//!   ③ Accrual   — bump_priority for every still-unserved transportable.
//!   ④ Integrity — every `integrity_interval` turns, flag agents whose
//!                 unit was disposed out from under them.
//! ```
//!
//! Everything is single-threaded; determinism comes from the visiting order
//! and the per-owner seeded RNGs, so a run is replayable from its config.

pub mod config;
pub mod driver;
pub mod error;
pub mod integrity;
pub mod observer;

#[cfg(test)]
mod tests;

pub use config::SimConfig;
pub use driver::Sim;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
