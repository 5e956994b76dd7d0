//! `windward-core` — foundational types for the windward mission-AI workspace.
//!
//! This crate is a dependency of every other `windward-*` crate.  It has no
//! `windward-*` dependencies and minimal external ones (only `rand`, plus
//! optional `serde`).  Nothing here can fail, so there is no error type;
//! each crate from `windward-world` upward defines its own.
//!
//! # What lives here
//!
//! | Module    | Contents                                             |
//! |-----------|------------------------------------------------------|
//! | [`ids`]   | `UnitId`, `PlayerId`, `TileId`, `ColonyId`, `GoalId`, `WishId` |
//! | [`turn`]  | `Turn` counter                                       |
//! | [`rng`]   | `OwnerRng` (per-player), `SimRng` (global)           |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                |
//! |---------|-------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.   |
//!           | Required by `windward-ai`.                            |

pub mod ids;
pub mod rng;
pub mod turn;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use ids::{ColonyId, GoalId, PlayerId, TileId, UnitId, WishId};
pub use rng::{OwnerRng, SimRng};
pub use turn::Turn;
