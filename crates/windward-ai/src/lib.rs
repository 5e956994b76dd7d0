//! `windward-ai` — mission assignment and transport claiming for agents.
//!
//! Each AI-controlled unit is wrapped in an [`AiUnit`] holding at most one
//! live [`Mission`].  Agents that need to move compete for carrier cargo
//! slots through a priority-based claiming protocol whose two sides (the
//! agent's carrier reference and the carrier's [`CargoManifest`]) are only
//! ever mutated through two choke points on [`AiUnitStore`]
//! (`claim_transport`, `release_transport`), so the relation can never be
//! observed half-updated.
//!
//! # What lives here
//!
//! | Module            | Contents                                        |
//! |-------------------|-------------------------------------------------|
//! | [`agent`]         | `AiUnit` — per-unit AI state                    |
//! | [`store`]         | `AiUnitStore` arena and the claim choke points  |
//! | [`transportable`] | The `Transportable` capability contract         |
//! | [`mission`]       | The `Mission` enum and its lifecycle            |
//! | [`registry`]      | Discriminator tags, legacy aliases, encode/decode |
//! | [`player`]        | `AiPlayer` owner context (RNG, wishes, claims)  |
//! | [`ai_main`]       | `AiMain` — agents + players, mission stepping   |
//! | [`persist`]       | Tagged agent records, save/load, reconciliation |

pub mod agent;
pub mod ai_main;
pub mod error;
pub mod mission;
pub mod persist;
pub mod player;
pub mod registry;
pub mod store;
pub mod transportable;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use agent::AiUnit;
pub use ai_main::AiMain;
pub use error::{AiError, AiResult};
pub use mission::transport::{CargoManifest, ManifestEntry};
pub use mission::{Mission, StepOutcome};
pub use persist::{AiUnitRecord, load_agents, load_from_json, save_agents, save_to_json};
pub use player::{AiPlayer, Wish};
pub use store::AiUnitStore;
pub use transportable::Transportable;
