//! Mission discriminator tags and the save-format compatibility table.
//!
//! Persisted missions carry a string `kind` tag.  Decoding canonicalizes
//! legacy tags from older save formats before handing the record to serde,
//! and rejects tags outside the closed set with a hard error so a corrupted
//! save fails loudly instead of silently dropping missions.

use serde_json::Value;

use crate::error::{AiError, AiResult};
use crate::mission::Mission;

// ── Canonical tags ────────────────────────────────────────────────────────────

pub const BUILD_COLONY: &str = "buildColonyMission";
pub const CASH_IN_TREASURE: &str = "cashInTreasureMission";
pub const DEFEND_SETTLEMENT: &str = "defendSettlementMission";
pub const IDLE_AT_SETTLEMENT: &str = "idleAtSettlementMission";
pub const INDIAN_BRING_GIFT: &str = "indianBringGiftMission";
pub const INDIAN_DEMAND: &str = "indianDemandMission";
pub const MISSIONARY: &str = "missionaryMission";
pub const PIONEERING: &str = "pioneeringMission";
pub const PRIVATEER: &str = "privateerMission";
pub const SCOUTING: &str = "scoutingMission";
pub const SEEK_AND_DESTROY: &str = "seekAndDestroyMission";
pub const TRANSPORT: &str = "transportMission";
pub const UNIT_WANDER_HOSTILE: &str = "unitWanderHostileMission";
pub const WANDER: &str = "wanderMission";
pub const WISH_REALIZATION: &str = "wishRealizationMission";
pub const WORK_INSIDE_COLONY: &str = "workInsideColonyMission";

pub const ALL_TAGS: [&str; 16] = [
    BUILD_COLONY,
    CASH_IN_TREASURE,
    DEFEND_SETTLEMENT,
    IDLE_AT_SETTLEMENT,
    INDIAN_BRING_GIFT,
    INDIAN_DEMAND,
    MISSIONARY,
    PIONEERING,
    PRIVATEER,
    SCOUTING,
    SEEK_AND_DESTROY,
    TRANSPORT,
    UNIT_WANDER_HOSTILE,
    WANDER,
    WISH_REALIZATION,
    WORK_INSIDE_COLONY,
];

/// Tags written by older save formats, mapped to their canonical successor.
const LEGACY_ALIASES: [(&str, &str); 2] = [
    ("idleAtColonyMission", IDLE_AT_SETTLEMENT),
    ("tileImprovementPlanMission", PIONEERING),
];

/// Resolve `tag` to its canonical form, or `None` if it is outside the
/// closed set entirely.
pub fn canonical_tag(tag: &str) -> Option<&'static str> {
    if let Some(&(_, canonical)) = LEGACY_ALIASES.iter().find(|(old, _)| *old == tag) {
        return Some(canonical);
    }
    ALL_TAGS.iter().copied().find(|&t| t == tag)
}

// ── Encode / decode ───────────────────────────────────────────────────────────

/// Serialize a mission to its tagged record.  Always writes canonical tags.
pub fn encode(mission: &Mission) -> AiResult<Value> {
    Ok(serde_json::to_value(mission)?)
}

/// Reconstruct a mission from a tagged record.
///
/// Legacy tags are rewritten in place before deserialization, so structural
/// fields keep their recorded values across the rename.
pub fn decode(mut record: Value) -> AiResult<Mission> {
    let tag = record
        .get("kind")
        .and_then(Value::as_str)
        .ok_or(AiError::MissingMissionTag)?
        .to_owned();
    let canonical =
        canonical_tag(&tag).ok_or_else(|| AiError::UnknownMissionTag(tag.clone()))?;
    if tag != canonical {
        record["kind"] = Value::String(canonical.to_owned());
    }
    Ok(serde_json::from_value(record)?)
}
