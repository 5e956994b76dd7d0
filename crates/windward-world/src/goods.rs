//! Tradeable goods and the per-player market.
//!
//! Market pricing policy is out of scope; the AI only needs three queries:
//! what does a purchase cost, is the good under boycott (arrears owed), and
//! does the player have the gold.

use log::info;
use windward_core::PlayerId;

// ── GoodsKind ─────────────────────────────────────────────────────────────────

/// The goods the equipment system consumes.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum GoodsKind {
    Horses,
    Muskets,
    Tools,
}

// ── Market ────────────────────────────────────────────────────────────────────

/// One player's market access and treasury.
pub struct Market {
    pub owner: PlayerId,
    pub gold: u32,
    prices: [u32; 3],
    arrears: [u32; 3],
}

impl Market {
    pub fn new(owner: PlayerId, gold: u32) -> Self {
        Self {
            owner,
            gold,
            // Default per-unit prices; tests and applications override.
            prices: [2, 5, 2],
            arrears: [0; 3],
        }
    }

    #[inline]
    fn slot(kind: GoodsKind) -> usize {
        match kind {
            GoodsKind::Horses => 0,
            GoodsKind::Muskets => 1,
            GoodsKind::Tools => 2,
        }
    }

    pub fn set_price(&mut self, kind: GoodsKind, per_unit: u32) {
        self.prices[Self::slot(kind)] = per_unit;
    }

    /// Cost of buying `amount` of `kind` right now.
    pub fn bid_price(&self, kind: GoodsKind, amount: u32) -> u32 {
        self.prices[Self::slot(kind)] * amount
    }

    /// Back taxes owed on `kind`.  Non-zero means the good is boycotted and
    /// cannot be purchased at all.
    pub fn arrears(&self, kind: GoodsKind) -> u32 {
        self.arrears[Self::slot(kind)]
    }

    pub fn set_arrears(&mut self, kind: GoodsKind, amount: u32) {
        self.arrears[Self::slot(kind)] = amount;
    }

    pub fn has_gold(&self, cost: u32) -> bool {
        self.gold >= cost
    }

    /// Deduct `cost`; returns `false` (and deducts nothing) when unaffordable.
    pub fn spend(&mut self, cost: u32) -> bool {
        if self.gold < cost {
            return false;
        }
        self.gold -= cost;
        true
    }

    /// Synthesize funds.  Every mint is logged so synthesized gold is always
    /// attributable in a replay.
    pub fn mint(&mut self, amount: u32, why: &str) {
        info!("player {} minted {amount} gold: {why}", self.owner);
        self.gold += amount;
    }
}
