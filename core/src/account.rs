//! The account — the only mutable entity in the system.
//!
//! Created once at session start, mutated only by the engine's click,
//! top-up, and upgrade operations, discarded at session end.
//! Invariants: `balance >= 0` after every successful operation;
//! `topup_pool >= 0` always (the pool only depletes — there is no
//! replenishment mechanism).

use crate::tier::Tier;
use serde::{Deserialize, Serialize};

/// Spendable balance at session start.
pub const OPENING_BALANCE: f64 = 10.0;

/// Top-up pool at session start. Funds both top-ups and upgrades.
pub const OPENING_TOPUP_POOL: f64 = 50.0;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Account {
    pub balance:    f64,
    pub topup_pool: f64,
    pub tier:       Tier,
}

impl Account {
    pub fn new(balance: f64, topup_pool: f64) -> Self {
        Self {
            balance,
            topup_pool,
            tier: Tier::General,
        }
    }
}

impl Default for Account {
    fn default() -> Self {
        Self::new(OPENING_BALANCE, OPENING_TOPUP_POOL)
    }
}
