//! The subscription tier table.
//!
//! Tiers form a strict total order: General < Premium < PremiumPlus.
//! Rank, monthly price, and speed all increase together; the per-click
//! price factor decreases. The table is fixed configuration — all lookups
//! are method tables on the enum, never mutable state.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    General,
    Premium,
    PremiumPlus,
}

impl Tier {
    /// All tiers in ascending rank order.
    pub const ALL: [Tier; 3] = [Tier::General, Tier::Premium, Tier::PremiumPlus];

    /// Ordinal rank. Higher rank unlocks more of the catalogue.
    pub fn rank(&self) -> u8 {
        match self {
            Self::General     => 0,
            Self::Premium     => 1,
            Self::PremiumPlus => 2,
        }
    }

    /// Monthly subscription price, charged from the top-up pool on upgrade.
    pub fn monthly_price(&self) -> f64 {
        match self {
            Self::General     => 10.0,
            Self::Premium     => 50.0,
            Self::PremiumPlus => 200.0,
        }
    }

    /// Connection speed factor in (0, 1]. Scales simulated loading delays.
    pub fn speed(&self) -> f64 {
        match self {
            Self::General     => 0.60,
            Self::Premium     => 0.85,
            Self::PremiumPlus => 1.00,
        }
    }

    /// Per-click pricing multiplier. General pays a surcharge,
    /// PremiumPlus gets a discount.
    pub fn price_factor(&self) -> f64 {
        match self {
            Self::General     => 1.25,
            Self::Premium     => 1.00,
            Self::PremiumPlus => 0.75,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::General     => "General",
            Self::Premium     => "Premium",
            Self::PremiumPlus => "Premium Plus",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::General => {
                "Old Yahoo-like interface, slow loading, non-HD visuals. \
                 Mostly general news; many links restricted."
            }
            Self::Premium => {
                "Faster browsing, sleeker UI. More platforms unlocked, \
                 but high-value resources stay gated."
            }
            Self::PremiumPlus => {
                "Full access to everything. Prohibitively expensive in this demo."
            }
        }
    }

    /// True iff this tier's rank meets or exceeds `required`.
    pub fn unlocks(&self, required: Tier) -> bool {
        self.rank() >= required.rank()
    }

    /// Tiers a subscriber may upgrade to. General is the floor and is
    /// never a valid target.
    pub fn upgrade_targets() -> &'static [Tier] {
        &[Tier::Premium, Tier::PremiumPlus]
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
