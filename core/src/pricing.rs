//! Cost & access resolver.
//!
//! Pure functions of (entry, tier). No side effects, safe to call
//! repeatedly and concurrently, deterministic given inputs. The engine's
//! click evaluator and any renderer price badges both call these, so they
//! must agree exactly.

use crate::{catalogue::CatalogueEntry, tier::Tier, types::round2};

/// Base cost scaled by the tier's price factor, rounded to cents.
///
/// Rounding is half away from zero (costs are non-negative, so
/// effectively round-half-up): $0.05 at General is 0.0625 -> $0.06.
pub fn effective_cost(entry: &CatalogueEntry, tier: Tier) -> f64 {
    round2(entry.base_cost * tier.price_factor())
}

/// True iff `tier` unlocks the entry.
pub fn is_allowed(entry: &CatalogueEntry, tier: Tier) -> bool {
    tier.unlocks(entry.required_tier)
}

/// Simulated wait before the upgrade gate is shown for a tier-blocked
/// click. Slower tiers wait longer. Contractual output: renderers may
/// display exactly this many seconds.
pub fn gate_wait_seconds(tier: Tier) -> u64 {
    (3.0 / tier.speed()).ceil() as u64 + 1
}

/// Simulated load time for a granted click. Always at least one second.
pub fn load_seconds(tier: Tier) -> u64 {
    ((1.2 / tier.speed()).ceil() as u64).max(1)
}
