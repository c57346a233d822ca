//! Ambient effect observers.
//!
//! These reproduce the demo's sensory layer — coin chirps, card-swipe
//! sweeps, screen flashes, popup ads — as log lines keyed to engine
//! events. They observe and nothing more: no engine calls, no account
//! access, no influence on gating.

use meternet_core::{
    event::EngineEvent,
    observer::EngineObserver,
    rng::SessionRng,
    tier::Tier,
};

/// Sound and flash cues per outcome.
pub struct AmbientFx;

impl EngineObserver for AmbientFx {
    fn name(&self) -> &'static str { "ambient_fx" }

    fn on_event(&mut self, event: &EngineEvent) {
        match event {
            EngineEvent::ClickGranted { .. }
            | EngineEvent::BalanceToppedUp { .. }
            | EngineEvent::TierUpgraded { .. } => {
                log::info!("fx: sfx=coin flash=green");
            }
            EngineEvent::ClickBlockedNoFunds { .. }
            | EngineEvent::TopUpRejected { .. }
            | EngineEvent::UpgradeRejected { .. } => {
                log::info!("fx: sfx=swipe flash=red");
            }
            EngineEvent::ClickBlockedTierGate { wait_seconds, .. } => {
                log::info!("fx: sfx=swipe spinner={wait_seconds}s");
            }
            EngineEvent::ReminderIssued { message, .. } => {
                log::info!("fx: toast \"{message}\"");
            }
            _ => {}
        }
    }
}

/// Popup ads for General-tier subscribers.
///
/// Each click attempt on General has a 60% chance of spawning an ad.
/// Draws from the Ambient RNG stream so a seeded session replays the
/// same ad breaks.
pub struct AdBreak {
    rng: SessionRng,
    ads_shown: u64,
}

const AD_CHANCE: f64 = 0.6;

impl AdBreak {
    pub fn new(rng: SessionRng) -> Self {
        Self { rng, ads_shown: 0 }
    }
}

impl EngineObserver for AdBreak {
    fn name(&self) -> &'static str { "ad_break" }

    fn on_event(&mut self, event: &EngineEvent) {
        let tier = match event {
            EngineEvent::ClickGranted { tier, .. }
            | EngineEvent::ClickBlockedNoFunds { tier, .. }
            | EngineEvent::ClickBlockedTierGate { tier, .. } => *tier,
            _ => return,
        };
        if tier != Tier::General {
            return;
        }
        if self.rng.chance(AD_CHANCE) {
            self.ads_shown += 1;
            log::info!("fx: ad-popup #{} \"Hot Deal! Crazy Discount\"", self.ads_shown);
        }
    }
}
