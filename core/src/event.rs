//! The engine's outward event stream.
//!
//! RULE: ambient effects (sound, flashes, ad popups, toasts) subscribe to
//! these events and never feed anything back. The dependency is strictly
//! one-directional — the engine decides, observers react.

use crate::{
    tier::Tier,
    types::{ResultId, SessionId, Tick},
};
use serde::{Deserialize, Serialize};

/// Every event emitted during a session.
/// Variants are appended, never removed or reordered.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EngineEvent {
    // ── Session lifecycle ──────────────────────────
    SessionStarted {
        session_id: SessionId,
        seed: u64,
    },

    // ── Click outcomes ─────────────────────────────
    ClickGranted {
        tick: Tick,
        result_id: ResultId,
        tier: Tier,
        cost: f64,
        load_seconds: u64,
        balance_after: f64,
    },
    ClickBlockedNoFunds {
        tick: Tick,
        result_id: ResultId,
        tier: Tier,
        cost: f64,
        shortfall: f64,
    },
    ClickBlockedTierGate {
        tick: Tick,
        result_id: ResultId,
        tier: Tier,
        required_tier: Tier,
        wait_seconds: u64,
    },

    // ── Account operations ─────────────────────────
    BalanceToppedUp {
        tick: Tick,
        requested: f64,
        transferred: f64,
        balance_after: f64,
        pool_after: f64,
    },
    TopUpRejected {
        tick: Tick,
        requested: f64,
        reason: String,
    },
    TierUpgraded {
        tick: Tick,
        from: Tier,
        to: Tier,
        price: f64,
        pool_after: f64,
    },
    UpgradeRejected {
        tick: Tick,
        requested: Tier,
        reason: String,
    },

    // ── Reminder scheduler ─────────────────────────
    ReminderIssued {
        tick: Tick,
        message: String,
    },
    RemindersToggled {
        tick: Tick,
        enabled: bool,
    },
}

impl EngineEvent {
    /// Stable string name, used for the event_type column in the journal.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::SessionStarted { .. }       => "session_started",
            Self::ClickGranted { .. }         => "click_granted",
            Self::ClickBlockedNoFunds { .. }  => "click_blocked_no_funds",
            Self::ClickBlockedTierGate { .. } => "click_blocked_tier_gate",
            Self::BalanceToppedUp { .. }      => "balance_topped_up",
            Self::TopUpRejected { .. }        => "top_up_rejected",
            Self::TierUpgraded { .. }         => "tier_upgraded",
            Self::UpgradeRejected { .. }      => "upgrade_rejected",
            Self::ReminderIssued { .. }       => "reminder_issued",
            Self::RemindersToggled { .. }     => "reminders_toggled",
        }
    }
}

/// An event as recorded in the session journal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventLogEntry {
    pub id: Option<i64>,
    pub session_id: SessionId,
    pub tick: Tick,
    /// Which part of the engine emitted it: "engine" or "reminder".
    pub source: String,
    pub event_type: String,
    pub payload: String, // JSON-serialized EngineEvent
}
