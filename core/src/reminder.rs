//! Reminder scheduler — periodic metered-notice popups.
//!
//! Purely observational: it reads the account, never mutates it. The
//! message set is fixed; which message fires is drawn from the Reminder
//! RNG stream, so the sequence is reproducible per seed. A single global
//! toggle disables it.

use crate::{account::Account, rng::SessionRng, types::Tick};

/// Ticks between reminders. The demo this models fired every 9 seconds.
pub const REMINDER_INTERVAL: Tick = 9;

pub struct ReminderScheduler {
    enabled: bool,
}

impl ReminderScheduler {
    pub fn new() -> Self {
        Self { enabled: true }
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Returns the reminder message for this tick, if one is due.
    /// Fires on every REMINDER_INTERVAL boundary while enabled.
    pub fn maybe_fire(&self, tick: Tick, account: &Account, rng: &mut SessionRng) -> Option<String> {
        if !self.enabled || tick == 0 || !tick.is_multiple_of(REMINDER_INTERVAL) {
            return None;
        }

        let messages = [
            format!("You have ${:.2} credits left.", account.balance),
            "Upgrade required for some results.".to_string(),
            format!("Top-up available: ${:.2}.", account.topup_pool),
        ];
        let pick = rng.next_u64_below(messages.len() as u64) as usize;
        Some(messages[pick].clone())
    }
}

impl Default for ReminderScheduler {
    fn default() -> Self { Self::new() }
}
