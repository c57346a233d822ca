//! The metering engine — the single control point for account mutation.
//!
//! OPERATIONS:
//!   - evaluate_click: the click state machine
//!     (Evaluating -> BlockedNoFunds | BlockedTierGate | Granted)
//!   - top_up:     pool -> balance transfer
//!   - upgrade_to: pool-funded tier change (upward only)
//!   - tick:       advances the clock; drives reminders and snapshots
//!
//! RULES:
//!   - All operations are synchronous, atomic, sequential transitions.
//!   - A rejected operation never mutates the account.
//!   - Simulated delays are outputs, never waits — the engine does not
//!     block, and a new operation may arrive before a prior delay has
//!     visually completed.
//!   - Every outcome is appended to the journal and forwarded to
//!     observers; observers never feed back into decisions.
//!   - All randomness flows through the RngBank.

use crate::{
    account::Account,
    catalogue::Catalogue,
    clock::SessionClock,
    error::{MeterError, MeterResult},
    event::{EngineEvent, EventLogEntry},
    journal::SessionJournal,
    observer::EngineObserver,
    pricing,
    reminder::ReminderScheduler,
    rng::{RngBank, SessionRng, StreamSlot},
    snapshot::{SessionSnapshot, SNAPSHOT_INTERVAL},
    tier::Tier,
    types::{round2, SessionId, Tick},
};
use serde::{Deserialize, Serialize};

pub struct MeterEngine {
    pub session_id: SessionId,
    pub clock:      SessionClock,
    seed:           u64,
    account:        Account,
    catalogue:      Catalogue,
    reminders:      ReminderScheduler,
    reminder_rng:   SessionRng,
    journal:        SessionJournal,
    observers:      Vec<Box<dyn EngineObserver>>,
}

/// Terminal state of a click attempt.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ClickOutcome {
    Granted,
    BlockedNoFunds,
    BlockedTierGate,
}

/// What a click attempt returns to the presentation layer.
#[derive(Debug, Clone, Serialize)]
pub struct ClickReceipt {
    pub outcome: ClickOutcome,
    /// Effective cost of the result at the current tier, whether or not
    /// it was charged.
    pub cost: f64,
    /// Seconds of simulated delay the renderer should display: load time
    /// when granted, gate wait when tier-blocked, zero when out of funds.
    pub delay_seconds: u64,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct TopUpReceipt {
    pub transferred: f64,
    pub new_balance: f64,
    pub new_pool: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct UpgradeReceipt {
    pub new_tier: Tier,
    pub new_pool: f64,
}

impl MeterEngine {
    pub fn new(
        session_id: SessionId,
        seed: u64,
        catalogue: Catalogue,
        journal: SessionJournal,
    ) -> Self {
        let rng_bank = RngBank::new(seed);
        Self {
            clock:        SessionClock::new(session_id.clone()),
            seed,
            account:      Account::default(),
            catalogue,
            reminders:    ReminderScheduler::new(),
            reminder_rng: rng_bank.for_stream(StreamSlot::Reminder),
            journal,
            observers:    Vec::new(),
            session_id,
        }
    }

    /// Build a fully wired engine over the built-in catalogue with a fresh
    /// in-memory journal. Call this instead of new() + manual wiring.
    pub fn build(session_id: SessionId, seed: u64) -> MeterResult<Self> {
        Self::build_with_catalogue(session_id, seed, Catalogue::builtin())
    }

    pub fn build_with_catalogue(
        session_id: SessionId,
        seed: u64,
        catalogue: Catalogue,
    ) -> MeterResult<Self> {
        let journal = SessionJournal::in_memory()?;
        journal.migrate()?;
        journal.insert_session(&session_id, seed, env!("CARGO_PKG_VERSION"))?;

        let mut engine = Self::new(session_id.clone(), seed, catalogue, journal);
        engine.record("engine", EngineEvent::SessionStarted { session_id, seed })?;
        Ok(engine)
    }

    /// Register an ambient-effect observer. Observers see every event in
    /// emission order and nothing else.
    pub fn register_observer(&mut self, observer: Box<dyn EngineObserver>) {
        log::debug!("observer registered: {}", observer.name());
        self.observers.push(observer);
    }

    // ── Click evaluation ───────────────────────────────────────

    /// Evaluate a click on a catalogue result.
    ///
    /// Funds are checked first and independently of tier gating: an
    /// unaffordable click reports BlockedNoFunds even when the result is
    /// also tier-gated. Only the Granted path mutates the balance.
    pub fn evaluate_click(&mut self, result_id: &str) -> MeterResult<ClickReceipt> {
        let tick = self.clock.current_tick;
        let entry = self.catalogue.get(result_id)?.clone();
        let tier = self.account.tier;
        let cost = pricing::effective_cost(&entry, tier);

        if self.account.balance < cost {
            let shortfall = round2(cost - self.account.balance);
            log::info!(
                "tick={tick} click: {result_id} blocked, balance ${:.2} short ${shortfall:.2}",
                self.account.balance
            );
            self.record("engine", EngineEvent::ClickBlockedNoFunds {
                tick,
                result_id: entry.id.clone(),
                tier,
                cost,
                shortfall,
            })?;
            return Ok(ClickReceipt {
                outcome: ClickOutcome::BlockedNoFunds,
                cost,
                delay_seconds: 0,
                message: format!("Balance too low for this click (${cost:.2}). Please top-up."),
            });
        }

        if !pricing::is_allowed(&entry, tier) {
            let wait_seconds = pricing::gate_wait_seconds(tier);
            log::info!(
                "tick={tick} click: {result_id} tier-gated, needs {} (have {})",
                entry.required_tier, tier
            );
            self.record("engine", EngineEvent::ClickBlockedTierGate {
                tick,
                result_id: entry.id.clone(),
                tier,
                required_tier: entry.required_tier,
                wait_seconds,
            })?;
            return Ok(ClickReceipt {
                outcome: ClickOutcome::BlockedTierGate,
                cost,
                delay_seconds: wait_seconds,
                message: format!(
                    "{} requires {}. Upgrade to continue.",
                    entry.title,
                    entry.required_tier.label()
                ),
            });
        }

        // Charge immediately; the load delay is purely presentational and
        // never needs to be undone if abandoned.
        self.account.balance = round2(self.account.balance - cost);
        let load_seconds = pricing::load_seconds(tier);
        let balance_after = self.account.balance;
        log::info!(
            "tick={tick} click: {result_id} granted, cost ${cost:.2}, balance ${balance_after:.2}"
        );
        self.record("engine", EngineEvent::ClickGranted {
            tick,
            result_id: entry.id.clone(),
            tier,
            cost,
            load_seconds,
            balance_after,
        })?;
        Ok(ClickReceipt {
            outcome: ClickOutcome::Granted,
            cost,
            delay_seconds: load_seconds,
            message: format!("Preparing {}. Estimated wait: {load_seconds}s.", entry.title),
        })
    }

    // ── Top-up ─────────────────────────────────────────────────

    /// Transfer funds from the top-up pool to the balance. The transfer
    /// is capped at whatever the pool still holds.
    pub fn top_up(&mut self, requested: f64) -> MeterResult<TopUpReceipt> {
        let tick = self.clock.current_tick;

        if requested <= 0.0 {
            return Err(MeterError::InvalidAmount { amount: requested });
        }

        if self.account.topup_pool <= 0.0 {
            log::info!("tick={tick} top_up: pool exhausted, rejecting ${requested:.2}");
            self.record("engine", EngineEvent::TopUpRejected {
                tick,
                requested,
                reason: "No top-up funds available. Consider upgrading your plan.".to_string(),
            })?;
            return Err(MeterError::NoFundsAvailable);
        }

        let transferred = requested.min(self.account.topup_pool);
        self.account.topup_pool = round2(self.account.topup_pool - transferred);
        self.account.balance = round2(self.account.balance + transferred);

        let (balance_after, pool_after) = (self.account.balance, self.account.topup_pool);
        log::info!(
            "tick={tick} top_up: ${transferred:.2} transferred, balance ${balance_after:.2}, pool ${pool_after:.2}"
        );
        self.record("engine", EngineEvent::BalanceToppedUp {
            tick,
            requested,
            transferred,
            balance_after,
            pool_after,
        })?;
        Ok(TopUpReceipt {
            transferred,
            new_balance: balance_after,
            new_pool: pool_after,
        })
    }

    // ── Upgrade ────────────────────────────────────────────────

    /// Subscribe to a higher tier, charging its monthly price from the
    /// top-up pool. Only rank increases are valid: General is the floor,
    /// downgrades are unsupported, and re-upgrading to the held tier is
    /// rejected rather than charged again.
    pub fn upgrade_to(&mut self, target: Tier) -> MeterResult<UpgradeReceipt> {
        let tick = self.clock.current_tick;
        let current = self.account.tier;

        if target.rank() <= current.rank() {
            log::info!("tick={tick} upgrade: {current} -> {target} rejected (not an upgrade)");
            self.record("engine", EngineEvent::UpgradeRejected {
                tick,
                requested: target,
                reason: format!("Cannot upgrade from {current} to {target}"),
            })?;
            return Err(MeterError::InvalidUpgrade { current, requested: target });
        }

        let price = target.monthly_price();
        if self.account.topup_pool < price {
            log::info!(
                "tick={tick} upgrade: {target} rejected, pool ${:.2} < ${price:.2}",
                self.account.topup_pool
            );
            self.record("engine", EngineEvent::UpgradeRejected {
                tick,
                requested: target,
                reason: format!(
                    "Insufficient funds to start {} (${price:.0}/month).",
                    target.label()
                ),
            })?;
            return Err(MeterError::InsufficientFunds {
                required: price,
                available: self.account.topup_pool,
            });
        }

        self.account.topup_pool = round2(self.account.topup_pool - price);
        self.account.tier = target;

        let pool_after = self.account.topup_pool;
        log::info!("tick={tick} upgrade: {current} -> {target}, pool ${pool_after:.2}");
        self.record("engine", EngineEvent::TierUpgraded {
            tick,
            from: current,
            to: target,
            price,
            pool_after,
        })?;
        Ok(UpgradeReceipt {
            new_tier: target,
            new_pool: pool_after,
        })
    }

    // ── Reminders ──────────────────────────────────────────────

    pub fn reminders_enabled(&self) -> bool {
        self.reminders.enabled()
    }

    pub fn set_reminders_enabled(&mut self, enabled: bool) -> MeterResult<()> {
        let tick = self.clock.current_tick;
        self.reminders.set_enabled(enabled);
        log::info!("tick={tick} reminders: enabled={enabled}");
        self.record("engine", EngineEvent::RemindersToggled { tick, enabled })
    }

    // ── Clock ──────────────────────────────────────────────────

    /// Advance one tick of session time. Fires the reminder scheduler and
    /// the snapshot cadence; returns the events emitted this tick.
    pub fn tick(&mut self) -> MeterResult<Vec<EngineEvent>> {
        assert!(!self.clock.paused, "tick() called on paused engine");

        let tick = self.clock.advance();
        let mut events = Vec::new();

        if let Some(message) = self.reminders.maybe_fire(tick, &self.account, &mut self.reminder_rng) {
            log::debug!("tick={tick} reminder: {message}");
            let event = EngineEvent::ReminderIssued { tick, message };
            self.record("reminder", event.clone())?;
            events.push(event);
        }

        if tick.is_multiple_of(SNAPSHOT_INTERVAL) {
            self.save_snapshot(tick)?;
        }

        Ok(events)
    }

    /// Run n ticks in a loop. Used by the runner's wait command and tests.
    pub fn run_ticks(&mut self, n: u64) -> MeterResult<()> {
        self.clock.resume();
        for _ in 0..n {
            self.tick()?;
        }
        self.clock.pause();
        Ok(())
    }

    // ── Read-only views ────────────────────────────────────────

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn account(&self) -> &Account {
        &self.account
    }

    pub fn catalogue(&self) -> &Catalogue {
        &self.catalogue
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            session_id: self.session_id.clone(),
            tick: self.clock.current_tick,
            account: self.account.clone(),
        }
    }

    /// Query the journal for a tick's events, in emission order.
    pub fn events_for_tick(&self, tick: Tick) -> MeterResult<Vec<EventLogEntry>> {
        self.journal.events_for_tick(&self.session_id, tick)
    }

    /// Count journalled events of one type over the whole session.
    pub fn count_events_of_type(&self, event_type: &str) -> MeterResult<i64> {
        self.journal.count_events_of_type(&self.session_id, event_type)
    }

    /// Latest journalled snapshot at or before `tick`.
    pub fn snapshot_before(&self, tick: Tick) -> MeterResult<Option<(Tick, SessionSnapshot)>> {
        match self.journal.latest_snapshot_before(&self.session_id, tick)? {
            Some((at, json)) => Ok(Some((at, serde_json::from_str(&json)?))),
            None => Ok(None),
        }
    }

    fn save_snapshot(&self, tick: Tick) -> MeterResult<()> {
        let json = serde_json::to_string(&self.snapshot())?;
        self.journal.save_snapshot(&self.session_id, tick, &json)?;
        log::debug!("tick={tick} snapshot saved");
        Ok(())
    }

    /// Journal the event, then fan it out to observers.
    fn record(&mut self, source: &str, event: EngineEvent) -> MeterResult<()> {
        let entry = EventLogEntry {
            id:         None,
            session_id: self.session_id.clone(),
            tick:       self.clock.current_tick,
            source:     source.to_string(),
            event_type: event.type_name().to_string(),
            payload:    serde_json::to_string(&event)?,
        };
        self.journal.append_event(&entry)?;

        for observer in &mut self.observers {
            observer.on_event(&event);
        }
        Ok(())
    }
}
