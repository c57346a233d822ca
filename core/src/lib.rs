//! meternet-core — the access-gating and metering engine behind MeterNet,
//! an interactive demo of a metered, tiered-access web.
//!
//! A session holds one mutable [`account::Account`] (balance, top-up pool,
//! subscription tier). The [`engine::MeterEngine`] evaluates result clicks
//! against the immutable [`catalogue::Catalogue`] and [`tier::Tier`] table,
//! mutates the account on the granted path, and emits every outcome as an
//! [`event::EngineEvent`] to the session journal and to registered
//! observers. Everything cosmetic — sound, flashes, ad popups — lives
//! behind [`observer::EngineObserver`] and never feeds back.

pub mod account;
pub mod catalogue;
pub mod clock;
pub mod command;
pub mod engine;
pub mod error;
pub mod event;
pub mod journal;
pub mod observer;
pub mod pricing;
pub mod reminder;
pub mod rng;
pub mod snapshot;
pub mod tier;
pub mod types;
