use crate::tier::Tier;
use thiserror::Error;

/// Every failure the engine can return. All variants are recoverable and
/// user-visible; a rejected operation always leaves the account unchanged.
///
/// Click gating outcomes (insufficient balance, tier gate) are NOT errors —
/// they are `ClickOutcome` values returned on the success path.
#[derive(Error, Debug)]
pub enum MeterError {
    #[error("Journal error: {0}")]
    Journal(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Unknown result: {result_id}")]
    UnknownResult { result_id: String },

    #[error("Invalid amount: {amount}")]
    InvalidAmount { amount: f64 },

    #[error("No top-up funds available. Consider upgrading your plan.")]
    NoFundsAvailable,

    #[error("Insufficient funds: need ${required:.2}, have ${available:.2}")]
    InsufficientFunds { required: f64, available: f64 },

    #[error("Cannot upgrade from {current} to {requested}")]
    InvalidUpgrade { current: Tier, requested: Tier },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type MeterResult<T> = Result<T, MeterError>;
