//! Snapshot serialization — the read-only render view of a session.
//!
//! A snapshot is saved to the journal every SNAPSHOT_INTERVAL ticks, and
//! `MeterEngine::snapshot()` hands the same structure to renderers on
//! demand. Together with the static tier and catalogue tables it is
//! everything a presentation layer needs.

use crate::{
    account::Account,
    types::{SessionId, Tick},
};
use serde::{Deserialize, Serialize};

pub const SNAPSHOT_INTERVAL: Tick = 30;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionSnapshot {
    pub session_id: SessionId,
    pub tick: Tick,
    pub account: Account,
}
