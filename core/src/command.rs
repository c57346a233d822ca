use serde::{Deserialize, Serialize};
use crate::{tier::Tier, types::ResultId};

/// All commands a session script or IPC client can issue.
/// Variants are appended, never removed or reordered.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum SessionCommand {
    /// Attempt to open a catalogue result.
    Click { result_id: ResultId },

    /// Move funds from the top-up pool to the balance.
    TopUp { amount: f64 },

    /// Subscribe to a higher tier, charged from the top-up pool.
    Upgrade { tier: Tier },

    /// Enable or disable the periodic reminders.
    Reminders { enabled: bool },

    /// Let the session clock run for `ticks` simulated seconds.
    Wait { ticks: u64 },
}
