//! Observer contract for ambient effects.
//!
//! RULE: observers consume the event stream and nothing else.
//! An observer may never mutate the account, call engine operations,
//! or influence a gating decision. Sound, screen flashes, ad popups,
//! and toasts all live behind this trait.

use crate::event::EngineEvent;

pub trait EngineObserver: Send {
    /// Unique stable name, used in logs.
    fn name(&self) -> &'static str;

    /// Called once per emitted event, in emission order.
    fn on_event(&mut self, event: &EngineEvent);
}
