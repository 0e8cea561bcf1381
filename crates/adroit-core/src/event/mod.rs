//! Cancelable, priority-ordered events.
//!
//! - [`EventBus`] - listener queues and dispatch
//! - [`Event`] - the object listeners receive

mod bus;
mod envelope;

pub use bus::{DEFAULT_PRIORITY, EventBus, Listener, ListenerId};
pub use envelope::Event;
