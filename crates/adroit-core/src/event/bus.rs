//! Priority-ordered publish/subscribe.
//!
//! The [`EventBus`] keeps one listener queue per event type. Listeners with
//! a higher priority run first; listeners with equal priority run in the
//! order they were attached.
//!
//! ```rust
//! use adroit_core::event::{EventBus, DEFAULT_PRIORITY};
//!
//! let bus = EventBus::new();
//! bus.attach("app.boot", |event| {
//!     event.set_result("booted");
//!     Ok(())
//! }, DEFAULT_PRIORITY);
//!
//! let event = bus.dispatch("app.boot", None, None, true).unwrap();
//! assert_eq!(event.result::<&str>(), Some(&"booted"));
//! ```
//!
//! # Concurrency
//!
//! The queues sit behind a `parking_lot::RwLock`. A dispatch copies the
//! queue under the read lock and runs the copy after releasing it, so
//! listeners may attach or detach other listeners without deadlocking and
//! without affecting the dispatch in progress.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;
use tracing::{Level, debug, span, trace};

use crate::error::{BoxError, EventError, EventResult};

use super::envelope::Event;

/// Priority used when the caller has no preference.
pub const DEFAULT_PRIORITY: i32 = 10;

/// A listener callback.
pub type Listener = dyn Fn(&mut Event<'_>) -> Result<(), BoxError> + Send + Sync;

/// Handle returned by [`EventBus::attach`], used to detach one listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

impl fmt::Display for ListenerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "listener#{}", self.0)
    }
}

struct RegisteredListener {
    id: ListenerId,
    priority: i32,
    listener: Arc<Listener>,
}

/// Listener queues keyed by event type.
///
/// The bus is owned explicitly and shared as `Arc<EventBus>`; there is no
/// global registry.
pub struct EventBus {
    queues: RwLock<HashMap<String, Vec<RegisteredListener>>>,
    next_id: AtomicU64,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventBus {
    /// Creates a bus without listeners.
    pub fn new() -> Self {
        Self {
            queues: RwLock::new(HashMap::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Attaches a listener to an event type.
    ///
    /// Higher priorities run first. Use [`DEFAULT_PRIORITY`] when the order
    /// does not matter.
    pub fn attach<F>(
        &self,
        event_type: impl Into<String>,
        listener: F,
        priority: i32,
    ) -> ListenerId
    where
        F: Fn(&mut Event<'_>) -> Result<(), BoxError> + Send + Sync + 'static,
    {
        let event_type = event_type.into();
        let id = ListenerId(self.next_id.fetch_add(1, Ordering::Relaxed));

        let mut queues = self.queues.write();
        let queue = queues.entry(event_type.clone()).or_default();

        // Stable: FIFO among equal priorities.
        let pos = queue
            .iter()
            .position(|l| l.priority < priority)
            .unwrap_or(queue.len());
        queue.insert(
            pos,
            RegisteredListener {
                id,
                priority,
                listener: Arc::new(listener),
            },
        );

        debug!(event = %event_type, %id, priority, "Attached listener");
        id
    }

    /// Removes every listener of an event type.
    pub fn detach(&self, event_type: &str) {
        if let Some(removed) = self.queues.write().remove(event_type) {
            debug!(event = %event_type, count = removed.len(), "Detached listeners");
        }
    }

    /// Removes every listener of every event type.
    pub fn detach_all(&self) {
        self.queues.write().clear();
        debug!("Detached all listeners");
    }

    /// Removes a single listener. Returns `true` if it was attached.
    pub fn detach_listener(&self, id: ListenerId) -> bool {
        let mut queues = self.queues.write();
        let mut found = false;
        queues.retain(|_, queue| {
            let before = queue.len();
            queue.retain(|l| l.id != id);
            found |= queue.len() < before;
            !queue.is_empty()
        });
        found
    }

    /// Returns the number of listeners attached to an event type.
    pub fn listener_count(&self, event_type: &str) -> usize {
        self.queues.read().get(event_type).map_or(0, Vec::len)
    }

    /// Returns `true` if at least one listener is attached to an event type.
    pub fn has_listeners(&self, event_type: &str) -> bool {
        self.listener_count(event_type) > 0
    }

    /// Dispatches an event to the listeners of its type.
    ///
    /// Listeners run in priority order until one of them stops propagation
    /// or fails. The returned [`Event`] carries whatever result the
    /// listeners set. An event type without listeners still yields an
    /// event.
    ///
    /// # Errors
    ///
    /// - [`EventError::IllegalOperation`] if a listener tried to stop a
    ///   non-cancelable event and propagated the failure.
    /// - [`EventError::Listener`] if a listener returned any other error.
    ///
    /// Listeners after the failing one are not invoked.
    pub fn dispatch<'a>(
        &self,
        event_type: &str,
        subject: Option<&'a dyn Any>,
        payload: Option<&'a mut dyn Any>,
        cancelable: bool,
    ) -> EventResult<Event<'a>> {
        let span = span!(Level::TRACE, "event", event = %event_type);
        let _enter = span.enter();

        let snapshot = self.snapshot(event_type);
        let mut event = Event::new(event_type, subject, payload, cancelable);

        for (id, listener) in snapshot {
            trace!(%id, "Invoking listener");
            if let Err(err) = listener(&mut event) {
                return Err(match err.downcast::<EventError>() {
                    Ok(event_err) => *event_err,
                    Err(source) => EventError::Listener {
                        event: event_type.to_string(),
                        source,
                    },
                });
            }
            if event.is_propagation_stopped() {
                debug!(%id, "Propagation stopped");
                break;
            }
        }

        Ok(event)
    }

    /// Dispatches an event with neither subject nor payload.
    pub fn fire(&self, event_type: &str) -> EventResult<Event<'static>> {
        self.dispatch(event_type, None, None, true)
    }

    /// Dispatches an event with a subject only.
    pub fn notify<'a>(&self, event_type: &str, subject: &'a dyn Any) -> EventResult<Event<'a>> {
        self.dispatch(event_type, Some(subject), None, true)
    }

    fn snapshot(&self, event_type: &str) -> Vec<(ListenerId, Arc<Listener>)> {
        self.queues
            .read()
            .get(event_type)
            .map(|queue| {
                queue
                    .iter()
                    .map(|l| (l.id, Arc::clone(&l.listener)))
                    .collect()
            })
            .unwrap_or_default()
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let queues = self.queues.read();
        let mut counts: Vec<(&str, usize)> =
            queues.iter().map(|(k, v)| (k.as_str(), v.len())).collect();
        counts.sort_unstable();
        f.debug_struct("EventBus").field("listeners", &counts).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    fn recorder(
        log: &Arc<Mutex<Vec<&'static str>>>,
        tag: &'static str,
    ) -> impl Fn(&mut Event<'_>) -> Result<(), BoxError> + Send + Sync + 'static {
        let log = Arc::clone(log);
        move |_: &mut Event<'_>| {
            log.lock().push(tag);
            Ok(())
        }
    }

    #[test]
    fn test_priority_order() {
        let bus = EventBus::new();
        let log = Arc::new(Mutex::new(Vec::new()));

        bus.attach("e", recorder(&log, "low"), 1);
        bus.attach("e", recorder(&log, "high"), 100);
        bus.attach("e", recorder(&log, "mid"), DEFAULT_PRIORITY);

        bus.fire("e").unwrap();
        assert_eq!(*log.lock(), vec!["high", "mid", "low"]);
    }

    #[test]
    fn test_equal_priority_is_fifo() {
        let bus = EventBus::new();
        let log = Arc::new(Mutex::new(Vec::new()));

        bus.attach("e", recorder(&log, "first"), 5);
        bus.attach("e", recorder(&log, "second"), 5);
        bus.attach("e", recorder(&log, "third"), 5);

        bus.fire("e").unwrap();
        assert_eq!(*log.lock(), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_empty_queue_returns_event() {
        let bus = EventBus::new();
        let event = bus.dispatch("nobody", None, None, false).unwrap();
        assert_eq!(event.name(), "nobody");
        assert!(!event.has_result());
        assert!(!event.is_propagation_stopped());
    }

    #[test]
    fn test_stop_propagation() {
        let bus = EventBus::new();
        let log = Arc::new(Mutex::new(Vec::new()));

        let l = Arc::clone(&log);
        bus.attach(
            "e",
            move |event| {
                l.lock().push("stopper");
                event.set_result(1_u8);
                event.stop_immediate_propagation()?;
                Ok(())
            },
            50,
        );
        bus.attach("e", recorder(&log, "skipped"), 1);

        let event = bus.fire("e").unwrap();
        assert!(event.is_propagation_stopped());
        assert_eq!(event.result::<u8>(), Some(&1));
        assert_eq!(*log.lock(), vec!["stopper"]);

        // The next dispatch starts fresh.
        log.lock().clear();
        let _ = bus.fire("e").unwrap();
        assert_eq!(*log.lock(), vec!["stopper"]);
    }

    #[test]
    fn test_stop_on_non_cancelable_is_illegal() {
        let bus = EventBus::new();
        bus.attach(
            "e",
            |event| {
                event.stop_immediate_propagation()?;
                Ok(())
            },
            DEFAULT_PRIORITY,
        );

        let err = bus.dispatch("e", None, None, false).unwrap_err();
        assert!(err.is_illegal_operation());
    }

    #[test]
    fn test_listener_error_halts_dispatch() {
        let bus = EventBus::new();
        let log = Arc::new(Mutex::new(Vec::new()));

        bus.attach("e", |_| Err("boom".into()), 20);
        bus.attach("e", recorder(&log, "after"), 10);

        let err = bus.fire("e").unwrap_err();
        assert!(matches!(err, EventError::Listener { ref event, .. } if event == "e"));
        assert!(log.lock().is_empty());
    }

    #[test]
    fn test_snapshot_ignores_attach_during_dispatch() {
        let bus = Arc::new(EventBus::new());
        let log = Arc::new(Mutex::new(Vec::new()));

        let inner_bus = Arc::clone(&bus);
        let inner_log = Arc::clone(&log);
        bus.attach(
            "e",
            move |_| {
                inner_log.lock().push("outer");
                inner_bus.attach("e", recorder(&inner_log, "late"), 100);
                Ok(())
            },
            DEFAULT_PRIORITY,
        );

        bus.fire("e").unwrap();
        assert_eq!(*log.lock(), vec!["outer"]);
        assert_eq!(bus.listener_count("e"), 2);
    }

    #[test]
    fn test_snapshot_ignores_detach_during_dispatch() {
        let bus = Arc::new(EventBus::new());
        let log = Arc::new(Mutex::new(Vec::new()));

        let inner_bus = Arc::clone(&bus);
        bus.attach(
            "e",
            move |_| {
                inner_bus.detach("e");
                Ok(())
            },
            100,
        );
        bus.attach("e", recorder(&log, "still-runs"), 1);

        bus.fire("e").unwrap();
        assert_eq!(*log.lock(), vec!["still-runs"]);
        assert!(!bus.has_listeners("e"));
    }

    #[test]
    fn test_payload_mutation_is_visible_to_caller() {
        let bus = EventBus::new();
        bus.attach(
            "e",
            |event| {
                if let Some(n) = event.payload_mut::<i64>() {
                    *n *= 2;
                }
                Ok(())
            },
            DEFAULT_PRIORITY,
        );

        let mut value = 21_i64;
        bus.dispatch("e", None, Some(&mut value), true).unwrap();
        assert_eq!(value, 42);
    }

    #[test]
    fn test_detach_listener_and_detach_all() {
        let bus = EventBus::new();
        let a = bus.attach("a", |_| Ok(()), 1);
        bus.attach("a", |_| Ok(()), 1);
        bus.attach("b", |_| Ok(()), 1);

        assert!(bus.detach_listener(a));
        assert!(!bus.detach_listener(a));
        assert_eq!(bus.listener_count("a"), 1);

        bus.detach_all();
        assert!(!bus.has_listeners("a"));
        assert!(!bus.has_listeners("b"));
    }

    #[test]
    fn test_notify_exposes_subject() {
        let bus = EventBus::new();
        bus.attach(
            "e",
            |event| {
                let name = event.subject::<String>().cloned().unwrap_or_default();
                event.set_result(name.len());
                Ok(())
            },
            DEFAULT_PRIORITY,
        );

        let subject = String::from("adroit");
        let event = bus.notify("e", &subject).unwrap();
        assert_eq!(event.result::<usize>(), Some(&6));
    }
}
