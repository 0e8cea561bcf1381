//! The event object handed to listeners.

use std::any::Any;
use std::fmt;

use crate::error::{EventError, EventResult};

/// One dispatch of an event type.
///
/// An `Event` is created per [`EventBus::dispatch`](super::EventBus::dispatch)
/// call and only listeners of that call can mutate it. The subject is the
/// object that fired the event; the payload is mutable data that listeners
/// may inspect or replace. Listeners communicate back to the caller through
/// [`set_result`](Self::set_result).
pub struct Event<'a> {
    name: String,
    subject: Option<&'a dyn Any>,
    payload: Option<&'a mut dyn Any>,
    cancelable: bool,
    result: Option<Box<dyn Any>>,
    immediate_stopped: bool,
}

impl<'a> Event<'a> {
    pub(crate) fn new(
        name: impl Into<String>,
        subject: Option<&'a dyn Any>,
        payload: Option<&'a mut dyn Any>,
        cancelable: bool,
    ) -> Self {
        Self {
            name: name.into(),
            subject,
            payload,
            cancelable,
            result: None,
            immediate_stopped: false,
        }
    }

    /// Returns the event type.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns `true` if listeners may stop propagation.
    pub fn is_cancelable(&self) -> bool {
        self.cancelable
    }

    /// Returns `true` if a listener stopped propagation.
    pub fn is_propagation_stopped(&self) -> bool {
        self.immediate_stopped
    }

    /// Returns the subject downcast to `T`.
    pub fn subject<T: Any>(&self) -> Option<&T> {
        self.subject.and_then(|s| s.downcast_ref::<T>())
    }

    /// Returns `true` if the event carries a subject.
    pub fn has_subject(&self) -> bool {
        self.subject.is_some()
    }

    /// Returns the payload downcast to `T`.
    pub fn payload<T: Any>(&self) -> Option<&T> {
        self.payload.as_deref().and_then(|p| p.downcast_ref::<T>())
    }

    /// Returns the payload downcast to `T`, mutably.
    pub fn payload_mut<T: Any>(&mut self) -> Option<&mut T> {
        self.payload.as_deref_mut().and_then(|p| p.downcast_mut::<T>())
    }

    /// Returns `true` if the event carries a payload.
    pub fn has_payload(&self) -> bool {
        self.payload.is_some()
    }

    /// Sets the dispatch result, replacing any previous one.
    pub fn set_result<T: Any>(&mut self, result: T) {
        self.result = Some(Box::new(result));
    }

    /// Returns the result downcast to `T`.
    pub fn result<T: Any>(&self) -> Option<&T> {
        self.result.as_ref().and_then(|r| r.downcast_ref::<T>())
    }

    /// Returns `true` if a result was set.
    pub fn has_result(&self) -> bool {
        self.result.is_some()
    }

    /// Takes the result if it is a `T`.
    ///
    /// A result of another type is left in place.
    pub fn take_result<T: Any>(&mut self) -> Option<T> {
        match self.result.take()?.downcast::<T>() {
            Ok(value) => Some(*value),
            Err(other) => {
                self.result = Some(other);
                None
            }
        }
    }

    /// Stops the remaining listeners of this dispatch from running.
    ///
    /// # Errors
    ///
    /// Returns [`EventError::IllegalOperation`] if the event is not
    /// cancelable.
    pub fn stop_immediate_propagation(&mut self) -> EventResult<()> {
        if !self.cancelable {
            return Err(EventError::illegal(
                self.name.clone(),
                "event is not cancelable",
            ));
        }
        self.immediate_stopped = true;
        Ok(())
    }
}

impl fmt::Debug for Event<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Event")
            .field("name", &self.name)
            .field("has_subject", &self.subject.is_some())
            .field("has_payload", &self.payload.is_some())
            .field("cancelable", &self.cancelable)
            .field("has_result", &self.result.is_some())
            .field("immediate_stopped", &self.immediate_stopped)
            .finish()
    }
}
