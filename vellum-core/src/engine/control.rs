//! Control facades handed to activities
//!
//! An activity never touches the engine directly. At creation it receives an
//! [`ActivityControl`], which appends events to the engine's pending buffer,
//! and an [`EventControl`], which registers handlers on its own instance.
//! Both are cheap to clone so they can be captured by handlers.

use alloc::boxed::Box;
use alloc::rc::Rc;
use core::cell::RefCell;

use heapless::Deque;

use crate::error::{CallbackResult, ControlError};

use super::events::{self, Event, Payload};
use super::instance::CallbackRegistry;

/// Capacity of the pending event buffer
pub const MAX_PENDING_EVENTS: usize = 32;

/// Pending event buffer
pub type PendingEvents = Deque<Event, MAX_PENDING_EVENTS>;

/// Shared handle to the pending event buffer
pub type EventQueue = Rc<RefCell<PendingEvents>>;

/// Queues stack transitions and custom events
///
/// Nothing here changes the stack synchronously: the engine applies queued
/// events on a later tick.
#[derive(Clone)]
pub struct ActivityControl {
    queue: EventQueue,
}

impl ActivityControl {
    pub(crate) fn new(queue: EventQueue) -> Self {
        Self { queue }
    }

    /// Request `name` to be created on top of the stack
    pub fn push(&self, name: &str) -> Result<(), ControlError> {
        self.commit(Event::push(name)?)
    }

    /// Request the top activity to be replaced by `name`
    pub fn change(&self, name: &str) -> Result<(), ControlError> {
        self.commit(Event::change(name)?)
    }

    /// Request the top activity to be destroyed
    pub fn pop(&self) -> Result<(), ControlError> {
        self.commit(Event::pop())
    }

    /// Queue a custom event for the resident activity
    pub fn emit(&self, name: &str, payload: impl Into<Payload>) -> Result<(), ControlError> {
        self.commit(Event::custom(name, payload)?)
    }

    /// Queue a prebuilt event
    pub fn create_event(&self, event: Event) -> Result<(), ControlError> {
        self.commit(event)
    }

    fn commit(&self, event: Event) -> Result<(), ControlError> {
        trace!("queue {}", event);
        self.queue
            .borrow_mut()
            .push_back(event)
            .map_err(|_| ControlError::QueueFull)
    }
}

/// Registers handlers on the owning instance
#[derive(Clone)]
pub struct EventControl {
    callbacks: Rc<RefCell<CallbackRegistry>>,
}

impl EventControl {
    pub(crate) fn new(callbacks: Rc<RefCell<CallbackRegistry>>) -> Self {
        Self { callbacks }
    }

    /// Run `handler` for every `name` event delivered to this instance
    ///
    /// Handlers for the same name run in registration order. A handler added
    /// while events are being dispatched takes effect from the next dispatch.
    pub fn on<F>(&self, name: &str, handler: F) -> Result<(), ControlError>
    where
        F: FnMut(&Payload) -> CallbackResult + 'static,
    {
        let name = events::name(name)?;
        self.callbacks
            .borrow_mut()
            .register(name, Box::new(handler));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn queue() -> EventQueue {
        Rc::new(RefCell::new(PendingEvents::new()))
    }

    #[test]
    fn test_requests_are_queued_in_order() {
        let q = queue();
        let control = ActivityControl::new(q.clone());

        control.push("settings").unwrap();
        control.emit("volume", 3).unwrap();
        control.pop().unwrap();
        control.change("home").unwrap();

        let pending: alloc::vec::Vec<Event> = q.borrow().iter().cloned().collect();
        assert_eq!(
            pending,
            [
                Event::push("settings").unwrap(),
                Event::custom("volume", 3).unwrap(),
                Event::PopActivity,
                Event::change("home").unwrap(),
            ]
        );
    }

    #[test]
    fn test_bad_names_are_not_queued() {
        let q = queue();
        let control = ActivityControl::new(q.clone());

        assert_eq!(control.push(""), Err(ControlError::EmptyName));
        assert_eq!(control.change("no spaces"), Err(ControlError::InvalidName));
        assert_eq!(
            control.emit("this-name-is-too-long", ()),
            Err(ControlError::NameTooLong)
        );
        assert!(q.borrow().is_empty());
    }

    #[test]
    fn test_full_buffer_is_reported() {
        let q = queue();
        let control = ActivityControl::new(q.clone());

        for _ in 0..MAX_PENDING_EVENTS {
            control.pop().unwrap();
        }
        assert_eq!(control.pop(), Err(ControlError::QueueFull));
        assert_eq!(q.borrow().len(), MAX_PENDING_EVENTS);
    }

    #[test]
    fn test_on_registers_handler() {
        let callbacks = Rc::new(RefCell::new(CallbackRegistry::new()));
        let control = EventControl::new(callbacks.clone());

        control.on("click", |_| Ok(())).unwrap();
        control.on("click", |_| Ok(())).unwrap();
        assert_eq!(control.on("", |_| Ok(())), Err(ControlError::EmptyName));

        assert_eq!(callbacks.borrow().handler_count("click"), 2);
        assert_eq!(callbacks.borrow().handler_count("other"), 0);
    }
}
