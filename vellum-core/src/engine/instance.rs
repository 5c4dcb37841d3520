//! Resident activity instances

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::RefCell;
use core::mem;

use crate::activity::{Activity, ActivityFactory};
use crate::error::{CallbackFault, CallbackResult};
use crate::surface::Surface;
use crate::view::{Point, Size, View};

use super::control::{ActivityControl, EventControl, EventQueue};
use super::events::{self, Name, Payload};

/// Event handler
pub type Callback = Box<dyn FnMut(&Payload) -> CallbackResult>;

/// Handlers of one instance, keyed by event name
///
/// Names keep their first-registration order and handlers their
/// registration order within a name.
#[derive(Default)]
pub struct CallbackRegistry {
    entries: Vec<(Name, Vec<Callback>)>,
}

impl CallbackRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, name: Name, callback: Callback) {
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some((_, handlers)) => handlers.push(callback),
            None => self.entries.push((name, alloc::vec![callback])),
        }
    }

    /// Drop every handler
    ///
    /// Handlers may hold an `EventControl` pointing back at this registry;
    /// clearing breaks that cycle so their captures are freed.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of handlers registered under `name`
    pub fn handler_count(&self, name: &str) -> usize {
        self.entries
            .iter()
            .find(|(n, _)| n.as_str() == name)
            .map_or(0, |(_, handlers)| handlers.len())
    }

    /// Remove the handlers for `name` so they can run without a borrow held
    fn take(&mut self, name: &str) -> Vec<Callback> {
        self.entries
            .iter_mut()
            .find(|(n, _)| n.as_str() == name)
            .map(|(_, handlers)| mem::take(handlers))
            .unwrap_or_default()
    }

    /// Put taken handlers back ahead of any registered in the meantime
    fn restore(&mut self, name: &str, mut handlers: Vec<Callback>) {
        if handlers.is_empty() {
            return;
        }
        match self.entries.iter_mut().find(|(n, _)| n.as_str() == name) {
            Some((_, current)) => {
                handlers.append(current);
                *current = handlers;
            }
            // Taking never removes the entry; only reached if a handler
            // somehow dropped it.
            None => {
                if let Ok(n) = events::name(name) {
                    self.entries.push((n, handlers));
                }
            }
        }
    }
}

/// Result of delivering one custom event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DispatchOutcome {
    /// Handlers that ran
    pub handled: usize,
    /// Handlers that returned a fault
    pub faults: usize,
}

/// One activity resident on the stack
pub struct Instance {
    name: Name,
    activity: Box<dyn Activity>,
    view: Box<dyn View>,
    callbacks: Rc<RefCell<CallbackRegistry>>,
}

impl Instance {
    /// Build an instance: run the factory, `on_create`, then ask for the
    /// root view
    pub(crate) fn create(
        name: Name,
        factory: &ActivityFactory,
        queue: &EventQueue,
        space: Size,
    ) -> Self {
        let callbacks = Rc::new(RefCell::new(CallbackRegistry::new()));
        let mut activity = factory(
            ActivityControl::new(queue.clone()),
            EventControl::new(callbacks.clone()),
        );
        activity.on_create();
        let view = activity.view(space);

        Self {
            name,
            activity,
            view,
            callbacks,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Handlers registered under `event`
    pub fn handler_count(&self, event: &str) -> usize {
        self.callbacks.borrow().handler_count(event)
    }

    pub(crate) fn start(&mut self) {
        self.activity.on_start();
    }

    /// Run `on_destroy` and release the activity, its view and its handlers
    pub(crate) fn destroy(mut self) {
        self.activity.on_destroy();
    }

    /// Invoke every handler registered under `event`, isolating failures
    pub(crate) fn dispatch(&mut self, event: &str, payload: &Payload) -> DispatchOutcome {
        let mut handlers = self.callbacks.borrow_mut().take(event);
        let mut outcome = DispatchOutcome::default();

        for handler in handlers.iter_mut() {
            outcome.handled += 1;
            if let Err(fault) = handler(payload) {
                outcome.faults += 1;
                match fault {
                    CallbackFault::UnexpectedPayload => {
                        warn!("'{}' handler in '{}': unexpected payload", event, self.name.as_str())
                    }
                    CallbackFault::Failed(reason) => {
                        warn!("'{}' handler in '{}' failed: {}", event, self.name.as_str(), reason)
                    }
                }
            }
        }

        self.callbacks.borrow_mut().restore(event, handlers);
        outcome
    }

    /// Render one frame of this instance; returns the root view's size
    pub(crate) fn render(&mut self, surface: &mut dyn Surface, space: Size) -> Size {
        self.activity.before_frame();
        let occupied = self.view.calc(space);
        self.view.draw(surface, Point::ORIGIN);
        self.activity.after_frame();
        occupied
    }
}

impl Drop for Instance {
    fn drop(&mut self) {
        if let Ok(mut callbacks) = self.callbacks.try_borrow_mut() {
            callbacks.clear();
        }
    }
}
