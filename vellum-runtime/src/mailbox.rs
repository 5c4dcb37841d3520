//! Event hand-off from other tasks and interrupt handlers
//!
//! The engine queue lives behind an `Rc<RefCell<_>>` and can only be touched
//! from the task running the frame loop. Producers elsewhere (button
//! interrupts, an encoder task, a serial link) post into a [`Mailbox`]
//! instead; the frame loop drains it into the engine before every tick.

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::channel::{Channel, TrySendError};
use vellum_core::{ControlError, Engine, Event, Payload};

/// Mailbox errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MailboxError {
    /// No room left; the event was dropped
    Full,
    /// The event could not be built
    Event(ControlError),
}

impl From<ControlError> for MailboxError {
    fn from(e: ControlError) -> Self {
        MailboxError::Event(e)
    }
}

/// Bounded multi-producer queue of engine events
pub struct Mailbox<M: RawMutex, const N: usize> {
    channel: Channel<M, Event, N>,
}

impl<M: RawMutex, const N: usize> Mailbox<M, N> {
    pub const fn new() -> Self {
        Self {
            channel: Channel::new(),
        }
    }

    /// Post an event; hands it back when the mailbox is full
    pub fn post(&self, event: Event) -> Result<(), Event> {
        self.channel.try_send(event).map_err(|TrySendError::Full(event)| {
            warn!("Mailbox full, dropping event");
            event
        })
    }

    /// Post a custom event
    pub fn emit(&self, name: &str, payload: impl Into<Payload>) -> Result<(), MailboxError> {
        let event = Event::custom(name, payload)?;
        self.post(event).map_err(|_| MailboxError::Full)
    }

    pub fn len(&self) -> usize {
        self.channel.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channel.is_empty()
    }

    /// Move waiting events into the engine queue, oldest first
    ///
    /// Stops early when the engine queue is full; the rest stays here for
    /// the next frame. Returns the number of events moved.
    pub fn drain_into(&self, engine: &Engine) -> usize {
        let mut moved = 0;
        while !engine.queue_full() {
            let Ok(event) = self.channel.try_receive() else {
                break;
            };
            if let Err(e) = engine.commit(event) {
                warn!("Engine rejected mailbox event: {}", e);
                break;
            }
            moved += 1;
        }
        if moved > 0 {
            trace!("Drained {} mailbox events", moved);
        }
        moved
    }
}

impl<M: RawMutex, const N: usize> Default for Mailbox<M, N> {
    fn default() -> Self {
        Self::new()
    }
}
