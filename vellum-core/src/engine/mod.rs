//! Activity engine
//!
//! Owns the activity stack, the registry and the pending event buffer, and
//! turns them into frames. One call to [`Engine::tick`] is one frame:
//!
//! 1. dispatch the events pending at the start of the tick, applying at most
//!    one stack transition
//! 2. clear the surface and render the top activity
//! 3. flush the surface
//! 4. report how long to sleep until the next frame
//!
//! Once every `target_fps` ticks a cycle closes and the optional housekeeping
//! hook runs.

pub mod control;
pub mod events;
pub mod frame;
pub mod instance;
pub mod registry;

use alloc::boxed::Box;
use alloc::rc::Rc;
use core::cell::{Cell, RefCell};
use core::mem;

use heapless::Vec;

use crate::activity::Activity;
use crate::config::EngineConfig;
use crate::error::{ConfigError, ControlError, EngineError, RegistryError};
use crate::surface::Surface;
use crate::view::Size;

use control::{ActivityControl, EventControl, EventQueue, PendingEvents};
use events::{Event, Name, Payload};
use frame::{Clock, FramePacer, FrameReport};
use instance::Instance;
use registry::{Registration, Registry};

/// Maximum number of activities on the stack
pub const MAX_STACK_DEPTH: usize = 8;

/// Running counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EngineStats {
    /// Ticks completed
    pub frames: u32,
    /// Ticks that ran past their budget
    pub overloads: u32,
    /// Handlers that returned a fault
    pub callback_faults: u32,
    /// Frames whose root view asked for more than the surface
    pub layout_overflows: u32,
    /// Failed surface flushes
    pub flush_failures: u32,
    /// Stack transitions applied
    pub transitions: u32,
    /// Events lost to a full pending buffer while deferring
    pub dropped_events: u32,
}

/// Clears the engine's enable flag from outside the frame loop
#[derive(Clone)]
pub struct StopHandle(Rc<Cell<bool>>);

impl StopHandle {
    /// Ask the frame loop to stop at the end of the current cycle
    pub fn stop(&self) {
        self.0.set(false);
    }

    pub fn is_enabled(&self) -> bool {
        self.0.get()
    }
}

/// Activity engine
pub struct Engine {
    config: EngineConfig,
    registry: Registry,
    stack: Vec<Instance, MAX_STACK_DEPTH>,
    queue: EventQueue,
    pacer: FramePacer,
    housekeeping: Option<Box<dyn FnMut()>>,
    enabled: Rc<Cell<bool>>,
    stats: EngineStats,
}

impl Engine {
    /// Create an engine with an empty stack and registry
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            registry: Registry::new(),
            stack: Vec::new(),
            queue: Rc::new(RefCell::new(PendingEvents::new())),
            pacer: FramePacer::new(config.target_fps),
            housekeeping: None,
            enabled: Rc::new(Cell::new(true)),
            stats: EngineStats::default(),
        })
    }

    // ========================================================================
    // Setup
    // ========================================================================

    /// Register an activity factory under `name`
    pub fn register<F, A>(&mut self, name: &str, factory: F) -> Result<(), RegistryError>
    where
        F: Fn(ActivityControl, EventControl) -> A + 'static,
        A: Activity + 'static,
    {
        self.registry.register(name, factory)
    }

    /// Decorator-style registration, see [`Registry::register_activity`]
    pub fn register_activity(&mut self, name: &str) -> Result<Registration<'_>, RegistryError> {
        self.registry.register_activity(name)
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Hook run once per cycle when housekeeping is enabled
    pub fn set_housekeeping(&mut self, hook: impl FnMut() + 'static) {
        self.housekeeping = Some(Box::new(hook));
    }

    /// Queue the first activity
    pub fn start_from(&mut self, name: &str) -> Result<(), ControlError> {
        self.commit(Event::push(name)?)
    }

    /// Queue an event for a later tick
    pub fn commit(&self, event: Event) -> Result<(), ControlError> {
        self.queue
            .borrow_mut()
            .push_back(event)
            .map_err(|_| ControlError::QueueFull)
    }

    /// Control facade for producers outside any activity
    pub fn activity_control(&self) -> ActivityControl {
        ActivityControl::new(self.queue.clone())
    }

    // ========================================================================
    // Enable flag
    // ========================================================================

    pub fn stop_handle(&self) -> StopHandle {
        StopHandle(self.enabled.clone())
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.get()
    }

    pub fn stop(&self) {
        self.enabled.set(false);
    }

    // ========================================================================
    // Inspection
    // ========================================================================

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn available_space(&self) -> Size {
        self.config.available_space()
    }

    /// Number of activities on the stack
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Name of the resident activity
    pub fn top(&self) -> Option<&str> {
        self.stack.last().map(Instance::name)
    }

    /// Stack from bottom to top
    pub fn stack(&self) -> &[Instance] {
        &self.stack
    }

    pub fn pending_events(&self) -> usize {
        self.queue.borrow().len()
    }

    pub fn queue_full(&self) -> bool {
        self.queue.borrow().is_full()
    }

    pub fn stats(&self) -> &EngineStats {
        &self.stats
    }

    // ========================================================================
    // Frame
    // ========================================================================

    /// Run one frame
    ///
    /// A structural failure (unknown activity, empty-stack pop, full stack)
    /// is returned and should stop the loop; nothing is rolled back.
    pub fn tick<C: Clock + ?Sized>(
        &mut self,
        surface: &mut dyn Surface,
        clock: &C,
    ) -> Result<FrameReport, EngineError> {
        let start = clock.now_ms();
        self.registry.seal();

        if let Err(e) = self.dispatch() {
            error!("Dispatch failed: {}", e);
            return Err(e);
        }

        self.render(surface);

        if let Err(e) = surface.flush() {
            self.stats.flush_failures += 1;
            warn!("Surface flush failed: {}", e);
        }

        let report = self.pacer.finish(clock.now_ms().saturating_sub(start));
        self.stats.frames += 1;

        if report.overloaded {
            self.stats.overloads += 1;
            warn!(
                "Frame took {} ms of a {} ms budget, can't keep up",
                report.elapsed_ms,
                self.pacer.budget_ms()
            );
        }

        if report.cycle_complete && self.config.housekeeping {
            if let Some(hook) = self.housekeeping.as_mut() {
                hook();
            }
        }

        Ok(report)
    }

    /// Destroy every instance, top first, and drop pending events
    pub fn shutdown(&mut self) {
        self.enabled.set(false);
        while let Some(instance) = self.stack.pop() {
            debug!("Destroying '{}'", instance.name());
            instance.destroy();
        }
        self.queue.borrow_mut().clear();
    }

    // ========================================================================
    // Dispatch
    // ========================================================================

    fn dispatch(&mut self) -> Result<(), EngineError> {
        // Events queued from here on belong to the next tick
        let mut batch = mem::replace(&mut *self.queue.borrow_mut(), PendingEvents::new());

        while let Some(event) = batch.pop_front() {
            let result = match event {
                Event::Custom { name, payload } => {
                    self.deliver(&name, &payload);
                    continue;
                }
                Event::PushActivity(name) => self.push(name),
                Event::PopActivity => self.pop(),
                Event::ChangeActivity(name) => self.change(name),
            };

            self.defer(batch);
            if result.is_ok() {
                self.stats.transitions += 1;
            }
            return result;
        }

        Ok(())
    }

    /// Put the unread part of a batch back ahead of newer events
    fn defer(&mut self, mut remainder: PendingEvents) {
        if remainder.is_empty() {
            return;
        }
        trace!("Deferring {} events", remainder.len());

        let mut queue = self.queue.borrow_mut();
        while let Some(event) = queue.pop_front() {
            if remainder.push_back(event).is_err() {
                self.stats.dropped_events += 1;
                warn!("Pending buffer full, event dropped");
            }
        }
        *queue = remainder;
    }

    fn deliver(&mut self, name: &Name, payload: &Payload) {
        match self.stack.last_mut() {
            Some(top) => {
                let outcome = top.dispatch(name, payload);
                self.stats.callback_faults += outcome.faults as u32;
            }
            None => warn!("No foreground activity for '{}', event dropped", name.as_str()),
        }
    }

    fn push(&mut self, name: Name) -> Result<(), EngineError> {
        if self.stack.is_full() {
            return Err(EngineError::StackOverflow);
        }
        let instance = self.create(name)?;
        debug!("Push '{}'", instance.name());
        self.stack
            .push(instance)
            .map_err(|_| EngineError::StackOverflow)?;
        if let Some(top) = self.stack.last_mut() {
            top.start();
        }
        Ok(())
    }

    fn pop(&mut self) -> Result<(), EngineError> {
        let instance = self.stack.pop().ok_or(EngineError::EmptyStack)?;
        debug!("Pop '{}'", instance.name());
        instance.destroy();

        match self.stack.last_mut() {
            Some(top) => top.start(),
            None => warn!("Last activity exited, no foreground activity"),
        }
        Ok(())
    }

    fn change(&mut self, name: Name) -> Result<(), EngineError> {
        if self.stack.is_empty() {
            return Err(EngineError::EmptyStack);
        }
        // Check before tearing down so a bad name leaves the stack intact
        if !self.registry.contains(&name) {
            return Err(EngineError::UnknownActivity(name));
        }
        if let Some(outgoing) = self.stack.pop() {
            debug!("Change '{}' -> '{}'", outgoing.name(), name.as_str());
            outgoing.destroy();
        }
        self.push(name)
    }

    fn create(&self, name: Name) -> Result<Instance, EngineError> {
        let Some(factory) = self.registry.get(&name) else {
            return Err(EngineError::UnknownActivity(name));
        };
        Ok(Instance::create(
            name,
            factory,
            &self.queue,
            self.config.available_space(),
        ))
    }

    // ========================================================================
    // Render
    // ========================================================================

    fn render(&mut self, surface: &mut dyn Surface) {
        surface.clear();

        let space = self.config.available_space();
        let Some(top) = self.stack.last_mut() else {
            return;
        };

        let occupied = top.render(surface, space);
        if !occupied.fits_within(space) {
            self.stats.layout_overflows += 1;
            warn!(
                "'{}' layout needs {}x{}, surface is {}x{}",
                top.name(),
                occupied.width,
                occupied.height,
                space.width,
                space.height
            );
        }
    }
}
