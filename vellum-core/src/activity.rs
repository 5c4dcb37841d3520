//! Activity contract
//!
//! An activity is one screen of the UI. The engine creates it from a
//! registered factory when it is pushed, keeps it while it sits on the stack
//! and drops it when it is popped.
//!
//! Lifecycle, in order:
//! 1. factory call with the two control facades
//! 2. [`Activity::on_create`]
//! 3. [`Activity::view`] for the root view
//! 4. [`Activity::on_start`] (again every time it becomes the top after a pop)
//! 5. per frame while on top: [`Activity::before_frame`], layout and draw,
//!    [`Activity::after_frame`]
//! 6. [`Activity::on_destroy`]

use alloc::boxed::Box;

use crate::engine::control::{ActivityControl, EventControl};
use crate::view::{Size, View};

/// One screen of the UI
///
/// Every hook except [`Activity::view`] defaults to doing nothing.
pub trait Activity {
    fn on_create(&mut self) {}

    fn on_start(&mut self) {}

    fn on_destroy(&mut self) {}

    fn before_frame(&mut self) {}

    fn after_frame(&mut self) {}

    /// Build the root view for `space`
    ///
    /// Called once, right after `on_create`.
    fn view(&mut self, space: Size) -> Box<dyn View>;
}

/// Builds an activity from its control facades
pub type ActivityFactory = Box<dyn Fn(ActivityControl, EventControl) -> Box<dyn Activity>>;

/// Box a factory closure returning a concrete activity type
pub fn into_factory<F, A>(factory: F) -> ActivityFactory
where
    F: Fn(ActivityControl, EventControl) -> A + 'static,
    A: Activity + 'static,
{
    Box::new(
        move |activity: ActivityControl, events: EventControl| -> Box<dyn Activity> {
            Box::new(factory(activity, events))
        },
    )
}
