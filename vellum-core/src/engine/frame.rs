//! Frame pacing
//!
//! The pacer never sleeps itself. Each tick reports how long the caller
//! should wait, so the engine can be driven by a test loop as easily as by an
//! async timer.

/// Monotonic millisecond clock
pub trait Clock {
    fn now_ms(&self) -> u64;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now_ms(&self) -> u64 {
        (**self).now_ms()
    }
}

/// Outcome of one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FrameReport {
    /// How long to wait before the next tick
    pub sleep_ms: u32,
    /// Time the tick took
    pub elapsed_ms: u32,
    /// The tick ran past its budget
    pub overloaded: bool,
    /// This tick closed a cycle of `target_fps` ticks
    pub cycle_complete: bool,
}

/// Tracks the frame budget and the position within the current cycle
#[derive(Debug, Clone)]
pub struct FramePacer {
    target_fps: u16,
    budget_ms: u32,
    tick_in_cycle: u16,
}

impl FramePacer {
    pub fn new(target_fps: u16) -> Self {
        let target_fps = target_fps.max(1);
        Self {
            target_fps,
            budget_ms: 1000 / u32::from(target_fps),
            tick_in_cycle: 0,
        }
    }

    pub fn budget_ms(&self) -> u32 {
        self.budget_ms
    }

    pub fn target_fps(&self) -> u16 {
        self.target_fps
    }

    /// Ticks completed in the current cycle
    pub fn tick_in_cycle(&self) -> u16 {
        self.tick_in_cycle
    }

    /// Close a tick that took `elapsed_ms`
    pub fn finish(&mut self, elapsed_ms: u64) -> FrameReport {
        let elapsed_ms = u32::try_from(elapsed_ms).unwrap_or(u32::MAX);
        let overloaded = elapsed_ms > self.budget_ms;
        let sleep_ms = if overloaded {
            0
        } else {
            self.budget_ms - elapsed_ms
        };

        self.tick_in_cycle += 1;
        let cycle_complete = self.tick_in_cycle >= self.target_fps;
        if cycle_complete {
            self.tick_in_cycle = 0;
        }

        FrameReport {
            sleep_ms,
            elapsed_ms,
            overloaded,
            cycle_complete,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sleep_fills_budget() {
        let mut pacer = FramePacer::new(20);
        assert_eq!(pacer.budget_ms(), 50);

        let report = pacer.finish(12);
        assert_eq!(report.sleep_ms, 38);
        assert!(!report.overloaded);
    }

    #[test]
    fn test_exact_budget_is_not_overload() {
        let mut pacer = FramePacer::new(10);
        let report = pacer.finish(100);
        assert_eq!(report.sleep_ms, 0);
        assert!(!report.overloaded);
    }

    #[test]
    fn test_overload_requests_no_sleep() {
        let mut pacer = FramePacer::new(30);
        let report = pacer.finish(40);
        assert!(report.overloaded);
        assert_eq!(report.sleep_ms, 0);
        assert_eq!(report.elapsed_ms, 40);
    }

    #[test]
    fn test_cycle_closes_every_fps_ticks() {
        let mut pacer = FramePacer::new(4);
        let cycles: heapless::Vec<bool, 9> = (0..9).map(|_| pacer.finish(0).cycle_complete).collect();
        assert_eq!(
            cycles.as_slice(),
            &[false, false, false, true, false, false, false, true, false]
        );
        assert_eq!(pacer.tick_in_cycle(), 1);
    }

    #[test]
    fn test_zero_fps_is_clamped() {
        let pacer = FramePacer::new(0);
        assert_eq!(pacer.target_fps(), 1);
        assert_eq!(pacer.budget_ms(), 1000);
    }
}
