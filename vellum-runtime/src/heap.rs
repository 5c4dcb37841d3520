//! Heap usage monitoring
//!
//! [`HeapMonitor`] samples an allocator once per cycle from the engine's
//! housekeeping hook and keeps the high-water mark.

use embedded_alloc::LlffHeap;
use vellum_core::widgets::HeapStats;

/// Usage figures of the global `embedded-alloc` heap
#[derive(Clone, Copy)]
pub struct AllocatorStats(pub &'static LlffHeap);

impl HeapStats for AllocatorStats {
    fn used(&self) -> usize {
        self.0.used()
    }

    fn free(&self) -> usize {
        self.0.free()
    }
}

/// One heap sample
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct HeapReport {
    pub used: usize,
    pub free: usize,
    pub peak: usize,
    pub percent_used: u32,
}

/// Tracks heap usage across samples
pub struct HeapMonitor<H> {
    stats: H,
    peak: usize,
    samples: u32,
}

impl<H: HeapStats> HeapMonitor<H> {
    pub fn new(stats: H) -> Self {
        Self {
            stats,
            peak: 0,
            samples: 0,
        }
    }

    pub fn sample(&mut self) -> HeapReport {
        let used = self.stats.used();
        self.peak = self.peak.max(used);
        self.samples = self.samples.wrapping_add(1);
        HeapReport {
            used,
            free: self.stats.free(),
            peak: self.peak,
            percent_used: self.stats.percent_used(),
        }
    }

    pub fn peak(&self) -> usize {
        self.peak
    }

    pub fn samples(&self) -> u32 {
        self.samples
    }

    /// Housekeeping hook that logs a sample per cycle
    pub fn housekeeping(mut self) -> impl FnMut() + 'static
    where
        H: 'static,
    {
        move || {
            let report = self.sample();
            debug!(
                "Heap: {} used, {} free, {} peak ({}%)",
                report.used,
                report.free,
                report.peak,
                report.percent_used
            );
            if report.percent_used >= 90 {
                warn!("Heap nearly exhausted: {}% used", report.percent_used);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use core::cell::Cell;
    use std::rc::Rc;

    struct Scripted {
        used: Rc<Cell<usize>>,
        reads: Rc<Cell<u32>>,
        total: usize,
    }

    impl Scripted {
        fn new(used: &Rc<Cell<usize>>, total: usize) -> Self {
            Self {
                used: used.clone(),
                reads: Rc::new(Cell::new(0)),
                total,
            }
        }
    }

    impl HeapStats for Scripted {
        fn used(&self) -> usize {
            self.reads.set(self.reads.get() + 1);
            self.used.get()
        }

        fn free(&self) -> usize {
            self.total - self.used.get()
        }
    }

    #[test]
    fn test_peak_survives_frees() {
        let used = Rc::new(Cell::new(100));
        let mut monitor = HeapMonitor::new(Scripted::new(&used, 1000));

        let first = monitor.sample();
        assert_eq!(first.used, 100);
        assert_eq!(first.free, 900);
        assert_eq!(first.percent_used, 10);

        used.set(600);
        monitor.sample();
        used.set(200);
        let last = monitor.sample();

        assert_eq!(last.used, 200);
        assert_eq!(last.peak, 600);
        assert_eq!(monitor.peak(), 600);
        assert_eq!(monitor.samples(), 3);
    }

    #[test]
    fn test_housekeeping_hook_samples() {
        let used = Rc::new(Cell::new(950));
        let stats = Scripted::new(&used, 1000);
        let reads = stats.reads.clone();
        let mut hook = HeapMonitor::new(stats).housekeeping();

        hook();
        let per_sample = reads.get();
        assert!(per_sample > 0);

        hook();
        assert_eq!(reads.get(), per_sample * 2);
    }

    #[test]
    fn test_empty_allocator_reports_nothing_used() {
        static HEAP: LlffHeap = LlffHeap::empty();
        let stats = AllocatorStats(&HEAP);
        assert_eq!(stats.used(), 0);
        assert_eq!(stats.percent_used(), 0);
    }
}
