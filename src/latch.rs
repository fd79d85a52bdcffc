//! Interrupt-to-loop event handoff.
//!
//! Interrupt-context code may touch nothing but these latches: a handler
//! sets one flag or bumps one counter and returns. The control loop polls
//! and clears them. Each latch has exactly one writer side and one reader
//! side, so no further synchronization is needed.

use core::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use crate::config::BUTTON_COUNT;

/// One-shot event flag: raised in interrupt context, consumed by the loop.
pub struct EventLatch(AtomicBool);

impl EventLatch {
    pub const fn new() -> Self {
        Self(AtomicBool::new(false))
    }

    /// Interrupt side. Idempotent: raising an already-raised latch keeps
    /// it raised; coalescing is the point.
    pub fn raise(&self) {
        self.0.store(true, Ordering::Release);
    }

    /// Loop side: read-and-clear.
    pub fn take(&self) -> bool {
        self.0.swap(false, Ordering::AcqRel)
    }

    /// Peek without clearing. Used by wake logic to decide if an event
    /// is already pending.
    pub fn is_raised(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

impl Default for EventLatch {
    fn default() -> Self {
        Self::new()
    }
}

/// Free-running tick counter bumped by the periodic timer interrupt.
///
/// Wraps at `u32::MAX`; the clock glue folds successive reads into a
/// monotonic `u64`.
pub struct TickCounter(AtomicU32);

impl TickCounter {
    pub const fn new() -> Self {
        Self(AtomicU32::new(0))
    }

    /// Interrupt side.
    pub fn increment(&self) {
        // Single writer; wrapping add via fetch_add is exact.
        self.0.fetch_add(1, Ordering::Release);
    }

    /// Loop side.
    pub fn count(&self) -> u32 {
        self.0.load(Ordering::Acquire)
    }
}

impl Default for TickCounter {
    fn default() -> Self {
        Self::new()
    }
}

/// The complete set of latches shared between interrupt context and the
/// control loop. Lives in a `static` in the embedded build.
pub struct Latches {
    /// Transceiver IRQ fired: a receive (or transmit) event is pending.
    pub radio_ready: EventLatch,
    /// At least one serial byte arrived since the last drain.
    pub serial_ready: EventLatch,
    /// Per-button edge, in wiring order. Wake sources; the debounced
    /// tracker still samples levels every pass.
    pub button_edge: [EventLatch; BUTTON_COUNT],
    /// Periodic tick source.
    pub tick: TickCounter,
}

impl Latches {
    pub const fn new() -> Self {
        Self {
            radio_ready: EventLatch::new(),
            serial_ready: EventLatch::new(),
            button_edge: [EventLatch::new(), EventLatch::new(), EventLatch::new()],
            tick: TickCounter::new(),
        }
    }
}

impl Default for Latches {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latch_take_clears() {
        let l = EventLatch::new();
        assert!(!l.take());
        l.raise();
        assert!(l.is_raised());
        assert!(l.take());
        assert!(!l.take());
    }

    #[test]
    fn latch_raise_coalesces() {
        let l = EventLatch::new();
        l.raise();
        l.raise();
        l.raise();
        assert!(l.take());
        assert!(!l.take());
    }

    #[test]
    fn tick_counter_monotonic_until_wrap() {
        let t = TickCounter::new();
        assert_eq!(t.count(), 0);
        t.increment();
        t.increment();
        assert_eq!(t.count(), 2);
    }
}
