//! Cooperative yield seam
//!
//! The firmware runs on a single-threaded cooperative runtime: long blocking
//! sequences (vendor bring-up, startup color flashes, bounded GIF waits) must
//! periodically cede control so the runtime can service network and timer
//! interrupts without a watchdog reset. [`YieldNow`] is that seam, made
//! explicit so the yield points are visible in the bring-up code and testable
//! with a counting mock.

/// A cooperative scheduler yield point.
///
/// Implementations hand control back to the runtime for one scheduling slot.
/// On hosted targets or in tests this can be a no-op ([`NoopYield`]).
pub trait YieldNow {
    /// Yield once to the runtime.
    fn yield_now(&mut self);
}

/// Yield implementation that does nothing.
///
/// Suitable for tests and for targets where blocking the single thread is
/// acceptable.
pub struct NoopYield;

impl YieldNow for NoopYield {
    fn yield_now(&mut self) {}
}
