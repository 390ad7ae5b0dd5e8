//! Microsecond timestamp source.
//!
//! The hooks read a free-running 32-bit microsecond counter once per steering
//! angle report. The counter wraps roughly every 71.6 minutes; elapsed time is
//! always computed with modular subtraction, so a single wrap between two
//! readings is harmless.

use portable_atomic::{AtomicU32, Ordering};

/// A monotonically increasing, wrapping 32-bit microsecond counter.
///
/// # Real-Time Safety
///
/// `now_us` is called from the rx hook and must not block or allocate.
pub trait TimerSource {
    /// Current counter value in microseconds.
    fn now_us(&self) -> u32;
}

impl<T: TimerSource + ?Sized> TimerSource for &T {
    fn now_us(&self) -> u32 {
        (**self).now_us()
    }
}

/// Microseconds elapsed from `since` to `now`, modulo 2^32.
#[inline]
#[must_use]
pub const fn elapsed_us(now: u32, since: u32) -> u32 {
    now.wrapping_sub(since)
}

/// A timer advanced by hand.
///
/// Used for tests, benchmarks, and log replay where the clock comes from the
/// recorded timestamps. All methods take `&self` so a timer can be shared with
/// the hooks that read it.
#[derive(Debug, Default)]
pub struct ManualTimer {
    now_us: AtomicU32,
}

impl ManualTimer {
    /// Create a timer reading `start_us`.
    #[must_use]
    pub const fn new(start_us: u32) -> Self {
        Self {
            now_us: AtomicU32::new(start_us),
        }
    }

    /// Set the counter to an absolute value.
    pub fn set(&self, us: u32) {
        self.now_us.store(us, Ordering::Release);
    }

    /// Advance the counter by `us`, wrapping at 2^32.
    pub fn advance_us(&self, us: u32) {
        self.now_us.fetch_add(us, Ordering::AcqRel);
    }

    /// Advance the counter by `ms` milliseconds, wrapping at 2^32.
    pub fn advance_ms(&self, ms: u32) {
        self.advance_us(ms.wrapping_mul(1000));
    }
}

impl TimerSource for ManualTimer {
    fn now_us(&self) -> u32 {
        self.now_us.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_elapsed_without_wrap() {
        assert_eq!(elapsed_us(1_250_000, 1_000_000), 250_000);
    }

    #[test]
    fn test_elapsed_across_wrap() {
        assert_eq!(elapsed_us(100, u32::MAX - 99), 200);
    }

    #[test]
    fn test_manual_timer_advances_and_wraps() {
        let timer = ManualTimer::new(u32::MAX - 10);
        timer.advance_us(20);
        assert_eq!(timer.now_us(), 9);
        timer.advance_ms(2);
        assert_eq!(timer.now_us(), 2_009);
        timer.set(42);
        assert_eq!(timer.now_us(), 42);
    }

    #[test]
    fn test_timer_by_reference() {
        let timer = ManualTimer::new(7);
        let by_ref: &dyn TimerSource = &timer;
        assert_eq!(by_ref.now_us(), 7);
    }
}
