//! Time source used for request timeouts and cache expiry.
//!
//! Embedded targets implement [`Clock`] on top of their tick counter
//! (`millis()`, an `embassy_time::Instant`, a hardware timer). With the `std`
//! feature [`StdClock`] provides a monotonic host implementation.

/// A monotonic millisecond clock with a blocking delay.
///
/// This trait must be implemented by the target platform. `now_ms` must never
/// go backwards; it does not need to relate to wall-clock time.
pub trait Clock {
    /// Milliseconds elapsed since an arbitrary fixed origin.
    fn now_ms(&self) -> u64;

    /// Blocks the caller for roughly `ms` milliseconds.
    fn delay_ms(&mut self, ms: u32);
}

impl<K: Clock + ?Sized> Clock for &mut K {
    fn now_ms(&self) -> u64 {
        (**self).now_ms()
    }

    fn delay_ms(&mut self, ms: u32) {
        (**self).delay_ms(ms)
    }
}

/// [`Clock`] backed by `std::time::Instant` and `std::thread::sleep`.
#[cfg(feature = "std")]
#[derive(Debug, Clone, Copy)]
pub struct StdClock {
    origin: std::time::Instant,
}

#[cfg(feature = "std")]
impl StdClock {
    /// Creates a clock whose origin is the current instant.
    pub fn new() -> Self {
        Self {
            origin: std::time::Instant::now(),
        }
    }
}

#[cfg(feature = "std")]
impl Default for StdClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "std")]
impl Clock for StdClock {
    fn now_ms(&self) -> u64 {
        self.origin.elapsed().as_millis() as u64
    }

    fn delay_ms(&mut self, ms: u32) {
        std::thread::sleep(std::time::Duration::from_millis(u64::from(ms)));
    }
}
