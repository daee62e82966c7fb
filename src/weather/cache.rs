//! Single-slot, time-boxed memo of the last current-weather result.

/// Coordinates closer than this (in degrees, about 1 km) share a cache entry.
pub const CACHE_TOLERANCE_DEG: f32 = 0.01;

/// Coordinates are compared in steps of 0.0001°, the precision they are
/// sent with, so that `0.01` apart is a miss regardless of `f32` rounding.
const STEPS_PER_DEG: f32 = 10_000.0;
const TOLERANCE_STEPS: u32 = 100;

fn steps(deg: f32) -> i32 {
    let scaled = deg * STEPS_PER_DEG;
    if scaled < 0.0 {
        (scaled - 0.5) as i32
    } else {
        (scaled + 0.5) as i32
    }
}

fn near(a: i32, b: i32) -> bool {
    a.abs_diff(b) < TOLERANCE_STEPS
}

#[derive(Debug, Clone)]
struct Entry<T> {
    lat: i32,
    lon: i32,
    stored_at_ms: u64,
    value: T,
}

/// Holds at most one value tagged with the coordinates and time it was
/// fetched for.
///
/// A lookup hits only while the entry is younger than the configured
/// duration and both coordinates are within [`CACHE_TOLERANCE_DEG`]. A
/// duration of `0` disables the cache entirely.
#[derive(Debug, Clone)]
pub struct WeatherCache<T> {
    duration_ms: u32,
    entry: Option<Entry<T>>,
}

impl<T> WeatherCache<T> {
    /// Creates an empty cache.
    pub const fn new(duration_ms: u32) -> Self {
        Self {
            duration_ms,
            entry: None,
        }
    }

    /// Current entry lifetime in milliseconds.
    pub fn duration_ms(&self) -> u32 {
        self.duration_ms
    }

    /// Changes the entry lifetime; `0` also drops the stored entry.
    pub fn set_duration(&mut self, duration_ms: u32) {
        self.duration_ms = duration_ms;
        if duration_ms == 0 {
            self.entry = None;
        }
    }

    /// Returns the stored value if it is fresh and was fetched for (nearly)
    /// the same coordinates.
    pub fn lookup(&self, lat: f32, lon: f32, now_ms: u64) -> Option<&T> {
        if self.duration_ms == 0 {
            return None;
        }
        let entry = self.entry.as_ref()?;
        let age = now_ms.saturating_sub(entry.stored_at_ms);
        let fresh = age < u64::from(self.duration_ms);
        let close = near(steps(lat), entry.lat) && near(steps(lon), entry.lon);
        (fresh && close).then_some(&entry.value)
    }

    /// Replaces the stored entry. Does nothing while the cache is disabled.
    pub fn store(&mut self, lat: f32, lon: f32, now_ms: u64, value: T) {
        if self.duration_ms == 0 {
            return;
        }
        self.entry = Some(Entry {
            lat: steps(lat),
            lon: steps(lon),
            stored_at_ms: now_ms,
            value,
        });
    }

    /// Drops the stored entry.
    pub fn clear(&mut self) {
        self.entry = None;
    }

    /// Whether an entry is stored, fresh or not.
    pub fn is_empty(&self) -> bool {
        self.entry.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hit_within_duration_and_tolerance() {
        let mut cache = WeatherCache::new(60_000);
        cache.store(51.5085, -0.1257, 1_000, 7u32);

        assert_eq!(cache.lookup(51.5085, -0.1257, 1_000), Some(&7));
        assert_eq!(cache.lookup(51.5120, -0.1230, 60_999), Some(&7));
    }

    #[test]
    fn miss_once_expired() {
        let mut cache = WeatherCache::new(60_000);
        cache.store(10.0, 20.0, 1_000, 1u8);
        assert_eq!(cache.lookup(10.0, 20.0, 61_000), None);
        assert_eq!(cache.lookup(10.0, 20.0, 120_000), None);
    }

    #[test]
    fn miss_when_coordinates_differ() {
        let mut cache = WeatherCache::new(60_000);
        cache.store(10.0, 20.0, 0, 1u8);
        assert_eq!(cache.lookup(10.02, 20.0, 10), None);
        assert_eq!(cache.lookup(10.0, 19.98, 10), None);
        assert_eq!(cache.lookup(-10.0, 20.0, 10), None);
    }

    #[test]
    fn exactly_one_hundredth_apart_is_a_miss() {
        let mut cache = WeatherCache::new(60_000);
        cache.store(51.50, -0.12, 0, 1u8);
        assert_eq!(cache.lookup(51.51, -0.12, 10), None);
        assert_eq!(cache.lookup(51.49, -0.12, 10), None);
        assert_eq!(cache.lookup(51.50, -0.13, 10), None);
        assert_eq!(cache.lookup(51.50, -0.11, 10), None);
        assert_eq!(cache.lookup(51.5099, -0.1101, 10), Some(&1));
    }

    #[test]
    fn zero_duration_disables() {
        let mut cache = WeatherCache::new(0);
        cache.store(10.0, 20.0, 0, 1u8);
        assert!(cache.is_empty());
        assert_eq!(cache.lookup(10.0, 20.0, 0), None);

        let mut cache = WeatherCache::new(1_000);
        cache.store(10.0, 20.0, 0, 1u8);
        cache.set_duration(0);
        assert_eq!(cache.lookup(10.0, 20.0, 0), None);
    }

    #[test]
    fn store_overwrites_the_slot() {
        let mut cache = WeatherCache::new(1_000);
        cache.store(10.0, 20.0, 0, 1u8);
        cache.store(30.0, 40.0, 5, 2u8);
        assert_eq!(cache.lookup(10.0, 20.0, 10), None);
        assert_eq!(cache.lookup(30.0, 40.0, 10), Some(&2));
    }

    #[test]
    fn clock_going_backwards_counts_as_fresh() {
        let mut cache = WeatherCache::new(1_000);
        cache.store(10.0, 20.0, 500, 1u8);
        assert_eq!(cache.lookup(10.0, 20.0, 100), Some(&1));
    }
}
