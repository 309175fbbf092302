//! Time handling for reading capture and forecast seeding
//!
//! Readings are stamped in milliseconds since the Unix epoch. The engine
//! itself never consults a wall clock: feature extraction works off the
//! timestamps stored in the series, which keeps assessment and forecasting
//! deterministic for a given input. A [`TimeSource`] is injected only where
//! "now" is genuinely needed (stamping incoming requests, seeding the
//! fallback forecaster) so tests can pin it.

/// Milliseconds since Unix epoch
pub type Timestamp = u64;

/// Milliseconds per second
pub const MS_PER_SECOND: u64 = 1_000;

/// Milliseconds per hour
pub const MS_PER_HOUR: u64 = 3_600_000;

/// Source of current time
///
/// Implementations must be cheap to call; the service queries the source
/// once per request.
pub trait TimeSource {
    /// Current time in milliseconds since epoch
    fn now(&self) -> Timestamp;

    /// Whether this source tracks wall-clock time
    ///
    /// False for fixed or simulated sources, where civil-time features
    /// derived from `now()` are only as meaningful as the configured value.
    fn is_wall_clock(&self) -> bool;

    /// Resolution of this source in milliseconds
    fn precision_ms(&self) -> u32;
}

/// System wall clock
#[cfg(feature = "std")]
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTime;

#[cfg(feature = "std")]
impl TimeSource for SystemTime {
    fn now(&self) -> Timestamp {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or_default()
    }

    fn is_wall_clock(&self) -> bool {
        true
    }

    fn precision_ms(&self) -> u32 {
        1
    }
}

/// Fixed time source for tests and replay
///
/// Reports whatever it was set to; `advance` moves it forward manually.
#[derive(Debug, Clone)]
pub struct FixedTime {
    now: Timestamp,
}

impl FixedTime {
    /// Source pinned at the given time
    pub const fn new(now: Timestamp) -> Self {
        Self { now }
    }

    /// Replace the reported time
    pub fn set(&mut self, now: Timestamp) {
        self.now = now;
    }

    /// Move the reported time forward
    pub fn advance(&mut self, delta_ms: u64) {
        self.now = self.now.saturating_add(delta_ms);
    }
}

impl TimeSource for FixedTime {
    fn now(&self) -> Timestamp {
        self.now
    }

    fn is_wall_clock(&self) -> bool {
        false
    }

    fn precision_ms(&self) -> u32 {
        1
    }
}
