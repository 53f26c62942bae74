//! Player clock time
//!
//! The decoder's own time reporting is unreliable, so the player keeps its
//! own clock: advanced by `delta * rate` once per tick while playing, reset
//! to zero on open and on a loop restart, frozen otherwise. Samples are
//! stamped with this clock, not with decoder time.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Sub};
use std::time::Duration;

/// Playback timestamp in microseconds, owned by the player.
///
/// Signed so that audio delay arithmetic can dip below zero transiently and
/// so a `MIN` sentinel exists for "no previous frame yet".
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct ClockTime(i64);

impl ClockTime {
    /// Start of playback.
    pub const ZERO: ClockTime = ClockTime(0);

    /// Sentinel below any reachable playback time.
    pub const MIN: ClockTime = ClockTime(i64::MIN);

    /// Create from microseconds.
    pub const fn from_micros(micros: i64) -> Self {
        ClockTime(micros)
    }

    /// Create from milliseconds.
    pub const fn from_millis(millis: i64) -> Self {
        ClockTime(millis * 1_000)
    }

    /// Create from whole seconds.
    pub const fn from_secs(secs: i64) -> Self {
        ClockTime(secs * 1_000_000)
    }

    /// Create from fractional seconds.
    pub fn from_secs_f64(secs: f64) -> Self {
        ClockTime((secs * 1_000_000.0) as i64)
    }

    /// Value in microseconds.
    pub const fn as_micros(self) -> i64 {
        self.0
    }

    /// Value in whole milliseconds.
    pub const fn as_millis(self) -> i64 {
        self.0 / 1_000
    }

    /// Value in fractional seconds.
    pub fn as_secs_f64(self) -> f64 {
        self.0 as f64 / 1_000_000.0
    }

    /// Advance by `delta` scaled by the playback rate.
    pub fn advance(self, delta: Duration, rate: f32) -> Self {
        let scaled = delta.as_secs_f64() * f64::from(rate);
        ClockTime(self.0.saturating_add((scaled * 1_000_000.0) as i64))
    }

    /// Offset by a signed number of microseconds, saturating at the bounds.
    pub fn offset_micros(self, delta: i64) -> Self {
        ClockTime(self.0.saturating_add(delta))
    }

    /// Convert to a `Duration`, clamping negative times to zero.
    pub fn to_duration(self) -> Duration {
        if self.0 <= 0 {
            Duration::ZERO
        } else {
            Duration::from_micros(self.0 as u64)
        }
    }
}

impl From<Duration> for ClockTime {
    fn from(duration: Duration) -> Self {
        ClockTime(duration.as_micros() as i64)
    }
}

impl Add for ClockTime {
    type Output = ClockTime;

    fn add(self, rhs: ClockTime) -> ClockTime {
        ClockTime(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for ClockTime {
    fn add_assign(&mut self, rhs: ClockTime) {
        *self = *self + rhs;
    }
}

impl Sub for ClockTime {
    type Output = ClockTime;

    fn sub(self, rhs: ClockTime) -> ClockTime {
        ClockTime(self.0.saturating_sub(rhs.0))
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3}s", self.as_secs_f64())
    }
}
