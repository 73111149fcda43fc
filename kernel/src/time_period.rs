//! Time Period

use crate::common::*;

/// A closed interval of simulated time, e.g. the time a camera shutter is
/// open.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct TimePeriod {
    /// Opening time.
    pub begin: Float,

    /// Closing time.
    pub end: Float,
}

impl TimePeriod {
    /// Create a new `TimePeriod`.
    ///
    /// * `begin` - Opening time.
    /// * `end`   - Closing time.
    pub fn new(begin: Float, end: Float) -> Self {
        Self { begin, end }
    }

    /// Returns the period shifted to start relative to `time`.
    ///
    /// * `time` - Time offset.
    pub fn offset(&self, time: Float) -> Self {
        Self::new(time + self.begin, time + self.end)
    }

    /// Returns the length of the period.
    pub fn duration(&self) -> Float {
        self.end - self.begin
    }

    /// Map a parameter in `[0, 1]` onto the period.
    ///
    /// * `tau` - The parameter.
    pub fn interpolate(&self, tau: Float) -> Float {
        lerp(tau, self.begin, self.end)
    }
}
