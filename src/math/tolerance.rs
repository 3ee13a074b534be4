use super::{Point2, TOLERANCE};
use crate::error::{ConfigError, Result};

/// Per-call tolerance configuration.
///
/// Every operation defaults to [`TOLERANCE`] and accepts an override through
/// its `with_tolerance` setter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerance {
    epsilon: f64,
}

impl Default for Tolerance {
    fn default() -> Self {
        Self { epsilon: TOLERANCE }
    }
}

impl Tolerance {
    /// Creates a tolerance with the given epsilon.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidTolerance` if `epsilon` is not finite or not positive.
    pub fn new(epsilon: f64) -> Result<Self> {
        if !epsilon.is_finite() || epsilon <= 0.0 {
            return Err(ConfigError::InvalidTolerance(epsilon).into());
        }
        Ok(Self { epsilon })
    }

    /// The distance/value threshold below which two quantities are equal.
    #[must_use]
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Whether two points are the same vertex under this tolerance.
    #[must_use]
    pub fn points_coincident(&self, a: &Point2, b: &Point2) -> bool {
        (a - b).norm_squared() <= self.epsilon * self.epsilon
    }

    /// Whether a scalar is zero under this tolerance.
    #[must_use]
    pub fn is_zero(&self, value: f64) -> bool {
        value.abs() <= self.epsilon
    }
}
