//! Linear unit conversion between the host's native unit and millimeters.
//!
//! The conversion is symmetric: the encoder multiplies every coordinate,
//! vector component and radius by the scale on the way out, and the decoder
//! divides by the same scale on the way in. Both pipelines must therefore be
//! configured with the same selector for a round trip to be lossless.

/// Millimeters per native host unit (the host works in feet internally).
const MM_PER_UNIT: f64 = 304.8;

/// Output unit selector for interchange documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Units {
    /// Native host units, written unscaled.
    #[default]
    Native,
    /// Millimeters.
    Millimeters,
}

impl Units {
    /// Linear scale applied to every scalar on encode.
    #[must_use]
    pub fn scale(self) -> f64 {
        match self {
            Units::Native => 1.0,
            Units::Millimeters => MM_PER_UNIT,
        }
    }

    /// Converts a native-unit scalar to the wire unit.
    #[must_use]
    pub fn to_wire(self, value: f64) -> f64 {
        value * self.scale()
    }

    /// Converts a wire-unit scalar back to native units.
    #[must_use]
    pub fn from_wire(self, value: f64) -> f64 {
        value / self.scale()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn native_is_identity() {
        assert!((Units::Native.to_wire(2.5) - 2.5).abs() < f64::EPSILON);
        assert!((Units::Native.from_wire(2.5) - 2.5).abs() < f64::EPSILON);
    }

    #[test]
    fn millimeters_round_trip() {
        let u = Units::Millimeters;
        assert_relative_eq!(u.to_wire(1.0), 304.8, epsilon = 1e-12);
        assert_relative_eq!(u.from_wire(u.to_wire(12.34)), 12.34, epsilon = 1e-12);
    }
}
