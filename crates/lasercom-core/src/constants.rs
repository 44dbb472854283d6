//! Physical constants and reference link parameters.
//!
//! All computations standardise on the exact SI speed of light. The rounded
//! value 3×10⁸ m/s is kept as [`SpeedOfLight::Reference`] so historical
//! results can be reproduced; it shifts the carrier frequency by about 0.07%.

use serde::{Deserialize, Serialize};

use crate::error::{require_positive, LinkError};

/// Speed of light in vacuum (m/s), exact by SI definition.
pub const SPEED_OF_LIGHT: f64 = 299_792_458.0;

/// Rounded speed of light (m/s) used by early link-budget worksheets.
pub const SPEED_OF_LIGHT_REFERENCE: f64 = 3.0e8;

/// Reference optical carrier wavelength (m): 1550 nm telecom C-band.
pub const REFERENCE_WAVELENGTH: f64 = 1550e-9;

/// Reference relay ranges (m).
pub const REFERENCE_DISTANCES: [f64; 5] = [200e3, 400e3, 600e3, 800e3, 1000e3];

/// Transmit power used for the reference BER scan (W).
pub const REFERENCE_BER_TX_POWER: f64 = 0.2;

/// Which value of the speed of light a computation runs against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpeedOfLight {
    /// 299 792 458 m/s.
    #[default]
    Exact,
    /// 3×10⁸ m/s.
    Reference,
}

impl SpeedOfLight {
    pub fn value(self) -> f64 {
        match self {
            SpeedOfLight::Exact => SPEED_OF_LIGHT,
            SpeedOfLight::Reference => SPEED_OF_LIGHT_REFERENCE,
        }
    }

    /// Relative bias of this constant against the exact value.
    pub fn relative_bias(self) -> f64 {
        (self.value() - SPEED_OF_LIGHT) / SPEED_OF_LIGHT
    }
}

/// Carrier frequency $f = c / \lambda$ (Hz).
///
/// # Arguments
/// * `wavelength_m` - Optical wavelength (m), strictly positive.
/// * `speed_of_light` - Propagation speed (m/s), strictly positive.
pub fn carrier_frequency(wavelength_m: f64, speed_of_light: f64) -> Result<f64, LinkError> {
    let wavelength = require_positive("wavelength", wavelength_m)?;
    let c = require_positive("speed_of_light", speed_of_light)?;
    Ok(c / wavelength)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_reference_carrier_frequency() {
        let f = carrier_frequency(REFERENCE_WAVELENGTH, SPEED_OF_LIGHT).unwrap();
        assert_relative_eq!(f, 1.934_144_890_322_581e14, max_relative = 1e-12);
        assert!((f - 1.935e14).abs() / 1.935e14 < 1e-3);
    }

    #[test]
    fn test_reference_constant_bias() {
        let bias = SpeedOfLight::Reference.relative_bias();
        assert!(bias > 6.9e-4 && bias < 7.0e-4, "bias = {bias}");
        assert_eq!(SpeedOfLight::Exact.relative_bias(), 0.0);
    }

    #[test]
    fn test_zero_wavelength_rejected() {
        assert!(matches!(
            carrier_frequency(0.0, SPEED_OF_LIGHT),
            Err(LinkError::InvalidParameter { name: "wavelength", .. })
        ));
    }

    #[test]
    fn test_speed_of_light_serde_names() {
        let exact: SpeedOfLight = serde_json::from_str("\"exact\"").unwrap();
        let reference: SpeedOfLight = serde_json::from_str("\"reference\"").unwrap();
        assert_eq!(exact, SpeedOfLight::Exact);
        assert_eq!(reference, SpeedOfLight::Reference);
    }
}
