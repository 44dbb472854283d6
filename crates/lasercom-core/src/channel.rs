//! Free-space channel: path loss and received power.
//!
//! The free-space path loss (FSPL) between isotropic apertures is
//! $L = \left(\frac{4 \pi d f}{c}\right)^2$. Received power is $P_r = P_t / L$.
//! Functions without a `_with` suffix run against [`SPEED_OF_LIGHT`].

use std::f64::consts::PI;

use crate::constants::SPEED_OF_LIGHT;
use crate::error::{require_positive, LinkError};

/// Free-space path loss factor (dimensionless, ≥ 1) using the exact speed of
/// light.
///
/// # Arguments
/// * `distance_m` - Link range (m), strictly positive.
/// * `frequency_hz` - Carrier frequency (Hz), strictly positive.
pub fn free_space_path_loss(distance_m: f64, frequency_hz: f64) -> Result<f64, LinkError> {
    free_space_path_loss_with(distance_m, frequency_hz, SPEED_OF_LIGHT)
}

/// Free-space path loss factor against an explicit speed of light.
///
/// A zero range is a division edge case and reported as
/// [`LinkError::NumericalDomain`]. Ranges so short that the factor drops
/// below one (inside roughly λ/4π) are outside the far-field model and are
/// rejected the same way.
pub fn free_space_path_loss_with(
    distance_m: f64,
    frequency_hz: f64,
    speed_of_light: f64,
) -> Result<f64, LinkError> {
    if distance_m == 0.0 {
        return Err(LinkError::NumericalDomain(
            "path loss is undefined at zero range".into(),
        ));
    }
    let d = require_positive("distance", distance_m)?;
    let f = require_positive("frequency", frequency_hz)?;
    let c = require_positive("speed_of_light", speed_of_light)?;

    let amplitude = 4.0 * PI * d * f / c;
    let loss = amplitude * amplitude;
    if !loss.is_finite() {
        return Err(LinkError::NumericalDomain(format!(
            "path loss overflows at d={d:e} m, f={f:e} Hz"
        )));
    }
    if loss < 1.0 {
        return Err(LinkError::NumericalDomain(format!(
            "range {d:e} m is inside the far-field limit (L={loss:e} < 1)"
        )));
    }
    Ok(loss)
}

/// Received optical power $P_r = P_t / L(d, f)$ (W) using the exact speed of
/// light.
pub fn received_power(
    tx_power_w: f64,
    distance_m: f64,
    frequency_hz: f64,
) -> Result<f64, LinkError> {
    received_power_with(tx_power_w, distance_m, frequency_hz, SPEED_OF_LIGHT)
}

/// Received optical power against an explicit speed of light.
pub fn received_power_with(
    tx_power_w: f64,
    distance_m: f64,
    frequency_hz: f64,
    speed_of_light: f64,
) -> Result<f64, LinkError> {
    let pt = require_positive("tx_power", tx_power_w)?;
    let loss = free_space_path_loss_with(distance_m, frequency_hz, speed_of_light)?;
    let pr = pt / loss;
    if pr <= 0.0 {
        return Err(LinkError::NumericalDomain(format!(
            "received power underflows (Pt={pt:e} W, L={loss:e})"
        )));
    }
    Ok(pr)
}

/// Path loss factor expressed in dB.
pub fn path_loss_db(loss: f64) -> f64 {
    10.0 * loss.log10()
}

/// Convert a power in watts to dBm.
pub fn watts_to_dbm(power_w: f64) -> f64 {
    10.0 * (power_w * 1e3).log10()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{carrier_frequency, REFERENCE_WAVELENGTH, SPEED_OF_LIGHT_REFERENCE};
    use approx::assert_relative_eq;

    fn reference_frequency() -> f64 {
        carrier_frequency(REFERENCE_WAVELENGTH, SPEED_OF_LIGHT).unwrap()
    }

    #[test]
    fn test_fspl_reduces_to_wavelength_form() {
        // With f = c/λ the loss is (4πd/λ)², independent of c.
        let d = 400e3;
        let loss = free_space_path_loss(d, reference_frequency()).unwrap();
        let expected = (4.0 * PI * d / REFERENCE_WAVELENGTH).powi(2);
        assert_relative_eq!(loss, expected, max_relative = 1e-12);
    }

    #[test]
    fn test_fspl_200km_in_db() {
        let loss = free_space_path_loss(200e3, reference_frequency()).unwrap();
        assert!((path_loss_db(loss) - 244.198).abs() < 1e-3);
    }

    #[test]
    fn test_mixed_constants_shift_loss() {
        // Frequency from 3e8 but loss against the exact c: ~0.14% high.
        let f_ref = carrier_frequency(REFERENCE_WAVELENGTH, SPEED_OF_LIGHT_REFERENCE).unwrap();
        let exact = free_space_path_loss(200e3, reference_frequency()).unwrap();
        let mixed = free_space_path_loss(200e3, f_ref).unwrap();
        let shift = mixed / exact - 1.0;
        assert!(shift > 1.3e-3 && shift < 1.5e-3, "shift = {shift}");
    }

    #[test]
    fn test_zero_distance_is_domain_error() {
        assert!(matches!(
            free_space_path_loss(0.0, reference_frequency()),
            Err(LinkError::NumericalDomain(_))
        ));
        assert!(matches!(
            received_power(0.2, 0.0, reference_frequency()),
            Err(LinkError::NumericalDomain(_))
        ));
    }

    #[test]
    fn test_negative_distance_is_invalid() {
        assert!(matches!(
            free_space_path_loss(-1.0, reference_frequency()),
            Err(LinkError::InvalidParameter { name: "distance", .. })
        ));
    }

    #[test]
    fn test_sub_wavelength_range_rejected() {
        assert!(matches!(
            free_space_path_loss(1e-8, reference_frequency()),
            Err(LinkError::NumericalDomain(_))
        ));
    }

    #[test]
    fn test_received_power_rejects_non_positive_power() {
        assert!(received_power(0.0, 200e3, reference_frequency()).is_err());
        assert!(received_power(-0.1, 200e3, reference_frequency()).is_err());
        assert!(received_power(f64::NAN, 200e3, reference_frequency()).is_err());
    }

    #[test]
    fn test_watts_to_dbm() {
        assert_relative_eq!(watts_to_dbm(1.0), 30.0, max_relative = 1e-12);
        assert_relative_eq!(watts_to_dbm(0.2), 23.010_299_956_639_813, max_relative = 1e-12);
    }
}
