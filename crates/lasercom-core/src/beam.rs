//! Gaussian-beam optics for the transmit telescope.
//!
//! A TEM₀₀ beam launched with waist $w_0$ spreads as
//! $w(z) = w_0 \sqrt{1 + (z / z_R)^2}$ with Rayleigh range
//! $z_R = \pi w_0^2 / \lambda$. Far from the waist the radius grows linearly
//! with the divergence half-angle $\theta = \lambda / (\pi w_0)$.
//!
//! # Reference
//! Saleh & Teich, *Fundamentals of Photonics*, ch. 3.

use std::f64::consts::PI;

use crate::error::{require_non_negative, require_positive, LinkError};

/// Far-field divergence half-angle $\theta = \lambda / (\pi w_0)$ (radians).
///
/// A zero waist is rejected rather than mapped to an infinite angle.
pub fn divergence(w0: f64, wavelength: f64) -> Result<f64, LinkError> {
    let w0 = require_positive("w0", w0)?;
    let wavelength = require_positive("wavelength", wavelength)?;
    Ok(wavelength / (PI * w0))
}

/// Rayleigh range $z_R = \pi w_0^2 / \lambda$ (m).
pub fn rayleigh_range(w0: f64, wavelength: f64) -> Result<f64, LinkError> {
    let w0 = require_positive("w0", w0)?;
    let wavelength = require_positive("wavelength", wavelength)?;
    Ok(PI * w0 * w0 / wavelength)
}

/// Beam radius $w(z)$ after propagating a distance `z` from the waist (m).
///
/// $w(z) = w_0 \sqrt{1 + \left(\frac{\lambda z}{\pi w_0^2}\right)^2}$
///
/// # Arguments
/// * `w0` - Beam waist radius (m), strictly positive.
/// * `z` - Propagation distance (m), non-negative.
/// * `wavelength` - Optical wavelength (m), strictly positive.
pub fn spread(w0: f64, z: f64, wavelength: f64) -> Result<f64, LinkError> {
    let z = require_non_negative("z", z)?;
    let z_r = rayleigh_range(w0, wavelength)?;
    // hypot keeps (z / z_R)² from overflowing at very long ranges.
    Ok(w0 * 1.0_f64.hypot(z / z_r))
}

/// Far-field estimate of the beam radius from the divergence angle.
///
/// $w(z) \approx w_0 \sqrt{1 + (z \tan\theta / w_0)^2}$, which converges to
/// [`spread`] once $z \gg z_R$.
pub fn far_field_spread(w0: f64, z: f64, wavelength: f64) -> Result<f64, LinkError> {
    let z = require_non_negative("z", z)?;
    let theta = divergence(w0, wavelength)?;
    Ok(w0 * 1.0_f64.hypot(z * theta.tan() / w0))
}

/// On-axis intensity at distance `z` for a beam launched with peak
/// intensity `i0`.
///
/// $I(z) = I_0 \left(\frac{w_0}{w(z)}\right)^2$
///
/// The result is never larger than `i0`.
pub fn intensity(w0: f64, z: f64, i0: f64, wavelength: f64) -> Result<f64, LinkError> {
    let i0 = require_non_negative("i0", i0)?;
    let wz = spread(w0, z, wavelength)?;
    let ratio = w0 / wz;
    Ok(i0 * ratio * ratio)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const LAMBDA: f64 = 1550e-9;

    #[test]
    fn test_divergence_known_value() {
        // 5 cm waist at 1550 nm: θ = 1550e-9 / (π · 0.05) ≈ 9.868 µrad
        let theta = divergence(0.05, LAMBDA).unwrap();
        assert_relative_eq!(theta, 9.867_606_471_697_512e-6, max_relative = 1e-12);
    }

    #[test]
    fn test_divergence_rejects_zero_waist() {
        assert!(matches!(
            divergence(0.0, LAMBDA),
            Err(LinkError::InvalidParameter { name: "w0", .. })
        ));
    }

    #[test]
    fn test_spread_at_waist_is_w0() {
        assert_eq!(spread(0.02, 0.0, LAMBDA).unwrap(), 0.02);
    }

    #[test]
    fn test_spread_at_rayleigh_range() {
        let w0 = 0.01;
        let z_r = rayleigh_range(w0, LAMBDA).unwrap();
        let w = spread(w0, z_r, LAMBDA).unwrap();
        assert_relative_eq!(w, w0 * std::f64::consts::SQRT_2, max_relative = 1e-12);
    }

    #[test]
    fn test_spread_rejects_negative_distance() {
        assert!(spread(0.01, -1.0, LAMBDA).is_err());
    }

    #[test]
    fn test_intensity_falls_with_distance() {
        let near = intensity(0.05, 1e3, 1.0, LAMBDA).unwrap();
        let far = intensity(0.05, 1e6, 1.0, LAMBDA).unwrap();
        assert!(near <= 1.0);
        assert!(far < near);
        assert_eq!(intensity(0.05, 0.0, 2.5, LAMBDA).unwrap(), 2.5);
    }

    #[test]
    fn test_intensity_rejects_negative_peak() {
        assert!(intensity(0.05, 10.0, -1.0, LAMBDA).is_err());
    }

    #[test]
    fn test_far_field_matches_exact_spread() {
        let w0 = 0.05;
        let z = 1e6;
        let exact = spread(w0, z, LAMBDA).unwrap();
        let approx = far_field_spread(w0, z, LAMBDA).unwrap();
        assert_relative_eq!(exact, approx, max_relative = 1e-9);
    }
}
