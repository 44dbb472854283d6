//! Detection model: Gaussian tail probability and OOK bit-error rate.
//!
//! For on-off keying with a threshold detector the error probability is
//! $\mathrm{BER} = Q(\sqrt{2 \cdot \mathrm{SNR}})$ where
//! $Q(x) = \tfrac{1}{2}\operatorname{erfc}(x / \sqrt{2})$.
//!
//! # Complementary error function
//!
//! [`erfc`] is evaluated piecewise so that small tail probabilities keep
//! full relative precision:
//! - $0 \le x < 2$: $1 - \operatorname{erf}(x)$ with the all-positive series
//!   $\operatorname{erf}(x) = \frac{2}{\sqrt\pi} e^{-x^2}
//!   \sum_{n \ge 0} \frac{2^n x^{2n+1}}{(2n+1)!!}$.
//! - $x \ge 2$: Laplace continued fraction evaluated with the modified Lentz
//!   algorithm.
//! - $x < 0$: reflection $\operatorname{erfc}(x) = 2 - \operatorname{erfc}(-x)$.
//!
//! Relative error stays below 1e-12 over $x \in [-5, 15]$.

use std::f64::consts::{FRAC_2_SQRT_PI, PI, SQRT_2};

use crate::error::{require_non_negative, LinkError};

/// Switch-over point between the series and the continued fraction.
const SERIES_LIMIT: f64 = 2.0;

/// Relative size at which the series is truncated.
const SERIES_EPSILON: f64 = 1e-17;

/// Convergence threshold on the Lentz update factor.
const FRACTION_EPSILON: f64 = 1e-16;

/// Upper bound on continued-fraction terms; x = 2 needs about 60.
const MAX_TERMS: usize = 1000;

/// Guard against division by zero inside the Lentz recurrence.
const TINY: f64 = 1e-300;

/// Complementary error function $\operatorname{erfc}(x) = 1 - \operatorname{erf}(x)$.
///
/// Returns NaN for NaN input.
pub fn erfc(x: f64) -> f64 {
    if x.is_nan() {
        return f64::NAN;
    }
    if x < 0.0 {
        2.0 - erfc(-x)
    } else if x < SERIES_LIMIT {
        1.0 - erf_series(x)
    } else {
        erfc_continued_fraction(x)
    }
}

fn erf_series(x: f64) -> f64 {
    let x2 = x * x;
    let mut term = x;
    let mut sum = x;
    let mut n = 0.0;
    while term > sum * SERIES_EPSILON {
        n += 1.0;
        term *= 2.0 * x2 / (2.0 * n + 1.0);
        sum += term;
    }
    FRAC_2_SQRT_PI * (-x2).exp() * sum
}

fn erfc_continued_fraction(x: f64) -> f64 {
    if x > 27.3 {
        // exp(-x²) underflows below the smallest subnormal.
        return 0.0;
    }
    // erfc(x) = e^{-x²}/√π · 1/(x + (1/2)/(x + 1/(x + (3/2)/(x + ...))))
    let mut f = x;
    let mut c = f;
    let mut d = 0.0;
    for n in 1..MAX_TERMS {
        let a = n as f64 / 2.0;
        d = x + a * d;
        if d.abs() < TINY {
            d = TINY;
        }
        d = 1.0 / d;
        c = x + a / c;
        if c.abs() < TINY {
            c = TINY;
        }
        let delta = c * d;
        f *= delta;
        if (delta - 1.0).abs() < FRACTION_EPSILON {
            break;
        }
    }
    (-x * x).exp() / (PI.sqrt() * f)
}

/// Gaussian tail probability $Q(x) = P(Z > x)$ for a standard normal $Z$.
///
/// Accepts any finite `x`; NaN is rejected.
pub fn q_function(x: f64) -> Result<f64, LinkError> {
    if x.is_nan() {
        return Err(LinkError::invalid("x", x, "must not be NaN"));
    }
    Ok(0.5 * erfc(x / SQRT_2))
}

/// Bit-error rate of OOK for a linear SNR.
///
/// Negative SNR is rejected instead of taking the square root of a
/// negative number. `ber_ook(0) == 0.5`.
pub fn ber_ook(snr_linear: f64) -> Result<f64, LinkError> {
    let snr = require_non_negative("snr_linear", snr_linear)?;
    q_function((2.0 * snr).sqrt())
}

/// Convert a ratio in dB to linear scale.
pub fn db_to_linear(db: f64) -> f64 {
    10.0_f64.powf(db / 10.0)
}

/// Convert a linear ratio to dB.
pub fn linear_to_db(linear: f64) -> f64 {
    10.0 * linear.log10()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    #[test]
    fn test_erfc_known_values() {
        let cases = [
            (0.0, 1.0),
            (0.5, 0.479_500_122_186_953_5),
            (1.0, 0.157_299_207_050_285_13),
            (2.0, 0.004_677_734_981_047_265),
            (3.0, 2.209_049_699_858_543_8e-5),
            (5.0, 1.537_459_794_428_035_1e-12),
            (10.0, 2.088_487_583_762_545e-45),
        ];
        for (x, expected) in cases {
            assert_relative_eq!(erfc(x), expected, max_relative = 1e-12);
        }
    }

    #[test]
    fn test_erfc_reflection() {
        for x in [0.3, 1.0, 1.9, 2.1, 4.0] {
            assert_abs_diff_eq!(erfc(-x), 2.0 - erfc(x), epsilon = 1e-15);
        }
        assert_eq!(erfc(40.0), 0.0);
        assert_eq!(erfc(-40.0), 2.0);
    }

    #[test]
    fn test_erfc_continuous_at_switch_over() {
        let below = erfc(SERIES_LIMIT - 1e-12);
        let above = erfc(SERIES_LIMIT);
        assert_relative_eq!(below, above, max_relative = 1e-10);
    }

    #[test]
    fn test_q_function_known_values() {
        assert_eq!(q_function(0.0).unwrap(), 0.5);
        assert_relative_eq!(q_function(1.0).unwrap(), 0.158_655_253_931_457_07, max_relative = 1e-12);
        assert_relative_eq!(q_function(3.0).unwrap(), 1.349_898_031_630_095e-3, max_relative = 1e-12);
        assert_relative_eq!(q_function(6.0).unwrap(), 9.865_876_450_377e-10, max_relative = 1e-11);
    }

    #[test]
    fn test_q_function_rejects_nan() {
        assert!(q_function(f64::NAN).is_err());
    }

    #[test]
    fn test_ber_at_zero_snr() {
        assert_eq!(ber_ook(0.0).unwrap(), 0.5);
    }

    #[test]
    fn test_ber_rejects_negative_snr() {
        assert!(matches!(
            ber_ook(-0.5),
            Err(LinkError::InvalidParameter { name: "snr_linear", .. })
        ));
    }

    #[test]
    fn test_ber_reference_table() {
        // OOK BER at -2..=7 dB.
        let expected = [
            0.130_644_488_522_829_23,
            0.103_759_095_953_406_34,
            0.078_649_603_525_142_57,
            0.056_281_951_976_541_456,
            0.037_506_128_358_925_98,
            0.022_878_407_561_085_34,
            0.012_500_818_040_737_563,
            0.005_953_867_147_778_661,
            0.002_388_290_780_932_807_5,
            0.000_772_674_815_378_444_4,
        ];
        for (i, want) in expected.iter().enumerate() {
            let snr_db = -2.0 + i as f64;
            let ber = ber_ook(db_to_linear(snr_db)).unwrap();
            assert_relative_eq!(ber, *want, max_relative = 1e-11);
        }
    }

    #[test]
    fn test_db_round_trip() {
        assert_relative_eq!(db_to_linear(10.0), 10.0, max_relative = 1e-15);
        assert_relative_eq!(linear_to_db(db_to_linear(-3.5)), -3.5, max_relative = 1e-12);
    }
}
