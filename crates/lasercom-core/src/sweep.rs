//! Parameter sweeps over the channel and detection models.
//!
//! A [`SweepPlan`] bundles the link geometry with the transmit-power and SNR
//! grids. [`evaluate`] walks every combination and collects the results into
//! a [`LinkReport`]. A combination that fails validation is recorded as a
//! [`SkippedPoint`] and the sweep continues.

use crate::beam;
use crate::channel;
use crate::constants::{
    carrier_frequency, SpeedOfLight, REFERENCE_BER_TX_POWER, REFERENCE_DISTANCES,
    REFERENCE_WAVELENGTH,
};
use crate::detection::{ber_ook, db_to_linear};
use crate::error::{require_positive, LinkError};
use crate::types::{
    BeamPoint, BeamProfile, BerPoint, BerSeries, LinkReport, PowerPoint, PowerSeries,
    SkippedPoint,
};

/// Hard cap on the number of points in a single range.
pub const MAX_POINTS: usize = 1_000_000;

/// An inclusive, evenly spaced grid `start, start + step, ..., stop`.
///
/// `stop` is included when it lies on the grid to within 1e-9 of a step, so
/// decimal steps such as 0.01 do not lose their last point to rounding.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepRange {
    start: f64,
    stop: f64,
    step: f64,
}

impl SweepRange {
    pub fn new(start: f64, stop: f64, step: f64) -> Result<Self, LinkError> {
        if !start.is_finite() {
            return Err(LinkError::invalid("start", start, "must be finite"));
        }
        if !stop.is_finite() {
            return Err(LinkError::invalid("stop", stop, "must be finite"));
        }
        let step = require_positive("step", step)?;
        if stop < start {
            return Err(LinkError::invalid("stop", stop, "must not be below start"));
        }
        if (stop - start) / step >= MAX_POINTS as f64 {
            return Err(LinkError::invalid("step", step, "produces too many sweep points"));
        }
        Ok(Self { start, stop, step })
    }

    /// Transmit powers 0.1 W to 1.0 W in 10 mW steps.
    pub fn reference_tx_power() -> Self {
        Self { start: 0.1, stop: 1.0, step: 0.01 }
    }

    /// SNR from −2 dB to 7 dB in 1 dB steps.
    pub fn reference_snr_db() -> Self {
        Self { start: -2.0, stop: 7.0, step: 1.0 }
    }

    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn stop(&self) -> f64 {
        self.stop
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    /// Number of grid points.
    pub fn len(&self) -> usize {
        let span = (self.stop - self.start) / self.step;
        (span + 1e-9).floor() as usize + 1
    }

    /// Always false: a valid range holds at least `start`.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Grid values in ascending order.
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        (0..self.len()).map(move |i| self.start + i as f64 * self.step)
    }
}

/// Fixed link geometry shared by every sweep.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkParams {
    /// Optical wavelength (m).
    pub wavelength_m: f64,
    /// Speed of light used for the carrier frequency and the path loss.
    pub speed_of_light: SpeedOfLight,
    /// Link ranges (m), evaluated in this order.
    pub distances_m: Vec<f64>,
}

impl Default for LinkParams {
    fn default() -> Self {
        Self {
            wavelength_m: REFERENCE_WAVELENGTH,
            speed_of_light: SpeedOfLight::Exact,
            distances_m: REFERENCE_DISTANCES.to_vec(),
        }
    }
}

impl LinkParams {
    /// Carrier frequency c/λ for this link.
    pub fn frequency(&self) -> Result<f64, LinkError> {
        carrier_frequency(self.wavelength_m, self.speed_of_light.value())
    }
}

/// SNR scan at a fixed transmit power.
#[derive(Debug, Clone, PartialEq)]
pub struct BerScan {
    pub snr_db: SweepRange,
    pub tx_power_w: f64,
}

impl Default for BerScan {
    fn default() -> Self {
        Self {
            snr_db: SweepRange::reference_snr_db(),
            tx_power_w: REFERENCE_BER_TX_POWER,
        }
    }
}

/// Transmit beam for the footprint table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BeamSpec {
    /// Waist radius at the transmitter (m).
    pub waist_m: f64,
    /// Peak intensity at the waist (W/m²).
    pub peak_intensity: f64,
}

/// Everything one sweep run evaluates.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepPlan {
    pub link: LinkParams,
    pub tx_power: SweepRange,
    pub ber: BerScan,
    pub beam: Option<BeamSpec>,
}

impl Default for SweepPlan {
    fn default() -> Self {
        Self {
            link: LinkParams::default(),
            tx_power: SweepRange::reference_tx_power(),
            ber: BerScan::default(),
            beam: None,
        }
    }
}

fn skipped(sweep: &str, distance_m: f64, parameter: Option<f64>, err: &LinkError) -> SkippedPoint {
    log::debug!("skipping {sweep} point at d={distance_m} m: {err}");
    SkippedPoint {
        sweep: sweep.to_string(),
        distance_m,
        parameter,
        reason: err.to_string(),
    }
}

/// Received power over the transmit-power grid, one series per distance.
///
/// A distance whose path loss cannot be evaluated is skipped as a whole.
pub fn power_sweep(
    link: &LinkParams,
    tx_power: &SweepRange,
) -> Result<(Vec<PowerSeries>, Vec<SkippedPoint>), LinkError> {
    let frequency = link.frequency()?;
    let c = link.speed_of_light.value();
    let mut series = Vec::with_capacity(link.distances_m.len());
    let mut skips = Vec::new();

    for &d in &link.distances_m {
        let path_loss = match channel::free_space_path_loss_with(d, frequency, c) {
            Ok(loss) => loss,
            Err(e) => {
                skips.push(skipped("power", d, None, &e));
                continue;
            }
        };

        let mut points = Vec::with_capacity(tx_power.len());
        for pt in tx_power.values() {
            match channel::received_power_with(pt, d, frequency, c) {
                Ok(pr) => points.push(PowerPoint { tx_power_w: pt, rx_power_w: pr }),
                Err(e) => skips.push(skipped("power", d, Some(pt), &e)),
            }
        }
        series.push(PowerSeries { distance_m: d, path_loss, points });
    }

    Ok((series, skips))
}

/// OOK bit-error rate over the SNR grid, one series per distance.
///
/// The BER depends only on the swept SNR. The received power at each range
/// is kept so the implied noise power `Pr / SNR` can be reported.
pub fn ber_sweep(
    link: &LinkParams,
    scan: &BerScan,
) -> Result<(Vec<BerSeries>, Vec<SkippedPoint>), LinkError> {
    let frequency = link.frequency()?;
    let c = link.speed_of_light.value();
    let mut series = Vec::with_capacity(link.distances_m.len());
    let mut skips = Vec::new();

    for &d in &link.distances_m {
        let pr = match channel::received_power_with(scan.tx_power_w, d, frequency, c) {
            Ok(pr) => pr,
            Err(e) => {
                skips.push(skipped("ber", d, None, &e));
                continue;
            }
        };

        let mut points = Vec::with_capacity(scan.snr_db.len());
        for snr_db in scan.snr_db.values() {
            let snr_linear = db_to_linear(snr_db);
            let row = ber_ook(snr_linear).and_then(|ber| {
                let noise_power_w = pr / snr_linear;
                if !(snr_linear > 0.0 && noise_power_w.is_finite()) {
                    return Err(LinkError::NumericalDomain(format!(
                        "SNR of {snr_db} dB underflows to zero linear SNR"
                    )));
                }
                Ok(BerPoint { snr_db, snr_linear, ber, noise_power_w })
            });
            match row {
                Ok(p) => points.push(p),
                Err(e) => skips.push(skipped("ber", d, Some(snr_db), &e)),
            }
        }
        series.push(BerSeries {
            distance_m: d,
            tx_power_w: scan.tx_power_w,
            rx_power_w: pr,
            points,
        });
    }

    Ok((series, skips))
}

/// Gaussian-beam footprint at every configured range.
pub fn beam_profile(
    link: &LinkParams,
    beam_spec: &BeamSpec,
) -> Result<(BeamProfile, Vec<SkippedPoint>), LinkError> {
    let divergence_rad = beam::divergence(beam_spec.waist_m, link.wavelength_m)?;
    let rayleigh_range_m = beam::rayleigh_range(beam_spec.waist_m, link.wavelength_m)?;
    let mut points = Vec::with_capacity(link.distances_m.len());
    let mut skips = Vec::new();

    for &d in &link.distances_m {
        let row = beam::spread(beam_spec.waist_m, d, link.wavelength_m).and_then(|w| {
            let i = beam::intensity(
                beam_spec.waist_m,
                d,
                beam_spec.peak_intensity,
                link.wavelength_m,
            )?;
            Ok(BeamPoint { distance_m: d, spot_radius_m: w, on_axis_intensity: i })
        });
        match row {
            Ok(p) => points.push(p),
            Err(e) => skips.push(skipped("beam", d, Some(beam_spec.waist_m), &e)),
        }
    }

    let profile = BeamProfile {
        waist_m: beam_spec.waist_m,
        wavelength_m: link.wavelength_m,
        divergence_rad,
        rayleigh_range_m,
        points,
    };
    Ok((profile, skips))
}

/// Run every sweep in the plan.
///
/// Fails only when the link itself is invalid (wavelength or beam waist);
/// per-distance and per-point failures end up in [`LinkReport::skipped`].
pub fn evaluate(plan: &SweepPlan) -> Result<LinkReport, LinkError> {
    let frequency_hz = plan.link.frequency()?;
    let (power, mut skips) = power_sweep(&plan.link, &plan.tx_power)?;
    let (ber, ber_skips) = ber_sweep(&plan.link, &plan.ber)?;
    skips.extend(ber_skips);

    let beam_profile = match &plan.beam {
        Some(beam_spec) => {
            let (profile, beam_skips) = beam_profile(&plan.link, beam_spec)?;
            skips.extend(beam_skips);
            Some(profile)
        }
        None => None,
    };

    Ok(LinkReport {
        wavelength_m: plan.link.wavelength_m,
        speed_of_light: plan.link.speed_of_light.value(),
        frequency_hz,
        power_sweep: power,
        ber_sweep: ber,
        beam_profile,
        skipped: skips,
    })
}
