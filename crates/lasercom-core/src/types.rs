//! Result containers handed to the report writers and plotting tools.
//!
//! Every series is grouped per link distance and ordered by the swept
//! parameter, so a plotting collaborator can draw one curve per distance
//! without re-sorting.

use serde::{Deserialize, Serialize};

/// Received power for one transmit power setting.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PowerPoint {
    /// Transmit power (W).
    pub tx_power_w: f64,
    /// Received power (W).
    pub rx_power_w: f64,
}

/// Transmit-power sweep at a single distance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerSeries {
    /// Link range (m).
    pub distance_m: f64,
    /// Free-space path loss factor at this range (dimensionless).
    pub path_loss: f64,
    /// `(Pt, Pr)` pairs in ascending transmit power.
    pub points: Vec<PowerPoint>,
}

/// Bit-error rate for one SNR setting.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BerPoint {
    /// Swept SNR (dB).
    pub snr_db: f64,
    /// Same SNR on a linear scale.
    pub snr_linear: f64,
    /// OOK bit-error rate.
    pub ber: f64,
    /// Noise power (W) that yields this SNR at the series' received power.
    pub noise_power_w: f64,
}

/// SNR sweep at a single distance and fixed transmit power.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BerSeries {
    /// Link range (m).
    pub distance_m: f64,
    /// Transmit power used for the scan (W).
    pub tx_power_w: f64,
    /// Received power at this range (W).
    pub rx_power_w: f64,
    /// `(SNR_dB, BER)` rows in ascending SNR.
    pub points: Vec<BerPoint>,
}

/// Gaussian-beam footprint at one range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BeamPoint {
    /// Link range (m).
    pub distance_m: f64,
    /// Beam radius w(z) at the receiver (m).
    pub spot_radius_m: f64,
    /// On-axis intensity at the receiver (W/m²).
    pub on_axis_intensity: f64,
}

/// Beam footprint across all configured ranges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeamProfile {
    /// Waist radius at the transmitter (m).
    pub waist_m: f64,
    /// Optical wavelength (m).
    pub wavelength_m: f64,
    /// Far-field divergence half-angle (rad).
    pub divergence_rad: f64,
    /// Rayleigh range (m).
    pub rayleigh_range_m: f64,
    /// One row per range, in configuration order.
    pub points: Vec<BeamPoint>,
}

/// A parameter combination the sweep could not evaluate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedPoint {
    /// Which sweep produced the failure ("power", "ber" or "beam").
    pub sweep: String,
    /// Link range (m).
    pub distance_m: f64,
    /// Value of the swept parameter (W, dB or m depending on the sweep).
    /// `None` when the whole distance was skipped.
    pub parameter: Option<f64>,
    /// Rendered [`LinkError`](crate::error::LinkError).
    pub reason: String,
}

/// Complete output of a sweep run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LinkReport {
    /// Optical wavelength (m).
    pub wavelength_m: f64,
    /// Speed of light the run used (m/s).
    pub speed_of_light: f64,
    /// Carrier frequency c/λ (Hz).
    pub frequency_hz: f64,
    /// Received power versus transmit power, one series per range.
    pub power_sweep: Vec<PowerSeries>,
    /// BER versus SNR, one series per range.
    pub ber_sweep: Vec<BerSeries>,
    /// Beam footprint, when a beam waist was configured.
    pub beam_profile: Option<BeamProfile>,
    /// Combinations that failed validation.
    pub skipped: Vec<SkippedPoint>,
}
