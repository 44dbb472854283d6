//! TOML configuration deserialisation for sweep jobs.
//!
//! Every section is optional. An empty file reproduces the reference relay
//! sweep: 1550 nm, 200–1000 km, 0.1–1.0 W and −2…7 dB at 0.2 W.

use anyhow::{bail, Context};
use serde::Deserialize;

use lasercom_core::constants::{
    SpeedOfLight, REFERENCE_BER_TX_POWER, REFERENCE_DISTANCES, REFERENCE_WAVELENGTH,
};
use lasercom_core::sweep::{BeamSpec, BerScan, LinkParams, SweepPlan, SweepRange};

/// Top-level job configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct JobConfig {
    #[serde(default)]
    pub link: LinkConfig,
    #[serde(default)]
    pub power_sweep: PowerSweepConfig,
    #[serde(default)]
    pub ber_sweep: BerSweepConfig,
    /// Beam footprint table; omitted when absent.
    pub beam: Option<BeamConfig>,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Link geometry.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LinkConfig {
    #[serde(default = "default_wavelength")]
    pub wavelength_m: f64,
    /// "exact" (default) or "reference".
    #[serde(default)]
    pub speed_of_light: SpeedOfLight,
    #[serde(default = "default_distances_km")]
    pub distances_km: Vec<f64>,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            wavelength_m: default_wavelength(),
            speed_of_light: SpeedOfLight::default(),
            distances_km: default_distances_km(),
        }
    }
}

fn default_wavelength() -> f64 {
    REFERENCE_WAVELENGTH
}
fn default_distances_km() -> Vec<f64> {
    REFERENCE_DISTANCES.iter().map(|d| d / 1e3).collect()
}

/// Transmit-power sweep in watts.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PowerSweepConfig {
    #[serde(default = "default_power_start")]
    pub start_w: f64,
    #[serde(default = "default_power_stop")]
    pub stop_w: f64,
    #[serde(default = "default_power_step")]
    pub step_w: f64,
}

impl Default for PowerSweepConfig {
    fn default() -> Self {
        Self {
            start_w: default_power_start(),
            stop_w: default_power_stop(),
            step_w: default_power_step(),
        }
    }
}

fn default_power_start() -> f64 {
    0.1
}
fn default_power_stop() -> f64 {
    1.0
}
fn default_power_step() -> f64 {
    0.01
}

/// SNR sweep in dB at a fixed transmit power.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BerSweepConfig {
    #[serde(default = "default_snr_start")]
    pub snr_db_start: f64,
    #[serde(default = "default_snr_stop")]
    pub snr_db_stop: f64,
    #[serde(default = "default_snr_step")]
    pub snr_db_step: f64,
    #[serde(default = "default_ber_tx_power")]
    pub tx_power_w: f64,
}

impl Default for BerSweepConfig {
    fn default() -> Self {
        Self {
            snr_db_start: default_snr_start(),
            snr_db_stop: default_snr_stop(),
            snr_db_step: default_snr_step(),
            tx_power_w: default_ber_tx_power(),
        }
    }
}

fn default_snr_start() -> f64 {
    -2.0
}
fn default_snr_stop() -> f64 {
    7.0
}
fn default_snr_step() -> f64 {
    1.0
}
fn default_ber_tx_power() -> f64 {
    REFERENCE_BER_TX_POWER
}

/// Transmit beam description.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BeamConfig {
    pub waist_m: f64,
    #[serde(default = "default_peak_intensity")]
    pub peak_intensity_w_m2: f64,
}

fn default_peak_intensity() -> f64 {
    1.0
}

/// Output configuration.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    /// Output directory (default: "./output").
    #[serde(default = "default_output_dir")]
    pub directory: String,
    /// Whether to write the CSV series (default: true).
    #[serde(default = "default_true")]
    pub save_csv: bool,
    /// Whether to also write the full report as JSON (default: false).
    #[serde(default)]
    pub save_json: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_output_dir(),
            save_csv: true,
            save_json: false,
        }
    }
}

fn default_output_dir() -> String {
    "./output".into()
}
fn default_true() -> bool {
    true
}

impl JobConfig {
    /// Check the job and convert it into a sweep plan.
    pub fn to_plan(&self) -> anyhow::Result<SweepPlan> {
        let link = &self.link;
        if !(link.wavelength_m.is_finite() && link.wavelength_m > 0.0) {
            bail!("link.wavelength_m must be positive, got {}", link.wavelength_m);
        }
        if link.distances_km.is_empty() {
            bail!("link.distances_km must list at least one distance");
        }
        if let Some(d) = link.distances_km.iter().find(|d| !(d.is_finite() && **d > 0.0)) {
            bail!("link.distances_km must be positive, got {}", d);
        }

        let p = &self.power_sweep;
        let tx_power = SweepRange::new(p.start_w, p.stop_w, p.step_w)
            .context("invalid [power_sweep]")?;
        if p.start_w <= 0.0 {
            bail!("power_sweep.start_w must be positive, got {}", p.start_w);
        }

        let b = &self.ber_sweep;
        let snr_db = SweepRange::new(b.snr_db_start, b.snr_db_stop, b.snr_db_step)
            .context("invalid [ber_sweep]")?;
        if !(b.tx_power_w.is_finite() && b.tx_power_w > 0.0) {
            bail!("ber_sweep.tx_power_w must be positive, got {}", b.tx_power_w);
        }

        let beam = match &self.beam {
            Some(beam) => {
                if !(beam.waist_m.is_finite() && beam.waist_m > 0.0) {
                    bail!("beam.waist_m must be positive, got {}", beam.waist_m);
                }
                if !(beam.peak_intensity_w_m2.is_finite() && beam.peak_intensity_w_m2 >= 0.0) {
                    bail!(
                        "beam.peak_intensity_w_m2 must not be negative, got {}",
                        beam.peak_intensity_w_m2
                    );
                }
                Some(BeamSpec {
                    waist_m: beam.waist_m,
                    peak_intensity: beam.peak_intensity_w_m2,
                })
            }
            None => None,
        };

        Ok(SweepPlan {
            link: LinkParams {
                wavelength_m: link.wavelength_m,
                speed_of_light: link.speed_of_light,
                distances_m: link.distances_km.iter().map(|d| d * 1e3).collect(),
            },
            tx_power,
            ber: BerScan { snr_db, tx_power_w: b.tx_power_w },
            beam,
        })
    }
}

/// Load and parse a TOML job configuration file.
pub fn load_config(path: &std::path::Path) -> anyhow::Result<JobConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let config: JobConfig = toml::from_str(&content)
        .with_context(|| format!("failed to parse {}", path.display()))?;
    Ok(config)
}
