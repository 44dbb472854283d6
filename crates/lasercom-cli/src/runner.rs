//! Sweep runner: turns a job into a report and writes the series files.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use lasercom_core::channel::{path_loss_db, watts_to_dbm};
use lasercom_core::sweep::evaluate;
use lasercom_core::types::{BeamProfile, BerSeries, LinkReport, PowerSeries};

use crate::config::JobConfig;

/// Run every sweep described by a parsed job configuration.
pub fn run_sweeps(job: &JobConfig) -> Result<LinkReport> {
    let plan = job.to_plan()?;
    log::info!(
        "sweeping {} ranges: {} power points, {} SNR points",
        plan.link.distances_m.len(),
        plan.tx_power.len(),
        plan.ber.snr_db.len()
    );

    let report = evaluate(&plan).map_err(|e| anyhow::anyhow!("Link evaluation failed: {}", e))?;

    println!(
        "  λ = {:.1} nm, c = {} m/s, f = {:.4e} Hz",
        report.wavelength_m * 1e9,
        report.speed_of_light,
        report.frequency_hz
    );
    for line in range_summary(&report) {
        println!("{}", line);
    }
    for skip in &report.skipped {
        log::warn!(
            "skipped {} point at {} m ({:?}): {}",
            skip.sweep,
            skip.distance_m,
            skip.parameter,
            skip.reason
        );
    }
    if !report.skipped.is_empty() {
        println!("  {} parameter combinations skipped", report.skipped.len());
    }

    Ok(report)
}

/// One summary line per range, pairing each power series with the BER
/// series at the same distance.
fn range_summary(report: &LinkReport) -> Vec<String> {
    let mut lines = Vec::new();
    for power in &report.power_sweep {
        let loss = format!(
            "  {:>7.0} km: L = {:.2} dB",
            power.distance_m / 1e3,
            path_loss_db(power.path_loss)
        );
        match report.ber_sweep.iter().find(|b| b.distance_m == power.distance_m) {
            Some(ber) => {
                log::debug!(
                    "d={} m: {} power points, {} BER points",
                    power.distance_m,
                    power.points.len(),
                    ber.points.len()
                );
                lines.push(format!(
                    "{}, Pr({} W) = {:.3} dBm",
                    loss,
                    ber.tx_power_w,
                    watts_to_dbm(ber.rx_power_w)
                ));
            }
            None => lines.push(format!("{}, no BER series", loss)),
        }
    }
    for ber in &report.ber_sweep {
        if !report.power_sweep.iter().any(|p| p.distance_m == ber.distance_m) {
            lines.push(format!(
                "  {:>7.0} km: no power series, Pr({} W) = {:.3} dBm",
                ber.distance_m / 1e3,
                ber.tx_power_w,
                watts_to_dbm(ber.rx_power_w)
            ));
        }
    }
    lines
}

/// Write every enabled output for a report, returning the files created.
pub fn write_outputs(report: &LinkReport, job: &JobConfig, out_dir: &Path) -> Result<Vec<PathBuf>> {
    let mut written = Vec::new();

    if job.output.save_csv {
        let path = out_dir.join("received_power.csv");
        write_power_csv(&report.power_sweep, &path, report)?;
        written.push(path);

        let path = out_dir.join("ber.csv");
        write_ber_csv(&report.ber_sweep, &path, report)?;
        written.push(path);

        if let Some(profile) = &report.beam_profile {
            let path = out_dir.join("beam_profile.csv");
            write_beam_csv(profile, &path)?;
            written.push(path);
        }
    }

    if job.output.save_json {
        let path = out_dir.join("link_report.json");
        write_report_json(report, &path)?;
        written.push(path);
    }

    Ok(written)
}

fn create_file(path: &Path) -> Result<std::fs::File> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    std::fs::File::create(path).with_context(|| format!("failed to create {}", path.display()))
}

fn write_header(file: &mut std::fs::File, title: &str, report: &LinkReport) -> Result<()> {
    writeln!(file, "# Lasercom link budget: {}", title)?;
    writeln!(file, "# Version: {}", env!("CARGO_PKG_VERSION"))?;
    writeln!(file, "# wavelength_m: {:e}", report.wavelength_m)?;
    writeln!(file, "# speed_of_light_m_s: {}", report.speed_of_light)?;
    writeln!(file, "# frequency_hz: {:.9e}", report.frequency_hz)?;
    writeln!(file, "#")?;
    Ok(())
}

/// Write the received-power series, one row per (distance, Pt).
pub fn write_power_csv(series: &[PowerSeries], path: &Path, report: &LinkReport) -> Result<()> {
    let mut file = create_file(path)?;
    write_header(&mut file, "Transmit vs Received Power", report)?;
    writeln!(file, "distance_km,tx_power_w,rx_power_w,rx_power_dbm,path_loss_db")?;

    for s in series {
        let loss_db = path_loss_db(s.path_loss);
        for p in &s.points {
            writeln!(
                file,
                "{},{:.4},{:.9e},{:.4},{:.4}",
                s.distance_m / 1e3,
                p.tx_power_w,
                p.rx_power_w,
                watts_to_dbm(p.rx_power_w),
                loss_db
            )?;
        }
    }

    println!("Received power written to: {}", path.display());
    Ok(())
}

/// Write the BER series, one row per (distance, SNR).
pub fn write_ber_csv(series: &[BerSeries], path: &Path, report: &LinkReport) -> Result<()> {
    let mut file = create_file(path)?;
    write_header(&mut file, "BER vs SNR (OOK)", report)?;
    if let Some(first) = series.first() {
        writeln!(file, "# tx_power_w: {}", first.tx_power_w)?;
    }
    writeln!(file, "distance_km,snr_db,snr_linear,ber,noise_power_w")?;

    for s in series {
        for p in &s.points {
            writeln!(
                file,
                "{},{:.3},{:.9e},{:.9e},{:.9e}",
                s.distance_m / 1e3,
                p.snr_db,
                p.snr_linear,
                p.ber,
                p.noise_power_w
            )?;
        }
    }

    println!("BER written to: {}", path.display());
    Ok(())
}

/// Write the beam footprint table.
pub fn write_beam_csv(profile: &BeamProfile, path: &Path) -> Result<()> {
    let mut file = create_file(path)?;
    writeln!(file, "# Lasercom link budget: Gaussian Beam Footprint")?;
    writeln!(file, "# waist_m: {}", profile.waist_m)?;
    writeln!(file, "# divergence_rad: {:.9e}", profile.divergence_rad)?;
    writeln!(file, "# rayleigh_range_m: {:.6e}", profile.rayleigh_range_m)?;
    writeln!(file, "#")?;
    writeln!(file, "distance_km,spot_radius_m,divergence_rad,on_axis_intensity_w_m2")?;

    for p in &profile.points {
        writeln!(
            file,
            "{},{:.6e},{:.9e},{:.9e}",
            p.distance_m / 1e3,
            p.spot_radius_m,
            profile.divergence_rad,
            p.on_axis_intensity
        )?;
    }

    println!("Beam profile written to: {}", path.display());
    Ok(())
}

/// Write the complete report as JSON.
pub fn write_report_json(report: &LinkReport, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(report)
        .map_err(|e| anyhow::anyhow!("JSON serialisation error: {}", e))?;
    std::fs::write(path, json)?;

    println!("Report (JSON) written to: {}", path.display());
    Ok(())
}
