//! Lasercom command-line interface.
//!
//! Run link-budget sweeps from TOML job files:
//! ```sh
//! lasercom run job.toml
//! lasercom validate job.toml
//! lasercom constants
//! ```

mod config;
mod runner;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use lasercom_core::constants::{
    carrier_frequency, SpeedOfLight, REFERENCE_BER_TX_POWER, REFERENCE_DISTANCES,
    REFERENCE_WAVELENGTH,
};

#[derive(Parser)]
#[command(name = "lasercom")]
#[command(about = "Lasercom: free-space optical relay link budget")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the power and BER sweeps from a TOML configuration file.
    Run {
        /// Path to the job configuration file.
        config: PathBuf,
        /// Output directory (overrides config file setting).
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Validate a configuration file without running the sweeps.
    Validate {
        /// Path to the job configuration file.
        config: PathBuf,
    },
    /// Display the physical constants and reference link parameters.
    Constants,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Run { config, output } => {
            println!("Lasercom Link Budget");
            println!("====================");
            let job = config::load_config(&config)?;
            println!("Configuration: {}", config.display());

            let report = runner::run_sweeps(&job)?;

            let out_dir = output.unwrap_or_else(|| PathBuf::from(&job.output.directory));
            let written = runner::write_outputs(&report, &job, &out_dir)?;
            log::info!("{} output files written", written.len());

            println!("Sweep complete.");
            Ok(())
        }
        Commands::Validate { config } => {
            let job = config::load_config(&config)?;
            let plan = job.to_plan()?;
            println!("Configuration is valid: {}", config.display());
            println!(
                "  {} ranges, {} power points, {} SNR points",
                plan.link.distances_m.len(),
                plan.tx_power.len(),
                plan.ber.snr_db.len()
            );
            Ok(())
        }
        Commands::Constants => {
            let exact = SpeedOfLight::Exact;
            let reference = SpeedOfLight::Reference;
            let f_exact = carrier_frequency(REFERENCE_WAVELENGTH, exact.value())?;
            let f_reference = carrier_frequency(REFERENCE_WAVELENGTH, reference.value())?;

            println!("Speed of light:");
            println!("  exact      {:>12} m/s  (default)", exact.value());
            println!(
                "  reference  {:>12} m/s  (bias {:+.4}%)",
                reference.value(),
                reference.relative_bias() * 100.0
            );
            println!();
            println!("Reference link:");
            println!("  wavelength      {:.0} nm", REFERENCE_WAVELENGTH * 1e9);
            println!("  carrier (exact) {:.6e} Hz", f_exact);
            println!("  carrier (ref)   {:.6e} Hz", f_reference);
            let distances: Vec<String> =
                REFERENCE_DISTANCES.iter().map(|d| format!("{:.0}", d / 1e3)).collect();
            println!("  distances       {} km", distances.join(", "));
            println!("  BER scan power  {} W", REFERENCE_BER_TX_POWER);
            Ok(())
        }
    }
}
