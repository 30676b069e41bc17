//! Xero CLI - replay drags and flings against the demo scroll region

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use xero_app::{Demo, FlingReport, XeroConfig};

#[derive(Parser)]
#[command(name = "xero")]
#[command(about = "Momentum scroll region playground", long_about = None)]
#[command(version)]
struct Cli {
    /// Config file, or a directory containing xero.toml
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log every frame
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply finger movements (points, negative = finger moves up)
    Drag {
        #[arg(required = true, allow_negative_numbers = true)]
        deltas: Vec<f32>,
    },

    /// Drag to an offset, release with a velocity, and glide until idle
    Fling {
        /// Offset to start the glide from
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        start: f32,

        /// Finger velocity at release (points/second, negative = upward flick)
        #[arg(long, allow_negative_numbers = true)]
        velocity: f32,
    },

    /// Feed raw finger positions, one per frame, then lift and glide
    Touch {
        #[arg(required = true, allow_negative_numbers = true)]
        positions: Vec<f32>,
    },

    /// Print the effective configuration
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    let config = XeroConfig::load_or_default(cli.config.as_deref())?;

    match cli.command {
        Commands::Drag { deltas } => cmd_drag(&config, &deltas),
        Commands::Fling { start, velocity } => cmd_fling(&config, start, velocity),
        Commands::Touch { positions } => cmd_touch(&config, &positions),
        Commands::Config => {
            print!("{}", config.to_toml()?);
            Ok(())
        }
    }
}

fn cmd_drag(config: &XeroConfig, deltas: &[f32]) -> Result<()> {
    let mut demo = Demo::from_config(config)?;
    for delta in deltas {
        let offset = demo.drag(*delta);
        println!("drag {:>8.1} -> offset {:>8.1}", delta, offset);
    }
    println!("visible: {}", demo.visible_titles().join(", "));
    Ok(())
}

fn cmd_fling(config: &XeroConfig, start: f32, velocity: f32) -> Result<()> {
    let mut demo = Demo::from_config(config)?;
    let report = demo.fling(start, velocity);
    print_report(&demo, &report);
    Ok(())
}

fn cmd_touch(config: &XeroConfig, positions: &[f32]) -> Result<()> {
    let mut demo = Demo::from_config(config)?;
    match demo.touch(positions) {
        Some(report) => print_report(&demo, &report),
        None => println!("no touch samples"),
    }
    Ok(())
}

fn print_report(demo: &Demo, report: &FlingReport) {
    println!(
        "released at {:.1} with velocity {:.1}",
        report.start_offset, report.release_velocity
    );
    println!(
        "settled at {:.1} after {} frames{}{}",
        report.end_offset,
        report.frames,
        if report.hit_edge { " (edge)" } else { "" },
        if report.truncated { " (frame cap)" } else { "" }
    );
    println!("visible: {}", demo.visible_titles().join(", "));
}
