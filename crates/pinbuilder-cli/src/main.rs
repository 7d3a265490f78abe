//! pinbuilder CLI - pinball playfield drawings to OpenSCAD
//!
//! Lists the features and ramps found in a drawing, writes the ramp script,
//! and checks that OpenSCAD is installed.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use pinbuilder::{BuildSettings, Playfield};
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "pinbuilder")]
#[command(about = "Build OpenSCAD ramp models from pinball playfield drawings", long_about = None)]
struct Cli {
    /// Settings file (TOML); defaults are used when omitted
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the features and ramps in a drawing
    List {
        /// Playfield drawing (.svg)
        path: PathBuf,
        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },
    /// Write the ramp script for a drawing
    Generate {
        /// Playfield drawing (.svg)
        path: PathBuf,
        /// Output directory
        #[arg(short, long, default_value = "output")]
        out: PathBuf,
    },
    /// Check that OpenSCAD can be run
    CheckOpenscad,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let settings = load_settings(cli.config.as_deref())?;

    match cli.command {
        Commands::List { path, json } => list(&path, json, &settings)?,
        Commands::Generate { path, out } => generate(&path, &out, &settings)?,
        Commands::CheckOpenscad => check_openscad()?,
    }

    Ok(())
}

fn load_settings(path: Option<&Path>) -> Result<BuildSettings> {
    match path {
        Some(path) => BuildSettings::load(path)
            .with_context(|| format!("loading settings from {}", path.display())),
        None => Ok(BuildSettings::default()),
    }
}

fn list(path: &Path, json: bool, settings: &BuildSettings) -> Result<()> {
    let playfield = Playfield::load(path, settings)
        .with_context(|| format!("reading {}", path.display()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&playfield.report())?);
        return Ok(());
    }

    let size = playfield.size();
    println!("{} ({} x {})", playfield.name(), size.x, size.y);
    println!();
    println!("Features: {}", playfield.features().len());
    for feature in playfield.features() {
        println!("  {}", feature);
    }

    println!();
    println!("Ramps: {}", playfield.ramps().len());
    for ramp in playfield.ramps() {
        let status = match ramp.validate() {
            Ok(()) => "ok".to_string(),
            Err(e) => e.to_string(),
        };
        println!(
            "  {}: {} segments, {} markers, length {:.3}: {}",
            ramp.id(),
            ramp.centerline().len(),
            ramp.markers().len(),
            ramp.centerline_length(),
            status
        );
    }
    for rejected in playfield.rejected() {
        println!("  {}: rejected: {}", rejected.id, rejected.error);
    }

    Ok(())
}

fn generate(path: &Path, out: &Path, settings: &BuildSettings) -> Result<()> {
    let playfield = Playfield::load(path, settings)
        .with_context(|| format!("reading {}", path.display()))?;

    let valid = playfield.ramps().iter().filter(|r| r.is_valid()).count();
    if valid == 0 {
        anyhow::bail!("{} has no valid ramps", path.display());
    }

    let written = playfield.generate(out, settings)?;
    info!(ramps = valid, "generated");
    println!("Wrote {}", written.display());
    Ok(())
}

fn check_openscad() -> Result<()> {
    let output = Command::new("openscad")
        .arg("--version")
        .output()
        .context("running openscad; is it installed and on PATH?")?;

    print!("{}", String::from_utf8_lossy(&output.stdout));
    eprint!("{}", String::from_utf8_lossy(&output.stderr));
    if !output.status.success() {
        anyhow::bail!("openscad exited with {}", output.status);
    }
    Ok(())
}
