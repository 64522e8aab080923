//! Command-line argument parsing for the pack compiler.

use std::path::PathBuf;

use clap::Parser;

use crate::PackManifest;

/// Pack compiler command-line arguments.
///
/// CLI values override settings loaded from `pack.ron`.
#[derive(Parser, Debug)]
#[command(name = "orogen", about = "Orogen pack compiler")]
pub struct CliArgs {
    /// Directory holding `pack.ron` (created with defaults if missing).
    #[arg(long)]
    pub pack_dir: Option<PathBuf>,

    /// Output directory for the compiled pack documents.
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// Seed for salt derivation. Same seed, same output.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Sea surface height.
    #[arg(long)]
    pub ocean_level: Option<i32>,

    /// Horizontal scale multiplier.
    #[arg(long)]
    pub global_scale: Option<f64>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,
}

impl PackManifest {
    /// Apply CLI overrides to a loaded manifest.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(ocean_level) = args.ocean_level {
            self.world.ocean_level = ocean_level;
        }
        if let Some(global_scale) = args.global_scale {
            self.world.global_scale = global_scale;
        }
    }
}
