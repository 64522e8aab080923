//! Demo binary: compiles a small world-generation pack to disk.
//!
//! The manifest is loaded from `pack.ron` (created with defaults if missing)
//! and can be overridden via CLI flags. Run with `cargo run -p orogen-demo`
//! to compile into `./pack`, or `-- --seed 99 --out /tmp/pack` to vary the
//! salts and target directory.

mod pack;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::{error, info};
use orogen_config::{CliArgs, PackManifest};
use orogen_world::export_pack;

fn main() -> ExitCode {
    let args = CliArgs::parse();

    let mut builder = env_logger::Builder::from_default_env();
    if let Some(level) = &args.log_level {
        builder.parse_filters(level);
    } else {
        builder.filter_level(log::LevelFilter::Info);
    }
    builder.init();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            error!("{message}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &CliArgs) -> Result<(), String> {
    let pack_dir = args.pack_dir.clone().unwrap_or_else(|| PathBuf::from("."));
    let mut manifest = PackManifest::load_or_create(&pack_dir).map_err(|e| e.to_string())?;
    manifest.apply_cli_overrides(args);
    manifest.validate().map_err(|e| e.to_string())?;

    let seed = args.seed.unwrap_or(0);
    let out_dir = args.out.clone().unwrap_or_else(|| PathBuf::from("pack"));

    info!("compiling pack `{}` with seed {seed}", manifest.pack.id);
    let generator = pack::build_demo_pack(&manifest, seed);
    let summary = export_pack(&generator, &out_dir).map_err(|e| e.to_string())?;

    info!(
        "done: {} biomes, {} palettes, {} features, {} extrusions",
        summary.biomes, summary.palettes, summary.features, summary.extrusions
    );
    Ok(())
}
