use std::env;

use clap::Parser;
use layercache::args::Args;
use layercache::config::{Config, read_config};
use layercache::logging::{ensure_core_log_level_matches, init_tracing};
use layercache::{
    LayercacheResult, read_catalog, read_tile_layers, reconcile, save_tile_layers,
    validate_tile_layers,
};
use layercache_core::config::env::OsEnv;
use log::{log_enabled, warn};
use tracing::{error, info};

const VERSION: &str = env!("CARGO_PKG_VERSION");

fn start(args: Args) -> LayercacheResult<()> {
    info!("Starting layercache v{VERSION}");

    let env = OsEnv;
    let config = if let Some(ref cfg_filename) = args.config {
        info!("Using {}", cfg_filename.display());
        read_config(cfg_filename, &env)?
    } else {
        info!("Config file is not specified, using built-in cache defaults");
        Config::default()
    };
    let unrecognized = config.finalize()?;
    for key in unrecognized.keys() {
        warn!("Ignoring unrecognized config key '{key}'");
    }

    let catalog = read_catalog(&args.catalog)?;
    info!(
        "Loaded {} catalog resources from {}",
        catalog.resources.len(),
        args.catalog.display()
    );

    let prior = match args.tile_layers {
        Some(ref path) => {
            let file = read_tile_layers(path)?;
            info!("Loaded {} tile layer configs from {}", file.layers.len(), path.display());
            file.layers
        }
        None => Vec::new(),
    };
    validate_tile_layers(&prior)?;

    let layers = reconcile(&catalog.resources, prior, &config.defaults);
    save_tile_layers(&layers, &args.output)?;

    if let Some(ref file_name) = args.save_config {
        config.save_to_file(file_name)?;
    } else {
        info!("Use --save-config to save or print the effective configuration.");
    }
    Ok(())
}

fn main() {
    let filter = ensure_core_log_level_matches(env::var("RUST_LOG").ok(), "layercache=");
    init_tracing(&filter, env::var("LAYERCACHE_LOG_FORMAT").ok());

    let args = Args::parse();
    if let Err(e) = start(args) {
        // Ensure the message is printed, even if the logging is disabled
        if log_enabled!(log::Level::Error) {
            error!("{e}");
        } else {
            eprintln!("{e}");
        }
        std::process::exit(1);
    }
}
