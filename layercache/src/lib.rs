#![cfg_attr(doc, doc = include_str!("../README.md"))]
#![forbid(unsafe_code)]

pub mod args;
pub mod config;
pub mod logging;

mod error;
pub use error::{ConfigFileError, ConfigFileResult, LayercacheError, LayercacheResult};

mod reconcile;
pub use reconcile::{reconcile, validate_tile_layers};

mod state;
pub use state::{CatalogFile, TileLayerFile, read_catalog, read_tile_layers, save_tile_layers};
