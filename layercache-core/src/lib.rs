#![doc = include_str!("../README.md")]
#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

/// Read-only snapshots of catalog resources
pub mod catalog;

pub mod config;

mod filters;
pub use filters::{FilterError, ParameterFilter, find_parameter_filter};

mod layer;
pub use layer::TileLayerInfo;
