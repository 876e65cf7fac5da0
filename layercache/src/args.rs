use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug, PartialEq)]
#[command(about, version)]
pub struct Args {
    /// Catalog snapshot to derive tile layer configs from
    pub catalog: PathBuf,

    /// Config file with the system-wide cache defaults
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Previously saved tile layer configs to update in place
    #[arg(short = 'l', long)]
    pub tile_layers: Option<PathBuf>,

    /// Where to write the reconciled tile layer configs, '-' for stdout
    #[arg(short, long, default_value = "-")]
    pub output: PathBuf,

    /// Save the effective configuration to a file, '-' to print it
    #[arg(long)]
    pub save_config: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_defaults() {
        let args = Args::try_parse_from(["layercache", "catalog.yaml"]).unwrap();
        assert_eq!(args.catalog, PathBuf::from("catalog.yaml"));
        assert_eq!(args.output, PathBuf::from("-"));
        assert_eq!(args.config, None);
        assert_eq!(args.tile_layers, None);
    }

    #[test]
    fn test_args_full() {
        let args = Args::try_parse_from([
            "layercache",
            "catalog.yaml",
            "--config",
            "layercache.yaml",
            "--tile-layers",
            "tile-layers.yaml",
            "--output",
            "out.yaml",
        ])
        .unwrap();
        assert_eq!(args.config, Some(PathBuf::from("layercache.yaml")));
        assert_eq!(args.tile_layers, Some(PathBuf::from("tile-layers.yaml")));
        assert_eq!(args.output, PathBuf::from("out.yaml"));
    }

    #[test]
    fn test_args_require_catalog() {
        assert!(Args::try_parse_from(["layercache"]).is_err());
    }
}
