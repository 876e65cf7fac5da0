//! File transport between the catalog subsystem, this tool, and the
//! tile-serving engine. The core model itself never touches the
//! filesystem.

use std::ffi::OsStr;
use std::fs;
use std::io::Write as _;
use std::path::Path;

use layercache_core::TileLayerInfo;
use layercache_core::catalog::PublishedResource;
use log::info;
use serde::{Deserialize, Serialize};

use crate::ConfigFileResult;
use crate::error::ConfigFileError::{ConfigLoadError, ConfigWriteError, YamlParseError};

/// A read-only catalog snapshot, as handed over by the catalog
/// subsystem.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogFile {
    #[serde(default)]
    pub resources: Vec<PublishedResource>,
}

/// The tile layer configs this tool reads back in and writes out.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TileLayerFile {
    #[serde(default)]
    pub layers: Vec<TileLayerInfo>,
}

pub fn read_catalog(file_name: &Path) -> ConfigFileResult<CatalogFile> {
    let contents =
        fs::read_to_string(file_name).map_err(|e| ConfigLoadError(e, file_name.into()))?;
    serde_yaml::from_str(&contents).map_err(|e| YamlParseError(e, file_name.into()))
}

pub fn read_tile_layers(file_name: &Path) -> ConfigFileResult<TileLayerFile> {
    let contents =
        fs::read_to_string(file_name).map_err(|e| ConfigLoadError(e, file_name.into()))?;
    serde_yaml::from_str(&contents).map_err(|e| YamlParseError(e, file_name.into()))
}

/// Write the reconciled tile layer configs, `-` meaning stdout.
pub fn save_tile_layers(layers: &[TileLayerInfo], file_name: &Path) -> ConfigFileResult<()> {
    let file = TileLayerFile {
        layers: layers.to_vec(),
    };
    let yaml = serde_yaml::to_string(&file).expect("Unable to serialize tile layers");
    if file_name.as_os_str() == OsStr::new("-") {
        println!("{yaml}");
        Ok(())
    } else {
        info!("Saving {} tile layer configs to {}", layers.len(), file_name.display());
        match fs::File::create(file_name) {
            Ok(mut file) => file
                .write_all(yaml.as_bytes())
                .map_err(|e| ConfigWriteError(e, file_name.to_path_buf())),
            Err(e) => Err(ConfigWriteError(e, file_name.to_path_buf())),
        }
    }
}

#[cfg(test)]
mod tests {
    use layercache_core::catalog::ResourceKind;
    use layercache_core::config::CacheDefaults;

    use super::*;

    const CATALOG: &str = "
resources:
  - type: layer
    id: states-id
    name: states
    kind: vector
    default_style: population
    styles: [pophatch, polygon]
  - type: group
    id: tasmania-id
    name: tasmania
    members:
      - type: layer
        id: tasmania-roads-id
        name: tasmania_roads
        kind: vector
";

    #[test]
    fn test_read_catalog_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.yaml");
        fs::write(&path, CATALOG).unwrap();

        let catalog = read_catalog(&path).unwrap();
        assert_eq!(catalog.resources.len(), 2);
        assert_eq!(catalog.resources[0].tile_layer_name(), "states");
        assert_eq!(catalog.resources[0].kind(), Some(ResourceKind::Vector));
        assert_eq!(catalog.resources[1].tile_layer_name(), "tasmania");
    }

    #[test]
    fn test_read_catalog_missing_file() {
        let err = read_catalog(Path::new("/non_existent/catalog.yaml")).unwrap_err();
        assert!(matches!(err, crate::ConfigFileError::ConfigLoadError(..)));
    }

    #[test]
    fn test_tile_layers_round_trip() {
        let defaults = CacheDefaults::default();
        let mut info = TileLayerInfo::new(&defaults, Some(ResourceKind::Vector));
        info.id = "states-id".to_string();
        info.name = "states".to_string();
        info.update_accept_all_float_filter("ELEVATION", true);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tile-layers.yaml");
        save_tile_layers(std::slice::from_ref(&info), &path).unwrap();

        let file = read_tile_layers(&path).unwrap();
        assert_eq!(file.layers, vec![info]);
    }
}
