use std::collections::HashMap;
use std::ffi::OsStr;
use std::fs::File;
use std::io::prelude::*;
use std::path::Path;

use layercache_core::config::CacheDefaults;
use log::info;
use serde::{Deserialize, Serialize};
use subst::VariableMap;

use crate::ConfigFileResult;
use crate::error::ConfigFileError::{
    ConfigLoadError, ConfigParseError, ConfigWriteError, NoCacheFormats,
};

pub type UnrecognizedValues = HashMap<String, serde_yaml::Value>;

/// The on-disk configuration: system-wide cache defaults, nothing more.
/// Catalog snapshots and tile layer files are separate inputs.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub defaults: CacheDefaults,

    #[serde(flatten)]
    pub unrecognized: UnrecognizedValues,
}

impl Config {
    /// Validate the config and collect keys nobody recognized.
    pub fn finalize(&self) -> ConfigFileResult<UnrecognizedValues> {
        let d = &self.defaults;
        if d.vector_formats.is_empty() && d.raster_formats.is_empty() && d.other_formats.is_empty()
        {
            return Err(NoCacheFormats);
        }
        Ok(self.unrecognized.clone())
    }

    pub fn save_to_file(&self, file_name: &Path) -> ConfigFileResult<()> {
        let yaml = serde_yaml::to_string(&self).expect("Unable to serialize config");
        if file_name.as_os_str() == OsStr::new("-") {
            info!("Current system configuration:");
            println!("\n\n{yaml}\n");
            Ok(())
        } else {
            info!(
                "Saving config to {}, use --config to load it",
                file_name.display()
            );
            match File::create(file_name) {
                Ok(mut file) => file
                    .write_all(yaml.as_bytes())
                    .map_err(|e| ConfigWriteError(e, file_name.to_path_buf())),
                Err(e) => Err(ConfigWriteError(e, file_name.to_path_buf())),
            }
        }
    }
}

/// Read config from a file, substituting `${VAR}` placeholders from `env`.
pub fn read_config<'a, M>(file_name: &Path, env: &'a M) -> ConfigFileResult<Config>
where
    M: VariableMap<'a>,
    M::Value: AsRef<str>,
{
    let mut file = File::open(file_name).map_err(|e| ConfigLoadError(e, file_name.into()))?;
    let mut contents = String::new();
    file.read_to_string(&mut contents)
        .map_err(|e| ConfigLoadError(e, file_name.into()))?;
    parse_config(&contents, env, file_name)
}

pub fn parse_config<'a, M>(contents: &str, env: &'a M, file_name: &Path) -> ConfigFileResult<Config>
where
    M: VariableMap<'a>,
    M::Value: AsRef<str>,
{
    subst::yaml::from_str(contents, env).map_err(|e| ConfigParseError(e, file_name.into()))
}
