use std::fmt::Write as _;
use std::io;
use std::path::PathBuf;

/// A convenience [`Result`] for the layercache crate.
pub type LayercacheResult<T> = Result<T, LayercacheError>;

pub type ConfigFileResult<T> = Result<T, ConfigFileError>;

fn elide_vec(vec: &[String], max_items: usize, max_len: usize) -> String {
    let mut s = String::new();
    for (i, v) in vec.iter().enumerate() {
        if i >= max_items {
            let _ = write!(s, " and {} more", vec.len() - i);
            break;
        }
        if i > 0 {
            s.push_str("; ");
        }
        if v.len() > max_len {
            s.push_str(&v[..max_len]);
            s.push('…');
        } else {
            s.push_str(v);
        }
    }
    s
}

#[derive(thiserror::Error, Debug)]
pub enum LayercacheError {
    #[error(transparent)]
    ConfigFileError(#[from] ConfigFileError),

    #[error(transparent)]
    FilterError(#[from] layercache_core::FilterError),

    #[error(transparent)]
    IoError(#[from] io::Error),
}

#[derive(thiserror::Error, Debug)]
pub enum ConfigFileError {
    #[error("Unable to load config file {1}: {0}")]
    ConfigLoadError(#[source] io::Error, PathBuf),

    #[error("Unable to parse config file {1}: {0}")]
    ConfigParseError(#[source] subst::yaml::Error, PathBuf),

    #[error("Unable to parse {1}: {0}")]
    YamlParseError(#[source] serde_yaml::Error, PathBuf),

    #[error("Unable to write config file {1}: {0}")]
    ConfigWriteError(#[source] io::Error, PathBuf),

    #[error(
        "All default format sets are empty. Configure at least one cache format under 'defaults'."
    )]
    NoCacheFormats,

    #[error("Invalid parameter filters: {}", elide_vec(.0, 3, 120))]
    InvalidParameterFilters(Vec<String>),
}
