//! The immutable snapshot of system-wide caching defaults.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// System-wide caching defaults.
///
/// A read-only snapshot consulted when a tile layer config is first
/// created for a catalog resource. It is always passed explicitly
/// (there is no process-wide defaults instance) and may be shared
/// freely across threads.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheDefaults {
    /// Whether newly seen resources get caching enabled.
    pub cache_layers_by_default: bool,
    /// Whether newly created single-layer configs automatically cache
    /// every style of the resource, not just the default one.
    pub cache_non_default_styles: bool,
    /// Meta-tile width, in tiles.
    pub meta_tiling_x: u32,
    /// Meta-tile height, in tiles.
    pub meta_tiling_y: u32,
    /// Gutter around meta-tiles, in pixels.
    pub gutter: u32,
    /// Cache image formats (MIME) for vector layers.
    pub vector_formats: BTreeSet<String>,
    /// Cache image formats (MIME) for raster layers.
    pub raster_formats: BTreeSet<String>,
    /// Cache image formats (MIME) for everything else, including layer
    /// groups.
    pub other_formats: BTreeSet<String>,
}

impl Default for CacheDefaults {
    fn default() -> Self {
        let png_jpeg: BTreeSet<String> = ["image/png", "image/jpeg"].map(str::to_string).into();
        Self {
            cache_layers_by_default: true,
            cache_non_default_styles: false,
            meta_tiling_x: 4,
            meta_tiling_y: 4,
            gutter: 0,
            vector_formats: png_jpeg.clone(),
            raster_formats: png_jpeg.clone(),
            other_formats: png_jpeg,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let yaml = "cache_non_default_styles: true\nvector_formats: [application/x-protobuf]\n";
        let defaults: CacheDefaults = serde_yaml::from_str(yaml).unwrap();

        assert!(defaults.cache_non_default_styles);
        assert_eq!(
            defaults.vector_formats,
            ["application/x-protobuf"].map(str::to_string).into()
        );
        // untouched fields keep the built-in defaults
        assert!(defaults.cache_layers_by_default);
        assert_eq!(defaults.meta_tiling_x, 4);
        assert_eq!(defaults.raster_formats, CacheDefaults::default().raster_formats);
    }

    #[test]
    fn test_default_formats_are_png_and_jpeg() {
        let defaults = CacheDefaults::default();
        let expected: BTreeSet<String> = ["image/jpeg", "image/png"].map(str::to_string).into();
        assert_eq!(defaults.vector_formats, expected);
        assert_eq!(defaults.raster_formats, expected);
        assert_eq!(defaults.other_formats, expected);
    }
}
