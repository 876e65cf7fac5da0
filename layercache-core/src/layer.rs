//! The per-resource tile cache configuration and the rules that keep it
//! in sync with the catalog.

use std::collections::BTreeSet;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::catalog::{PublishedResource, ResourceKind};
use crate::config::CacheDefaults;
use crate::filters::{FilterError, ParameterFilter, find_index, find_parameter_filter};

fn default_true() -> bool {
    true
}

/// Tile cache configuration for one catalog resource.
///
/// A config mirrors the identity and cache-layer name of exactly one
/// resource and is owned by it; it is created from [`CacheDefaults`]
/// the first time a resource is seen and updated in place on every
/// reconciliation pass afterwards. Mutations are plain multi-step value
/// replacements, so callers that share one config across threads must
/// serialize access per resource.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TileLayerInfo {
    /// Identity, mirroring the catalog resource's id.
    pub id: String,
    /// Cache-layer name, mirroring the resource's name.
    pub name: String,
    /// Whether tiles of this layer are cached at all.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Cache image formats (MIME).
    #[serde(default)]
    pub mime_formats: BTreeSet<String>,
    /// Meta-tile width, in tiles.
    #[serde(default)]
    pub meta_tiling_x: u32,
    /// Meta-tile height, in tiles.
    #[serde(default)]
    pub meta_tiling_y: u32,
    /// Gutter around meta-tiles, in pixels.
    #[serde(default)]
    pub gutter: u32,
    /// Constraints on cacheable dimension values, at most one per
    /// dimension key.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameter_filters: Vec<ParameterFilter>,
    /// Whether the cached style set follows the resource's styles
    /// automatically.
    #[serde(default)]
    pub auto_cache_styles: bool,
    /// Style keys with their own tile caches; the empty string stands
    /// for the resource's default style.
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub cached_styles: BTreeSet<String>,
}

impl TileLayerInfo {
    /// Build a fresh config from the defaults for a resource of the
    /// given kind (`None` for layer groups, which are format-agnostic
    /// to their members).
    ///
    /// Identity and name are left empty; [`Self::load_or_create`] fills
    /// them in from the resource.
    #[must_use]
    pub fn new(defaults: &CacheDefaults, kind: Option<ResourceKind>) -> Self {
        let mime_formats = match kind {
            Some(ResourceKind::Vector) => defaults.vector_formats.clone(),
            Some(ResourceKind::Raster) => defaults.raster_formats.clone(),
            Some(ResourceKind::Other) | None => defaults.other_formats.clone(),
        };
        Self {
            id: String::new(),
            name: String::new(),
            enabled: defaults.cache_layers_by_default,
            mime_formats,
            meta_tiling_x: defaults.meta_tiling_x,
            meta_tiling_y: defaults.meta_tiling_y,
            gutter: defaults.gutter,
            parameter_filters: Vec::new(),
            auto_cache_styles: false,
            cached_styles: BTreeSet::new(),
        }
    }

    /// Bring a resource's config up to date, creating one if the
    /// resource has none yet.
    ///
    /// An existing config keeps every explicit setting; only identity
    /// and name are re-derived (resources may be renamed) and the
    /// cached style set is checked for drift. A new config is seeded
    /// from the defaults; single layers additionally pick up the
    /// `cache_non_default_styles` policy, groups never do.
    ///
    /// Never fails: unknown resource kinds fall back to the "other"
    /// format set.
    #[must_use]
    pub fn load_or_create(
        resource: &PublishedResource,
        existing: Option<Self>,
        defaults: &CacheDefaults,
    ) -> Self {
        let mut info = match existing {
            Some(info) => {
                debug!("Updating tile cache config for {}", resource.tile_layer_name());
                info
            }
            None => {
                debug!("Creating tile cache config for {}", resource.tile_layer_name());
                let mut info = Self::new(defaults, resource.kind());
                if matches!(resource, PublishedResource::Layer(_)) {
                    info.auto_cache_styles = defaults.cache_non_default_styles;
                }
                info
            }
        };
        info.id = resource.id().to_string();
        info.name = resource.tile_layer_name().to_string();
        info.check_automatic_styles(resource);
        info
    }

    /// The filter constraining `key`, if any (ASCII case-insensitive).
    #[must_use]
    pub fn parameter_filter(&self, key: &str) -> Option<&ParameterFilter> {
        find_parameter_filter(key, &self.parameter_filters)
    }

    /// Ensure the regex filter for `key` carries the canonical
    /// accept-all value.
    ///
    /// With no existing filter, one is inserted only when
    /// `create_if_absent` is set. An existing filter for the key, of
    /// any type, is always replaced by a freshly built accept-all
    /// regex filter, regardless of `create_if_absent`; this operation
    /// never removes a filter. Callers must compare filters by value,
    /// not identity, afterwards.
    pub fn update_accept_all_regex_filter(&mut self, key: &str, create_if_absent: bool) {
        self.put_accept_all(ParameterFilter::accept_all_regex(key), create_if_absent);
    }

    /// Ensure the float filter for `key` carries the canonical
    /// accept-all value (an empty allowed-value list). Same replacement
    /// policy as [`Self::update_accept_all_regex_filter`].
    pub fn update_accept_all_float_filter(&mut self, key: &str, create_if_absent: bool) {
        self.put_accept_all(ParameterFilter::accept_all_float(key), create_if_absent);
    }

    fn put_accept_all(&mut self, filter: ParameterFilter, create_if_absent: bool) {
        match find_index(filter.key(), &self.parameter_filters) {
            Some(i) => self.parameter_filters[i] = filter,
            None if create_if_absent => self.parameter_filters.push(filter),
            None => {}
        }
    }

    /// Replace the cached style set with the union of `default_style`
    /// and `styles`.
    ///
    /// The empty string is a valid marker meaning "no explicit default
    /// style" and participates in the set like any other key.
    pub fn set_cached_styles(&mut self, default_style: &str, styles: &BTreeSet<String>) {
        self.cached_styles = styles.clone();
        self.cached_styles.insert(default_style.to_string());
    }

    /// Reconcile the cached style set with the resource's current
    /// styles.
    ///
    /// No-op unless `auto_cache_styles` is set; groups carry no styles
    /// and are skipped. Corrects drift after styles were added, removed
    /// or renamed on the resource.
    pub fn check_automatic_styles(&mut self, resource: &PublishedResource) {
        if !self.auto_cache_styles {
            return;
        }
        let PublishedResource::Layer(layer) = resource else {
            return;
        };
        let live = layer.cache_style_keys();
        if self.cached_styles != live {
            debug!("Cached styles of {} drifted from the resource, resetting", self.name);
            self.set_cached_styles("", &layer.styles);
        }
    }

    /// Validate filters deserialized from an untrusted source.
    pub fn validate(&self) -> Result<(), FilterError> {
        for filter in &self.parameter_filters {
            filter.validate()?;
        }
        Ok(())
    }
}
