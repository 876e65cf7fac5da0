//! The reconciliation pass: walk a catalog snapshot and bring every
//! resource's tile layer config up to date.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use itertools::Itertools as _;
use layercache_core::TileLayerInfo;
use layercache_core::catalog::PublishedResource;
use layercache_core::config::CacheDefaults;
use log::{info, warn};

use crate::ConfigFileResult;
use crate::error::ConfigFileError::InvalidParameterFilters;

/// Validate previously saved tile layer configs, collecting every
/// offending message instead of stopping at the first.
pub fn validate_tile_layers(layers: &[TileLayerInfo]) -> ConfigFileResult<()> {
    let errors: Vec<String> = layers
        .iter()
        .filter_map(|layer| layer.validate().err().map(|e| format!("{}: {e}", layer.name)))
        .collect();
    if errors.is_empty() {
        Ok(())
    } else {
        Err(InvalidParameterFilters(errors))
    }
}

/// Walk the catalog in order and load-or-create the tile layer config
/// for each resource.
///
/// Prior configs are matched by id; duplicates keep the first entry.
/// Configs whose resource vanished from the catalog are dropped; the
/// catalog owns the lifecycle.
#[must_use]
pub fn reconcile(
    resources: &[PublishedResource],
    prior: Vec<TileLayerInfo>,
    defaults: &CacheDefaults,
) -> Vec<TileLayerInfo> {
    let mut by_id: HashMap<String, TileLayerInfo> = HashMap::new();
    for layer in prior {
        match by_id.entry(layer.id.clone()) {
            Entry::Occupied(e) => {
                warn!("Ignoring duplicate tile layer config for {} ({})", layer.name, e.key());
            }
            Entry::Vacant(v) => {
                v.insert(layer);
            }
        }
    }

    let mut result = Vec::with_capacity(resources.len());
    for resource in resources {
        let existing = by_id.remove(resource.id());
        let verb = if existing.is_some() { "Updated" } else { "Created" };
        let layer = TileLayerInfo::load_or_create(resource, existing, defaults);
        info!("{verb} tile cache config for {}", layer.name);
        result.push(layer);
    }

    if !by_id.is_empty() {
        warn!(
            "Dropping tile layer configs without a catalog resource: {}",
            by_id.values().map(|l| l.name.as_str()).sorted().join(", ")
        );
    }
    result
}
