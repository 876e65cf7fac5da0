//! Read-only snapshots of catalog resources.
//!
//! The catalog subsystem owns the real resources; this crate only ever
//! sees an immutable view of the parts that matter for tile caching:
//! identity, the cache-layer name, the resource kind, and the style set.
//! A snapshot is either a single published layer or a named group of
//! layers (groups may nest).

use std::collections::BTreeSet;

use serde::{Deserialize, Deserializer, Serialize};

/// Kind tag of a single published layer.
///
/// Unknown tags deserialize as [`ResourceKind::Other`] so that a catalog
/// written by a newer system still produces a usable snapshot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    /// Feature data rendered to tiles (e.g. a PostGIS table).
    Vector,
    /// Coverage/imagery data.
    Raster,
    /// Anything else, including kinds this version does not know about.
    #[default]
    Other,
}

impl<'de> Deserialize<'de> for ResourceKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let tag = String::deserialize(deserializer)?;
        Ok(match tag.to_ascii_lowercase().as_str() {
            "vector" => Self::Vector,
            "raster" => Self::Raster,
            _ => Self::Other,
        })
    }
}

/// Snapshot of a single published layer.
#[serde_with::skip_serializing_none]
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerSnapshot {
    /// Catalog identity of the layer.
    pub id: String,
    /// Cache-layer name, already prefixed (e.g. `topp:states`).
    pub name: String,
    /// Kind tag; missing tags fall back to [`ResourceKind::Other`].
    #[serde(default)]
    pub kind: ResourceKind,
    /// Name of the default rendering style, if one is set.
    pub default_style: Option<String>,
    /// Alternate style names, excluding the default style.
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub styles: BTreeSet<String>,
}

impl LayerSnapshot {
    /// The style keys a tile cache would maintain for this layer right
    /// now: the empty string standing for the default style, plus every
    /// alternate style name.
    #[must_use]
    pub fn cache_style_keys(&self) -> BTreeSet<String> {
        let mut keys = self.styles.clone();
        keys.insert(String::new());
        keys
    }
}

/// Snapshot of a named layer group.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupSnapshot {
    /// Catalog identity of the group.
    pub id: String,
    /// Cache-layer name of the group itself, not of any member.
    pub name: String,
    /// Ordered member resources; members may themselves be groups.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub members: Vec<PublishedResource>,
}

/// A catalog resource as seen by the tile-cache configuration: a single
/// layer or a group of layers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PublishedResource {
    /// A single published layer.
    Layer(LayerSnapshot),
    /// A named group of layers.
    Group(GroupSnapshot),
}

impl PublishedResource {
    /// Catalog identity of the resource.
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Layer(layer) => &layer.id,
            Self::Group(group) => &group.id,
        }
    }

    /// The name the tile cache knows this resource by. For a group this
    /// is the group's own name, never a member's.
    #[must_use]
    pub fn tile_layer_name(&self) -> &str {
        match self {
            Self::Layer(layer) => &layer.name,
            Self::Group(group) => &group.name,
        }
    }

    /// Kind of the resource; groups have none and are format-agnostic
    /// to their members.
    #[must_use]
    pub fn kind(&self) -> Option<ResourceKind> {
        match self {
            Self::Layer(layer) => Some(layer.kind),
            Self::Group(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layer(name: &str) -> LayerSnapshot {
        LayerSnapshot {
            id: format!("{name}-id"),
            name: name.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_unknown_kind_falls_back_to_other() {
        let yaml = "type: layer\nid: l1-id\nname: l1\nkind: point-cloud\n";
        let resource: PublishedResource = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(resource.kind(), Some(ResourceKind::Other));
    }

    #[test]
    fn test_missing_kind_is_other() {
        let yaml = "type: layer\nid: l1-id\nname: l1\n";
        let resource: PublishedResource = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(resource.kind(), Some(ResourceKind::Other));
    }

    #[test]
    fn test_group_identity_is_its_own() {
        let group = PublishedResource::Group(GroupSnapshot {
            id: "testGroup-id".to_string(),
            name: "testGroup".to_string(),
            members: vec![PublishedResource::Layer(layer("testLayer"))],
        });
        assert_eq!(group.tile_layer_name(), "testGroup");
        assert_eq!(group.id(), "testGroup-id");
        assert_eq!(group.kind(), None);
    }

    #[test]
    fn test_cache_style_keys_include_default_marker() {
        let snapshot = LayerSnapshot {
            styles: ["style1", "style2"].map(str::to_string).into(),
            default_style: Some("population".to_string()),
            ..layer("states")
        };
        let keys = snapshot.cache_style_keys();
        assert_eq!(keys, ["", "style1", "style2"].map(str::to_string).into());
    }

    #[test]
    fn test_nested_group_round_trip() {
        let group = PublishedResource::Group(GroupSnapshot {
            id: "outer-id".to_string(),
            name: "outer".to_string(),
            members: vec![
                PublishedResource::Layer(LayerSnapshot {
                    kind: ResourceKind::Raster,
                    ..layer("imagery")
                }),
                PublishedResource::Group(GroupSnapshot {
                    id: "inner-id".to_string(),
                    name: "inner".to_string(),
                    members: vec![PublishedResource::Layer(layer("roads"))],
                }),
            ],
        });

        insta::assert_yaml_snapshot!(group, @r"
        type: group
        id: outer-id
        name: outer
        members:
          - type: layer
            id: imagery-id
            name: imagery
            kind: raster
          - type: group
            id: inner-id
            name: inner
            members:
              - type: layer
                id: roads-id
                name: roads
                kind: other
        ");

        let yaml = serde_yaml::to_string(&group).unwrap();
        let parsed: PublishedResource = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed, group);
    }
}
