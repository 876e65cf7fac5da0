//! Parameter filters: constraints on the acceptable values of a named
//! caching dimension (elevation, time, a custom environment variable).
//!
//! Filters are immutable values. Reconciliation never mutates a filter
//! in place; it constructs a replacement and swaps it in, so equality
//! is structural and instance identity carries no meaning.

use serde::{Deserialize, Serialize};

/// The regex pattern that places no restriction on a dimension.
pub const ACCEPT_ALL_PATTERN: &str = ".*";

/// A constraint on the acceptable values of one caching dimension.
///
/// At most one filter exists per dimension key within a tile layer
/// config; keys compare ASCII case-insensitively.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ParameterFilter {
    /// Accepts values matching a regular expression.
    Regex {
        /// Dimension key (e.g. `ELEVATION`, `ENV`).
        key: String,
        /// The pattern; `.*` means "accept all".
        pattern: String,
    },
    /// Accepts values from a fixed list of numbers.
    Float {
        /// Dimension key.
        key: String,
        /// Allowed values; an empty list means "accept all".
        values: Vec<f32>,
    },
}

impl ParameterFilter {
    /// The canonical unrestricted regex filter for `key`.
    #[must_use]
    pub fn accept_all_regex(key: impl Into<String>) -> Self {
        Self::Regex {
            key: key.into(),
            pattern: ACCEPT_ALL_PATTERN.to_string(),
        }
    }

    /// The canonical unrestricted float filter for `key`.
    #[must_use]
    pub fn accept_all_float(key: impl Into<String>) -> Self {
        Self::Float {
            key: key.into(),
            values: Vec::new(),
        }
    }

    /// The dimension key this filter constrains.
    #[must_use]
    pub fn key(&self) -> &str {
        match self {
            Self::Regex { key, .. } | Self::Float { key, .. } => key,
        }
    }

    /// Whether this filter imposes no real restriction.
    #[must_use]
    pub fn is_accept_all(&self) -> bool {
        match self {
            Self::Regex { pattern, .. } => pattern == ACCEPT_ALL_PATTERN,
            Self::Float { values, .. } => values.is_empty(),
        }
    }

    /// Check a filter deserialized from an untrusted source: the regex
    /// pattern must compile and float values must be finite.
    pub fn validate(&self) -> Result<(), FilterError> {
        match self {
            Self::Regex { key, pattern } => {
                regex::Regex::new(pattern).map_err(|e| {
                    FilterError::InvalidRegex(e, pattern.clone(), key.clone())
                })?;
            }
            Self::Float { key, values } => {
                if let Some(bad) = values.iter().find(|v| !v.is_finite()) {
                    return Err(FilterError::NonFiniteValue(*bad, key.clone()));
                }
            }
        }
        Ok(())
    }
}

/// Look up the filter for a dimension key, comparing keys ASCII
/// case-insensitively. Returns `None` if the dimension is
/// unconstrained.
#[must_use]
pub fn find_parameter_filter<'a>(
    key: &str,
    filters: &'a [ParameterFilter],
) -> Option<&'a ParameterFilter> {
    find_index(key, filters).map(|i| &filters[i])
}

pub(crate) fn find_index(key: &str, filters: &[ParameterFilter]) -> Option<usize> {
    filters.iter().position(|f| f.key().eq_ignore_ascii_case(key))
}

/// Errors from validating a [`ParameterFilter`].
#[derive(thiserror::Error, Debug)]
pub enum FilterError {
    /// The regex pattern does not compile.
    #[error("Invalid regex {1:?} for dimension {2}: {0}")]
    InvalidRegex(#[source] regex::Error, String, String),

    /// A float filter carries a NaN or infinite value.
    #[error("Non-finite allowed value {0} for dimension {1}")]
    NonFiniteValue(f32, String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accept_all_canonical_values() {
        let regex = ParameterFilter::accept_all_regex("ENV");
        assert_eq!(regex.key(), "ENV");
        assert!(regex.is_accept_all());
        assert_eq!(
            regex,
            ParameterFilter::Regex {
                key: "ENV".to_string(),
                pattern: ".*".to_string()
            }
        );

        let float = ParameterFilter::accept_all_float("ELEVATION");
        assert!(float.is_accept_all());
        let ParameterFilter::Float { values, .. } = &float else {
            panic!("expected a float filter");
        };
        assert!(values.is_empty());
    }

    #[test]
    fn test_find_is_case_insensitive() {
        let filters = vec![
            ParameterFilter::accept_all_regex("ENV"),
            ParameterFilter::accept_all_float("ELEVATION"),
        ];

        assert!(find_parameter_filter("env", &filters).is_some());
        assert!(find_parameter_filter("Elevation", &filters).is_some());
        assert!(find_parameter_filter("TIME", &filters).is_none());

        let found = find_parameter_filter("env", &filters).unwrap();
        // the stored spelling is preserved
        assert_eq!(found.key(), "ENV");
    }

    #[test]
    fn test_validate_rejects_bad_regex() {
        let filter = ParameterFilter::Regex {
            key: "ENV".to_string(),
            pattern: "(unclosed".to_string(),
        };
        let err = filter.validate().unwrap_err();
        assert!(matches!(err, FilterError::InvalidRegex(..)));
        assert!(err.to_string().contains("ENV"));
    }

    #[test]
    fn test_validate_rejects_non_finite_floats() {
        let filter = ParameterFilter::Float {
            key: "ELEVATION".to_string(),
            values: vec![0.0, f32::NAN],
        };
        assert!(matches!(
            filter.validate(),
            Err(FilterError::NonFiniteValue(..))
        ));
    }

    #[test]
    fn test_validate_accepts_restricted_filters() {
        let regex = ParameterFilter::Regex {
            key: "ENV".to_string(),
            pattern: "^(dev|prod)$".to_string(),
        };
        regex.validate().unwrap();

        let float = ParameterFilter::Float {
            key: "ELEVATION".to_string(),
            values: vec![0.0, 100.0, 250.5],
        };
        float.validate().unwrap();
        assert!(!float.is_accept_all());
    }
}
