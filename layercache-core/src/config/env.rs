//! Environment variable access for config substitution.
//!
//! Config files may reference `${VAR}` placeholders; substitution goes
//! through [`subst::VariableMap`] so tests can swap the process
//! environment for a fixed table.
//!
//! - [`OsEnv`]: production implementation
//! - [`FauxEnv`]: test implementation

use std::collections::HashMap;
use std::ffi::OsString;

use subst::VariableMap;

/// Production implementation backed by the process environment.
#[derive(Debug, Default)]
pub struct OsEnv;

impl<'a> VariableMap<'a> for OsEnv {
    type Value = String;

    fn get(&'a self, key: &str) -> Option<Self::Value> {
        std::env::var(key).ok()
    }
}

/// Test implementation with a fixed variable table.
#[derive(Debug, Default)]
pub struct FauxEnv(pub HashMap<&'static str, OsString>);

impl<'a> VariableMap<'a> for FauxEnv {
    type Value = String;

    fn get(&'a self, key: &str) -> Option<Self::Value> {
        self.0.get(key).map(|s| s.to_string_lossy().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_faux_env_lookup() {
        let env = FauxEnv::default();
        assert_eq!(env.get("FOO"), None);

        let env = FauxEnv(vec![("FOO", OsString::from("bar"))].into_iter().collect());
        assert_eq!(env.get("FOO"), Some("bar".to_string()));
    }
}
