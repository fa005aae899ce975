//! Environment-backed configuration lookup.
//!
//! Model configuration is read from process environment variables. The
//! [`EnvLookup`] trait lets callers swap in a fixed map so resolution can be
//! exercised without touching process-global state.

use std::collections::HashMap;

/// Source of configuration variables.
pub trait EnvLookup: Send + Sync {
    /// Raw value of a variable, if set.
    fn raw(&self, key: &str) -> Option<String>;

    /// Trimmed value of a variable. Empty or whitespace-only values count as unset.
    fn get(&self, key: &str) -> Option<String> {
        self.raw(key)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    /// First set variable among `keys`, in order.
    fn first_of(&self, keys: &[&str]) -> Option<String> {
        keys.iter().find_map(|k| self.get(k))
    }
}

/// Reads the live process environment at call time.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvLookup for ProcessEnv {
    fn raw(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

/// Fixed set of variables.
#[derive(Debug, Clone, Default)]
pub struct MapEnv {
    vars: HashMap<String, String>,
}

impl MapEnv {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(key.into(), value.into());
        self
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.vars.insert(key.into(), value.into());
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MapEnv {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

impl EnvLookup for MapEnv {
    fn raw(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_values_are_unset() {
        let env = MapEnv::new().with("A", "   ").with("B", " value ");
        assert_eq!(env.get("A"), None);
        assert_eq!(env.get("B").as_deref(), Some("value"));
        assert_eq!(env.get("C"), None);
    }

    #[test]
    fn test_first_of_respects_order() {
        let env: MapEnv = [("SECOND", "two"), ("THIRD", "three")].into_iter().collect();
        assert_eq!(env.first_of(&["FIRST", "SECOND", "THIRD"]).as_deref(), Some("two"));
        assert_eq!(env.first_of(&["FIRST"]), None);
    }
}
