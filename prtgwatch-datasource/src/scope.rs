//! Scope selector resolution.
//!
//! A scope selector identifies a node in the monitoring hierarchy (group,
//! device or sensor). The raw value is either a concrete object id, the
//! all-scope sentinel, or a `$variable` reference bound at request time.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::variables::BoundVariables;

/// Sentinel selecting the whole hierarchy; resolves to object id `"0"`.
pub const ALL_SCOPE: &str = "*";

/// Marker prefix for dashboard variable references.
pub const VARIABLE_MARKER: char = '$';

/// A raw scope selector, resolved to a concrete id at request time and
/// never persisted afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScopeSelector(String);

impl ScopeSelector {
    /// Wrap a raw selector value.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// The raw, unresolved value.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Resolve to a concrete id string.
    ///
    /// - the all-scope sentinel resolves to `"0"` (the hierarchy root)
    /// - `$name` substitutes the variable's current binding; a multi-select
    ///   binding renders as a `{a,b}` list
    /// - anything else passes through verbatim
    ///
    /// Resolution is best-effort and never fails: an unbound variable logs
    /// a warning and the raw text goes through unresolved, so one stale
    /// variable cannot block a dashboard from rendering.
    pub fn resolve(&self, variables: &BoundVariables) -> String {
        if self.0 == ALL_SCOPE {
            return "0".to_string();
        }

        if let Some(name) = self.0.strip_prefix(VARIABLE_MARKER) {
            match variables.get(name) {
                Some(value) => return value.render(),
                None => {
                    warn!(selector = %self.0, "unresolved scope variable, passing through");
                    return self.0.clone();
                }
            }
        }

        self.0.clone()
    }
}

impl From<&str> for ScopeSelector {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for ScopeSelector {
    fn from(raw: String) -> Self {
        Self::new(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_scope_sentinel_resolves_to_root_id() {
        let vars = BoundVariables::new();
        assert_eq!(ScopeSelector::new("*").resolve(&vars), "0");
    }

    #[test]
    fn literal_id_passes_through() {
        let vars = BoundVariables::new();
        assert_eq!(ScopeSelector::new("2044").resolve(&vars), "2044");
    }

    #[test]
    fn bound_variable_substitutes() {
        let vars = BoundVariables::new().with("device", "1234");
        assert_eq!(ScopeSelector::new("$device").resolve(&vars), "1234");
    }

    #[test]
    fn multi_valued_variable_renders_as_list() {
        let vars = BoundVariables::new().with_multi("sensors", ["1", "2"]);
        assert_eq!(ScopeSelector::new("$sensors").resolve(&vars), "{1,2}");
    }

    #[test]
    fn unbound_variable_passes_through_unresolved() {
        let vars = BoundVariables::new();
        assert_eq!(ScopeSelector::new("$missing").resolve(&vars), "$missing");
    }

    #[test]
    fn selector_deserializes_from_bare_string() {
        let s: ScopeSelector = serde_json::from_str("\"$device\"").unwrap();
        assert_eq!(s.as_str(), "$device");
    }
}
