//! Query parameter accumulation and serialization.

use std::fmt::Display;

/// An insertion-ordered set of named query parameters.
///
/// Built fresh for every request. The server does not require any ordering,
/// but insertion order is kept deterministic so request URLs reproduce
/// exactly in tests and logs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    entries: Vec<(String, String)>,
}

impl QueryParams {
    /// Create an empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a parameter. Values render through `Display`, so numbers and
    /// strings both work; empty values are kept.
    pub fn push(&mut self, key: impl Into<String>, value: impl Display) {
        self.entries.push((key.into(), value.to_string()));
    }

    /// Fluent variant of [`push`](Self::push).
    pub fn with(mut self, key: impl Into<String>, value: impl Display) -> Self {
        self.push(key, value);
        self
    }

    /// Number of parameters.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Serialize as the URL suffix the API expects: `&key=value` per entry,
    /// in insertion order, empty values included.
    ///
    /// No percent-escaping is performed; the server takes ids and content
    /// keywords verbatim. Callers embedding values that need escaping must
    /// escape them before pushing.
    pub fn to_query_string(&self) -> String {
        let mut out = String::new();
        for (key, value) in &self.entries {
            out.push('&');
            out.push_str(key);
            out.push('=');
            out.push_str(value);
        }
        out
    }
}
