//! Channel - metadata for one time-series stream under a sensor.

use serde::{Deserialize, Serialize};

/// A named, unit-labeled data channel belonging to a sensor.
///
/// Channels are fetched fresh for every time-series request and used to
/// name the frame's value columns; they are never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Channel {
    /// Channel name as reported by the server (e.g. "Downtime").
    pub name: String,

    /// Unit string as reported by the server (e.g. "%", "ms").
    pub unit: String,
}

impl Channel {
    /// Create a channel.
    pub fn new(name: impl Into<String>, unit: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            unit: unit.into(),
        }
    }

    /// Display label for the channel's value column: `"<name> <unit>"`.
    pub fn label(&self) -> String {
        format!("{} {}", self.name, self.unit)
    }
}
