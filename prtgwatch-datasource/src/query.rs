//! Query descriptors - one per dashboard target.
//!
//! The query method is a tagged enum rather than a string discriminant, so
//! each method carries exactly the fields it needs and dispatch is checked
//! by the compiler. Methods the engine does not recognize deserialize into
//! [`Query::Unsupported`] and degrade to an empty frame instead of failing
//! the batch.

use serde::{Deserialize, Serialize};

use crate::scope::ScopeSelector;

/// One dashboard target's query descriptor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "lowercase")]
pub enum Query {
    /// Tabular listing of monitoring objects.
    Table(TableQuery),

    /// Time-series history for one sensor.
    #[serde(rename = "historicdata")]
    HistoricData(HistoricQuery),

    /// Raw pass-through to an arbitrary API endpoint.
    Raw(RawQuery),

    /// Server status snapshot.
    Status,

    /// Any method value the engine does not recognize.
    #[serde(other)]
    Unsupported,
}

/// Category of monitoring object listed by a table query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Group,
    Device,
    Sensor,
    Message,
}

impl ContentType {
    /// Singular content keyword.
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Group => "group",
            ContentType::Device => "device",
            ContentType::Sensor => "sensor",
            ContentType::Message => "message",
        }
    }

    /// Plural form used as the `content` parameter and as the response
    /// body's record-array key.
    pub fn plural(&self) -> String {
        format!("{}s", self.as_str())
    }
}

/// One requested table column: the record key to read and the field label
/// to emit. The two differ where the API exposes raw variants (label
/// `message` reads key `message_raw`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSpec {
    pub label: String,
    pub value: String,
}

impl ColumnSpec {
    /// Create a column spec.
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// Relative time window for message listings, sent as `filter_drel`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageWindow {
    #[serde(rename = "today")]
    Today,
    #[serde(rename = "yesterday")]
    Yesterday,
    #[serde(rename = "7days")]
    SevenDays,
    #[serde(rename = "30days")]
    ThirtyDays,
    #[serde(rename = "6months")]
    SixMonths,
    #[serde(rename = "12months")]
    TwelveMonths,
}

impl MessageWindow {
    /// Wire value for the `filter_drel` parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageWindow::Today => "today",
            MessageWindow::Yesterday => "yesterday",
            MessageWindow::SevenDays => "7days",
            MessageWindow::ThirtyDays => "30days",
            MessageWindow::SixMonths => "6months",
            MessageWindow::TwelveMonths => "12months",
        }
    }
}

/// Table query: list objects of one content type under a scope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableQuery {
    /// Category of object to list.
    pub content: ContentType,

    /// Scope to list under (id, sentinel, or variable reference).
    pub scope: ScopeSelector,

    /// Requested columns, in emission order. The `name` column is always
    /// included implicitly and need not be listed.
    #[serde(default)]
    pub columns: Vec<ColumnSpec>,

    /// Relative time window, only meaningful for message listings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_window: Option<MessageWindow>,
}

/// Historic query: fetch a sensor's channel history over the batch's
/// time range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricQuery {
    /// Sensor to read (id, sentinel, or variable reference).
    pub sensor: ScopeSelector,
}

/// Raw query: caller-specified endpoint and parameter string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawQuery {
    /// API endpoint name (the `<uri>` in `/api/<uri>.json`).
    pub uri: String,

    /// Parameter suffix sent verbatim after variable substitution,
    /// e.g. `"&content=sensors&id=$device"`.
    pub query_text: String,
}

impl RawQuery {
    /// Extract the `content=<value>` parameter from the original query
    /// text; the response transformer reads the record array under this
    /// key. Returns `None` when the parameter is absent or empty.
    pub fn content_key(&self) -> Option<&str> {
        let start = self.query_text.find("content=")? + "content=".len();
        let value = self.query_text[start..].split('&').next().unwrap_or("");
        (!value.is_empty()).then_some(value)
    }
}
