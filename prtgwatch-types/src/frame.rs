//! Frame - the common columnar output format.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Declared type of a field's values.
///
/// This is a rendering hint for the dashboard, not an enforced constraint:
/// the monitoring server is loose about what it returns (a "number" column
/// can carry `"Up"`), and the frame passes cell values through verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    /// Textual values (entity names, labels).
    String,
    /// Numeric values, including timestamps stored as epoch milliseconds.
    Number,
    /// Time axis values, epoch milliseconds.
    Time,
    /// Uninterpreted values passed through as-is.
    Other,
}

/// One named, typed column of a frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    /// Display name of the field.
    pub name: String,

    /// Declared value type.
    #[serde(rename = "type")]
    pub field_type: FieldType,

    /// Cell values, aligned by row index with every other field in the frame.
    pub values: Vec<Value>,
}

impl Field {
    /// Create a field with an explicit type.
    pub fn new(name: impl Into<String>, field_type: FieldType, values: Vec<Value>) -> Self {
        Self {
            name: name.into(),
            field_type,
            values,
        }
    }

    /// Create a string-typed field.
    pub fn string(name: impl Into<String>, values: Vec<Value>) -> Self {
        Self::new(name, FieldType::String, values)
    }

    /// Create a number-typed field.
    pub fn number(name: impl Into<String>, values: Vec<Value>) -> Self {
        Self::new(name, FieldType::Number, values)
    }

    /// Create a time-typed field.
    pub fn time(name: impl Into<String>, values: Vec<Value>) -> Self {
        Self::new(name, FieldType::Time, values)
    }

    /// Create an opaque field.
    pub fn other(name: impl Into<String>, values: Vec<Value>) -> Self {
        Self::new(name, FieldType::Other, values)
    }

    /// Number of rows in the field.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if the field has no rows.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Append a value.
    pub fn push(&mut self, value: Value) {
        self.values.push(value);
    }
}

/// An ordered set of equal-length named fields.
///
/// Every query method's response reshapes into one of these. An empty frame
/// (no fields) is the degraded result for unsupported query methods; a frame
/// carrying an [`error`](Frame::error) marks a per-target failure without
/// aborting sibling targets.
///
/// # Example
///
/// ```rust
/// use prtgwatch_types::{Field, Frame};
///
/// let frame = Frame::builder()
///     .field(Field::string("name", vec!["CPU".into()]))
///     .field(Field::number("status", vec!["Up".into()]))
///     .build();
///
/// assert_eq!(frame.field_names(), vec!["name", "status"]);
/// assert_eq!(frame.row_count(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Frame {
    /// Fields in emission order.
    pub fields: Vec<Field>,

    /// Failure description when this frame stands in for a failed target.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Frame {
    /// Create an empty frame.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty frame flagged with a failure description.
    pub fn with_error(message: impl Into<String>) -> Self {
        Self {
            fields: Vec::new(),
            error: Some(message.into()),
        }
    }

    /// Create a builder for constructing frames.
    pub fn builder() -> FrameBuilder {
        FrameBuilder::new()
    }

    /// Check if the frame has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Check if the frame is flagged as a failed target.
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }

    /// Number of fields.
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// Number of rows, taken from the first field.
    pub fn row_count(&self) -> usize {
        self.fields.first().map_or(0, Field::len)
    }

    /// Append a field.
    pub fn push_field(&mut self, field: Field) {
        self.fields.push(field);
    }

    /// Look up a field by name.
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Field names in emission order.
    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }

    /// Check that every field has the same number of rows.
    pub fn is_aligned(&self) -> bool {
        let rows = self.row_count();
        self.fields.iter().all(|f| f.len() == rows)
    }
}

/// Builder for constructing `Frame` instances.
#[derive(Debug, Default)]
pub struct FrameBuilder {
    fields: Vec<Field>,
    error: Option<String>,
}

impl FrameBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a field.
    pub fn field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    /// Flag the frame with a failure description.
    pub fn error(mut self, message: impl Into<String>) -> Self {
        self.error = Some(message.into());
        self
    }

    /// Build the frame.
    pub fn build(self) -> Frame {
        Frame {
            fields: self.fields,
            error: self.error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_frame_has_no_fields_or_rows() {
        let f = Frame::new();
        assert!(f.is_empty());
        assert!(!f.is_error());
        assert_eq!(f.field_count(), 0);
        assert_eq!(f.row_count(), 0);
        assert!(f.is_aligned());
    }

    #[test]
    fn error_frame_is_empty_and_flagged() {
        let f = Frame::with_error("request timed out");
        assert!(f.is_empty());
        assert!(f.is_error());
        assert_eq!(f.error.as_deref(), Some("request timed out"));
    }

    #[test]
    fn builder_preserves_field_order() {
        let f = Frame::builder()
            .field(Field::string("name", vec![json!("CPU")]))
            .field(Field::number("status", vec![json!("Up")]))
            .field(Field::number("uptime", vec![json!(99.5)]))
            .build();

        assert_eq!(f.field_names(), vec!["name", "status", "uptime"]);
    }

    #[test]
    fn row_count_comes_from_first_field() {
        let f = Frame::builder()
            .field(Field::string("name", vec![json!("a"), json!("b")]))
            .build();
        assert_eq!(f.row_count(), 2);
    }

    #[test]
    fn alignment_detects_short_field() {
        let f = Frame::builder()
            .field(Field::string("name", vec![json!("a"), json!("b")]))
            .field(Field::number("status", vec![json!(1)]))
            .build();
        assert!(!f.is_aligned());
    }

    #[test]
    fn field_lookup_by_name() {
        let f = Frame::builder()
            .field(Field::string("name", vec![json!("CPU")]))
            .build();

        assert_eq!(f.field("name").unwrap().values, vec![json!("CPU")]);
        assert!(f.field("missing").is_none());
    }

    #[test]
    fn field_push_appends_rows() {
        let mut field = Field::number("status", Vec::new());
        assert!(field.is_empty());
        field.push(json!(1));
        field.push(Value::Null);
        assert_eq!(field.len(), 2);
        assert_eq!(field.values[1], Value::Null);
    }

    #[test]
    fn field_type_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&FieldType::Number).unwrap(),
            "\"number\""
        );
        assert_eq!(serde_json::to_string(&FieldType::Time).unwrap(), "\"time\"");
    }

    #[test]
    fn frame_serializes_without_error_key_when_ok() {
        let f = Frame::builder()
            .field(Field::time("Time", vec![json!(1000)]))
            .build();

        let encoded = serde_json::to_value(&f).unwrap();
        assert!(encoded.get("error").is_none());
        assert_eq!(encoded["fields"][0]["type"], json!("time"));
    }

    #[test]
    fn frame_round_trips_through_json() {
        let f = Frame::builder()
            .field(Field::other("status", vec![json!(["Version", "21.1"])]))
            .error("partial")
            .build();

        let encoded = serde_json::to_string(&f).unwrap();
        let decoded: Frame = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, f);
    }
}
