//! Response transformers - one per query method.
//!
//! Each transformer takes the parsed JSON body (plus whatever context its
//! method needs) and reshapes it into a [`Frame`]. The server's response
//! shapes differ per method; the frame contract does not. All four keep
//! every emitted field row-aligned, padding missing values with JSON null.

use serde_json::{json, Value};

use prtgwatch_types::{Channel, Field, Frame};

use crate::date::from_server_date;
use crate::error::DataSourceError;
use crate::query::{RawQuery, TableQuery};

/// Transform a table listing.
///
/// Reads the record array under the content type's plural key. The first
/// emitted field is always `name` (string); each requested column follows
/// as a number-typed field named by its label. Values under the `datetime`
/// column key are converted to epoch milliseconds.
pub fn table_frame(body: &Value, query: &TableQuery) -> Result<Frame, DataSourceError> {
    let key = query.content.plural();
    let records = body.get(&key).and_then(Value::as_array).ok_or_else(|| {
        DataSourceError::Parse(format!("table response has no {key:?} array"))
    })?;

    let mut names = Vec::with_capacity(records.len());
    let mut columns: Vec<(&str, Vec<Value>)> = query
        .columns
        .iter()
        .map(|col| (col.label.as_str(), Vec::with_capacity(records.len())))
        .collect();

    for record in records {
        names.push(record.get("name").cloned().unwrap_or(Value::Null));

        for (col, (_, values)) in query.columns.iter().zip(columns.iter_mut()) {
            let cell = match record.get(&col.value) {
                Some(value) if col.value == "datetime" => match value.as_str() {
                    Some(raw) => json!(from_server_date(raw)?),
                    None => Value::Null,
                },
                Some(value) => value.clone(),
                None => Value::Null,
            };
            values.push(cell);
        }
    }

    let mut frame = Frame::new();
    frame.push_field(Field::string("name", names));
    for (label, values) in columns {
        frame.push_field(Field::number(label, values));
    }
    Ok(frame)
}

/// Transform a sensor's channel history.
///
/// Reads the `histdata` bucket array. Emits a `Time` field from each
/// bucket's `datetime`, then one number field per resolved channel, named
/// `"<channel name> <unit>"`. A channel absent from a bucket yields null at
/// that row.
pub fn historic_frame(body: &Value, channels: &[Channel]) -> Result<Frame, DataSourceError> {
    let buckets = body
        .get("histdata")
        .and_then(Value::as_array)
        .ok_or_else(|| DataSourceError::Parse("historic response has no histdata array".into()))?;

    let mut times = Vec::with_capacity(buckets.len());
    let mut series: Vec<Vec<Value>> = channels
        .iter()
        .map(|_| Vec::with_capacity(buckets.len()))
        .collect();

    for bucket in buckets {
        let raw = bucket
            .get("datetime")
            .and_then(Value::as_str)
            .ok_or_else(|| DataSourceError::Parse("history bucket has no datetime".into()))?;
        times.push(json!(from_server_date(raw)?));

        for (channel, values) in channels.iter().zip(series.iter_mut()) {
            values.push(bucket.get(&channel.name).cloned().unwrap_or(Value::Null));
        }
    }

    let mut frame = Frame::new();
    frame.push_field(Field::time("Time", times));
    for (channel, values) in channels.iter().zip(series) {
        frame.push_field(Field::number(channel.label(), values));
    }
    Ok(frame)
}

/// Transform a raw pass-through response.
///
/// The record-array key is re-derived from the original query text's
/// `content=` parameter. Every key observed across any record becomes a
/// field; a key first seen at row `i` is backfilled with `i` nulls and keys
/// absent from later records are padded, so the fields never desynchronize.
pub fn raw_frame(body: &Value, query: &RawQuery) -> Result<Frame, DataSourceError> {
    let key = query.content_key().ok_or_else(|| {
        DataSourceError::Parse("raw query text has no content= parameter".into())
    })?;
    let records = body.get(key).and_then(Value::as_array).ok_or_else(|| {
        DataSourceError::Parse(format!("raw response has no {key:?} array"))
    })?;

    let mut columns: Vec<(String, Vec<Value>)> = Vec::new();

    for (row, record) in records.iter().enumerate() {
        if let Some(object) = record.as_object() {
            for (name, value) in object {
                match columns.iter_mut().find(|(existing, _)| existing == name) {
                    Some((_, values)) => values.push(value.clone()),
                    None => {
                        let mut values = vec![Value::Null; row];
                        values.push(value.clone());
                        columns.push((name.clone(), values));
                    }
                }
            }
        }

        for (_, values) in &mut columns {
            if values.len() == row {
                values.push(Value::Null);
            }
        }
    }

    let mut frame = Frame::new();
    for (name, values) in columns {
        frame.push_field(Field::number(name, values));
    }
    Ok(frame)
}

/// Transform a status snapshot.
///
/// The response's top-level key/value pairs pass through uninterpreted as
/// `[key, value]` tuples in a single opaque `status` field.
pub fn status_frame(body: &Value) -> Result<Frame, DataSourceError> {
    let object = body
        .as_object()
        .ok_or_else(|| DataSourceError::Parse("status response is not an object".into()))?;

    let entries = object
        .iter()
        .map(|(key, value)| json!([key, value]))
        .collect();

    let mut frame = Frame::new();
    frame.push_field(Field::other("status", entries));
    Ok(frame)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::{ColumnSpec, ContentType};

    fn sensor_table_query(columns: Vec<ColumnSpec>) -> TableQuery {
        TableQuery {
            content: ContentType::Sensor,
            scope: "0".into(),
            columns,
            message_window: None,
        }
    }

    #[test]
    fn table_emits_name_field_first() {
        let body = json!({"sensors": [{"name": "CPU", "status": "Up"}]});
        let query = sensor_table_query(vec![ColumnSpec::new("status", "status")]);

        let frame = table_frame(&body, &query).unwrap();
        assert_eq!(frame.field_names(), vec!["name", "status"]);
        assert_eq!(frame.field("name").unwrap().values, vec![json!("CPU")]);
        assert_eq!(frame.field("status").unwrap().values, vec![json!("Up")]);
    }

    #[test]
    fn table_name_field_present_without_requested_columns() {
        let body = json!({"sensors": [{"name": "CPU"}, {"name": "Memory"}]});
        let frame = table_frame(&body, &sensor_table_query(Vec::new())).unwrap();

        assert_eq!(frame.field_names(), vec!["name"]);
        assert_eq!(frame.row_count(), 2);
    }

    #[test]
    fn table_column_label_differs_from_record_key() {
        let body = json!({"messages": [{"name": "m1", "message_raw": "rebooted"}]});
        let query = TableQuery {
            content: ContentType::Message,
            scope: "0".into(),
            columns: vec![ColumnSpec::new("message", "message_raw")],
            message_window: None,
        };

        let frame = table_frame(&body, &query).unwrap();
        assert_eq!(
            frame.field("message").unwrap().values,
            vec![json!("rebooted")]
        );
    }

    #[test]
    fn table_datetime_column_converts_to_epoch_ms() {
        let body = json!({"messages": [
            {"name": "m1", "datetime": "15/03/2023 10:00:00 - OK"},
        ]});
        let query = TableQuery {
            content: ContentType::Message,
            scope: "0".into(),
            columns: vec![ColumnSpec::new("datetime", "datetime")],
            message_window: None,
        };

        let frame = table_frame(&body, &query).unwrap();
        let expected = from_server_date("15/03/2023 10:00:00 - OK").unwrap();
        assert_eq!(
            frame.field("datetime").unwrap().values,
            vec![json!(expected)]
        );
    }

    #[test]
    fn table_missing_column_key_yields_null_and_stays_aligned() {
        let body = json!({"sensors": [
            {"name": "CPU", "status": "Up"},
            {"name": "Memory"},
        ]});
        let query = sensor_table_query(vec![ColumnSpec::new("status", "status")]);

        let frame = table_frame(&body, &query).unwrap();
        assert!(frame.is_aligned());
        assert_eq!(
            frame.field("status").unwrap().values,
            vec![json!("Up"), Value::Null]
        );
    }

    #[test]
    fn table_missing_record_array_is_an_error() {
        let body = json!({"devices": []});
        let query = sensor_table_query(Vec::new());
        assert!(matches!(
            table_frame(&body, &query),
            Err(DataSourceError::Parse(_))
        ));
    }

    #[test]
    fn historic_labels_columns_with_channel_name_and_unit() {
        let body = json!({"histdata": [
            {"datetime": "01/01/2023 00:00:00 - x", "Downtime": 5},
        ]});
        let channels = vec![Channel::new("Downtime", "%")];

        let frame = historic_frame(&body, &channels).unwrap();
        assert_eq!(frame.field_names(), vec!["Time", "Downtime %"]);
        assert_eq!(frame.row_count(), 1);

        let expected = from_server_date("01/01/2023 00:00:00 - x").unwrap();
        assert_eq!(frame.field("Time").unwrap().values, vec![json!(expected)]);
        assert_eq!(frame.field("Downtime %").unwrap().values, vec![json!(5)]);
    }

    #[test]
    fn historic_channel_absent_from_bucket_yields_null() {
        let body = json!({"histdata": [
            {"datetime": "01/01/2023 00:00:00 - x", "Traffic In": 10},
            {"datetime": "01/01/2023 00:05:00 - x"},
        ]});
        let channels = vec![Channel::new("Traffic In", "kbit/s")];

        let frame = historic_frame(&body, &channels).unwrap();
        assert!(frame.is_aligned());
        assert_eq!(
            frame.field("Traffic In kbit/s").unwrap().values,
            vec![json!(10), Value::Null]
        );
    }

    #[test]
    fn historic_bucket_without_datetime_is_an_error() {
        let body = json!({"histdata": [{"Downtime": 5}]});
        assert!(historic_frame(&body, &[Channel::new("Downtime", "%")]).is_err());
    }

    #[test]
    fn raw_reads_array_key_from_query_text() {
        let query = RawQuery {
            uri: "table".into(),
            query_text: "&content=devices&id=0".into(),
        };
        let body = json!({"devices": [{"objid": 40, "host": "10.0.0.1"}]});

        let frame = raw_frame(&body, &query).unwrap();
        assert_eq!(frame.field("objid").unwrap().values, vec![json!(40)]);
        assert_eq!(frame.field("host").unwrap().values, vec![json!("10.0.0.1")]);
    }

    #[test]
    fn raw_backfills_late_keys_and_pads_missing_ones() {
        let query = RawQuery {
            uri: "table".into(),
            query_text: "&content=sensors".into(),
        };
        let body = json!({"sensors": [
            {"objid": 1},
            {"objid": 2, "status": "Up"},
            {"status": "Down"},
        ]});

        let frame = raw_frame(&body, &query).unwrap();
        assert!(frame.is_aligned());
        assert_eq!(frame.row_count(), 3);
        assert_eq!(
            frame.field("objid").unwrap().values,
            vec![json!(1), json!(2), Value::Null]
        );
        assert_eq!(
            frame.field("status").unwrap().values,
            vec![Value::Null, json!("Up"), json!("Down")]
        );
    }

    #[test]
    fn raw_non_object_records_become_all_null_rows() {
        let query = RawQuery {
            uri: "table".into(),
            query_text: "&content=sensors".into(),
        };
        let body = json!({"sensors": [{"objid": 1}, 42]});

        let frame = raw_frame(&body, &query).unwrap();
        assert_eq!(
            frame.field("objid").unwrap().values,
            vec![json!(1), Value::Null]
        );
    }

    #[test]
    fn raw_without_content_parameter_is_an_error() {
        let query = RawQuery {
            uri: "table".into(),
            query_text: "&id=0".into(),
        };
        assert!(raw_frame(&json!({}), &query).is_err());
    }

    #[test]
    fn status_passes_entries_through_as_tuples() {
        let body = json!({"Version": "21.1.55", "NewAlarms": 3});
        let frame = status_frame(&body).unwrap();

        assert_eq!(frame.field_names(), vec!["status"]);
        let values = &frame.field("status").unwrap().values;
        assert_eq!(values.len(), 2);
        assert!(values.contains(&json!(["Version", "21.1.55"])));
        assert!(values.contains(&json!(["NewAlarms", 3])));
    }

    #[test]
    fn status_non_object_body_is_an_error() {
        assert!(status_frame(&json!([1, 2])).is_err());
    }
}
