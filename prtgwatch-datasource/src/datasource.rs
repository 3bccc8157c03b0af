//! PRTG data source: per-target dispatch and request orchestration.

use std::sync::Arc;
use std::time::Duration;

use futures_util::future::join_all;
use serde_json::Value;
use tracing::{debug, warn};

use prtgwatch_types::{Channel, Frame, TimeRange};

use crate::date::to_server_date;
use crate::error::DataSourceError;
use crate::params::QueryParams;
use crate::query::{ContentType, HistoricQuery, Query, RawQuery, TableQuery};
use crate::scope::ScopeSelector;
use crate::transform;
use crate::transport::{HttpTransport, Transport};
use crate::variables::BoundVariables;

/// Connection settings, set once at construction and read on every request.
#[derive(Debug, Clone)]
pub struct ConnectionConfig {
    /// Server hostname, without scheme or path.
    pub hostname: String,
    /// API username.
    pub username: String,
    /// API passhash credential.
    pub passhash: String,
}

/// One object from a lookup query, suitable for a dashboard variable picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectRef {
    /// Display name of the object.
    pub text: String,
    /// Object id as a string.
    pub id: String,
}

/// Data source for the PRTG monitoring API.
///
/// Holds the connection configuration and a shared transport; both are
/// immutable after construction, so one instance serves any number of
/// concurrent query batches.
#[derive(Debug, Clone)]
pub struct PrtgDataSource {
    transport: Arc<dyn Transport>,
    config: ConnectionConfig,
}

impl PrtgDataSource {
    /// Create a new builder for configuring the data source.
    pub fn builder() -> PrtgDataSourceBuilder {
        PrtgDataSourceBuilder::default()
    }

    /// Execute one query batch: one frame per target, in target order.
    ///
    /// Target pipelines run concurrently and independently; a failing
    /// target settles as an error-flagged empty frame without aborting its
    /// siblings. Unrecognized query methods settle as plain empty frames.
    pub async fn query(
        &self,
        targets: &[Query],
        range: TimeRange,
        variables: &BoundVariables,
    ) -> Vec<Frame> {
        let pipelines = targets
            .iter()
            .map(|target| self.run_target(target, range, variables));
        join_all(pipelines).await
    }

    async fn run_target(
        &self,
        target: &Query,
        range: TimeRange,
        variables: &BoundVariables,
    ) -> Frame {
        let result = match target {
            Query::Table(query) => self.table_query(query, variables).await,
            Query::HistoricData(query) => self.historic_query(query, range, variables).await,
            Query::Raw(query) => self.raw_query(query, variables).await,
            Query::Status => self.status_query().await,
            Query::Unsupported => return Frame::new(),
        };

        result.unwrap_or_else(|e| {
            warn!(error = %e, "target pipeline failed, emitting error frame");
            Frame::with_error(e.to_string())
        })
    }

    async fn table_query(
        &self,
        query: &TableQuery,
        variables: &BoundVariables,
    ) -> Result<Frame, DataSourceError> {
        // The name column always rides along with whatever was requested.
        let mut column_keys = vec!["name".to_string()];
        column_keys.extend(query.columns.iter().map(|col| col.value.clone()));

        let mut params = QueryParams::new()
            .with("content", query.content.plural())
            .with("id", query.scope.resolve(variables))
            .with("columns", column_keys.join(","));

        if query.content == ContentType::Message {
            if let Some(window) = query.message_window {
                params.push("filter_drel", window.as_str());
            }
        }

        let body = self.api_request("table", &params.to_query_string()).await?;
        transform::table_frame(&body, query)
    }

    async fn historic_query(
        &self,
        query: &HistoricQuery,
        range: TimeRange,
        variables: &BoundVariables,
    ) -> Result<Frame, DataSourceError> {
        let id = query.sensor.resolve(variables);

        let params = QueryParams::new()
            .with("avg", 0)
            .with("usecaption", "1")
            .with("id", &id)
            .with("sdate", to_server_date(range.from)?)
            .with("edate", to_server_date(range.to)?);

        // Channel metadata must resolve before the data fetch: the history
        // columns cannot be labeled without it.
        let channels = self.fetch_channels(&id).await?;

        let body = self
            .api_request("historicdata", &params.to_query_string())
            .await?;
        transform::historic_frame(&body, &channels)
    }

    async fn raw_query(
        &self,
        query: &RawQuery,
        variables: &BoundVariables,
    ) -> Result<Frame, DataSourceError> {
        let params = variables.substitute(&query.query_text);
        let body = self.api_request(&query.uri, &params).await?;
        transform::raw_frame(&body, query)
    }

    async fn status_query(&self) -> Result<Frame, DataSourceError> {
        let body = self.api_request("status", "").await?;
        transform::status_frame(&body)
    }

    /// Fetch the named data channels of a sensor.
    ///
    /// One request per call; channels are request-scoped metadata and are
    /// not cached across calls.
    async fn fetch_channels(&self, sensor_id: &str) -> Result<Vec<Channel>, DataSourceError> {
        let params = QueryParams::new().with("id", sensor_id);
        let body = self
            .api_request("chartlegend", &params.to_query_string())
            .await?;

        let items = body.get("items").and_then(Value::as_array).ok_or_else(|| {
            DataSourceError::Parse("chartlegend response has no items array".into())
        })?;

        items
            .iter()
            .map(|item| {
                let name = item.get("name").and_then(Value::as_str).ok_or_else(|| {
                    DataSourceError::Parse("channel item has no name".into())
                })?;
                let unit = item.get("unit").and_then(Value::as_str).unwrap_or("");
                Ok(Channel::new(name, unit))
            })
            .collect()
    }

    /// Look up objects for a dashboard variable picker.
    ///
    /// The query syntax is `"<content>:<parent>"`, where parent is a scope
    /// selector (`"sensor:*"` lists every sensor; `"device:$group"` lists
    /// devices under the bound group).
    pub async fn find_objects(
        &self,
        query: &str,
        variables: &BoundVariables,
    ) -> Result<Vec<ObjectRef>, DataSourceError> {
        let (content, parent) = query.split_once(':').ok_or_else(|| {
            DataSourceError::Parse(format!("expected content:parent lookup, got {query:?}"))
        })?;
        let parent = ScopeSelector::new(parent).resolve(variables);
        let key = format!("{content}s");

        let params = QueryParams::new()
            .with("id", parent)
            .with("content", &key)
            .with("columns", "name,objid");

        let body = self.api_request("table", &params.to_query_string()).await?;
        let records = body.get(&key).and_then(Value::as_array).ok_or_else(|| {
            DataSourceError::Parse(format!("lookup response has no {key:?} array"))
        })?;

        Ok(records
            .iter()
            .map(|record| ObjectRef {
                text: record
                    .get("name")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string(),
                id: id_text(record.get("objid").unwrap_or(&Value::Null)),
            })
            .collect())
    }

    /// Probe the connection by requesting the status endpoint.
    pub async fn test_connection(&self) -> Result<(), DataSourceError> {
        self.api_request("status", "").await.map(|_| ())
    }

    async fn api_request(&self, method: &str, params: &str) -> Result<Value, DataSourceError> {
        let url = format!(
            "https://{}/api/{}.json?username={}&passhash={}{}",
            self.config.hostname, method, self.config.username, self.config.passhash, params
        );
        // The URL carries credentials; log the endpoint only.
        debug!(%method, "issuing API request");
        self.transport.get(&url).await
    }
}

fn id_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Builder for `PrtgDataSource`.
#[derive(Debug, Default)]
pub struct PrtgDataSourceBuilder {
    hostname: Option<String>,
    username: Option<String>,
    passhash: Option<String>,
    timeout: Option<Duration>,
    transport: Option<Arc<dyn Transport>>,
}

impl PrtgDataSourceBuilder {
    /// Set the server hostname (e.g. "prtg.example.com").
    pub fn hostname(mut self, hostname: impl Into<String>) -> Self {
        self.hostname = Some(hostname.into());
        self
    }

    /// Set the username and passhash for authentication.
    pub fn credentials(mut self, username: impl Into<String>, passhash: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self.passhash = Some(passhash.into());
        self
    }

    /// Set the request timeout (default: 10 seconds).
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Substitute a custom transport; the default issues HTTPS requests.
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Build the data source.
    pub fn build(self) -> PrtgDataSource {
        let timeout = self.timeout.unwrap_or(Duration::from_secs(10));
        let transport = self
            .transport
            .unwrap_or_else(|| Arc::new(HttpTransport::new(timeout)));

        PrtgDataSource {
            transport,
            config: ConnectionConfig {
                hostname: self.hostname.unwrap_or_else(|| "localhost".to_string()),
                username: self.username.unwrap_or_else(|| "prtgadmin".to_string()),
                passhash: self.passhash.unwrap_or_default(),
            },
        }
    }
}
