//! # prtgwatch-datasource
//!
//! Query translation and response transformation for the PRTG monitoring
//! API. Dashboard targets describe *what* to fetch (a tabular listing, a
//! sensor's history, a raw endpoint, a status snapshot); this crate turns
//! each description into the right REST request and reshapes the server's
//! method-specific JSON into the uniform columnar [`Frame`] the dashboard
//! renders.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use prtgwatch_datasource::{
//!     BoundVariables, ColumnSpec, ContentType, PrtgDataSource, Query, TableQuery,
//! };
//! use prtgwatch_types::TimeRange;
//!
//! #[tokio::main]
//! async fn main() {
//!     let source = PrtgDataSource::builder()
//!         .hostname("prtg.example.com")
//!         .credentials("admin", "passhash")
//!         .build();
//!
//!     let targets = vec![Query::Table(TableQuery {
//!         content: ContentType::Sensor,
//!         scope: "*".into(),
//!         columns: vec![ColumnSpec::new("status", "status")],
//!         message_window: None,
//!     })];
//!
//!     let range = TimeRange::new(1_672_531_200_000, 1_672_617_600_000);
//!     let frames = source.query(&targets, range, &BoundVariables::new()).await;
//!
//!     println!("{} sensors", frames[0].row_count());
//! }
//! ```
//!
//! ## Failure model
//!
//! Target pipelines in a batch are independent: a transport error or a
//! malformed response downgrades that target to an error-flagged empty
//! frame while its siblings complete normally. Unrecognized query methods
//! degrade to plain empty frames. Scope-variable resolution is best-effort
//! by contract and never fails a request on its own.

pub mod date;
pub mod datasource;
pub mod error;
pub mod params;
pub mod query;
pub mod scope;
pub mod transform;
pub mod transport;
pub mod variables;

pub use datasource::{ConnectionConfig, ObjectRef, PrtgDataSource, PrtgDataSourceBuilder};
pub use error::DataSourceError;
pub use params::QueryParams;
pub use query::{
    ColumnSpec, ContentType, HistoricQuery, MessageWindow, Query, RawQuery, TableQuery,
};
pub use scope::{ScopeSelector, ALL_SCOPE, VARIABLE_MARKER};
pub use transport::{HttpTransport, Transport};
pub use variables::{BoundVariables, VariableValue};

// Re-export frame types for convenience
pub use prtgwatch_types::{Channel, Field, FieldType, Frame, TimeRange};
