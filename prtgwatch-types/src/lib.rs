//! # prtgwatch-types
//!
//! Columnar frame types for PRTG dashboard data. This crate defines the
//! universal schema that query engines emit and dashboard panels consume:
//! an ordered set of equal-length, named, typed fields.
//!
//! ## Design Goals
//!
//! - **Method agnostic**: table listings, time-series history, raw
//!   pass-through and status snapshots all reshape into the same frame
//! - **Row aligned**: row `i` across every field of a frame describes one
//!   entity or observation
//! - **Loosely typed cells**: the declared field type is a rendering hint;
//!   cell values carry whatever JSON the monitoring server returned
//! - **Ergonomic builders**: fluent API for constructing frames
//!
//! ## Example
//!
//! ```rust
//! use prtgwatch_types::{Field, Frame};
//!
//! let frame = Frame::builder()
//!     .field(Field::string("name", vec!["CPU".into(), "Memory".into()]))
//!     .field(Field::number("status", vec!["Up".into(), "Down".into()]))
//!     .build();
//!
//! assert_eq!(frame.row_count(), 2);
//! assert!(frame.is_aligned());
//! ```

mod channel;
mod frame;
mod time;

pub use channel::*;
pub use frame::*;
pub use time::*;
