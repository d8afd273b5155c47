//! Backend-agnostic frame adapter.
//!
//! Analytics code wraps whatever frame it was handed, works against the
//! neutral [`WrappedFrame`] API, and hands back a frame of the same kind:
//!
//! ```rust
//! use sporty_frames::{adapter, Backend, ConcatMode, RowFrame, SchemaSpec};
//!
//! let plays = RowFrame::from_json_records(r#"[{"id": 1, "score": 0.5}]"#).unwrap();
//! let schema = SchemaSpec::new().with_column("id", "int").with_column("score", "float");
//!
//! let empty = adapter::create_empty(&schema, Backend::Rows).unwrap();
//! let all = adapter::concat(vec![empty, adapter::wrap(plays)], ConcatMode::Vertical).unwrap();
//! assert_eq!(all.columns().unwrap(), ["id", "score"]);
//! ```
//!
//! Two engines are supported: Polars (eager `DataFrame` and `LazyFrame`) and
//! the record-per-row [`RowFrame`].

pub mod adapter;
pub mod backend;
pub mod config;
pub mod convert;
pub mod datatypes;
pub mod error;
pub mod expr;
pub mod ffi;
pub mod frame;
pub mod rows;
pub mod schema;
pub mod types;

pub use adapter::{concat, create_empty, to_native, wrap};
pub use config::AdapterConfig;
pub use datatypes::LogicalType;
pub use error::{FrameError, FrameResult};
pub use expr::{Predicate, Scalar, col};
pub use frame::{FrameKind, NativeFrame, WrappedFrame};
pub use rows::{RowDType, RowError, RowFrame, Value};
pub use schema::SchemaSpec;
pub use types::{Backend, ConcatMode, DType, FrameSchema};
