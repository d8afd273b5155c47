//! # Frame adapter
//!
//! The four entry points downstream code uses instead of branching on the
//! engine: [`wrap`], [`to_native`], [`create_empty`] and [`concat`].
//!
//! ```rust
//! use polars::prelude::*;
//! use sporty_frames::{adapter, Backend, ConcatMode, SchemaSpec};
//!
//! let schema = SchemaSpec::new().with_column("id", "int").with_column("score", "float");
//! let empty = adapter::create_empty(&schema, Backend::Polars).unwrap();
//!
//! let df = df!("id" => [7i64], "score" => [0.61]).unwrap();
//! let both = adapter::concat(vec![empty, adapter::wrap(df)], ConcatMode::Vertical).unwrap();
//! assert_eq!(both.height().unwrap(), Some(1));
//! ```

use std::any::Any;
use std::collections::HashSet;

use polars::prelude::{DataFrame, LazyFrame};
use tracing::debug;

use crate::backend::FrameOps;
use crate::config;
use crate::error::{FrameError, FrameResult};
use crate::frame::{FrameKind, NativeFrame, WrappedFrame};
use crate::rows::RowFrame;
use crate::schema::SchemaSpec;
use crate::types::{Backend, ConcatMode, FrameSchema};

// ==========================================
// wrap / to_native
// ==========================================

/// Put a native frame behind the neutral API. Nothing is copied.
pub fn wrap(native: impl Into<NativeFrame>) -> WrappedFrame {
    WrappedFrame::new(native.into())
}

/// Wrap a value whose type is only known at runtime.
///
/// Accepts a `DataFrame`, `LazyFrame`, `RowFrame`, `NativeFrame` or an
/// already wrapped frame; anything else is an unsupported backend.
pub fn wrap_any(value: Box<dyn Any>) -> FrameResult<WrappedFrame> {
    let value = match value.downcast::<DataFrame>() {
        Ok(df) => return Ok(wrap(*df)),
        Err(value) => value,
    };
    let value = match value.downcast::<LazyFrame>() {
        Ok(lf) => return Ok(wrap(*lf)),
        Err(value) => value,
    };
    let value = match value.downcast::<RowFrame>() {
        Ok(frame) => return Ok(wrap(*frame)),
        Err(value) => value,
    };
    let value = match value.downcast::<NativeFrame>() {
        Ok(native) => return Ok(wrap(*native)),
        Err(value) => value,
    };
    match value.downcast::<WrappedFrame>() {
        Ok(wrapped) => Ok(*wrapped),
        Err(_) => Err(FrameError::UnsupportedBackend {
            name: "<unrecognized frame type>".to_string(),
        }),
    }
}

/// The frame that was wrapped, in the representation it was wrapped in.
pub fn to_native(wrapped: WrappedFrame) -> NativeFrame {
    wrapped.into_native()
}

// ==========================================
// create_empty
// ==========================================

/// A zero-row frame with one column per schema entry, in declaration order.
pub fn create_empty(schema: &SchemaSpec, backend: Backend) -> FrameResult<WrappedFrame> {
    debug!(operation = "create_empty", %backend, columns = schema.len());
    let native = match backend {
        Backend::Polars => NativeFrame::Polars(DataFrame::empty_with_schema(&schema.to_polars_schema())),
        Backend::Rows => NativeFrame::Rows(RowFrame::empty(schema.to_row_columns())?),
    };
    Ok(WrappedFrame::new(native))
}

/// [`create_empty`] with the backend given by name (`"polars"` or `"rows"`).
pub fn create_empty_named(schema: &SchemaSpec, backend: &str) -> FrameResult<WrappedFrame> {
    create_empty(schema, backend.parse()?)
}

/// [`create_empty`] on the configured default backend.
pub fn create_empty_default(schema: &SchemaSpec) -> FrameResult<WrappedFrame> {
    create_empty(schema, config::global().default_backend)
}

// ==========================================
// concat
// ==========================================

/// Combine frames of one native kind according to `how`.
///
/// The result has the same kind as the inputs. A single frame is returned
/// unchanged.
pub fn concat(frames: Vec<WrappedFrame>, how: ConcatMode) -> FrameResult<WrappedFrame> {
    let kind = match frames.first() {
        Some(first) => first.kind(),
        None => return Err(FrameError::EmptyInput { operation: "concat" }),
    };
    if let Some(other) = frames.iter().find(|f| f.kind() != kind) {
        return Err(FrameError::MixedBackends {
            expected: kind.to_string(),
            found: other.kind().to_string(),
        });
    }
    if !supports(kind, how) {
        return Err(FrameError::UnsupportedMode {
            mode: how.to_string(),
            backend: kind.to_string(),
        });
    }

    debug!(operation = "concat", %kind, mode = %how, frames = frames.len());
    let mut frames = frames;
    if frames.len() == 1 {
        if let Some(only) = frames.pop() {
            return Ok(only);
        }
    }

    let schemas = frames
        .iter()
        .map(WrappedFrame::schema)
        .collect::<FrameResult<Vec<_>>>()?;
    let frames = match how {
        ConcatMode::Vertical | ConcatMode::VerticalRelaxed => check_vertical(frames, &schemas, how)?,
        ConcatMode::Horizontal => check_horizontal(frames, &schemas)?,
        ConcatMode::Diagonal | ConcatMode::DiagonalRelaxed => check_diagonal(frames, &schemas, how)?,
        ConcatMode::Align => check_align(frames, &schemas)?,
    };

    let natives = frames.into_iter().map(WrappedFrame::into_native);
    let native = match kind {
        FrameKind::Polars => NativeFrame::Polars(FrameOps::concat(
            natives.filter_map(NativeFrame::into_polars).collect(),
            how,
        )?),
        FrameKind::PolarsLazy => NativeFrame::PolarsLazy(FrameOps::concat(
            natives.filter_map(NativeFrame::into_lazy).collect(),
            how,
        )?),
        FrameKind::Rows => NativeFrame::Rows(FrameOps::concat(
            natives.filter_map(NativeFrame::into_rows).collect(),
            how,
        )?),
    };
    Ok(WrappedFrame::new(native))
}

/// [`concat`] with the configured default mode.
pub fn concat_default(frames: Vec<WrappedFrame>) -> FrameResult<WrappedFrame> {
    concat(frames, config::global().default_concat)
}

fn supports(kind: FrameKind, how: ConcatMode) -> bool {
    match kind {
        FrameKind::Polars => <DataFrame as FrameOps>::supports(how),
        FrameKind::PolarsLazy => <LazyFrame as FrameOps>::supports(how),
        FrameKind::Rows => <RowFrame as FrameOps>::supports(how),
    }
}

fn names(schema: &FrameSchema) -> String {
    schema.names().collect::<Vec<_>>().join(", ")
}

/// Same column set everywhere (and same types unless relaxed); later frames
/// are reordered to the first frame's column order.
fn check_vertical(
    frames: Vec<WrappedFrame>,
    schemas: &[FrameSchema],
    how: ConcatMode,
) -> FrameResult<Vec<WrappedFrame>> {
    let first = &schemas[0];
    for (i, schema) in schemas.iter().enumerate().skip(1) {
        let same_set = schema.len() == first.len() && first.names().all(|n| schema.contains(n));
        if !same_set {
            return Err(FrameError::mismatch(
                how,
                format!("frame {i} has columns [{}], expected [{}]", names(schema), names(first)),
            ));
        }
        if !how.is_relaxed() {
            for (name, dtype) in first.fields() {
                let found = schema.get(name).unwrap_or(dtype);
                if found != dtype {
                    return Err(FrameError::mismatch(
                        how,
                        format!("column '{name}' is {dtype} in frame 0 but {found} in frame {i}"),
                    ));
                }
            }
        }
    }

    let order: Vec<String> = first.names().map(str::to_string).collect();
    frames
        .into_iter()
        .zip(schemas)
        .map(|(frame, schema)| {
            if schema.names().eq(order.iter().map(String::as_str)) {
                Ok(frame)
            } else {
                frame.select(order.as_slice())
            }
        })
        .collect()
}

/// Disjoint column names and equal row counts.
fn check_horizontal(frames: Vec<WrappedFrame>, schemas: &[FrameSchema]) -> FrameResult<Vec<WrappedFrame>> {
    let how = ConcatMode::Horizontal;
    let mut seen = HashSet::new();
    for name in schemas.iter().flat_map(FrameSchema::names) {
        if !seen.insert(name) {
            return Err(FrameError::mismatch(
                how,
                format!("column '{name}' appears in more than one frame"),
            ));
        }
    }

    let expected = frames[0].resolve_height()?;
    for (i, frame) in frames.iter().enumerate().skip(1) {
        let found = frame.resolve_height()?;
        if found != expected {
            return Err(FrameError::mismatch(
                how,
                format!("frame {i} has {found} rows, expected {expected}"),
            ));
        }
    }
    Ok(frames)
}

/// A column shared by several frames must have one type unless relaxed.
fn check_diagonal(
    frames: Vec<WrappedFrame>,
    schemas: &[FrameSchema],
    how: ConcatMode,
) -> FrameResult<Vec<WrappedFrame>> {
    if how.is_relaxed() {
        return Ok(frames);
    }
    for (i, schema) in schemas.iter().enumerate() {
        for (name, dtype) in schema.fields() {
            let earlier = schemas[..i]
                .iter()
                .enumerate()
                .find_map(|(j, s)| s.get(name).map(|d| (j, d)));
            if let Some((j, other)) = earlier {
                if other != dtype {
                    return Err(FrameError::mismatch(
                        how,
                        format!("column '{name}' is {other} in frame {j} but {dtype} in frame {i}"),
                    ));
                }
            }
        }
    }
    Ok(frames)
}

/// At least one column shared by every frame, and no other overlap.
fn check_align(frames: Vec<WrappedFrame>, schemas: &[FrameSchema]) -> FrameResult<Vec<WrappedFrame>> {
    let how = ConcatMode::Align;
    let keys = FrameSchema::common_names(schemas);
    if keys.is_empty() {
        return Err(FrameError::mismatch(how, "frames share no column to align on"));
    }
    let mut seen = HashSet::new();
    for name in schemas
        .iter()
        .flat_map(FrameSchema::names)
        .filter(|name| !keys.iter().any(|k| k.as_str() == *name))
    {
        if !seen.insert(name) {
            return Err(FrameError::mismatch(
                how,
                format!("non-key column '{name}' appears in more than one frame"),
            ));
        }
    }
    Ok(frames)
}
