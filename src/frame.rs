use std::fmt;

use polars::prelude::{DataFrame, IntoLazy, LazyFrame};

use crate::backend::FrameOps;
use crate::convert;
use crate::error::FrameResult;
use crate::expr::Predicate;
use crate::rows::RowFrame;
use crate::types::{Backend, FrameSchema};

/// A frame as produced by one of the supported engines.
#[derive(Clone)]
pub enum NativeFrame {
    Polars(DataFrame),
    PolarsLazy(LazyFrame),
    Rows(RowFrame),
}

/// Which native representation a frame is in.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum FrameKind {
    Polars,
    PolarsLazy,
    Rows,
}

impl FrameKind {
    pub fn backend(self) -> Backend {
        match self {
            FrameKind::Polars | FrameKind::PolarsLazy => Backend::Polars,
            FrameKind::Rows => Backend::Rows,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FrameKind::Polars => <DataFrame as FrameOps>::NAME,
            FrameKind::PolarsLazy => <LazyFrame as FrameOps>::NAME,
            FrameKind::Rows => <RowFrame as FrameOps>::NAME,
        }
    }
}

impl fmt::Display for FrameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl NativeFrame {
    pub fn kind(&self) -> FrameKind {
        match self {
            NativeFrame::Polars(_) => FrameKind::Polars,
            NativeFrame::PolarsLazy(_) => FrameKind::PolarsLazy,
            NativeFrame::Rows(_) => FrameKind::Rows,
        }
    }

    pub fn backend(&self) -> Backend {
        self.kind().backend()
    }

    pub fn into_polars(self) -> Option<DataFrame> {
        match self {
            NativeFrame::Polars(df) => Some(df),
            _ => None,
        }
    }

    pub fn into_lazy(self) -> Option<LazyFrame> {
        match self {
            NativeFrame::PolarsLazy(lf) => Some(lf),
            _ => None,
        }
    }

    pub fn into_rows(self) -> Option<RowFrame> {
        match self {
            NativeFrame::Rows(frame) => Some(frame),
            _ => None,
        }
    }
}

impl fmt::Debug for NativeFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NativeFrame::Polars(df) => f.debug_tuple("Polars").field(df).finish(),
            // LazyFrame 的 Debug 会打印整个逻辑计划
            NativeFrame::PolarsLazy(_) => f.write_str("PolarsLazy(..)"),
            NativeFrame::Rows(frame) => f.debug_tuple("Rows").field(frame).finish(),
        }
    }
}

impl From<DataFrame> for NativeFrame {
    fn from(df: DataFrame) -> Self {
        NativeFrame::Polars(df)
    }
}

impl From<LazyFrame> for NativeFrame {
    fn from(lf: LazyFrame) -> Self {
        NativeFrame::PolarsLazy(lf)
    }
}

impl From<RowFrame> for NativeFrame {
    fn from(frame: RowFrame) -> Self {
        NativeFrame::Rows(frame)
    }
}

/// Run a [`FrameOps`] call on whichever frame is inside. The `map` form puts
/// the result back into the same variant.
macro_rules! dispatch {
    ($native:expr, $frame:ident => $body:expr) => {
        match $native {
            NativeFrame::Polars($frame) => $body,
            NativeFrame::PolarsLazy($frame) => $body,
            NativeFrame::Rows($frame) => $body,
        }
    };
    (map $native:expr, $frame:ident => $body:expr) => {
        match $native {
            NativeFrame::Polars($frame) => NativeFrame::Polars($body),
            NativeFrame::PolarsLazy($frame) => NativeFrame::PolarsLazy($body),
            NativeFrame::Rows($frame) => NativeFrame::Rows($body),
        }
    };
}

/// Backend-neutral handle over exactly one native frame.
///
/// Wrapping moves the native frame in; no data is copied. Every operation
/// returns a new handle of the same native kind, except [`collect`] and
/// [`to_backend`], which change it on purpose.
///
/// [`collect`]: WrappedFrame::collect
/// [`to_backend`]: WrappedFrame::to_backend
#[derive(Clone, Debug)]
pub struct WrappedFrame {
    native: NativeFrame,
}

impl WrappedFrame {
    pub(crate) fn new(native: NativeFrame) -> Self {
        Self { native }
    }

    pub fn kind(&self) -> FrameKind {
        self.native.kind()
    }

    pub fn backend(&self) -> Backend {
        self.native.backend()
    }

    pub fn is_lazy(&self) -> bool {
        self.kind() == FrameKind::PolarsLazy
    }

    pub fn native(&self) -> &NativeFrame {
        &self.native
    }

    pub fn into_native(self) -> NativeFrame {
        self.native
    }

    pub fn schema(&self) -> FrameResult<FrameSchema> {
        dispatch!(&self.native, frame => FrameOps::schema(frame))
    }

    pub fn columns(&self) -> FrameResult<Vec<String>> {
        Ok(self.schema()?.names().map(str::to_string).collect())
    }

    pub fn width(&self) -> FrameResult<usize> {
        Ok(self.schema()?.len())
    }

    /// Row count; `None` for lazy frames, which are not evaluated here.
    pub fn height(&self) -> FrameResult<Option<usize>> {
        dispatch!(&self.native, frame => FrameOps::height(frame))
    }

    pub(crate) fn resolve_height(&self) -> FrameResult<usize> {
        dispatch!(&self.native, frame => FrameOps::resolve_height(frame))
    }

    pub fn select<S: AsRef<str>>(self, columns: &[S]) -> FrameResult<Self> {
        let columns: Vec<String> = columns.iter().map(|c| c.as_ref().to_string()).collect();
        tracing::trace!(kind = %self.kind(), ?columns, "select");
        let native = dispatch!(map self.native, frame => FrameOps::select(frame, &columns)?);
        Ok(Self::new(native))
    }

    pub fn filter(self, predicate: &Predicate) -> FrameResult<Self> {
        tracing::trace!(kind = %self.kind(), %predicate, "filter");
        let native = dispatch!(map self.native, frame => FrameOps::filter(frame, predicate)?);
        Ok(Self::new(native))
    }

    /// Evaluate a lazy frame; eager frames are returned unchanged.
    pub fn collect(self) -> FrameResult<Self> {
        match self.native {
            NativeFrame::PolarsLazy(lf) => Ok(Self::new(NativeFrame::Polars(lf.collect()?))),
            native => Ok(Self::new(native)),
        }
    }

    /// Turn an eager Polars frame into a lazy one; other frames are unchanged.
    pub fn lazy(self) -> Self {
        match self.native {
            NativeFrame::Polars(df) => Self::new(NativeFrame::PolarsLazy(df.lazy())),
            native => Self::new(native),
        }
    }

    /// Re-materialize the data in another engine.
    pub fn to_backend(self, backend: Backend) -> FrameResult<Self> {
        if self.backend() == backend {
            return Ok(self);
        }
        tracing::debug!(from = %self.kind(), to = %backend, "converting frame");
        let native = match self.native {
            NativeFrame::Polars(df) => NativeFrame::Rows(convert::polars_to_rows(&df)?),
            NativeFrame::PolarsLazy(lf) => NativeFrame::Rows(convert::polars_to_rows(&lf.collect()?)?),
            NativeFrame::Rows(frame) => NativeFrame::Polars(convert::rows_to_polars(&frame)?),
        };
        Ok(Self::new(native))
    }
}
