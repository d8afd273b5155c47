//! # Backend capabilities
//!
//! Each native frame type implements [`FrameOps`]; the adapter validates
//! inputs and then dispatches here without knowing anything else about the
//! engine underneath.

mod columnar;
mod rows;

use crate::error::FrameResult;
use crate::expr::Predicate;
use crate::types::{ConcatMode, FrameSchema};

pub trait FrameOps: Sized {
    /// Engine name used in log lines and errors.
    const NAME: &'static str;

    fn schema(&self) -> FrameResult<FrameSchema>;

    /// Number of rows, or `None` when it is not known without evaluating.
    fn height(&self) -> FrameResult<Option<usize>>;

    /// Number of rows, evaluating the frame if needed.
    fn resolve_height(&self) -> FrameResult<usize>;

    fn select(self, columns: &[String]) -> FrameResult<Self>;

    fn filter(self, predicate: &Predicate) -> FrameResult<Self>;

    fn supports(mode: ConcatMode) -> bool;

    /// Combine frames whose schemas have already been checked for `how`.
    fn concat(frames: Vec<Self>, how: ConcatMode) -> FrameResult<Self>;
}
