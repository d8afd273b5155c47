use polars::prelude::*;

use super::FrameOps;
use crate::datatypes::dtype_from_polars;
use crate::error::{FrameError, FrameResult};
use crate::expr::{CompareOp, Predicate, Scalar};
use crate::types::{ConcatMode, FrameSchema};

// ==========================================
// Predicate -> Expr
// ==========================================

fn scalar_lit(value: &Scalar) -> Expr {
    match value {
        Scalar::Int(v) => lit(*v),
        Scalar::Float(v) => lit(*v),
        Scalar::Str(v) => lit(v.clone()),
        Scalar::Bool(v) => lit(*v),
    }
}

pub(crate) fn to_expr(predicate: &Predicate) -> Expr {
    match predicate {
        Predicate::Compare { column, op, value } => {
            let lhs = col(column.as_str());
            let rhs = scalar_lit(value);
            match op {
                CompareOp::Eq => lhs.eq(rhs),
                CompareOp::NotEq => lhs.neq(rhs),
                CompareOp::Gt => lhs.gt(rhs),
                CompareOp::GtEq => lhs.gt_eq(rhs),
                CompareOp::Lt => lhs.lt(rhs),
                CompareOp::LtEq => lhs.lt_eq(rhs),
            }
        }
        Predicate::IsNull(column) => col(column.as_str()).is_null(),
        Predicate::IsNotNull(column) => col(column.as_str()).is_not_null(),
        Predicate::And(a, b) => to_expr(a).and(to_expr(b)),
        Predicate::Or(a, b) => to_expr(a).or(to_expr(b)),
        Predicate::Not(inner) => to_expr(inner).not(),
    }
}

fn column_exprs(columns: &[String]) -> Vec<Expr> {
    columns.iter().map(|c| col(c.as_str())).collect()
}

// ==========================================
// LazyFrame
// ==========================================

impl FrameOps for LazyFrame {
    const NAME: &'static str = "polars-lazy";

    fn schema(&self) -> FrameResult<FrameSchema> {
        // collect_schema 需要 &mut self，克隆的只是查询计划
        let schema = self.clone().collect_schema()?;
        let fields = schema
            .iter()
            .map(|(name, dtype)| (name.to_string(), dtype_from_polars(dtype)))
            .collect();
        Ok(FrameSchema::new(fields))
    }

    fn height(&self) -> FrameResult<Option<usize>> {
        Ok(None)
    }

    fn resolve_height(&self) -> FrameResult<usize> {
        let counted = self.clone().select([len()]).collect()?;
        let value = match counted.get_columns().first() {
            Some(column) => column.get(0)?.extract::<usize>(),
            None => None,
        };
        value.ok_or_else(|| PolarsError::ComputeError("could not resolve row count".into()).into())
    }

    fn select(self, columns: &[String]) -> FrameResult<Self> {
        Ok(LazyFrame::select(self, column_exprs(columns)))
    }

    fn filter(self, predicate: &Predicate) -> FrameResult<Self> {
        Ok(LazyFrame::filter(self, to_expr(predicate)))
    }

    fn supports(_mode: ConcatMode) -> bool {
        true
    }

    fn concat(frames: Vec<Self>, how: ConcatMode) -> FrameResult<Self> {
        if frames.is_empty() {
            return Err(FrameError::EmptyInput { operation: "concat" });
        }

        // 统一构建 UnionArgs；relaxed 模式交给 Polars 做 supertype 转换
        let args = UnionArgs {
            to_supertypes: how.is_relaxed(),
            ..Default::default()
        };

        let out = match how {
            ConcatMode::Vertical | ConcatMode::VerticalRelaxed => concat(frames, args)?,
            ConcatMode::Horizontal => concat_lf_horizontal(frames, args)?,
            ConcatMode::Diagonal | ConcatMode::DiagonalRelaxed => concat_lf_diagonal(frames, args)?,
            ConcatMode::Align => align(frames)?,
        };
        Ok(out)
    }
}

/// Full outer join on the columns every frame shares, sorted by those keys.
fn align(frames: Vec<LazyFrame>) -> FrameResult<LazyFrame> {
    let schemas = frames
        .iter()
        .map(FrameOps::schema)
        .collect::<FrameResult<Vec<_>>>()?;
    let keys = column_exprs(&FrameSchema::common_names(&schemas));

    let mut frames = frames.into_iter();
    let first = frames
        .next()
        .ok_or(FrameError::EmptyInput { operation: "concat" })?;
    let joined = frames.fold(first, |acc, next| {
        acc.join(
            next,
            keys.clone(),
            keys.clone(),
            JoinArgs::new(JoinType::Full).with_coalesce(JoinCoalesce::CoalesceColumns),
        )
    });
    Ok(joined.sort_by_exprs(keys, SortMultipleOptions::default()))
}

// ==========================================
// DataFrame (eager)：全部经由 lazy 引擎执行
// ==========================================

impl FrameOps for DataFrame {
    const NAME: &'static str = "polars";

    fn schema(&self) -> FrameResult<FrameSchema> {
        let fields = self
            .get_columns()
            .iter()
            .map(|c| (c.name().to_string(), dtype_from_polars(c.dtype())))
            .collect();
        Ok(FrameSchema::new(fields))
    }

    fn height(&self) -> FrameResult<Option<usize>> {
        Ok(Some(DataFrame::height(self)))
    }

    fn resolve_height(&self) -> FrameResult<usize> {
        Ok(DataFrame::height(self))
    }

    fn select(self, columns: &[String]) -> FrameResult<Self> {
        Ok(DataFrame::select(&self, columns.iter().map(String::as_str))?)
    }

    fn filter(self, predicate: &Predicate) -> FrameResult<Self> {
        Ok(self.lazy().filter(to_expr(predicate)).collect()?)
    }

    fn supports(mode: ConcatMode) -> bool {
        <LazyFrame as FrameOps>::supports(mode)
    }

    fn concat(frames: Vec<Self>, how: ConcatMode) -> FrameResult<Self> {
        let lazy = frames.into_iter().map(IntoLazy::lazy).collect();
        Ok(<LazyFrame as FrameOps>::concat(lazy, how)?.collect()?)
    }
}
