use std::cmp::Ordering;

use super::FrameOps;
use crate::datatypes::dtype_from_rows;
use crate::error::{FrameError, FrameResult};
use crate::expr::{CompareOp, Predicate, Scalar};
use crate::rows::{RowError, RowFrame, Value};
use crate::types::{ConcatMode, FrameSchema};

/// A predicate with its column names resolved to row positions.
enum Bound {
    Compare { idx: usize, op: CompareOp, value: Value },
    IsNull(usize),
    IsNotNull(usize),
    And(Box<Bound>, Box<Bound>),
    Or(Box<Bound>, Box<Bound>),
    Not(Box<Bound>),
}

fn scalar_value(value: &Scalar) -> Value {
    match value {
        Scalar::Int(v) => Value::Int(*v),
        Scalar::Float(v) => Value::Float(*v),
        Scalar::Str(v) => Value::Str(v.clone()),
        Scalar::Bool(v) => Value::Bool(*v),
    }
}

fn bind(frame: &RowFrame, predicate: &Predicate) -> Result<Bound, RowError> {
    Ok(match predicate {
        Predicate::Compare { column, op, value } => Bound::Compare {
            idx: frame.column_index(column)?,
            op: *op,
            value: scalar_value(value),
        },
        Predicate::IsNull(column) => Bound::IsNull(frame.column_index(column)?),
        Predicate::IsNotNull(column) => Bound::IsNotNull(frame.column_index(column)?),
        Predicate::And(a, b) => Bound::And(Box::new(bind(frame, a)?), Box::new(bind(frame, b)?)),
        Predicate::Or(a, b) => Bound::Or(Box::new(bind(frame, a)?), Box::new(bind(frame, b)?)),
        Predicate::Not(inner) => Bound::Not(Box::new(bind(frame, inner)?)),
    })
}

/// Three-valued evaluation: `None` is unknown (a comparison touched a null).
fn eval(bound: &Bound, row: &[Value]) -> Result<Option<bool>, RowError> {
    Ok(match bound {
        Bound::Compare { idx, op, value } => row[*idx].compare(value)?.map(|ord| match op {
            CompareOp::Eq => ord == Ordering::Equal,
            CompareOp::NotEq => ord != Ordering::Equal,
            CompareOp::Gt => ord == Ordering::Greater,
            CompareOp::GtEq => ord != Ordering::Less,
            CompareOp::Lt => ord == Ordering::Less,
            CompareOp::LtEq => ord != Ordering::Greater,
        }),
        Bound::IsNull(idx) => Some(row[*idx].is_null()),
        Bound::IsNotNull(idx) => Some(!row[*idx].is_null()),
        Bound::And(a, b) => match (eval(a, row)?, eval(b, row)?) {
            (Some(false), _) | (_, Some(false)) => Some(false),
            (Some(true), Some(true)) => Some(true),
            _ => None,
        },
        Bound::Or(a, b) => match (eval(a, row)?, eval(b, row)?) {
            (Some(true), _) | (_, Some(true)) => Some(true),
            (Some(false), Some(false)) => Some(false),
            _ => None,
        },
        Bound::Not(inner) => eval(inner, row)?.map(|v| !v),
    })
}

impl FrameOps for RowFrame {
    const NAME: &'static str = "rows";

    fn schema(&self) -> FrameResult<FrameSchema> {
        let fields = self
            .columns()
            .iter()
            .map(|(name, dtype)| (name.clone(), dtype_from_rows(*dtype)))
            .collect();
        Ok(FrameSchema::new(fields))
    }

    fn height(&self) -> FrameResult<Option<usize>> {
        Ok(Some(RowFrame::height(self)))
    }

    fn resolve_height(&self) -> FrameResult<usize> {
        Ok(RowFrame::height(self))
    }

    fn select(self, columns: &[String]) -> FrameResult<Self> {
        Ok(RowFrame::select(&self, columns)?)
    }

    fn filter(self, predicate: &Predicate) -> FrameResult<Self> {
        let bound = bind(&self, predicate)?;
        Ok(RowFrame::filter(&self, |row| Ok(eval(&bound, row)? == Some(true)))?)
    }

    fn supports(mode: ConcatMode) -> bool {
        mode != ConcatMode::Align
    }

    fn concat(frames: Vec<Self>, how: ConcatMode) -> FrameResult<Self> {
        let out = match how {
            ConcatMode::Vertical => RowFrame::vstack(&frames, false)?,
            ConcatMode::VerticalRelaxed => RowFrame::vstack(&frames, true)?,
            ConcatMode::Horizontal => RowFrame::hstack(&frames)?,
            ConcatMode::Diagonal => RowFrame::diagonal(&frames, false)?,
            ConcatMode::DiagonalRelaxed => RowFrame::diagonal(&frames, true)?,
            ConcatMode::Align => {
                return Err(FrameError::UnsupportedMode {
                    mode: how.to_string(),
                    backend: Self::NAME.to_string(),
                });
            }
        };
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::col;
    use crate::rows::RowDType;

    fn minutes() -> RowFrame {
        RowFrame::new(
            vec![("player".into(), RowDType::Object), ("minutes".into(), RowDType::Int64)],
            vec![
                vec![Value::from("ana"), Value::Int(90)],
                vec![Value::from("ben"), Value::Null],
                vec![Value::from("cy"), Value::Int(12)],
            ],
        )
        .unwrap()
    }

    #[test]
    fn comparisons_skip_nulls() {
        let out = FrameOps::filter(minutes(), &col("minutes").lt(100)).unwrap();
        assert_eq!(out.height(), 2);

        let out = FrameOps::filter(minutes(), &col("minutes").lt(100).not()).unwrap();
        assert_eq!(out.height(), 0);

        let out = FrameOps::filter(minutes(), &col("minutes").is_null().or(col("minutes").gt(50))).unwrap();
        let names: Vec<String> = out.column("player").unwrap().iter().map(|v| v.to_string()).collect();
        assert_eq!(names, ["ana", "ben"]);
    }

    #[test]
    fn unknown_column_is_an_engine_error() {
        let err = FrameOps::filter(minutes(), &col("goals").gt(0)).unwrap_err();
        assert!(matches!(err, FrameError::Rows(RowError::ColumnNotFound(ref c)) if c == "goals"));
    }

    #[test]
    fn align_is_rejected() {
        assert!(!<RowFrame as FrameOps>::supports(ConcatMode::Align));
        let err = FrameOps::concat(vec![minutes(), minutes()], ConcatMode::Align).unwrap_err();
        assert!(matches!(err, FrameError::UnsupportedMode { .. }));
    }
}
