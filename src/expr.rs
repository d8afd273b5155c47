//! Backend-neutral row predicates.
//!
//! ```rust
//! use sporty_frames::expr::{col, Scalar};
//!
//! let shots_on_target = col("xg").gt(0.1).and(col("on_target").eq(true));
//! assert_eq!(shots_on_target.columns(), vec!["xg", "on_target"]);
//! # let _ = Scalar::Int(1);
//! ```

use std::fmt;

/// A non-null literal on the right-hand side of a comparison.
#[derive(Clone, Debug, PartialEq)]
pub enum Scalar {
    Int(i64),
    Float(f64),
    Str(String),
    Bool(bool),
}

impl From<i64> for Scalar {
    fn from(v: i64) -> Self {
        Scalar::Int(v)
    }
}

impl From<i32> for Scalar {
    fn from(v: i32) -> Self {
        Scalar::Int(v as i64)
    }
}

impl From<f64> for Scalar {
    fn from(v: f64) -> Self {
        Scalar::Float(v)
    }
}

impl From<bool> for Scalar {
    fn from(v: bool) -> Self {
        Scalar::Bool(v)
    }
}

impl From<&str> for Scalar {
    fn from(v: &str) -> Self {
        Scalar::Str(v.to_string())
    }
}

impl From<String> for Scalar {
    fn from(v: String) -> Self {
        Scalar::Str(v)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CompareOp {
    Eq,
    NotEq,
    Gt,
    GtEq,
    Lt,
    LtEq,
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let op = match self {
            CompareOp::Eq => "==",
            CompareOp::NotEq => "!=",
            CompareOp::Gt => ">",
            CompareOp::GtEq => ">=",
            CompareOp::Lt => "<",
            CompareOp::LtEq => "<=",
        };
        f.write_str(op)
    }
}

/// Row filter understood by every backend.
///
/// Comparisons against a null cell never match, the same as in Polars.
#[derive(Clone, Debug, PartialEq)]
pub enum Predicate {
    Compare {
        column: String,
        op: CompareOp,
        value: Scalar,
    },
    IsNull(String),
    IsNotNull(String),
    And(Box<Predicate>, Box<Predicate>),
    Or(Box<Predicate>, Box<Predicate>),
    Not(Box<Predicate>),
}

impl Predicate {
    pub fn and(self, other: Predicate) -> Predicate {
        Predicate::And(Box::new(self), Box::new(other))
    }

    pub fn or(self, other: Predicate) -> Predicate {
        Predicate::Or(Box::new(self), Box::new(other))
    }

    #[allow(clippy::should_implement_trait)]
    pub fn not(self) -> Predicate {
        Predicate::Not(Box::new(self))
    }

    /// Column names referenced, in first-use order.
    pub fn columns(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_columns(&mut out);
        out
    }

    fn collect_columns<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Predicate::Compare { column, .. } | Predicate::IsNull(column) | Predicate::IsNotNull(column) => {
                if !out.contains(&column.as_str()) {
                    out.push(column);
                }
            }
            Predicate::And(a, b) | Predicate::Or(a, b) => {
                a.collect_columns(out);
                b.collect_columns(out);
            }
            Predicate::Not(inner) => inner.collect_columns(out),
        }
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Predicate::Compare { column, op, value } => write!(f, "{column} {op} {value:?}"),
            Predicate::IsNull(column) => write!(f, "{column} is null"),
            Predicate::IsNotNull(column) => write!(f, "{column} is not null"),
            Predicate::And(a, b) => write!(f, "({a} and {b})"),
            Predicate::Or(a, b) => write!(f, "({a} or {b})"),
            Predicate::Not(inner) => write!(f, "not {inner}"),
        }
    }
}

/// Entry point for building predicates on a column.
pub fn col(name: impl Into<String>) -> ColumnRef {
    ColumnRef(name.into())
}

pub struct ColumnRef(String);

impl ColumnRef {
    fn compare(self, op: CompareOp, value: impl Into<Scalar>) -> Predicate {
        Predicate::Compare {
            column: self.0,
            op,
            value: value.into(),
        }
    }

    pub fn eq(self, value: impl Into<Scalar>) -> Predicate {
        self.compare(CompareOp::Eq, value)
    }

    pub fn neq(self, value: impl Into<Scalar>) -> Predicate {
        self.compare(CompareOp::NotEq, value)
    }

    pub fn gt(self, value: impl Into<Scalar>) -> Predicate {
        self.compare(CompareOp::Gt, value)
    }

    pub fn gt_eq(self, value: impl Into<Scalar>) -> Predicate {
        self.compare(CompareOp::GtEq, value)
    }

    pub fn lt(self, value: impl Into<Scalar>) -> Predicate {
        self.compare(CompareOp::Lt, value)
    }

    pub fn lt_eq(self, value: impl Into<Scalar>) -> Predicate {
        self.compare(CompareOp::LtEq, value)
    }

    pub fn is_null(self) -> Predicate {
        Predicate::IsNull(self.0)
    }

    pub fn is_not_null(self) -> Predicate {
        Predicate::IsNotNull(self.0)
    }
}
