use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::RowError;

/// Storage type of a row-engine column, named after the pandas dtypes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RowDType {
    Int64,
    Float64,
    /// Holds any cell, including mixed kinds.
    Object,
    Bool,
}

impl RowDType {
    pub fn as_str(self) -> &'static str {
        match self {
            RowDType::Int64 => "int64",
            RowDType::Float64 => "float64",
            RowDType::Object => "object",
            RowDType::Bool => "bool",
        }
    }

    /// Whether a cell can be stored in a column of this type.
    pub fn accepts(self, value: &Value) -> bool {
        match (self, value) {
            (_, Value::Null) | (RowDType::Object, _) => true,
            (RowDType::Int64, Value::Int(_)) => true,
            (RowDType::Float64, Value::Float(_)) => true,
            (RowDType::Bool, Value::Bool(_)) => true,
            _ => false,
        }
    }

    /// The narrowest type both sides fit into.
    pub fn supertype(self, other: RowDType) -> RowDType {
        match (self, other) {
            (a, b) if a == b => a,
            (RowDType::Int64, RowDType::Float64) | (RowDType::Float64, RowDType::Int64) => {
                RowDType::Float64
            }
            _ => RowDType::Object,
        }
    }

    /// Type a lone cell would be stored as; `None` for nulls.
    pub fn infer(value: &Value) -> Option<RowDType> {
        match value {
            Value::Null => None,
            Value::Bool(_) => Some(RowDType::Bool),
            Value::Int(_) => Some(RowDType::Int64),
            Value::Float(_) => Some(RowDType::Float64),
            Value::Str(_) => Some(RowDType::Object),
        }
    }
}

impl fmt::Display for RowDType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single cell.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "str",
        }
    }

    /// Convert the cell for storage in a column of `dtype`.
    ///
    /// Only int -> float widening changes the value; every other accepted
    /// cell is kept as is.
    pub fn coerce(self, dtype: RowDType) -> Result<Value, RowError> {
        match (dtype, self) {
            (RowDType::Float64, Value::Int(v)) => Ok(Value::Float(v as f64)),
            (dtype, value) if dtype.accepts(&value) => Ok(value),
            (dtype, value) => Err(RowError::CellType {
                column: None,
                expected: dtype,
                found: value.kind(),
            }),
        }
    }

    /// Ordering between two cells. Nulls compare as unknown (`None`).
    ///
    /// Floats use a total order: NaN equals NaN and sorts above every number,
    /// and `-0.0 == 0.0`.
    pub fn compare(&self, other: &Value) -> Result<Option<Ordering>, RowError> {
        let ord = match (self, other) {
            (Value::Null, _) | (_, Value::Null) => return Ok(None),
            (Value::Int(a), Value::Int(b)) => Some(a.cmp(b)),
            (Value::Float(a), Value::Float(b)) => Some(float_order(*a, *b)),
            (Value::Int(a), Value::Float(b)) => Some(float_order(*a as f64, *b)),
            (Value::Float(a), Value::Int(b)) => Some(float_order(*a, *b as f64)),
            (Value::Str(a), Value::Str(b)) => Some(a.cmp(b)),
            (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
            (a, b) => {
                return Err(RowError::Incomparable {
                    left: a.kind(),
                    right: b.kind(),
                });
            }
        };
        Ok(ord)
    }
}

fn float_order(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        // 两边都不是 NaN 时 partial_cmp 一定有结果
        (false, false) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(v) => write!(f, "{v}"),
            Value::Int(v) => write!(f, "{v}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::Str(v) => f.write_str(v),
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn supertypes() {
        assert_eq!(RowDType::Int64.supertype(RowDType::Int64), RowDType::Int64);
        assert_eq!(RowDType::Int64.supertype(RowDType::Float64), RowDType::Float64);
        assert_eq!(RowDType::Bool.supertype(RowDType::Int64), RowDType::Object);
        assert_eq!(RowDType::Object.supertype(RowDType::Float64), RowDType::Object);
    }

    #[test]
    fn coerce_widens_ints_only() {
        assert_eq!(Value::Int(2).coerce(RowDType::Float64).unwrap(), Value::Float(2.0));
        assert_eq!(Value::Int(2).coerce(RowDType::Object).unwrap(), Value::Int(2));
        assert_eq!(Value::Null.coerce(RowDType::Bool).unwrap(), Value::Null);
        assert!(Value::from("x").coerce(RowDType::Int64).is_err());
    }

    #[test]
    fn compare_cells() {
        assert_eq!(Value::Int(1).compare(&Value::Float(1.5)).unwrap(), Some(Ordering::Less));
        assert_eq!(Value::Null.compare(&Value::Int(1)).unwrap(), None);
        assert!(Value::from("a").compare(&Value::Int(1)).is_err());
    }

    #[test]
    fn nan_sorts_above_numbers() {
        let nan = Value::Float(f64::NAN);
        assert_eq!(nan.compare(&Value::Float(0.5)).unwrap(), Some(Ordering::Greater));
        assert_eq!(Value::Int(i64::MAX).compare(&nan).unwrap(), Some(Ordering::Less));
        assert_eq!(nan.compare(&Value::Float(f64::NAN)).unwrap(), Some(Ordering::Equal));
        assert_eq!(Value::Float(-0.0).compare(&Value::Float(0.0)).unwrap(), Some(Ordering::Equal));
    }

    #[test]
    fn untagged_json_shape() {
        let cells: Vec<Value> = serde_json::from_str("[null, true, 3, 2.5, \"x\"]").unwrap();
        assert_eq!(
            cells,
            vec![Value::Null, Value::Bool(true), Value::Int(3), Value::Float(2.5), Value::from("x")]
        );
    }
}
