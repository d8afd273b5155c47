//! Moving data between the two engines.

use polars::prelude::*;

use crate::error::FrameResult;
use crate::rows::{RowDType, RowFrame, Value};

/// int64 -> Int64, float64 -> Float64, bool -> Boolean, object -> String.
/// Non-string cells of an object column are stored as their text.
pub fn rows_to_polars(frame: &RowFrame) -> FrameResult<DataFrame> {
    let columns = frame
        .columns()
        .iter()
        .enumerate()
        .map(|(idx, (name, dtype))| {
            let name = PlSmallStr::from_str(name);
            let cells = frame.rows().iter().map(|row| &row[idx]);
            let series = match dtype {
                RowDType::Int64 => {
                    let values: Vec<Option<i64>> = cells
                        .map(|v| match v {
                            Value::Int(i) => Some(*i),
                            _ => None,
                        })
                        .collect();
                    Series::new(name, values)
                }
                RowDType::Float64 => {
                    let values: Vec<Option<f64>> = cells
                        .map(|v| match v {
                            Value::Float(f) => Some(*f),
                            _ => None,
                        })
                        .collect();
                    Series::new(name, values)
                }
                RowDType::Bool => {
                    let values: Vec<Option<bool>> = cells
                        .map(|v| match v {
                            Value::Bool(b) => Some(*b),
                            _ => None,
                        })
                        .collect();
                    Series::new(name, values)
                }
                RowDType::Object => {
                    let values: Vec<Option<String>> = cells
                        .map(|v| match v {
                            Value::Null => None,
                            Value::Str(s) => Some(s.clone()),
                            other => Some(other.to_string()),
                        })
                        .collect();
                    Series::new(name, values)
                }
            };
            Column::from(series)
        })
        .collect::<Vec<_>>();

    Ok(DataFrame::new(columns)?)
}

/// Integer types -> int64, float types -> float64, Boolean -> bool; every
/// other type is cast to String and stored as object. Integers that do not
/// fit in an i64 (large u64 / i128 values) are an error, not a null.
pub fn polars_to_rows(df: &DataFrame) -> FrameResult<RowFrame> {
    let mut columns = Vec::with_capacity(df.width());
    let mut cells: Vec<std::vec::IntoIter<Value>> = Vec::with_capacity(df.width());

    for column in df.get_columns() {
        let series = column.as_materialized_series();
        let (dtype, values): (RowDType, Vec<Value>) = match series.dtype() {
            dt if dt.is_integer() => {
                let cast = series.strict_cast(&DataType::Int64)?;
                (RowDType::Int64, cast.i64()?.into_iter().map(Value::from).collect())
            }
            dt if dt.is_float() => {
                let cast = series.cast(&DataType::Float64)?;
                (RowDType::Float64, cast.f64()?.into_iter().map(Value::from).collect())
            }
            DataType::Boolean => (RowDType::Bool, series.bool()?.into_iter().map(Value::from).collect()),
            _ => {
                let cast = series.cast(&DataType::String)?;
                (RowDType::Object, cast.str()?.into_iter().map(Value::from).collect())
            }
        };
        columns.push((column.name().to_string(), dtype));
        cells.push(values.into_iter());
    }

    let rows = (0..df.height())
        .map(|_| {
            cells
                .iter_mut()
                .map(|column| column.next().unwrap_or(Value::Null))
                .collect()
        })
        .collect();
    Ok(RowFrame::new(columns, rows)?)
}
