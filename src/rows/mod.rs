//! # Row engine
//!
//! A small record-per-row table: every row is a `Vec<Value>` laid out in the
//! frame's column order, and every column carries one of the pandas-style
//! storage types in [`RowDType`]. It is the secondary backend behind the
//! adapter; the adapter only ever calls the public methods below.

mod json;
mod value;

pub use value::{RowDType, Value};

use std::collections::HashSet;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RowError {
    #[error("column '{0}' not found")]
    ColumnNotFound(String),

    #[error("duplicate column '{0}'")]
    DuplicateColumn(String),

    #[error("row {row} has {found} cells, expected {expected}")]
    Arity {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("cannot store a {found} cell in {expected} column{}", column_suffix(.column))]
    CellType {
        column: Option<String>,
        expected: RowDType,
        found: &'static str,
    },

    #[error("cannot compare {left} with {right}")]
    Incomparable {
        left: &'static str,
        right: &'static str,
    },

    #[error("schema mismatch: {0}")]
    SchemaMismatch(String),

    #[error("height mismatch: expected {expected} rows, found {found}")]
    HeightMismatch { expected: usize, found: usize },

    #[error("nothing to combine")]
    NoFrames,

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct RowFrame {
    columns: Vec<(String, RowDType)>,
    rows: Vec<Vec<Value>>,
}

impl RowFrame {
    /// A frame with the given columns and no rows.
    pub fn empty(columns: Vec<(String, RowDType)>) -> Result<Self, RowError> {
        Self::new(columns, Vec::new())
    }

    /// Build a frame, checking row arity and that every cell fits its column.
    pub fn new(columns: Vec<(String, RowDType)>, rows: Vec<Vec<Value>>) -> Result<Self, RowError> {
        check_unique(columns.iter().map(|(name, _)| name.as_str()))?;
        for (i, row) in rows.iter().enumerate() {
            if row.len() != columns.len() {
                return Err(RowError::Arity {
                    row: i,
                    expected: columns.len(),
                    found: row.len(),
                });
            }
            for ((name, dtype), cell) in columns.iter().zip(row) {
                if !dtype.accepts(cell) {
                    return Err(RowError::CellType {
                        column: Some(name.clone()),
                        expected: *dtype,
                        found: cell.kind(),
                    });
                }
            }
        }
        Ok(Self { columns, rows })
    }

    pub fn columns(&self) -> &[(String, RowDType)] {
        &self.columns
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(name, _)| name.as_str())
    }

    pub fn dtype(&self, name: &str) -> Option<RowDType> {
        self.columns
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, dtype)| *dtype)
    }

    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn column_index(&self, name: &str) -> Result<usize, RowError> {
        self.columns
            .iter()
            .position(|(n, _)| n == name)
            .ok_or_else(|| RowError::ColumnNotFound(name.to_string()))
    }

    /// Cells of one column, top to bottom.
    pub fn column(&self, name: &str) -> Result<Vec<&Value>, RowError> {
        let idx = self.column_index(name)?;
        Ok(self.rows.iter().map(|row| &row[idx]).collect())
    }

    /// Project onto `names`, in the order given.
    pub fn select<S: AsRef<str>>(&self, names: &[S]) -> Result<Self, RowError> {
        check_unique(names.iter().map(|n| n.as_ref()))?;
        let indices = names
            .iter()
            .map(|n| self.column_index(n.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;

        let columns = indices.iter().map(|&i| self.columns[i].clone()).collect();
        let rows = self
            .rows
            .iter()
            .map(|row| indices.iter().map(|&i| row[i].clone()).collect())
            .collect();
        Ok(Self { columns, rows })
    }

    /// Keep the rows for which `keep` returns true.
    pub fn filter<F>(&self, mut keep: F) -> Result<Self, RowError>
    where
        F: FnMut(&[Value]) -> Result<bool, RowError>,
    {
        let mut rows = Vec::new();
        for row in &self.rows {
            if keep(row)? {
                rows.push(row.clone());
            }
        }
        Ok(Self {
            columns: self.columns.clone(),
            rows,
        })
    }

    /// Stack rows of frames that share one column set.
    ///
    /// Column order follows the first frame. With `relaxed`, differing column
    /// types are widened to their supertype instead of rejected.
    pub fn vstack(frames: &[RowFrame], relaxed: bool) -> Result<Self, RowError> {
        let first = frames.first().ok_or(RowError::NoFrames)?;
        let names: Vec<String> = first.column_names().map(str::to_string).collect();
        for frame in &frames[1..] {
            let same_set = frame.width() == names.len()
                && names.iter().all(|name| frame.dtype(name).is_some());
            if !same_set {
                return Err(RowError::SchemaMismatch(format!(
                    "columns [{}] differ from [{}]",
                    frame.column_names().collect::<Vec<_>>().join(", "),
                    names.join(", ")
                )));
            }
        }
        Self::stack(frames, names, relaxed)
    }

    /// Stack rows over the union of all columns; missing cells become null.
    pub fn diagonal(frames: &[RowFrame], relaxed: bool) -> Result<Self, RowError> {
        if frames.is_empty() {
            return Err(RowError::NoFrames);
        }
        let mut seen = HashSet::new();
        let mut names = Vec::new();
        for frame in frames {
            for name in frame.column_names() {
                if seen.insert(name.to_string()) {
                    names.push(name.to_string());
                }
            }
        }
        Self::stack(frames, names, relaxed)
    }

    /// Place the columns of equally tall frames side by side.
    pub fn hstack(frames: &[RowFrame]) -> Result<Self, RowError> {
        let first = frames.first().ok_or(RowError::NoFrames)?;
        let height = first.height();
        let mut columns = Vec::new();
        for frame in frames {
            if frame.height() != height {
                return Err(RowError::HeightMismatch {
                    expected: height,
                    found: frame.height(),
                });
            }
            columns.extend(frame.columns.iter().cloned());
        }
        check_unique(columns.iter().map(|(name, _)| name.as_str()))?;

        let rows = (0..height)
            .map(|i| {
                frames
                    .iter()
                    .flat_map(|frame| frame.rows[i].iter().cloned())
                    .collect()
            })
            .collect();
        Ok(Self { columns, rows })
    }

    fn stack(frames: &[RowFrame], names: Vec<String>, relaxed: bool) -> Result<Self, RowError> {
        let mut columns = Vec::with_capacity(names.len());
        for name in names {
            let mut dtype: Option<RowDType> = None;
            for found in frames.iter().filter_map(|f| f.dtype(&name)) {
                dtype = match dtype {
                    None => Some(found),
                    Some(current) if current == found => Some(current),
                    Some(current) if relaxed => Some(current.supertype(found)),
                    Some(current) => {
                        return Err(RowError::SchemaMismatch(format!(
                            "column '{name}' is {current} in one frame and {found} in another"
                        )));
                    }
                };
            }
            // Every name comes from at least one frame.
            columns.push((name, dtype.unwrap_or(RowDType::Object)));
        }

        let total = frames.iter().map(RowFrame::height).sum();
        let mut rows = Vec::with_capacity(total);
        for frame in frames {
            let positions: Vec<Option<usize>> = columns
                .iter()
                .map(|(name, _)| frame.column_index(name).ok())
                .collect();
            for row in &frame.rows {
                let out = positions
                    .iter()
                    .zip(&columns)
                    .map(|(pos, (_, dtype))| match pos {
                        Some(i) => row[*i].clone().coerce(*dtype),
                        None => Ok(Value::Null),
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                rows.push(out);
            }
        }
        Ok(Self { columns, rows })
    }
}

fn column_suffix(column: &Option<String>) -> String {
    column.as_ref().map(|c| format!(" '{c}'")).unwrap_or_default()
}

fn check_unique<'a>(names: impl Iterator<Item = &'a str>) -> Result<(), RowError> {
    let mut seen = HashSet::new();
    for name in names {
        if !seen.insert(name) {
            return Err(RowError::DuplicateColumn(name.to_string()));
        }
    }
    Ok(())
}
