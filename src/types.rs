use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FrameError;

// ==========================================
// Backend selector
// ==========================================

/// The tabular engines the adapter can produce and consume.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// Polars, eager or lazy.
    #[default]
    Polars,
    /// The record-per-row engine in [`crate::rows`].
    Rows,
}

impl Backend {
    pub const ALL: [Backend; 2] = [Backend::Polars, Backend::Rows];

    pub fn as_str(self) -> &'static str {
        match self {
            Backend::Polars => "polars",
            Backend::Rows => "rows",
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Backend {
    type Err = FrameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "polars" => Ok(Backend::Polars),
            "rows" => Ok(Backend::Rows),
            other => Err(FrameError::UnsupportedBackend {
                name: other.to_string(),
            }),
        }
    }
}

// ==========================================
// Concat strategy
// ==========================================

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConcatMode {
    /// Stack rows; every frame has the same columns with the same types.
    #[default]
    Vertical,
    /// Stack rows; column types are coerced to a common supertype.
    VerticalRelaxed,
    /// Stack columns; every frame has the same number of rows.
    Horizontal,
    /// Stack rows over the union of all columns, filling gaps with nulls.
    Diagonal,
    /// `Diagonal` with supertype coercion.
    DiagonalRelaxed,
    /// Full outer join on the columns shared by every frame.
    Align,
}

impl ConcatMode {
    pub const ALL: [ConcatMode; 6] = [
        ConcatMode::Vertical,
        ConcatMode::VerticalRelaxed,
        ConcatMode::Horizontal,
        ConcatMode::Diagonal,
        ConcatMode::DiagonalRelaxed,
        ConcatMode::Align,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ConcatMode::Vertical => "vertical",
            ConcatMode::VerticalRelaxed => "vertical_relaxed",
            ConcatMode::Horizontal => "horizontal",
            ConcatMode::Diagonal => "diagonal",
            ConcatMode::DiagonalRelaxed => "diagonal_relaxed",
            ConcatMode::Align => "align",
        }
    }

    /// Whether mismatched column types are coerced instead of rejected.
    pub fn is_relaxed(self) -> bool {
        matches!(self, ConcatMode::VerticalRelaxed | ConcatMode::DiagonalRelaxed)
    }
}

impl fmt::Display for ConcatMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConcatMode {
    type Err = FrameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ConcatMode::ALL
            .into_iter()
            .find(|mode| mode.as_str() == s)
            .ok_or_else(|| FrameError::InvalidArgument(format!("unknown concat mode '{s}'")))
    }
}

// ==========================================
// Neutral schema report
// ==========================================

/// Backend-neutral description of a column's storage type.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum DType {
    Int64,
    Float64,
    String,
    Boolean,
    /// Row-engine column that accepts any cell.
    Object,
    /// Any other engine type, by its engine name.
    Other(String),
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DType::Int64 => f.write_str("i64"),
            DType::Float64 => f.write_str("f64"),
            DType::String => f.write_str("str"),
            DType::Boolean => f.write_str("bool"),
            DType::Object => f.write_str("object"),
            DType::Other(name) => f.write_str(name),
        }
    }
}

/// Ordered `(name, type)` pairs reported by a frame.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FrameSchema {
    fields: Vec<(String, DType)>,
}

impl FrameSchema {
    pub fn new(fields: Vec<(String, DType)>) -> Self {
        Self { fields }
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    pub fn fields(&self) -> &[(String, DType)] {
        &self.fields
    }

    pub fn get(&self, name: &str) -> Option<&DType> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, dtype)| dtype)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Names present in every schema, in the first schema's order.
    pub fn common_names(schemas: &[FrameSchema]) -> Vec<String> {
        let Some((first, rest)) = schemas.split_first() else {
            return Vec::new();
        };
        first
            .names()
            .filter(|name| rest.iter().all(|s| s.contains(name)))
            .map(str::to_string)
            .collect()
    }
}

impl fmt::Display for FrameSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .fields
            .iter()
            .map(|(name, dtype)| format!("{name}: {dtype}"))
            .collect();
        write!(f, "{{{}}}", parts.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_tokens() {
        assert_eq!("polars".parse::<Backend>().unwrap(), Backend::Polars);
        assert_eq!("rows".parse::<Backend>().unwrap(), Backend::Rows);
        let err = "unsupported_engine".parse::<Backend>().unwrap_err();
        assert!(matches!(err, FrameError::UnsupportedBackend { ref name } if name == "unsupported_engine"));
    }

    #[test]
    fn concat_mode_tokens_match_display() {
        for mode in ConcatMode::ALL {
            assert_eq!(mode.as_str().parse::<ConcatMode>().unwrap(), mode);
        }
        assert!("sideways".parse::<ConcatMode>().is_err());
        assert_eq!(ConcatMode::default(), ConcatMode::Vertical);
    }

    #[test]
    fn schema_display() {
        let schema = FrameSchema::new(vec![
            ("id".into(), DType::Int64),
            ("tag".into(), DType::Other("i32".into())),
        ]);
        assert_eq!(schema.to_string(), "{id: i64, tag: i32}");
        assert_eq!(schema.get("tag"), Some(&DType::Other("i32".into())));
        assert!(!schema.contains("missing"));
    }
}
