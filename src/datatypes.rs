use polars::prelude::DataType;
use serde::{Deserialize, Serialize};

use crate::rows::RowDType;
use crate::types::DType;

macro_rules! define_logical_type {
    (
        $(#[$meta:meta])*
        pub enum LogicalType {
            // 格式: Variant [aliases] => Polars dtype, row dtype
            $($Variant:ident [$($alias:literal),+] => $Polars:expr, $Row:expr),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "lowercase")]
        pub enum LogicalType {
            $($Variant),*
        }

        impl LogicalType {
            pub const ALL: &'static [LogicalType] = &[$(LogicalType::$Variant),*];

            /// Exact lookup by any of the accepted names (case-insensitive).
            pub fn from_alias(name: &str) -> Option<Self> {
                match name.trim().to_ascii_lowercase().as_str() {
                    $($($alias)|+ => Some(LogicalType::$Variant),)*
                    _ => None,
                }
            }

            /// Storage type used by the Polars backend.
            pub fn polars_dtype(self) -> DataType {
                match self {
                    $(LogicalType::$Variant => $Polars),*
                }
            }

            /// Storage type used by the row backend.
            pub fn row_dtype(self) -> RowDType {
                match self {
                    $(LogicalType::$Variant => $Row),*
                }
            }
        }
    };
}

// 唯一的维护点
define_logical_type! {
    /// Element type of a column in a [`SchemaSpec`](crate::schema::SchemaSpec).
    pub enum LogicalType {
        Integer ["int", "integer", "i64", "int64"]                => DataType::Int64,   RowDType::Int64,
        Float   ["float", "f64", "float64", "double"]             => DataType::Float64, RowDType::Float64,
        Text    ["str", "string", "text", "utf8", "object"]       => DataType::String,  RowDType::Object,
        Boolean ["bool", "boolean"]                               => DataType::Boolean, RowDType::Bool,
    }
}

impl LogicalType {
    /// Like [`LogicalType::from_alias`], but unknown names fall back to text.
    pub fn parse_lenient(name: &str) -> Self {
        Self::from_alias(name).unwrap_or_else(|| {
            tracing::warn!(type_name = name, "unknown logical type, storing as text");
            LogicalType::Text
        })
    }
}

impl From<&str> for LogicalType {
    fn from(name: &str) -> Self {
        LogicalType::parse_lenient(name)
    }
}

/// Neutral name for a Polars column type.
pub fn dtype_from_polars(dtype: &DataType) -> DType {
    match dtype {
        DataType::Int64 => DType::Int64,
        DataType::Float64 => DType::Float64,
        DataType::String => DType::String,
        DataType::Boolean => DType::Boolean,
        other => DType::Other(dtype_to_string_verbose(other)),
    }
}

/// Neutral name for a row-engine column type.
pub fn dtype_from_rows(dtype: RowDType) -> DType {
    match dtype {
        RowDType::Int64 => DType::Int64,
        RowDType::Float64 => DType::Float64,
        RowDType::Object => DType::Object,
        RowDType::Bool => DType::Boolean,
    }
}

fn dtype_to_string_verbose(dt: &DataType) -> String {
    match dt {
        DataType::List(inner) => format!("list[{}]", dtype_to_string_verbose(inner)),
        _ => dt.to_string(),
    }
}
