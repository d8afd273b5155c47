use polars_core::prelude::*;

use crate::datatypes::LogicalType;
use crate::rows::RowDType;

/// Column name -> logical type, in declaration order.
///
/// Keys are unique: adding a name that is already present replaces its type
/// and keeps its original position, the way a mapping literal would.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SchemaSpec {
    columns: Vec<(String, LogicalType)>,
}

impl SchemaSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_column(mut self, name: impl Into<String>, dtype: impl Into<LogicalType>) -> Self {
        self.insert(name, dtype);
        self
    }

    /// Returns the previous type of `name`, if it was already declared.
    pub fn insert(&mut self, name: impl Into<String>, dtype: impl Into<LogicalType>) -> Option<LogicalType> {
        let name = name.into();
        let dtype = dtype.into();
        match self.columns.iter_mut().find(|(n, _)| *n == name) {
            Some((_, slot)) => Some(std::mem::replace(slot, dtype)),
            None => {
                self.columns.push((name, dtype));
                None
            }
        }
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<LogicalType> {
        self.columns
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, dtype)| *dtype)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, LogicalType)> {
        self.columns.iter().map(|(name, dtype)| (name.as_str(), *dtype))
    }

    /// Polars schema with each logical type mapped to its storage type.
    pub fn to_polars_schema(&self) -> Schema {
        let mut schema = Schema::with_capacity(self.columns.len());
        for (name, dtype) in &self.columns {
            schema.with_column(name.as_str().into(), dtype.polars_dtype());
        }
        schema
    }

    /// Row-engine column list with each logical type mapped to its storage type.
    pub fn to_row_columns(&self) -> Vec<(String, RowDType)> {
        self.columns
            .iter()
            .map(|(name, dtype)| (name.clone(), dtype.row_dtype()))
            .collect()
    }
}

impl<K, T> FromIterator<(K, T)> for SchemaSpec
where
    K: Into<String>,
    T: Into<LogicalType>,
{
    fn from_iter<I: IntoIterator<Item = (K, T)>>(iter: I) -> Self {
        let mut spec = SchemaSpec::new();
        for (name, dtype) in iter {
            spec.insert(name, dtype);
        }
        spec
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_declaration_order() {
        let spec = SchemaSpec::new()
            .with_column("score", LogicalType::Float)
            .with_column("id", LogicalType::Integer)
            .with_column("name", "str");
        assert_eq!(spec.names().collect::<Vec<_>>(), ["score", "id", "name"]);
    }

    #[test]
    fn duplicate_key_replaces_in_place() {
        let mut spec: SchemaSpec = [("a", "int"), ("b", "bool")].into_iter().collect();
        assert_eq!(spec.insert("a", LogicalType::Float), Some(LogicalType::Integer));
        assert_eq!(spec.len(), 2);
        assert_eq!(spec.iter().next(), Some(("a", LogicalType::Float)));
    }

    #[test]
    fn polars_schema_mapping() {
        let spec: SchemaSpec = [("id", "int"), ("note", "mystery")].into_iter().collect();
        let schema = spec.to_polars_schema();
        assert_eq!(schema.len(), 2);
        assert_eq!(schema.get("id"), Some(&DataType::Int64));
        assert_eq!(schema.get("note"), Some(&DataType::String));
    }
}
