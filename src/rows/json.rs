use serde_json::{Map, Value as Json};

use super::{RowDType, RowError, RowFrame, Value};

impl RowFrame {
    /// Parse `[{"col": value, ...}, ...]` records.
    ///
    /// Columns appear in first-seen key order. A column's type is the
    /// supertype of its non-null cells (`object` when every cell is null);
    /// keys missing from a record read as null.
    pub fn from_json_records(json: &str) -> Result<Self, RowError> {
        let records: Vec<Map<String, Json>> = serde_json::from_str(json)?;

        let mut columns: Vec<(String, Option<RowDType>)> = Vec::new();
        let mut parsed: Vec<Vec<(usize, Value)>> = Vec::with_capacity(records.len());
        for record in records {
            let mut cells = Vec::with_capacity(record.len());
            for (key, raw) in record {
                let cell = cell_from_json(raw);
                let idx = match columns.iter().position(|(name, _)| *name == key) {
                    Some(idx) => idx,
                    None => {
                        columns.push((key, None));
                        columns.len() - 1
                    }
                };
                if let Some(found) = RowDType::infer(&cell) {
                    let slot = &mut columns[idx].1;
                    *slot = Some(slot.map_or(found, |current| current.supertype(found)));
                }
                cells.push((idx, cell));
            }
            parsed.push(cells);
        }

        let columns: Vec<(String, RowDType)> = columns
            .into_iter()
            .map(|(name, dtype)| (name, dtype.unwrap_or(RowDType::Object)))
            .collect();

        let mut rows = Vec::with_capacity(parsed.len());
        for cells in parsed {
            let mut row = vec![Value::Null; columns.len()];
            for (idx, cell) in cells {
                row[idx] = cell.coerce(columns[idx].1)?;
            }
            rows.push(row);
        }
        Self::new(columns, rows)
    }

    /// Serialize as `[{"col": value, ...}, ...]`, one object per row.
    pub fn to_json_records(&self) -> Result<String, RowError> {
        let records = self
            .rows
            .iter()
            .map(|row| {
                self.columns
                    .iter()
                    .zip(row)
                    .map(|((name, _), cell)| -> Result<(String, Json), RowError> {
                        Ok((name.clone(), serde_json::to_value(cell)?))
                    })
                    .collect::<Result<Map<String, Json>, RowError>>()
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(serde_json::to_string(&records)?)
    }
}

fn cell_from_json(raw: Json) -> Value {
    match raw {
        Json::Null => Value::Null,
        Json::Bool(v) => Value::Bool(v),
        Json::Number(n) => match n.as_i64() {
            Some(v) => Value::Int(v),
            None => n.as_f64().map(Value::Float).unwrap_or(Value::Null),
        },
        Json::String(s) => Value::Str(s),
        // Nested structures are kept as their JSON text.
        nested => Value::Str(nested.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn infers_columns_in_key_order() {
        let frame = RowFrame::from_json_records(
            r#"[{"id": 1, "xg": 0.4, "team": "home"},
                {"id": 2, "xg": 1, "shot": true}]"#,
        )
        .unwrap();

        assert_eq!(frame.column_names().collect::<Vec<_>>(), ["id", "xg", "team", "shot"]);
        assert_eq!(frame.dtype("id"), Some(RowDType::Int64));
        assert_eq!(frame.dtype("xg"), Some(RowDType::Float64));
        assert_eq!(frame.dtype("team"), Some(RowDType::Object));
        assert_eq!(frame.dtype("shot"), Some(RowDType::Bool));
        assert_eq!(frame.rows()[1][1], Value::Float(1.0));
        assert_eq!(frame.rows()[0][3], Value::Null);
    }

    #[test]
    fn all_null_column_is_object() {
        let frame = RowFrame::from_json_records(r#"[{"note": null}]"#).unwrap();
        assert_eq!(frame.dtype("note"), Some(RowDType::Object));
    }

    #[test]
    fn records_round_trip() {
        let json = r#"[{"id":1,"name":"ana","active":true},{"id":2,"name":null,"active":false}]"#;
        let frame = RowFrame::from_json_records(json).unwrap();
        assert_eq!(frame.to_json_records().unwrap(), json);
    }

    #[test]
    fn rejects_non_array() {
        assert!(matches!(RowFrame::from_json_records("{\"a\": 1}"), Err(RowError::Json(_))));
    }
}
