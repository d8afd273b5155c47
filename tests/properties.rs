use proptest::prelude::*;
use sporty_frames::{
    adapter, Backend, ConcatMode, LogicalType, NativeFrame, RowDType, RowFrame, SchemaSpec, Value,
};

fn logical_type() -> impl Strategy<Value = LogicalType> {
    prop::sample::select(LogicalType::ALL.to_vec())
}

/// Unique column names with random logical types.
fn schema_spec() -> impl Strategy<Value = SchemaSpec> {
    prop::collection::btree_map("[a-z][a-z0-9_]{0,7}", logical_type(), 0..8)
        .prop_map(|columns| columns.into_iter().collect::<SchemaSpec>())
}

fn backend() -> impl Strategy<Value = Backend> {
    prop::sample::select(Backend::ALL.to_vec())
}

/// An `(id: int64, score: float64)` row frame with `n` rows.
fn id_score_rows(ids: Vec<i64>, scores: Vec<f64>) -> RowFrame {
    RowFrame::new(
        vec![("id".into(), RowDType::Int64), ("score".into(), RowDType::Float64)],
        ids.into_iter()
            .zip(scores)
            .map(|(id, score)| vec![Value::Int(id), Value::Float(score)])
            .collect(),
    )
    .unwrap()
}

fn id_score_frame() -> impl Strategy<Value = RowFrame> {
    (0usize..6).prop_flat_map(|n| {
        (
            prop::collection::vec(any::<i64>(), n),
            prop::collection::vec(-1.0e6f64..1.0e6, n),
        )
            .prop_map(|(ids, scores)| id_score_rows(ids, scores))
    })
}

proptest! {
    /// Property: an empty frame has exactly the declared columns, in order.
    #[test]
    fn prop_create_empty_matches_schema(schema in schema_spec(), backend in backend()) {
        let frame = adapter::create_empty(&schema, backend).unwrap();
        let expected: Vec<&str> = schema.names().collect();
        prop_assert_eq!(frame.columns().unwrap(), expected);
        prop_assert_eq!(frame.height().unwrap(), Some(0));
        prop_assert_eq!(frame.backend(), backend);
    }

    /// Property: wrap then to_native hands back the frame unchanged.
    #[test]
    fn prop_wrap_round_trip(frame in id_score_frame(), backend in backend()) {
        let native = adapter::wrap(frame).to_backend(backend).unwrap().into_native();
        let back = adapter::to_native(adapter::wrap(native.clone()));
        match (native, back) {
            (NativeFrame::Polars(a), NativeFrame::Polars(b)) => prop_assert!(a.equals_missing(&b)),
            (NativeFrame::Rows(a), NativeFrame::Rows(b)) => prop_assert_eq!(a, b),
            (a, b) => prop_assert!(false, "{} came back as {}", a.kind().as_str(), b.kind().as_str()),
        }
    }

    /// Property: vertical concat keeps every row, in input order.
    #[test]
    fn prop_vertical_concat_preserves_rows(
        a in id_score_frame(),
        b in id_score_frame(),
        backend in backend(),
    ) {
        let expected: Vec<Vec<Value>> = a.rows().iter().chain(b.rows()).cloned().collect();
        let left = adapter::wrap(a).to_backend(backend).unwrap();
        let right = adapter::wrap(b).to_backend(backend).unwrap();

        let out = adapter::concat(vec![left, right], ConcatMode::Vertical).unwrap();
        prop_assert_eq!(out.columns().unwrap(), vec!["id".to_string(), "score".to_string()]);

        let rows = adapter::to_native(out.to_backend(Backend::Rows).unwrap()).into_rows().unwrap();
        prop_assert_eq!(rows.rows(), expected.as_slice());
    }

    /// Property: conversion between engines loses nothing for int/float data.
    #[test]
    fn prop_backend_conversion_round_trip(frame in id_score_frame()) {
        let there = adapter::wrap(frame.clone()).to_backend(Backend::Polars).unwrap();
        let back = adapter::to_native(there.to_backend(Backend::Rows).unwrap()).into_rows().unwrap();
        prop_assert_eq!(back, frame);
    }
}
