//! Global config lives for the whole process, so everything touching it sits
//! in this one test binary and one test.

use sporty_frames::{adapter, config, AdapterConfig, Backend, ConcatMode, RowFrame, SchemaSpec};

#[test]
fn installed_config_drives_the_default_entry_points() {
    let cfg = AdapterConfig {
        default_backend: Backend::Rows,
        default_concat: ConcatMode::Diagonal,
    };
    assert!(config::install(cfg.clone()).is_ok());
    assert_eq!(config::global(), &cfg);

    let schema = SchemaSpec::new().with_column("id", "int").with_column("team", "str");
    let empty = adapter::create_empty_default(&schema).unwrap();
    assert_eq!(empty.backend(), Backend::Rows);
    assert_eq!(empty.columns().unwrap(), ["id", "team"]);

    let ids = RowFrame::from_json_records(r#"[{"id": 1}]"#).unwrap();
    let minutes = RowFrame::from_json_records(r#"[{"minute": 88}]"#).unwrap();
    let out = adapter::concat_default(vec![adapter::wrap(ids), adapter::wrap(minutes)]).unwrap();
    assert_eq!(out.backend(), Backend::Rows);
    assert_eq!(out.columns().unwrap(), ["id", "minute"]);
    assert_eq!(out.height().unwrap(), Some(2));

    let again = AdapterConfig::default();
    assert_eq!(config::install(again.clone()), Err(again));
    assert_eq!(config::global(), &cfg);
}
