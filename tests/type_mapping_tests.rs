//! Driver-type to logical-type translation.

use quarry_client::{ClientError, ColumnDesc, LogicalType, Schema};

// ============================================================================
// Mapping table coverage
// ============================================================================

#[test]
fn test_every_engine_type_maps() {
    let cases = [
        ("boolean", LogicalType::Boolean),
        ("tinyint", LogicalType::Int8),
        ("smallint", LogicalType::Int16),
        ("int", LogicalType::Int32),
        ("bigint", LogicalType::Int64),
        ("float", LogicalType::Float),
        ("double", LogicalType::Double),
        ("string", LogicalType::String),
        ("timestamp", LogicalType::Timestamp),
    ];

    for (engine_type, expected) in cases {
        let schema = Schema::from_descriptors(&[ColumnDesc::new("c", engine_type)])
            .unwrap_or_else(|e| panic!("{} failed to map: {}", engine_type, e));
        assert_eq!(schema.get("c"), Some(&expected), "for {}", engine_type);
    }
}

#[test]
fn test_decimal_round_trips_precision_and_scale() {
    let schema = Schema::from_descriptors(&[ColumnDesc::decimal("price", 18, 3)]).unwrap();
    assert_eq!(
        schema.get("price"),
        Some(&LogicalType::Decimal { precision: 18, scale: 3 })
    );

    let schema = Schema::from_descriptors(&[ColumnDesc::decimal("ratio", 38, 0)]).unwrap();
    assert_eq!(
        schema.get("ratio"),
        Some(&LogicalType::Decimal { precision: 38, scale: 0 })
    );
}

#[test]
fn test_type_names_match_case_insensitively() {
    let schema = Schema::from_descriptors(&[
        ColumnDesc::new("a", "BIGINT"),
        ColumnDesc::new("b", "Boolean"),
        ColumnDesc::new("c", "TIMESTAMP"),
    ])
    .unwrap();

    assert_eq!(schema.get("a"), Some(&LogicalType::Int64));
    assert_eq!(schema.get("b"), Some(&LogicalType::Boolean));
    assert_eq!(schema.get("c"), Some(&LogicalType::Timestamp));
}

#[test]
fn test_column_order_is_preserved() {
    let schema = Schema::from_descriptors(&[
        ColumnDesc::new("z", "int"),
        ColumnDesc::new("a", "string"),
        ColumnDesc::new("m", "double"),
    ])
    .unwrap();

    assert_eq!(schema.names().collect::<Vec<_>>(), vec!["z", "a", "m"]);
}

// ============================================================================
// Failing closed
// ============================================================================

#[test]
fn test_unknown_type_fails_closed() {
    let err = Schema::from_descriptors(&[
        ColumnDesc::new("ok", "int"),
        ColumnDesc::new("bad", "varchar"),
    ])
    .unwrap_err();

    match err {
        ClientError::UnsupportedType { column, type_name } => {
            assert_eq!(column, "bad");
            assert_eq!(type_name, "varchar");
        }
        other => panic!("expected unsupported-type error, got {:?}", other),
    }
}

#[test]
fn test_unknown_type_yields_no_partial_schema() {
    // The failing column sits first; nothing after it may leak out.
    let result = Schema::from_descriptors(&[
        ColumnDesc::new("bad", "interval"),
        ColumnDesc::new("ok", "int"),
    ]);
    assert!(result.is_err());
}

#[test]
fn test_decimal_without_parameters_is_rejected() {
    let err = Schema::from_descriptors(&[ColumnDesc::new("price", "decimal")]).unwrap_err();
    assert!(matches!(err, ClientError::SchemaProbe(_)));
}

#[test]
fn test_duplicate_column_names_are_rejected() {
    let err = Schema::from_descriptors(&[
        ColumnDesc::new("a", "int"),
        ColumnDesc::new("a", "string"),
    ])
    .unwrap_err();
    assert!(matches!(err, ClientError::SchemaProbe(_)));
}
