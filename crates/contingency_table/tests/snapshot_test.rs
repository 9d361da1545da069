use contingency_table::snapshot::TableSnapshot;
use contingency_table::{ContingencyTable, FeatureColumn, TableError};

fn ab_table() -> ContingencyTable {
    let mut table = ContingencyTable::with_columns(["A", "B"]).unwrap();
    table.add_row(&[1, 1]).unwrap();
    table.add_row(&[2, 2]).unwrap();
    table.add_row(&[1, 1]).unwrap();
    table
}

#[test]
fn json_round_trip_preserves_table() {
    let table = ab_table();
    let json = serde_json::to_string(&table).unwrap();
    let restored: ContingencyTable = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, table);
    assert_eq!(restored.total_weight(), 3);
}

#[test]
fn snapshot_layout_is_column_oriented() {
    let value = serde_json::to_value(ab_table()).unwrap();
    assert_eq!(value["weight_column"], "Weight");
    assert_eq!(value["columns"][0]["name"], "A");
    assert_eq!(value["columns"][0]["values"], serde_json::json!([1, 2]));
    assert_eq!(value["weights"], serde_json::json!([2, 1]));
}

#[test]
fn deserializing_merges_duplicate_rows() {
    let json = r#"{
        "weight_column": "Weight",
        "columns": [{"name": "A", "values": [1, 2, 1]}],
        "weights": [2, 1, 4]
    }"#;
    let table: ContingencyTable = serde_json::from_str(json).unwrap();
    assert_eq!(table.row_count(), 2);
    assert_eq!(table.weight(0).unwrap(), 6);
    assert_eq!(table.total_weight(), 7);
}

#[test]
fn invalid_snapshots_are_rejected() {
    let ragged = TableSnapshot {
        weight_column: "Weight".to_string(),
        columns: vec![FeatureColumn {
            name: "A".to_string(),
            values: vec![1],
        }],
        weights: vec![1, 1],
    };
    assert!(matches!(
        ContingencyTable::try_from(ragged),
        Err(TableError::InvalidSnapshot(_))
    ));

    let zero_weight = r#"{"weight_column": "W", "columns": [{"name": "A", "values": [1]}], "weights": [0]}"#;
    assert!(serde_json::from_str::<ContingencyTable>(zero_weight).is_err());

    let duplicate_name = r#"{"weight_column": "A", "columns": [{"name": "A", "values": []}], "weights": []}"#;
    assert!(serde_json::from_str::<ContingencyTable>(duplicate_name).is_err());
}
