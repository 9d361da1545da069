use std::collections::{BTreeMap, BTreeSet};

use contingency_table::{ContingencyTable, TableError};

fn weather_table() -> ContingencyTable {
    // Outlook, Windy, Play
    let mut table = ContingencyTable::with_columns(["Outlook", "Windy", "Play"]).unwrap();
    let rows = [
        [0, 0, 0],
        [0, 1, 0],
        [1, 0, 1],
        [2, 0, 1],
        [2, 0, 1],
        [2, 1, 0],
        [1, 1, 1],
        [0, 0, 0],
        [0, 0, 1],
        [2, 0, 1],
    ];
    for row in rows {
        table.add_row(&row).unwrap();
    }
    table
}

#[test]
fn column_states_are_distinct() {
    let mut table = ContingencyTable::with_columns(["Col1", "Col2"]).unwrap();
    table.add_row(&[1, 2]).unwrap();
    table.add_row(&[1, 3]).unwrap();
    table.add_row(&[2, 2]).unwrap();

    let states = table.column_states("Col1").unwrap();
    assert_eq!(states, BTreeSet::from([1, 2]));
    assert_eq!(table.number_of_states("Col2").unwrap(), 2);
    assert_eq!(table.number_of_states(1usize).unwrap(), 2);
}

#[test]
fn column_lookup_failures() {
    let table = weather_table();
    assert!(matches!(
        table.column_states("Humidity"),
        Err(TableError::ColumnNotFound { .. })
    ));
    assert!(matches!(
        table.column_states(3usize),
        Err(TableError::ColumnNotFound { .. })
    ));
    assert!(matches!(
        table.state_count("Weight", 1),
        Err(TableError::ColumnNotFound { .. })
    ));
}

#[test]
fn state_count_is_weighted() {
    let table = weather_table();
    // [0,0,0] appears twice, so fewer logical rows than observations
    assert_eq!(table.total_weight(), 10);
    assert!(table.row_count() < 10);

    assert_eq!(table.state_count("Outlook", 0).unwrap(), 4);
    assert_eq!(table.state_count("Outlook", 1).unwrap(), 2);
    assert_eq!(table.state_count("Outlook", 2).unwrap(), 4);
    assert_eq!(table.state_count(2usize, 1).unwrap(), 6);
    assert_eq!(table.state_count("Outlook", 7).unwrap(), 0);
}

#[test]
fn state_counts_match_individual_counts() {
    let table = weather_table();
    let counts = table.state_counts("Play").unwrap();
    assert_eq!(counts, BTreeMap::from([(0, 4), (1, 6)]));
    for (state, count) in counts {
        assert_eq!(table.state_count("Play", state).unwrap(), count);
    }
}

#[test]
fn probabilities_sum_to_one() {
    let table = weather_table();
    for name in ["Outlook", "Windy", "Play"] {
        let total: f64 = table
            .column_states(name)
            .unwrap()
            .into_iter()
            .map(|state| table.state_probability(name, state))
            .sum();
        assert!((total - 1.0).abs() < 1e-9, "{name} sums to {total}");
    }
}

#[test]
fn probability_is_zero_for_missing_inputs() {
    let table = weather_table();
    assert_eq!(table.state_probability("Outlook", 9), 0.0);
    assert_eq!(table.state_probability("Humidity", 0), 0.0);
    assert_eq!(table.state_probability(5usize, 0), 0.0);

    let empty = ContingencyTable::with_columns(["A"]).unwrap();
    assert_eq!(empty.state_probability("A", 0), 0.0);
}

#[test]
fn probability_tracks_removed_rows() {
    let mut table = ContingencyTable::with_columns(["A", "B"]).unwrap();
    table.add_row(&[1, 1]).unwrap();
    table.add_row(&[2, 2]).unwrap();
    table.add_row(&[1, 1]).unwrap();
    table.remove_row(0).unwrap();
    assert_eq!(table.state_probability("A", 1), 0.0);
    assert_eq!(table.state_probability("A", 2), 1.0);
}

#[test]
fn column_name_excludes_weight_column() {
    let table = weather_table();
    assert_eq!(table.column_name(0).unwrap(), "Outlook");
    assert_eq!(table.column_name(2).unwrap(), "Play");
    assert!(matches!(
        table.column_name(3),
        Err(TableError::ColumnNotFound { .. })
    ));
}

#[test]
fn row_views() {
    let table = weather_table();
    let rows: Vec<_> = table.rows().collect();
    assert_eq!(rows.len(), table.row_count());
    assert_eq!(rows[0].states, vec![0, 0, 0]);
    assert_eq!(rows[0].weight, 2);
    assert_eq!(
        rows.iter().map(|r| r.weight).sum::<u64>(),
        table.total_weight()
    );
    assert!(matches!(
        table.row(rows.len()),
        Err(TableError::RowIndexOutOfRange { .. })
    ));
}
