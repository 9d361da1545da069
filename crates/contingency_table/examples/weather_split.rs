use contingency_table::ContingencyTable;

fn entropy(table: &ContingencyTable, target: &str) -> f64 {
    table
        .column_states(target)
        .unwrap()
        .into_iter()
        .map(|state| table.state_probability(target, state))
        .filter(|&p| p > 0.0)
        .map(|p| -p * p.log2())
        .sum()
}

fn main() {
    // Outlook (0 sunny, 1 overcast, 2 rain), Windy, Play
    let mut table = ContingencyTable::with_columns(["Outlook", "Windy", "Play"]).unwrap();
    let observations = [
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
        [0, 1, 1],
        [1, 1, 1],
        [1, 0, 1],
        [2, 1, 0],
    ];
    for row in observations {
        table.add_row(&row).unwrap();
    }

    println!("{}", table);
    println!(
        "{} observations in {} logical rows",
        table.total_weight(),
        table.row_count()
    );

    let base = entropy(&table, "Play");
    let total = table.total_weight() as f64;
    for index in 0..table.feature_count().saturating_sub(1) {
        let name = table.column_name(index).unwrap().to_string();
        let remainder: f64 = table
            .column_states(index)
            .unwrap()
            .into_iter()
            .map(|state| {
                let child = table.filter_by_state(index, state).unwrap();
                child.total_weight() as f64 / total * entropy(&child, "Play")
            })
            .sum();
        println!("gain({}) = {:.4}", name, base - remainder);
    }
}
