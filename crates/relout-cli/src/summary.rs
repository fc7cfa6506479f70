use std::collections::BTreeMap;

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Cell, ContentArrangement, Table};

use relout_model::Relation;
use relout_table::{PivotColumnKind, PivotRow, PivotTable};

pub fn print_pivot(table: &PivotTable) {
    let mut rendered = Table::new();
    rendered.set_header(
        table
            .columns
            .iter()
            .map(|column| Cell::new(&column.id))
            .collect::<Vec<_>>(),
    );
    apply_table_style(&mut rendered);
    for row in &table.rows {
        rendered.add_row(row_cells(table, row));
    }
    println!("{rendered}");
    for error in &table.errors {
        eprintln!("error: {error}");
    }
}

pub fn print_buckets(buckets: &BTreeMap<String, Vec<Relation>>) {
    let mut rendered = Table::new();
    rendered.set_header(vec!["Bucket", "Relations"]);
    apply_table_style(&mut rendered);
    for (name, relations) in buckets {
        let paths = relations
            .iter()
            .map(Relation::path)
            .collect::<Vec<_>>()
            .join("\n");
        rendered.add_row(vec![name.clone(), paths]);
    }
    println!("{rendered}");
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

/// Flatten one pivot row into display cells following the column order.
fn row_cells(table: &PivotTable, row: &PivotRow) -> Vec<String> {
    table
        .columns
        .iter()
        .map(|column| match column.kind {
            PivotColumnKind::RowHeader { position } => row
                .headers
                .get(position)
                .map(relout_model::TypedValue::display_form)
                .unwrap_or_default(),
            PivotColumnKind::Value => row
                .cells
                .get(&column.id)
                .map(relout_model::TypedValue::display_form)
                .unwrap_or_default(),
        })
        .collect()
}
