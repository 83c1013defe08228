use std::path::Path;

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use csvjoin_core::{FileStats, MergeReport};

pub fn print_summary(report: &MergeReport) {
    if let Some(path) = &report.output {
        println!("Output: {}", path.display());
    }
    println!("{}", summary_table(report));
    if report.fields_rewritten > 0 {
        println!("Decimal fields rewritten: {}", report.fields_rewritten);
    }
}

/// Builds the per-file summary with a trailing TOTAL row.
pub fn summary_table(report: &MergeReport) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("File"),
        header_cell("Rows read"),
        header_cell("Rows written"),
        header_cell("Header"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Center);

    let mut total_read = 0usize;
    for stats in &report.files {
        total_read += stats.rows_read;
        table.add_row(vec![
            Cell::new(file_label(&stats.path)),
            Cell::new(stats.rows_read),
            Cell::new(stats.rows_written),
            header_status_cell(stats),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(total_read).add_attribute(Attribute::Bold),
        Cell::new(report.rows_written).add_attribute(Attribute::Bold),
        dim_cell("-"),
    ]);
    table
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map_or_else(|| path.display().to_string(), |name| name.to_string_lossy().into_owned())
}

fn header_status_cell(stats: &FileStats) -> Cell {
    if stats.header_skipped {
        dim_cell("skipped")
    } else if stats.rows_written > 0 {
        Cell::new("kept").fg(Color::Green)
    } else {
        dim_cell("empty")
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
