use std::path::Path;

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};
use polars::prelude::{AnyValue, DataFrame};

use crate::commands::UserIdRow;

pub fn print_user_ids(rows: &[UserIdRow]) {
    for row in rows {
        println!("Id for {}: {}", row.username, row.id);
    }
}

pub fn print_output(path: &Path) {
    println!("{}", path.display());
}

pub fn print_columns(df: &DataFrame) {
    println!("{}", columns_table(df));
    println!("{} rows", df.height());
}

/// Render a frame as a table, one header cell per column.
pub fn columns_table(df: &DataFrame) -> Table {
    let mut table = Table::new();
    table.set_header(
        df.get_column_names()
            .into_iter()
            .map(|name| header_cell(name.as_str()))
            .collect::<Vec<_>>(),
    );
    apply_table_style(&mut table);
    let columns = df.get_columns();
    for idx in 0..df.height() {
        let row: Vec<Cell> = columns
            .iter()
            .map(|column| value_cell(column.get(idx).unwrap_or(AnyValue::Null)))
            .collect();
        table.add_row(row);
    }
    table
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn value_cell(value: AnyValue) -> Cell {
    if value.is_null() {
        Cell::new("null").fg(Color::DarkGrey)
    } else {
        Cell::new(any_to_string(value))
    }
}

fn any_to_string(value: AnyValue) -> String {
    match value {
        AnyValue::Null => String::new(),
        AnyValue::String(s) => s.to_string(),
        AnyValue::StringOwned(s) => s.to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::{IntoColumn, NamedFrom, Series};

    #[test]
    fn test_columns_table_shape() {
        let df = DataFrame::new(vec![
            Series::new("hashed_id".into(), vec![Some("675f4ccc"), None]).into_column(),
            Series::new("score".into(), vec![1i64, 2]).into_column(),
        ])
        .unwrap();

        let mut table = columns_table(&df);

        assert_eq!(table.column_count(), 2);
        assert_eq!(table.row_iter().count(), 2);
        let rendered = table.to_string();
        assert!(rendered.contains("hashed_id"));
        assert!(rendered.contains("675f4ccc"));
        assert!(rendered.contains("null"));
    }

    #[test]
    fn test_any_to_string_strips_quotes() {
        assert_eq!(any_to_string(AnyValue::String("abc")), "abc");
        assert_eq!(any_to_string(AnyValue::Int64(7)), "7");
        assert_eq!(any_to_string(AnyValue::Null), "");
    }
}
