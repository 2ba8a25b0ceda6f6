use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use specview_cli::pipeline::RenderedView;
use specview_config::ConfigStore;
use specview_model::ColumnSpec;
use specview_transform::{ColumnFacet, Facet, ViewTable};

pub fn print_view(rendered: &RenderedView) {
    println!("Category: {}", rendered.category);
    if let Some(series) = &rendered.series {
        println!("Series: {series}");
    }
    println!("Config: {}", rendered.source);
    println!(
        "Rows: {} selected, {} after filters",
        rendered.selected_rows, rendered.matched_rows
    );
    for warning in &rendered.warnings {
        eprintln!("warning: {warning}");
    }

    let grid = rendered.table.to_grid();
    let key_count = grid.headers.len() - value_column_count(rendered);
    let mut table = Table::new();
    table.set_header(
        grid.headers
            .iter()
            .enumerate()
            .map(|(idx, header)| {
                if idx < key_count {
                    header_cell(header)
                } else {
                    value_header_cell(header)
                }
            })
            .collect::<Vec<_>>(),
    );
    apply_view_table_style(&mut table);
    for row in grid.rows {
        table.add_row(row.into_iter().enumerate().map(|(idx, value)| {
            if idx < key_count {
                Cell::new(value).add_attribute(Attribute::Bold)
            } else if value.is_empty() {
                dim_cell("-")
            } else {
                Cell::new(value)
            }
        }));
    }
    println!("{table}");
}

fn value_column_count(rendered: &RenderedView) -> usize {
    match &rendered.table {
        ViewTable::Pivot(table) => table.columns.len(),
        ViewTable::Flat(_) => 1,
    }
}

pub fn print_categories(store: &ConfigStore) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Category"),
        header_cell("Default"),
        header_cell("Series configs"),
        header_cell("Series"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Center);
    align_column(&mut table, 2, CellAlignment::Right);
    for (name, category) in store.categories() {
        let default_cell = if category.default_config.is_some() {
            Cell::new("✓")
                .fg(Color::Green)
                .add_attribute(Attribute::Bold)
        } else {
            dim_cell("-")
        };
        let series: Vec<&str> = category
            .series_configs
            .iter()
            .flat_map(|entry| entry.series.iter().map(String::as_str))
            .collect();
        let name_cell = if category.is_usable() {
            Cell::new(name).fg(Color::Blue).add_attribute(Attribute::Bold)
        } else {
            Cell::new(name).fg(Color::Red)
        };
        table.add_row(vec![
            name_cell,
            default_cell,
            count_cell(category.series_configs.len()),
            if series.is_empty() {
                dim_cell("-")
            } else {
                Cell::new(series.join(", "))
            },
        ]);
    }
    println!("{table}");
}

pub fn print_columns(columns: &[ColumnSpec], facets: &[ColumnFacet]) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Column"),
        header_cell("Type"),
        header_cell("Values"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Center);
    for column in columns {
        let facet = facets
            .iter()
            .find(|facet| facet.column == *column)
            .map(|facet| &facet.facet);
        table.add_row(vec![
            Cell::new(column.name()).fg(Color::Blue),
            Cell::new(column.column_type().as_str()),
            match facet {
                Some(facet) => Cell::new(facet_summary(facet)),
                None => dim_cell("-"),
            },
        ]);
    }
    println!("{table}");
}

fn facet_summary(facet: &Facet) -> String {
    match facet {
        Facet::Lov { options } => options.join(", "),
        Facet::Number { min, max, unit } | Facet::Range { min, max, unit } => {
            match unit.as_deref() {
                Some(unit) => format!("{min} .. {max} {unit}"),
                None => format!("{min} .. {max}"),
            }
        }
        Facet::Logical => "yes / no".to_string(),
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_view_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(165);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn value_header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Magenta)
        .add_attribute(Attribute::Bold)
}

fn count_cell(count: usize) -> Cell {
    if count > 0 {
        Cell::new(count)
    } else {
        dim_cell(count)
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

