//! Human-readable output tables.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};

use addr_model::{AuditRecord, ParseResult, ParseSource};

pub fn print_parse_result(result: &ParseResult) {
    println!("Input:  {}", result.raw_input);
    let source = match result.source {
        Some(ParseSource::Us) => "us",
        Some(ParseSource::International) => "international",
        None => "-",
    };
    println!("Source: {source}");
    println!(
        "Status: {}",
        if result.is_valid() {
            "valid"
        } else if result.is_parsed() {
            "parsed (validation failed)"
        } else {
            "failed"
        }
    );

    if let Some(error) = &result.error {
        println!("Error:  {error}");
    }

    let mut table = Table::new();
    apply_table_style(&mut table);
    table.set_header(vec![header_cell("Component"), header_cell("Value")]);
    for (field, value) in result.to_field_map() {
        if let Some(value) = value
            && !value.is_empty()
        {
            table.add_row(vec![Cell::new(field), Cell::new(value)]);
        }
    }
    println!("{table}");

    if let Some(outcome) = &result.validation
        && !outcome.errors.is_empty()
    {
        let mut errors = Table::new();
        apply_table_style(&mut errors);
        errors.set_header(vec![
            header_cell("Field"),
            header_cell("Error"),
            header_cell("Value"),
        ]);
        for error in &outcome.errors {
            errors.add_row(vec![
                Cell::new(&error.field).fg(Color::Red),
                Cell::new(&error.message),
                Cell::new(error.value.as_deref().unwrap_or("-")),
            ]);
        }
        println!("{errors}");
    }
}

pub fn print_audit(entries: &[AuditRecord]) {
    if entries.is_empty() {
        println!("No transformations recorded.");
        return;
    }
    let mut table = Table::new();
    apply_table_style(&mut table);
    table.set_header(vec![
        header_cell("Source"),
        header_cell("Field"),
        header_cell("Operation"),
        header_cell("Original"),
        header_cell("New"),
        header_cell("Reason"),
    ]);
    for record in entries {
        table.add_row(vec![
            Cell::new(&record.source),
            Cell::new(&record.entry.field),
            Cell::new(record.entry.operation.as_str()),
            Cell::new(record.entry.original_value.as_deref().unwrap_or("-")),
            Cell::new(record.entry.new_value.as_deref().unwrap_or("-")),
            Cell::new(&record.entry.message),
        ]);
    }
    println!("{table}");
}

fn header_cell(text: &str) -> Cell {
    Cell::new(text)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}
