//! Streaming CSV adapter: parse an address column row by row.

use std::path::Path;

use anyhow::{Context, Result, bail};
use tracing::info;

use addr_core::{AddressService, ParseOptions};
use addr_model::Address;

use crate::frame::FailurePolicy;

/// Counters from one CSV batch run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub total: usize,
    pub parsed: usize,
    pub failed: usize,
}

/// Stream `input` to `output`, appending one column per address component
/// for the addresses found in `column`. Rows are parsed tolerantly; the
/// failure policy decides what lands in the output row.
pub fn parse_csv_file(
    input: &Path,
    output: &Path,
    column: &str,
    service: &AddressService,
    parse_options: &ParseOptions,
    policy: FailurePolicy,
    route: bool,
) -> Result<BatchSummary> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(input)
        .with_context(|| format!("open input csv: {}", input.display()))?;
    let headers = reader.headers().context("read csv headers")?.clone();
    let column_index = headers
        .iter()
        .position(|header| header == column)
        .with_context(|| format!("address column not found: {column}"))?;

    let component_names: Vec<String> = Address::default().to_field_map().into_keys().collect();

    let mut writer = csv::WriterBuilder::new()
        .from_path(output)
        .with_context(|| format!("open output csv: {}", output.display()))?;
    let mut out_headers: Vec<String> = headers.iter().map(str::to_string).collect();
    out_headers.extend(component_names.iter().cloned());
    writer.write_record(&out_headers).context("write headers")?;

    let mut summary = BatchSummary::default();
    for record in reader.records() {
        let record = record.context("read csv record")?;
        summary.total += 1;

        let raw = record.get(column_index).unwrap_or_default().trim();
        let field_map = if raw.is_empty() {
            None
        } else {
            let result = if route {
                service.parse_routed(raw, parse_options)
            } else {
                service.parse(raw, parse_options)
            };
            if result.is_parsed() {
                summary.parsed += 1;
                Some(result.to_field_map())
            } else {
                summary.failed += 1;
                match policy {
                    FailurePolicy::Raise => {
                        let message = result
                            .error
                            .map(|error| error.to_string())
                            .unwrap_or_else(|| "parse failed".to_string());
                        bail!("row {}: failed to parse {raw:?}: {message}", summary.total);
                    }
                    FailurePolicy::NullFill => None,
                    FailurePolicy::Passthrough => {
                        let mut map = Address::default().to_field_map();
                        map.insert("full".to_string(), Some(raw.to_string()));
                        Some(map)
                    }
                }
            }
        };

        let mut row: Vec<String> = record.iter().map(str::to_string).collect();
        for name in &component_names {
            let value = field_map
                .as_ref()
                .and_then(|map| map.get(name).cloned().flatten())
                .unwrap_or_default();
            row.push(value);
        }
        writer.write_record(&row).context("write csv record")?;
    }

    writer.flush().context("flush output csv")?;
    info!(
        total = summary.total,
        parsed = summary.parsed,
        failed = summary.failed,
        "csv batch complete"
    );
    Ok(summary)
}
