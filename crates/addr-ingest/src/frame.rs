//! DataFrame adapter: expand a raw-address column into component columns.

use anyhow::{Context, Result, bail};
use polars::prelude::{AnyValue, DataFrame, NamedFrom, Series};
use tracing::debug;

use addr_core::{AddressService, ParseOptions};
use addr_model::Address;

/// What to do when a cell fails to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Fail the whole operation on the first bad cell.
    Raise,
    /// Null out every component column for the bad cell.
    #[default]
    NullFill,
    /// Null components, but carry the original raw text in the `full`
    /// column.
    Passthrough,
}

/// Options for tabular parsing.
#[derive(Debug, Clone, Default)]
pub struct IngestOptions {
    pub parse: ParseOptions,
    pub policy: FailurePolicy,
    /// Prefix prepended to every generated column name.
    pub prefix: String,
    /// Route each cell through the US/international orchestrator instead
    /// of the domestic-only path.
    pub route: bool,
}

/// Ordered component columns materialized for every parsed cell.
fn output_columns() -> Vec<String> {
    Address::default().to_field_map().into_keys().collect()
}

/// Parse `column` of `df` and append one column per address component.
///
/// Cells are parsed independently; output row order matches input order.
pub fn expand_address_column(
    df: &DataFrame,
    column: &str,
    service: &AddressService,
    options: &IngestOptions,
) -> Result<DataFrame> {
    let series = df
        .column(column)
        .with_context(|| format!("address column not found: {column}"))?;

    let raw_values: Vec<Option<String>> = (0..df.height())
        .map(|idx| match series.get(idx).unwrap_or(AnyValue::Null) {
            AnyValue::Null => None,
            AnyValue::String(value) => Some(value.to_string()),
            AnyValue::StringOwned(value) => Some(value.to_string()),
            other => Some(other.to_string()),
        })
        .collect();

    let columns = output_columns();
    let mut values: Vec<Vec<Option<String>>> = vec![Vec::with_capacity(df.height()); columns.len()];

    for raw in &raw_values {
        let field_map = match raw {
            Some(text) if !text.trim().is_empty() => {
                let result = if options.route {
                    service.parse_routed(text, &options.parse)
                } else {
                    service.parse(text, &options.parse)
                };
                if result.is_parsed() {
                    Some(result.to_field_map())
                } else {
                    match options.policy {
                        FailurePolicy::Raise => {
                            let message = result
                                .error
                                .map(|error| error.to_string())
                                .unwrap_or_else(|| "parse failed".to_string());
                            bail!("failed to parse address {text:?}: {message}");
                        }
                        FailurePolicy::NullFill => None,
                        FailurePolicy::Passthrough => {
                            debug!(raw = %text, "passing raw text through");
                            let mut map = Address::default().to_field_map();
                            map.insert("full".to_string(), Some(text.clone()));
                            Some(map)
                        }
                    }
                }
            }
            _ => None,
        };

        for (slot, name) in values.iter_mut().zip(&columns) {
            let value = field_map
                .as_ref()
                .and_then(|map| map.get(name).cloned().flatten());
            slot.push(value);
        }
    }

    let mut out = df.clone();
    for (name, column_values) in columns.iter().zip(values) {
        let column_name = format!("{}{name}", options.prefix);
        out.with_column(Series::new(column_name.as_str().into(), column_values))?;
    }
    Ok(out)
}
