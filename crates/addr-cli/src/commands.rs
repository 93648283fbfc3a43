//! Subcommand implementations.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use serde_json::json;
use tracing::info;

use addr_core::{AddressService, HeuristicTagger, ParseOptions};
use addr_ingest::{FailurePolicy, parse_csv_file};
use addr_standards::{ZipDataSource, ZipTable};

use crate::cli::{BatchArgs, OnErrorArg, ParseArgs, ZipArgs};
use crate::summary::{print_audit, print_parse_result};

/// Build the parsing service from CLI-level configuration.
pub fn build_service(zip_data: Option<&Path>, check_state_match: bool) -> Result<AddressService> {
    let table = match zip_data {
        Some(path) => ZipTable::load_csv(path)
            .with_context(|| format!("load ZIP reference table: {}", path.display()))?,
        None => ZipTable::builtin_sample(),
    };
    info!(zip_count = table.len(), "ZIP reference table loaded");
    let source: Arc<dyn ZipDataSource> = Arc::new(table);
    Ok(AddressService::new(
        Box::new(HeuristicTagger),
        source,
        check_state_match,
    ))
}

pub fn run_parse(args: &ParseArgs, zip_data: Option<&Path>) -> Result<i32> {
    let service = build_service(zip_data, args.state_match)?;

    let options = ParseOptions {
        validate: !args.no_validate,
        partial: args.partial,
    };
    let result = if args.international {
        service.parse_international(&args.address)
    } else if args.no_route {
        service.parse(&args.address, &options)
    } else {
        service.parse_routed(&args.address, &options)
    };

    if args.json {
        let errors: Vec<String> = result
            .validation
            .iter()
            .flat_map(|outcome| outcome.errors.iter())
            .map(|error| error.message.clone())
            .collect();
        let payload = json!({
            "is_valid": result.is_valid(),
            "is_parsed": result.is_parsed(),
            "source": result.source.map(|source| source.as_str()),
            "error": result.error.as_ref().map(|error| error.to_string()),
            "address": result.to_field_map(),
            "errors": errors,
        });
        println!("{}", serde_json::to_string_pretty(&payload)?);
    } else {
        print_parse_result(&result);
        if args.audit {
            print_audit(&result.aggregate_entries());
        }
    }

    Ok(if result.is_valid() { 0 } else { 1 })
}

pub fn run_batch(args: &BatchArgs, zip_data: Option<&Path>) -> Result<i32> {
    let service = build_service(zip_data, false)?;
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| args.input.with_extension("parsed.csv"));

    let options = ParseOptions {
        validate: !args.no_validate,
        partial: args.partial,
    };
    let policy = match args.on_error {
        OnErrorArg::Raise => FailurePolicy::Raise,
        OnErrorArg::Coerce => FailurePolicy::NullFill,
        OnErrorArg::Passthrough => FailurePolicy::Passthrough,
    };

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner} {msg}").expect("valid spinner template"),
    );
    spinner.set_message(format!("parsing {}", args.input.display()));
    spinner.enable_steady_tick(Duration::from_millis(120));

    let summary = parse_csv_file(
        &args.input,
        &output,
        &args.column,
        &service,
        &options,
        policy,
        true,
    );
    spinner.finish_and_clear();
    let summary = summary?;

    println!(
        "{} rows: {} parsed, {} failed -> {}",
        summary.total,
        summary.parsed,
        summary.failed,
        output.display()
    );
    Ok(if summary.failed == 0 { 0 } else { 1 })
}

pub fn run_zip(args: &ZipArgs, zip_data: Option<&Path>) -> Result<i32> {
    let service = build_service(zip_data, false)?;
    match service.lookup_zip(&args.code) {
        Some(info) => {
            println!(
                "{}: {}, {} ({}), {} County",
                info.zip, info.city, info.state_abbrev, info.state_name, info.county
            );
            Ok(0)
        }
        None => {
            println!("ZIP code not found: {}", args.code);
            Ok(1)
        }
    }
}
