//! The parsing service: orchestrates tagger, validation, tracking, and
//! US/international routing.

use std::sync::Arc;

use rayon::prelude::*;
use tracing::{debug, warn};

use addr_model::{
    Address, AddressError, ErrorKind, OperationKind, ParseResult, ParseSource,
    ValidationOutcome, ZipResolution,
};
use addr_standards::{ZipDataSource, ZipInfo};
use addr_track::track_transformations;
use addr_validate::{CheckPipeline, default_pipeline};

use crate::intl::{InternationalBackend, components_multimap, domestic_shape};
use crate::route::{is_probably_international, looks_like_us};
use crate::tagger::{AddressTagger, assemble_address, merge_consecutive_labels};

/// Per-call parsing options.
#[derive(Debug, Clone, Copy)]
pub struct ParseOptions {
    /// Run the validation pipeline after construction.
    pub validate: bool,
    /// Strip an invalid +4 extension instead of failing the parse.
    pub partial: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            validate: true,
            partial: false,
        }
    }
}

impl ParseOptions {
    pub fn without_validation() -> Self {
        Self {
            validate: false,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_partial(mut self, partial: bool) -> Self {
        self.partial = partial;
        self
    }
}

/// High-level facade over the parsing pipeline.
///
/// Owns the tagger, the reference data source, the validation chain, and
/// the optional international backend; all injected explicitly, no
/// process-global state.
pub struct AddressService {
    tagger: Box<dyn AddressTagger>,
    source: Arc<dyn ZipDataSource>,
    pipeline: CheckPipeline,
    international: Option<Box<dyn InternationalBackend>>,
}

impl AddressService {
    pub fn new(
        tagger: Box<dyn AddressTagger>,
        source: Arc<dyn ZipDataSource>,
        check_state_match: bool,
    ) -> Self {
        let pipeline = default_pipeline(Arc::clone(&source), check_state_match);
        Self {
            tagger,
            source,
            pipeline,
            international: None,
        }
    }

    /// Replace the default validation chain.
    #[must_use]
    pub fn with_pipeline(mut self, pipeline: CheckPipeline) -> Self {
        self.pipeline = pipeline;
        self
    }

    /// Attach an international backend for routing fallback.
    #[must_use]
    pub fn with_international(mut self, backend: Box<dyn InternationalBackend>) -> Self {
        self.international = Some(backend);
        self
    }

    pub fn has_international_backend(&self) -> bool {
        self.international.is_some()
    }

    pub fn pipeline_mut(&mut self) -> &mut CheckPipeline {
        &mut self.pipeline
    }

    /// Tolerant domestic parse: tag, assemble, validate, and audit. Errors
    /// are captured in the envelope, never propagated.
    pub fn parse(&self, raw_input: &str, options: &ParseOptions) -> ParseResult {
        let mut result = ParseResult::new(raw_input);
        result.source = Some(ParseSource::Us);

        let components = match self
            .tagger
            .tag(raw_input)
            .and_then(|tokens| merge_consecutive_labels(raw_input, &tokens))
        {
            Ok(components) => components,
            Err(error) => {
                warn!(error = %error, "tagger failed");
                result.error = Some(error);
                return result;
            }
        };

        let mut address = match assemble_address(raw_input, &components, ZipResolution::Strict) {
            Ok((address, _)) => address,
            Err(error) => {
                if options.partial && error.kind == ErrorKind::StructuralValidation {
                    match self.retry_partial(raw_input, &components, &mut result, &error) {
                        Some(address) => address,
                        None => {
                            result.error = Some(error);
                            return result;
                        }
                    }
                } else {
                    result.error = Some(error);
                    return result;
                }
            }
        };
        address.parser_source = Some(self.tagger.name().to_string());

        if options.validate {
            let outcome = self.pipeline.validate(&address);
            if let Err(error) = address.validate_external_results(&outcome) {
                debug!(error = %error, "referential validation failed");
                result.error = Some(error);
            }
            result.validation = Some(outcome);
        }

        let entries = track_transformations(raw_input, &address);
        result.process_log.cleaning.extend(entries);
        result.address = Some(address);
        result
    }

    /// Strict domestic parse: propagates the domain error family instead of
    /// capturing it.
    pub fn parse_strict(&self, raw_input: &str) -> Result<ParseResult, AddressError> {
        let mut result = self.parse(raw_input, &ParseOptions::default());
        match result.error.take() {
            Some(error) => Err(error),
            None => Ok(result),
        }
    }

    /// Re-run construction with lenient ZIP resolution, keeping only a
    /// zip4-isolated failure recoverable. Logs the cleaning operation.
    fn retry_partial(
        &self,
        raw_input: &str,
        components: &[(String, String)],
        result: &mut ParseResult,
        original_error: &AddressError,
    ) -> Option<Address> {
        let (address, outcome) =
            assemble_address(raw_input, components, ZipResolution::Lenient).ok()?;
        let dropped = outcome.dropped_zip4?;

        result.process_log.record_cleaning(
            "zip4",
            Some(dropped.clone()),
            None,
            "Invalid ZIP+4 extension removed during partial validation",
            OperationKind::Cleaning,
        );
        result
            .cleaned_components
            .insert("zip4".to_string(), dropped.clone());
        result
            .invalid_components
            .insert("zip4".to_string(), original_error.message.clone());
        debug!(dropped = %dropped, "stripped invalid zip4 extension");
        Some(address)
    }

    /// Parse through the international backend, when one is attached.
    pub fn parse_international(&self, raw_input: &str) -> ParseResult {
        let mut result = ParseResult::new(raw_input);
        result.source = Some(ParseSource::International);

        let Some(backend) = self.international.as_deref() else {
            result.error = Some(AddressError::backend_unavailable(
                "international backend not configured",
            ));
            result.validation = Some(invalid_outcome());
            return result;
        };

        let pairs = match backend.parse(raw_input) {
            Ok(pairs) => pairs,
            Err(error) => {
                result.error = Some(error);
                result.validation = Some(invalid_outcome());
                return result;
            }
        };
        let components = components_multimap(&pairs);
        let expansions = backend.expand(raw_input).unwrap_or_default();

        match addr_model::InternationalAddress::from_components(raw_input, components, expansions)
        {
            Ok(mut international) => {
                if !international.expansions.is_empty() {
                    international.log.record_cleaning(
                        "raw_input",
                        Some(raw_input.to_string()),
                        international.expansions.first().cloned(),
                        "Raw input expanded to canonical normalized form",
                        OperationKind::Expansion,
                    );
                }
                match domestic_shape(&international) {
                    Ok(mut address) => {
                        address.parser_source = Some(backend.name().to_string());
                        result.address = Some(address);
                    }
                    Err(error) => {
                        debug!(error = %error, "domestic shape derivation failed");
                    }
                }
                result.international = Some(international);
                result.validation = Some(ValidationOutcome::valid());
            }
            Err(error) => {
                result.error = Some(error);
                result.validation = Some(invalid_outcome());
            }
        }
        result
    }

    /// Auto-route between the domestic and international paths.
    ///
    /// Clearly-international input goes straight to the backend. Otherwise
    /// the domestic parse runs first and wins when valid. On domestic
    /// failure, input that still looks like US keeps the domestic result
    /// (the committed path wins ties); everything else falls back to the
    /// backend when one is attached.
    pub fn parse_routed(&self, raw_input: &str, options: &ParseOptions) -> ParseResult {
        if self.international.is_some() && is_probably_international(raw_input) {
            debug!("pre-check routed to international backend");
            return self.parse_international(raw_input);
        }

        let us_result = self.parse(raw_input, options);
        if us_result.is_valid() {
            return us_result;
        }

        if self.international.is_none() {
            return us_result;
        }
        if looks_like_us(raw_input) {
            debug!("keeping domestic result for US-looking input");
            return us_result;
        }

        let intl_result = self.parse_international(raw_input);
        if intl_result.is_valid() || intl_result.international.is_some() {
            intl_result
        } else {
            us_result
        }
    }

    /// Parse many addresses in parallel; results come back in input order
    /// and a bad input never aborts the batch.
    pub fn parse_batch<S: AsRef<str> + Sync>(
        &self,
        addresses: &[S],
        options: &ParseOptions,
    ) -> Vec<ParseResult> {
        addresses
            .par_iter()
            .map(|address| self.parse(address.as_ref(), options))
            .collect()
    }

    /// Auto-routed variant of [`AddressService::parse_batch`].
    pub fn parse_batch_routed<S: AsRef<str> + Sync>(
        &self,
        addresses: &[S],
        options: &ParseOptions,
    ) -> Vec<ParseResult> {
        addresses
            .par_iter()
            .map(|address| self.parse_routed(address.as_ref(), options))
            .collect()
    }

    // ZIP and state conveniences, delegating to the reference data source.

    pub fn lookup_zip(&self, zip_code: &str) -> Option<ZipInfo> {
        self.source.zip_info(zip_code)
    }

    pub fn city_state_from_zip(&self, zip_code: &str) -> Option<(String, String)> {
        self.lookup_zip(zip_code)
            .map(|info| (info.city, info.state_abbrev))
    }

    pub fn is_valid_zip(&self, zip_code: &str) -> bool {
        self.source.is_valid_zip(zip_code)
    }

    pub fn is_valid_state(&self, state: &str) -> bool {
        self.source.is_valid_state(state)
    }

    pub fn normalize_state(&self, state: &str) -> Option<String> {
        self.source.normalize_state(state)
    }
}

fn invalid_outcome() -> ValidationOutcome {
    ValidationOutcome {
        is_valid: false,
        errors: Vec::new(),
    }
}
