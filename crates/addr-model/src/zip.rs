//! ZIP code parsing, validation, and normalization.
//!
//! Single source of truth for postal-code shape rules: 5-digit ZIP,
//! hyphenated ZIP+4, and continuous 9-digit input all normalize through
//! here. Every function is pure; re-validating an already-valid value
//! returns it unchanged.

/// Outcome of parsing a raw postal-code string.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ZipCodeResult {
    /// The 5-digit ZIP (None if invalid).
    pub zip5: Option<String>,
    /// The 4-digit extension (None if absent or dropped).
    pub zip4: Option<String>,
    /// Formatted ZIP: "12345" or "12345-6789".
    pub full: Option<String>,
    pub is_valid: bool,
    pub error: Option<String>,
}

impl ZipCodeResult {
    fn invalid(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            ..Self::default()
        }
    }
}

/// Validate a 5-digit ZIP. None/empty is an error: zip5 is never optional.
pub fn validate_zip5(zip5: Option<&str>) -> Result<String, String> {
    let Some(raw) = zip5 else {
        return Err("Missing or invalid zip code".to_string());
    };
    let cleaned = raw.trim();
    if cleaned.is_empty() {
        return Err("Missing or invalid zip code".to_string());
    }
    if cleaned.len() == 5 && cleaned.bytes().all(|b| b.is_ascii_digit()) {
        Ok(cleaned.to_string())
    } else {
        Err(format!("Invalid zip5 format: {raw}"))
    }
}

/// Validate a 4-digit ZIP+4 extension. The extension is optional, so
/// None/empty is valid and yields `Ok(None)`.
pub fn validate_zip4(zip4: Option<&str>) -> Result<Option<String>, String> {
    let Some(raw) = zip4 else {
        return Ok(None);
    };
    let cleaned = raw.trim();
    if cleaned.is_empty() {
        return Ok(None);
    }
    if cleaned.len() == 4 && cleaned.bytes().all(|b| b.is_ascii_digit()) {
        Ok(Some(cleaned.to_string()))
    } else {
        Err(format!("Invalid zip4 format: {raw}"))
    }
}

/// Format a ZIP as "12345" or "12345-6789".
pub fn format_zip(zip5: &str, zip4: Option<&str>) -> String {
    match zip4 {
        Some(ext) if !ext.is_empty() => format!("{zip5}-{ext}"),
        _ => zip5.to_string(),
    }
}

/// Split cleaned input into candidate (zip5, zip4) parts by structure:
/// hyphen wins, then continuous 9 digits, else everything is the zip5
/// candidate.
pub(crate) fn split_zip(cleaned: &str) -> (&str, Option<&str>) {
    if let Some((head, tail)) = cleaned.split_once('-') {
        (head, Some(tail))
    } else if cleaned.len() == 9 && cleaned.bytes().all(|b| b.is_ascii_digit()) {
        (&cleaned[..5], Some(&cleaned[5..]))
    } else {
        (cleaned, None)
    }
}

fn parse_with(zip_string: &str, lenient: bool) -> ZipCodeResult {
    let cleaned = zip_string.trim();
    if cleaned.is_empty() {
        return ZipCodeResult::invalid("Empty zip code");
    }

    let (zip5_part, zip4_part) = split_zip(cleaned);

    let zip5 = match validate_zip5(Some(zip5_part)) {
        Ok(value) => value,
        Err(message) => return ZipCodeResult::invalid(message),
    };

    let zip4 = match validate_zip4(zip4_part) {
        Ok(value) => value,
        Err(message) => {
            if lenient {
                // Keep the valid zip5, drop the malformed extension.
                None
            } else {
                return ZipCodeResult {
                    zip5: Some(zip5),
                    error: Some(message),
                    ..ZipCodeResult::default()
                };
            }
        }
    };

    let full = format_zip(&zip5, zip4.as_deref());
    ZipCodeResult {
        zip5: Some(zip5),
        zip4,
        full: Some(full),
        is_valid: true,
        error: None,
    }
}

/// Parse any ZIP format into normalized components, failing on a malformed
/// +4 extension.
pub fn parse_zip(zip_string: &str) -> ZipCodeResult {
    parse_with(zip_string, false)
}

/// Parse, keeping a valid zip5 even when the +4 extension is malformed.
/// Used by partial validation to strip only the optional component.
pub fn parse_zip_lenient(zip_string: &str) -> ZipCodeResult {
    parse_with(zip_string, true)
}
