//! Routing heuristics: does a raw string look international, or still US?

use addr_standards::state_abbreviation_for;

/// Country/region/city keywords that steer routing toward the
/// international backend. Multiword keywords match as substrings; single
/// words match whole tokens only.
const INTL_KEYWORDS: &[&str] = &[
    // Countries / regions
    "united kingdom",
    "uk",
    "england",
    "scotland",
    "wales",
    "ireland",
    "germany",
    "france",
    "japan",
    "россия",
    "russia",
    "india",
    "australia",
    "brazil",
    "canada",
    "mexico",
    "spain",
    "italy",
    "netherlands",
    "belgium",
    "switzerland",
    "sweden",
    "norway",
    "denmark",
    "finland",
    "united arab emirates",
    "uae",
    // Major non-US cities, to steer ambiguous inputs
    "london",
    "tokyo",
    "berlin",
    "paris",
    "dubai",
    "abu dhabi",
];

/// Military/diplomatic markers that bypass the domestic parser.
const MILITARY_MARKERS: &[&str] = &["apo", "fpo", "dpo", "psc"];

fn words(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(str::to_lowercase)
        .collect()
}

fn mentions_us(lower: &str, tokens: &[String]) -> bool {
    lower.contains("united states") || tokens.iter().any(|token| token == "usa")
}

/// Lightweight pre-check for likely-international input: non-US keywords
/// without a US mention, military/diplomatic markers, or any non-ASCII
/// codepoint.
pub fn is_probably_international(raw_input: &str) -> bool {
    let lower = raw_input.to_lowercase();
    let tokens = words(&lower);

    let keyword_hit = INTL_KEYWORDS.iter().any(|keyword| {
        if keyword.contains(' ') {
            lower.contains(keyword)
        } else {
            tokens.iter().any(|token| token == keyword)
        }
    });
    if keyword_hit && !mentions_us(&lower, &tokens) {
        return true;
    }

    if MILITARY_MARKERS
        .iter()
        .any(|marker| tokens.iter().any(|token| token == marker))
    {
        return true;
    }

    raw_input.chars().any(|c| !c.is_ascii())
}

/// Whether a failed domestic parse still looks like a US address: a
/// 5-digit token, a recognizable state token, or an explicit US mention.
/// Used as the documented tie-break that keeps routing on the committed
/// domestic path.
pub fn looks_like_us(raw_input: &str) -> bool {
    let lower = raw_input.to_lowercase();
    let tokens = words(&lower);

    if mentions_us(&lower, &tokens) {
        return true;
    }

    if tokens
        .iter()
        .any(|token| token.len() == 5 && token.bytes().all(|b| b.is_ascii_digit()))
    {
        return true;
    }

    // Single-token state names/abbreviations, plus two-word names.
    if tokens
        .iter()
        .any(|token| state_abbreviation_for(token).is_some())
    {
        return true;
    }
    tokens
        .windows(2)
        .any(|pair| state_abbreviation_for(&pair.join(" ")).is_some())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keywords_only_match_whole_tokens() {
        // "Milwaukee" contains "uk" but must not trip the keyword check.
        assert!(!is_probably_international("123 Water St, Milwaukee WI 53202"));
        assert!(is_probably_international("10 Downing St, London, UK"));
    }

    #[test]
    fn us_mention_suppresses_keywords() {
        assert!(!is_probably_international(
            "456 Paris Rd, Paris TX, United States"
        ));
    }

    #[test]
    fn military_markers_route_international() {
        assert!(is_probably_international("PSC 802 Box 74, APO AE 09499"));
    }

    #[test]
    fn non_ascii_routes_international() {
        assert!(is_probably_international("東京都渋谷区1-2-3"));
        assert!(!is_probably_international("123 Main St, Austin TX"));
    }

    #[test]
    fn us_signals_are_recognized() {
        assert!(looks_like_us("something something 78749"));
        assert!(looks_like_us("Main Street, Texas"));
        assert!(looks_like_us("somewhere in the USA"));
        assert!(looks_like_us("Albany, New York"));
        assert!(!looks_like_us("Piccadilly Circus London"));
    }
}
