//! A deterministic reference tagger for US-shaped address strings.
//!
//! This is a lightweight stand-in for a statistical tagging backend: it
//! labels the common "street, [unit,] city state zip" shapes so the
//! pipeline is exercisable end-to-end. It makes no claim of covering the
//! full variety of postal addresses.

use addr_model::AddressError;
use addr_standards::state_abbreviation_for;
use addr_track::tables::{DIRECTION_TO_ABBREV, STREET_TYPE_TO_ABBREV, UNIT_TYPE_TO_ABBREV};

use crate::tagger::{AddressTagger, TaggedToken};

#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicTagger;

impl AddressTagger for HeuristicTagger {
    fn name(&self) -> &'static str {
        "heuristic"
    }

    fn tag(&self, raw_input: &str) -> Result<Vec<TaggedToken>, AddressError> {
        let trimmed = raw_input.trim();
        if trimmed.is_empty() {
            return Err(AddressError::parse(raw_input, "Empty address string"));
        }

        let segments: Vec<Vec<String>> = trimmed
            .split(',')
            .map(segment_tokens)
            .filter(|tokens| !tokens.is_empty())
            .collect();
        if segments.is_empty() {
            return Err(AddressError::parse(raw_input, "No address tokens found"));
        }

        let mut tail = segments[segments.len() - 1].clone();
        let zip = pop_zip(&mut tail);
        let state = pop_state(&mut tail, zip.is_some());

        // Where the city words live: leftover tail tokens, or the previous
        // segment when state+zip consumed the whole final segment.
        let single_segment = segments.len() == 1;
        let mut city_tokens: Vec<String> = Vec::new();
        let mut street_tail: Vec<String> = Vec::new();
        let mut middle_end = segments.len().saturating_sub(1);
        if single_segment {
            street_tail = tail;
        } else if tail.is_empty() {
            if segments.len() > 2 {
                city_tokens = segments[segments.len() - 2].clone();
                middle_end = segments.len() - 2;
            }
        } else {
            city_tokens = tail;
        }

        let mut tokens = Vec::new();
        tag_street_segment(&segments[0], &street_tail, single_segment, &mut tokens);

        if !single_segment {
            for segment in &segments[1..middle_end] {
                tag_unit_segment(segment, &mut tokens);
            }
        }

        for word in &city_tokens {
            tokens.push(TaggedToken::new(word.clone(), "PlaceName"));
        }
        if let Some(state) = state {
            tokens.push(TaggedToken::new(state, "StateName"));
        }
        if let Some(zip) = zip {
            tokens.push(TaggedToken::new(zip, "ZipCode"));
        }

        if tokens.is_empty() {
            return Err(AddressError::parse(raw_input, "No labelable tokens found"));
        }
        Ok(tokens)
    }
}

/// Tokenize a comma segment, trimming abbreviation periods and unit hashes.
fn segment_tokens(segment: &str) -> Vec<String> {
    segment
        .split_whitespace()
        .map(|token| {
            let token = token.trim_start_matches('#');
            token.trim_end_matches('.').to_string()
        })
        .filter(|token| !token.is_empty())
        .collect()
}

fn is_zip_token(token: &str) -> bool {
    match token.split_once('-') {
        Some((head, tail)) => {
            head.len() == 5
                && head.bytes().all(|b| b.is_ascii_digit())
                && tail.len() <= 4
                && tail.bytes().all(|b| b.is_ascii_digit())
        }
        None => {
            (token.len() == 5 || token.len() == 9) && token.bytes().all(|b| b.is_ascii_digit())
        }
    }
}

fn pop_zip(tail: &mut Vec<String>) -> Option<String> {
    if tail.last().is_some_and(|token| is_zip_token(token)) {
        tail.pop()
    } else {
        None
    }
}

/// Pop a state from the end of the final segment: longest known name wins,
/// then any two-letter token sitting directly before a ZIP.
fn pop_state(tail: &mut Vec<String>, has_zip: bool) -> Option<String> {
    let max_words = tail.len().min(3);
    for take in (1..=max_words).rev() {
        let candidate = tail[tail.len() - take..].join(" ");
        if state_abbreviation_for(&candidate).is_some() {
            // "Ct"/"La" are street types as well as state abbreviations;
            // without a ZIP after them, read them as street types.
            if candidate.len() == 2 && !has_zip && is_street_type(&candidate) {
                continue;
            }
            tail.truncate(tail.len() - take);
            if candidate.len() == 2 {
                return Some(candidate.to_ascii_uppercase());
            }
            return Some(candidate);
        }
    }

    if has_zip
        && let Some(last) = tail.last()
        && last.len() == 2
        && last.bytes().all(|b| b.is_ascii_alphabetic())
    {
        let state = last.to_ascii_uppercase();
        tail.pop();
        return Some(state);
    }
    None
}

fn is_po_box(tokens: &[String]) -> bool {
    if tokens.len() < 3 {
        return false;
    }
    let first = tokens[0].replace('.', "").to_ascii_lowercase();
    first == "po" && tokens[1].eq_ignore_ascii_case("box")
}

fn is_directional(token: &str) -> bool {
    DIRECTION_TO_ABBREV
        .iter()
        .any(|(name, abbrev)| token.eq_ignore_ascii_case(name) || token.eq_ignore_ascii_case(abbrev))
}

fn is_street_type(token: &str) -> bool {
    STREET_TYPE_TO_ABBREV
        .iter()
        .any(|(name, abbrev)| token.eq_ignore_ascii_case(name) || token.eq_ignore_ascii_case(abbrev))
}

fn is_unit_keyword(token: &str) -> bool {
    UNIT_TYPE_TO_ABBREV
        .iter()
        .any(|(name, abbrev)| token.eq_ignore_ascii_case(name) || token.eq_ignore_ascii_case(abbrev))
}

/// Label the street segment. `extra_tail` carries leftover tokens from a
/// single-segment input (possible city words after the street type).
fn tag_street_segment(
    segment: &[String],
    extra_tail: &[String],
    single_segment: bool,
    tokens: &mut Vec<TaggedToken>,
) {
    let mut words: Vec<String> = segment.to_vec();
    if single_segment {
        // In the one-segment case zip/state were popped from this segment's
        // own tail copy; reuse what remains.
        words = extra_tail.to_vec();
    }
    if words.is_empty() {
        return;
    }

    if is_po_box(&words) {
        tokens.push(TaggedToken::new("PO Box", "USPSBoxType"));
        tokens.push(TaggedToken::new(words[2..].join(" "), "USPSBoxID"));
        return;
    }

    let mut index = 0;

    if words[index].starts_with(|c: char| c.is_ascii_digit()) && !is_zip_token(&words[index]) {
        tokens.push(TaggedToken::new(words[index].clone(), "AddressNumber"));
        index += 1;
    }

    if index < words.len() && words.len() > index + 1 && is_directional(&words[index]) {
        tokens.push(TaggedToken::new(
            words[index].clone(),
            "StreetNamePreDirectional",
        ));
        index += 1;
    }

    // The last street-type token splits name from what follows.
    let type_index = (index..words.len()).rev().find(|i| is_street_type(&words[*i]));

    match type_index {
        Some(type_index) if type_index > index => {
            for word in &words[index..type_index] {
                tokens.push(TaggedToken::new(word.clone(), "StreetName"));
            }
            tokens.push(TaggedToken::new(
                words[type_index].clone(),
                "StreetNamePostType",
            ));
            let mut rest = type_index + 1;
            if rest < words.len() && is_directional(&words[rest]) {
                tokens.push(TaggedToken::new(
                    words[rest].clone(),
                    "StreetNamePostDirectional",
                ));
                rest += 1;
            }
            tag_street_remainder(&words[rest..], tokens);
        }
        _ => {
            // No usable street type: everything up to a unit marker is the
            // street name.
            let unit_start = (index..words.len())
                .find(|i| is_unit_keyword(&words[*i]))
                .unwrap_or(words.len());
            for word in &words[index..unit_start] {
                tokens.push(TaggedToken::new(word.clone(), "StreetName"));
            }
            tag_street_remainder(&words[unit_start..], tokens);
        }
    }
}

/// Tokens after the street type: a unit pair, or trailing city words from
/// a single-segment input.
fn tag_street_remainder(words: &[String], tokens: &mut Vec<TaggedToken>) {
    if words.is_empty() {
        return;
    }
    if is_unit_keyword(&words[0]) {
        tokens.push(TaggedToken::new(words[0].clone(), "SubaddressType"));
        for word in &words[1..] {
            tokens.push(TaggedToken::new(word.clone(), "SubaddressIdentifier"));
        }
        return;
    }
    if words[0].bytes().all(|b| b.is_ascii_digit() || b.is_ascii_uppercase()) && words.len() == 1 {
        // Bare unit id left over from a stripped "#".
        tokens.push(TaggedToken::new(words[0].clone(), "SubaddressIdentifier"));
        return;
    }
    for word in words {
        tokens.push(TaggedToken::new(word.clone(), "PlaceName"));
    }
}

fn tag_unit_segment(segment: &[String], tokens: &mut Vec<TaggedToken>) {
    if segment.is_empty() {
        return;
    }
    if is_unit_keyword(&segment[0]) {
        tokens.push(TaggedToken::new(segment[0].clone(), "SubaddressType"));
        for word in &segment[1..] {
            tokens.push(TaggedToken::new(word.clone(), "SubaddressIdentifier"));
        }
    } else {
        for word in segment {
            tokens.push(TaggedToken::new(word.clone(), "BuildingName"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(raw: &str) -> Vec<(String, String)> {
        let tokens = HeuristicTagger.tag(raw).expect("tag");
        crate::tagger::merge_consecutive_labels(raw, &tokens).expect("merge")
    }

    #[test]
    fn comma_separated_street_city_state_zip() {
        let merged = labels("123 Main St, Austin TX 78749-1234");
        assert_eq!(
            merged,
            vec![
                ("AddressNumber".to_string(), "123".to_string()),
                ("StreetName".to_string(), "Main".to_string()),
                ("StreetNamePostType".to_string(), "St".to_string()),
                ("PlaceName".to_string(), "Austin".to_string()),
                ("StateName".to_string(), "TX".to_string()),
                ("ZipCode".to_string(), "78749-1234".to_string()),
            ]
        );
    }

    #[test]
    fn po_box_segment_is_labeled() {
        let merged = labels("PO Box 4520, Seattle WA 98101");
        assert_eq!(merged[0], ("USPSBoxType".to_string(), "PO Box".to_string()));
        assert_eq!(merged[1], ("USPSBoxID".to_string(), "4520".to_string()));
    }

    #[test]
    fn unit_segment_is_labeled() {
        let merged = labels("500 Congress Ave, Ste 200, Austin, TX 78701");
        assert!(merged.contains(&("SubaddressType".to_string(), "Ste".to_string())));
        assert!(merged.contains(&("SubaddressIdentifier".to_string(), "200".to_string())));
        assert!(merged.contains(&("PlaceName".to_string(), "Austin".to_string())));
    }

    #[test]
    fn unknown_two_letter_state_before_zip_is_accepted() {
        let merged = labels("123 Main St, Austin XX 00000");
        assert!(merged.contains(&("StateName".to_string(), "XX".to_string())));
        assert!(merged.contains(&("ZipCode".to_string(), "00000".to_string())));
    }

    #[test]
    fn single_segment_input_finds_city_after_street_type() {
        let merged = labels("123 Main St Austin TX 78749");
        assert!(merged.contains(&("PlaceName".to_string(), "Austin".to_string())));
        assert!(merged.contains(&("StateName".to_string(), "TX".to_string())));
    }

    #[test]
    fn full_state_name_is_preserved() {
        let merged = labels("123 Main St, Austin Texas 78749");
        assert!(merged.contains(&("StateName".to_string(), "Texas".to_string())));
    }

    #[test]
    fn empty_input_is_a_parse_error() {
        assert!(HeuristicTagger.tag("   ").is_err());
    }
}
