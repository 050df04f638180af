// src/extractors/json.rs

// --- Imports ---
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};

// --- Constants ---
const FENCE: &str = "```";
const LANGUAGE_TAG: &str = "json";

// --- Regex Patterns (Lazy Static) ---
// A `json` tag followed by the widest brace block after it. `(?s)` lets the
// block span lines; greedy `.*` runs to the last closing brace.
static JSON_TAGGED_BLOCK_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)json\s*(\{.*\})").expect("Failed to compile JSON_TAGGED_BLOCK_RE")
});

/// A JSON object recovered from model output.
pub type JsonMap = Map<String, Value>;

/// Which recovery strategy produced the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionStrategy {
    /// The whole response was a JSON object.
    Direct,
    /// The first triple-backtick fenced block parsed as a JSON object.
    Fenced,
    /// A `json`-tagged brace block found by regex search.
    TaggedBlock,
    /// Nothing parseable; the result is empty.
    Empty,
}

/// Result of a best-effort extraction.
#[derive(Debug, Clone, PartialEq)]
pub struct Extraction {
    pub strategy: ExtractionStrategy,
    pub value: JsonMap,
}

/// Recovers a JSON object from free-form model output.
///
/// Strategies run in order and the first that yields an object wins. Total
/// failure gives an empty map and a warning; this never returns an error.
pub fn extract_json(response: &str) -> Extraction {
    let attempts: [(ExtractionStrategy, fn(&str) -> Option<JsonMap>); 3] = [
        (ExtractionStrategy::Direct, parse_direct),
        (ExtractionStrategy::Fenced, parse_fenced),
        (ExtractionStrategy::TaggedBlock, parse_tagged_block),
    ];

    for (strategy, attempt) in attempts {
        if let Some(value) = attempt(response) {
            tracing::debug!("Recovered JSON object with {} keys via {:?}", value.len(), strategy);
            return Extraction { strategy, value };
        }
        tracing::trace!("JSON strategy {:?} did not match", strategy);
    }

    tracing::warn!(
        "Error: Invalid JSON format in model response ({} bytes); continuing with an empty mapping",
        response.len()
    );
    Extraction {
        strategy: ExtractionStrategy::Empty,
        value: JsonMap::new(),
    }
}

fn as_object(text: &str) -> Option<JsonMap> {
    match serde_json::from_str::<Value>(text) {
        Ok(Value::Object(map)) => Some(map),
        Ok(other) => {
            tracing::trace!("Parsed JSON is not an object: {}", type_name(&other));
            None
        }
        Err(_) => None,
    }
}

fn parse_direct(response: &str) -> Option<JsonMap> {
    as_object(response)
}

fn parse_fenced(response: &str) -> Option<JsonMap> {
    // Segment 1 is the inside of the first fence pair (or everything after an
    // unterminated opening fence).
    let segment = response.split(FENCE).nth(1)?;
    as_object(strip_language_tag(segment))
}

fn parse_tagged_block(response: &str) -> Option<JsonMap> {
    let caps = JSON_TAGGED_BLOCK_RE.captures(response)?;
    as_object(caps.get(1)?.as_str())
}

fn strip_language_tag(segment: &str) -> &str {
    let trimmed = segment.trim_start();
    match trimmed.get(..LANGUAGE_TAG.len()) {
        Some(tag) if tag.eq_ignore_ascii_case(LANGUAGE_TAG) => &trimmed[LANGUAGE_TAG.len()..],
        _ => trimmed,
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
