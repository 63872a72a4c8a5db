use serde_json::{Map, Value};

/// Result of normalizing raw model output into a JSON object.
///
/// The two arms carry the same payload shape; the tag records whether the
/// text parsed as JSON or had to be wrapped, so callers can log the fallback.
#[derive(Debug, PartialEq)]
pub enum Normalized {
    Parsed(Map<String, Value>),
    Fallback(Map<String, Value>),
}

impl Normalized {
    pub fn into_map(self) -> Map<String, Value> {
        match self {
            Normalized::Parsed(map) | Normalized::Fallback(map) => map,
        }
    }
}

/// Best-effort extraction of a JSON object from model output.
///
/// Models frequently wrap JSON in a markdown code fence; one leading
/// ```` ```json ```` marker and one trailing ```` ``` ```` are stripped
/// before parsing. If the remainder is not a JSON object, the *original*
/// text (fences and all) is preserved under `response_text` so nothing is
/// lost for debugging. Never fails.
pub fn normalize(raw: &str) -> Normalized {
    match serde_json::from_str::<Map<String, Value>>(strip_fences(raw)) {
        Ok(map) => Normalized::Parsed(map),
        Err(_) => {
            let mut map = Map::new();
            map.insert("response_text".to_string(), Value::String(raw.to_string()));
            Normalized::Fallback(map)
        }
    }
}

// Lossy fence stripping, not markdown parsing: peel at most one marker off
// each end, each tolerated independently and with or without its newline.
// Surrounding whitespace is trimmed first, so a fence preceded by a stray
// newline still counts as leading; the fallback path keeps the raw text
// anyway, so the leniency can only rescue otherwise-valid JSON.
fn strip_fences(text: &str) -> &str {
    let mut s = text.trim();
    if let Some(rest) = s.strip_prefix("```json") {
        s = rest.strip_prefix('\n').unwrap_or(rest);
    }
    if let Some(rest) = s.strip_suffix("```") {
        s = rest.strip_suffix('\n').unwrap_or(rest);
    }
    s
}
