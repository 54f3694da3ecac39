use axum::http::{header::CONTENT_TYPE, HeaderMap};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Best-effort decoding of a request body.
///
/// JSON is tried first regardless of content type since devices rarely
/// label their payloads. Form bodies become an object of fields and
/// anything else is kept as text. An empty body decodes to `null`.
pub fn parse_body(headers: &HeaderMap, bytes: &[u8]) -> Value {
    if bytes.iter().all(|b| b.is_ascii_whitespace()) {
        return Value::Null;
    }

    if let Ok(value) = serde_json::from_slice::<Value>(bytes) {
        return value;
    }

    let text = String::from_utf8_lossy(bytes).into_owned();

    if is_form(headers) {
        if let Ok(pairs) = serde_urlencoded::from_str::<Vec<(String, String)>>(&text) {
            let fields: Map<String, Value> = pairs
                .into_iter()
                .map(|(key, value)| (key, Value::String(value)))
                .collect();
            return Value::Object(fields);
        }
    }

    Value::String(text)
}

fn is_form(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|ct| ct.starts_with("application/x-www-form-urlencoded"))
        .unwrap_or(false)
}

/// Decode a raw query string. Malformed input yields an empty map.
pub fn parse_query(raw_query: Option<&str>) -> BTreeMap<String, String> {
    raw_query
        .and_then(|q| serde_urlencoded::from_str::<Vec<(String, String)>>(q).ok())
        .map(|pairs| pairs.into_iter().collect())
        .unwrap_or_default()
}

/// Flatten headers into a sorted map; repeated headers are joined with `, `
pub fn header_map(headers: &HeaderMap) -> BTreeMap<String, String> {
    let mut map: BTreeMap<String, String> = BTreeMap::new();

    for (name, value) in headers {
        let value = String::from_utf8_lossy(value.as_bytes()).into_owned();
        map.entry(name.as_str().to_string())
            .and_modify(|existing| {
                existing.push_str(", ");
                existing.push_str(&value);
            })
            .or_insert(value);
    }

    map
}
