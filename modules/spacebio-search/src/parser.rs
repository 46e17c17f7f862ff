use serde_json::Value;

use crate::params::SearchParams;

/// Parse the raw interpreter response into search parameters.
///
/// Tries the whole body first, then falls back to extracting the first
/// balanced `{...}` span — models routinely wrap the JSON in prose or code
/// fences despite the contract. `None` means nothing usable was found and the
/// caller should take the keyword fallback path. Field names are NOT validated
/// here; that is the query builder's job.
pub fn parse_response(text: &str) -> Option<SearchParams> {
    let cleaned = strip_code_blocks(text);

    if let Some(params) = parse_object(cleaned) {
        return Some(params);
    }

    let span = extract_json_object(cleaned)?;
    parse_object(span)
}

/// Parse one JSON document into search parameters, rejecting anything that
/// is not an object at the top level (a bare array or string is not a usable
/// parameter set, even if serde could coerce it).
fn parse_object(text: &str) -> Option<SearchParams> {
    let value: Value = serde_json::from_str(text).ok()?;
    if !value.is_object() {
        return None;
    }
    serde_json::from_value(value).ok()
}

/// Strip markdown code fences from a response.
fn strip_code_blocks(response: &str) -> &str {
    response
        .trim()
        .trim_start_matches("```json")
        .trim_start_matches("```")
        .trim_end_matches("```")
        .trim()
}

/// Find the first balanced `{...}` span, tracking brace depth and skipping
/// braces inside JSON string literals. Bounded single pass; nested objects
/// stay inside the span instead of terminating it early.
fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, b) in text.bytes().enumerate().skip(start) {
        if in_string {
            if escaped {
                escaped = false;
            } else if b == b'\\' {
                escaped = true;
            } else if b == b'"' {
                in_string = false;
            }
            continue;
        }
        match b {
            b'"' => in_string = true,
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..=i]);
                }
            }
            _ => {}
        }
    }
    None
}
