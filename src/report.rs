//! Plain-text rendering of an analysis result, one titled section per field.
//! Used by the one-shot CLI mode; the web page renders the same mapping
//! client-side with the same heading rule.

use serde_json::Value;

/// "word_count" -> "Word count"
pub fn section_title(key: &str) -> String {
    let spaced = key.replace('_', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Scalars render as bare text; composites as indented JSON.
pub fn format_value(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Array(_) | Value::Object(_) => {
            serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
        }
    }
}

/// Formats the full `data` mapping in its natural order.
pub fn format_report(data: &serde_json::Map<String, Value>) -> String {
    let mut out = String::new();
    for (key, value) in data {
        out.push_str(&section_title(key));
        out.push('\n');
        out.push_str(&"-".repeat(50));
        out.push('\n');
        out.push_str(&format_value(value));
        out.push_str("\n\n");
    }
    out
}
