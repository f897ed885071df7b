//! Xcode-style serialization of values.
//!
//! Output follows the layout Xcode itself writes: tab indentation, one
//! dictionary entry per line, one array element per line with a trailing
//! comma, and strings left bare only when they are made of characters
//! Xcode never quotes.

use crate::value::Value;

/// Whether `s` must be quoted to round-trip.
pub fn needs_quotes(s: &str) -> bool {
    s.is_empty()
        || !s
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '$' | '.' | '/'))
}

/// Render a string, quoting and escaping it when needed.
pub fn quote(s: &str) -> String {
    if !needs_quotes(s) {
        return s.to_string();
    }
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            c if (c as u32) < 0x20 => out.push_str(&format!("\\U{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// `depth` tab characters.
pub fn indent(depth: usize) -> String {
    "\t".repeat(depth)
}

/// Append `value` to `out`. `depth` is the indentation of the line the value
/// starts on; nested lines are indented one level deeper.
pub fn write_value(out: &mut String, value: &Value, depth: usize) {
    match value {
        Value::String(s) => out.push_str(&quote(s)),
        Value::Array(items) => {
            out.push_str("(\n");
            for item in items {
                out.push_str(&indent(depth + 1));
                write_value(out, item, depth + 1);
                out.push_str(",\n");
            }
            out.push_str(&indent(depth));
            out.push(')');
        }
        Value::Dict(entries) => {
            out.push_str("{\n");
            for (key, item) in entries {
                out.push_str(&indent(depth + 1));
                out.push_str(&quote(key));
                out.push_str(" = ");
                write_value(out, item, depth + 1);
                out.push_str(";\n");
            }
            out.push_str(&indent(depth));
            out.push('}');
        }
    }
}
