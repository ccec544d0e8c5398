//! Scalar coercion and string unescaping.

use crate::value::Value;

/// Coerce a raw token into a typed scalar.
///
/// Order: empty or `null` is `Null`, `true`/`false` are booleans, a quoted
/// token is an unescaped string, a token containing `.` is tried as a float,
/// anything else as an integer. Tokens that fail numeric parsing stay strings.
pub fn parse_primitive(token: &str) -> Value {
    let s = token.trim();
    match s {
        "" | "null" => return Value::Null,
        "true" => return Value::Bool(true),
        "false" => return Value::Bool(false),
        _ => {}
    }
    if let Some(inner) = quoted_inner(s) {
        return Value::String(unescape(inner));
    }
    if s.contains('.') {
        if let Ok(f) = s.parse::<f64>() {
            return Value::Float(f);
        }
    } else if let Ok(i) = s.parse::<i64>() {
        return Value::Int(i);
    }
    Value::String(s.to_string())
}

/// Strip a surrounding pair of double quotes.
pub fn quoted_inner(s: &str) -> Option<&str> {
    if s.len() >= 2 && s.starts_with('"') && s.ends_with('"') {
        Some(&s[1..s.len() - 1])
    } else {
        None
    }
}

/// Trim a key and unescape it when it is quoted.
pub fn unquote(s: &str) -> String {
    let s = s.trim();
    match quoted_inner(s) {
        Some(inner) => unescape(inner),
        None => s.to_string(),
    }
}

/// Resolve `\n`, `\r`, `\t`, `\"` and `\\` in one left-to-right pass.
/// Any other escape, and a trailing lone backslash, is kept as written.
pub fn unescape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some('"') => out.push('"'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}
