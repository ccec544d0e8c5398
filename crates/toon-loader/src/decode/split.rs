//! Comma splitting that respects double-quoted spans and backslash escapes.

/// Split one row into trimmed fields.
///
/// A comma inside an open `"` span is not a delimiter. A backslash escapes the
/// next character; both are kept in the field so that unescaping can happen
/// later during coercion. Empty fields are kept.
pub fn split_fields(s: &str) -> Vec<&str> {
    let bytes = s.as_bytes();
    let mut out = Vec::new();
    let mut in_str = false;
    let mut escape = false;
    let mut start = 0usize;
    for (i, &b) in bytes.iter().enumerate() {
        if escape {
            escape = false;
            continue;
        }
        match b {
            b'\\' => escape = true,
            b'"' => in_str = !in_str,
            b',' if !in_str => {
                out.push(s[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
    }
    out.push(s[start..].trim());
    out
}

/// Byte offset of the first `:` outside a double-quoted span.
pub fn find_unquoted_colon(s: &str) -> Option<usize> {
    let b = s.as_bytes();
    let mut in_str = false;
    let mut escape = false;
    for (i, &ch) in b.iter().enumerate() {
        if in_str {
            if escape {
                escape = false;
                continue;
            }
            match ch {
                b'\\' => escape = true,
                b'"' => in_str = false,
                _ => {}
            }
        } else {
            match ch {
                b'"' => in_str = true,
                b':' => return Some(i),
                _ => {}
            }
        }
    }
    None
}
