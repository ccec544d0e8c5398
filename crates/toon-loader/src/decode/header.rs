//! Line grammar: array headers (`key[N]{f1,f2}: inline`) and `key: value` pairs.

use crate::decode::primitive::{unescape, unquote};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArrayHeader<'a> {
    pub key: String,
    /// Declared item count. Bounds consumption; only strict mode checks it.
    pub len: usize,
    /// Field names of a tabular header.
    pub fields: Option<Vec<String>>,
    /// Trimmed text after the header colon.
    pub inline: &'a str,
}

impl ArrayHeader<'_> {
    pub fn kind(&self) -> ArrayKind {
        if self.fields.is_some() {
            ArrayKind::Tabular
        } else if !self.inline.is_empty() {
            ArrayKind::Inline
        } else {
            ArrayKind::List
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrayKind {
    Tabular,
    Inline,
    List,
}

/// Split a leading `"..."` off `s`, honoring backslash escapes.
/// Returns the raw inner text and the remainder after the closing quote.
fn split_quoted(s: &str) -> Option<(&str, &str)> {
    let b = s.as_bytes();
    if b.first() != Some(&b'"') {
        return None;
    }
    let mut escape = false;
    for (i, &ch) in b.iter().enumerate().skip(1) {
        if escape {
            escape = false;
            continue;
        }
        match ch {
            b'\\' => escape = true,
            b'"' => return Some((&s[1..i], &s[i + 1..])),
            _ => {}
        }
    }
    None
}

fn split_identifier(s: &str) -> Option<(&str, &str)> {
    let b = s.as_bytes();
    match b.first() {
        Some(c) if c.is_ascii_alphabetic() || *c == b'_' => {}
        _ => return None,
    }
    let end = b
        .iter()
        .position(|c| !(c.is_ascii_alphanumeric() || *c == b'_'))
        .unwrap_or(b.len());
    Some(s.split_at(end))
}

/// Recognize an array header on a trimmed line.
pub fn parse_array_header(text: &str) -> Option<ArrayHeader<'_>> {
    let (key, rest) = match split_quoted(text) {
        Some((inner, rest)) => (unescape(inner), rest),
        None => {
            let (ident, rest) = split_identifier(text)?;
            (ident.to_string(), rest)
        }
    };

    let rest = rest.strip_prefix('[')?;
    let close = rest.find(']')?;
    let digits = &rest[..close];
    if digits.is_empty() || !digits.bytes().all(|c| c.is_ascii_digit()) {
        return None;
    }
    // An oversized count still reads as an array; `N` only bounds consumption.
    let len = digits.parse::<usize>().unwrap_or(usize::MAX);
    let mut rest = &rest[close + 1..];

    let mut fields = None;
    if let Some(body) = rest.strip_prefix('{') {
        let close = body.find('}')?;
        if close == 0 {
            return None;
        }
        fields = Some(body[..close].split(',').map(unquote).collect());
        rest = &body[close + 1..];
    }

    let inline = rest.strip_prefix(':')?.trim();
    Some(ArrayHeader {
        key,
        len,
        fields,
        inline,
    })
}

/// Split `key: value` on a trimmed line. The value is trimmed and may be
/// empty, which introduces a nested object.
pub fn split_key_value(text: &str) -> Option<(String, &str)> {
    if let Some((inner, rest)) = split_quoted(text) {
        if let Some(value) = rest.trim_start().strip_prefix(':') {
            return Some((unescape(inner), value.trim()));
        }
    }
    match text.find(':') {
        Some(pos) if pos > 0 => Some((text[..pos].trim().to_string(), text[pos + 1..].trim())),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tabular_header() {
        let h = parse_array_header("paper[2]{name, weight,price}:").unwrap();
        assert_eq!(h.key, "paper");
        assert_eq!(h.len, 2);
        assert_eq!(
            h.fields.as_deref(),
            Some(&["name".to_string(), "weight".to_string(), "price".to_string()][..])
        );
        assert_eq!(h.kind(), ArrayKind::Tabular);
    }

    #[test]
    fn inline_and_list_headers() {
        let h = parse_array_header("nums[3]: 1,2,3").unwrap();
        assert_eq!(h.inline, "1,2,3");
        assert_eq!(h.kind(), ArrayKind::Inline);
        let h = parse_array_header("items[2]:").unwrap();
        assert_eq!(h.kind(), ArrayKind::List);
    }

    #[test]
    fn quoted_header_key() {
        let h = parse_array_header(r#""my list"[1]:"#).unwrap();
        assert_eq!(h.key, "my list");
    }

    #[test]
    fn rejects_non_headers() {
        assert!(parse_array_header("a: 1").is_none());
        assert!(parse_array_header("a[x]: 1").is_none());
        assert!(parse_array_header("a[2]{}:").is_none());
        assert!(parse_array_header("a[2]").is_none());
        assert!(parse_array_header("9a[2]:").is_none());
    }

    #[test]
    fn key_value_forms() {
        assert_eq!(split_key_value("a: 1"), Some(("a".to_string(), "1")));
        assert_eq!(split_key_value("a:"), Some(("a".to_string(), "")));
        assert_eq!(split_key_value("time: 12:30"), Some(("time".to_string(), "12:30")));
        assert_eq!(
            split_key_value(r#""a:\"b\"" : x"#),
            Some(("a:\"b\"".to_string(), "x"))
        );
        assert_eq!(split_key_value("some key: v"), Some(("some key".to_string(), "v")));
        assert_eq!(split_key_value(": v"), None);
        assert_eq!(split_key_value("no colon"), None);
    }
}
