use log::{debug, trace};

use crate::decode::header::{ArrayHeader, ArrayKind, parse_array_header, split_key_value};
use crate::decode::primitive::{parse_primitive, unquote};
use crate::decode::scanner::{Line, scan};
use crate::decode::split::{find_unquoted_colon, split_fields};
use crate::error::{Error, Result};
use crate::options::Options;
use crate::value::{Map, Row, Value};

/// Deepest object nesting accepted before parsing gives up.
pub const MAX_DEPTH: usize = 256;

/// Recursive descent over preprocessed lines.
///
/// Every `parse_*` method takes the index of its first line and returns the
/// parsed node together with the index of the first line it did not consume.
pub struct Parser<'a> {
    lines: Vec<Line<'a>>,
    unit: usize,
    strict: bool,
}

impl<'a> Parser<'a> {
    pub fn from_input(input: &'a str, options: &Options) -> Self {
        Self::from_lines(scan(input), options)
    }

    pub fn from_lines(lines: Vec<Line<'a>>, options: &Options) -> Self {
        Self {
            lines,
            unit: options.indent_unit(),
            strict: options.strict,
        }
    }

    pub fn parse_document(&self) -> Result<Value> {
        if self.lines.is_empty() {
            return Ok(Value::Object(Map::new()));
        }
        let (map, next) = self.parse_object(0, 0)?;
        if let Some(line) = self.lines.get(next) {
            if self.strict {
                return Err(Error::syntax(line.number, "list item outside of an array"));
            }
            debug!(
                "stopped at line {}: {} trailing line(s) ignored",
                line.number,
                self.lines.len() - next
            );
        }
        Ok(Value::Object(map))
    }

    /// Parse the object block whose lines sit at `depth` units of indentation.
    ///
    /// The first line is always part of the block. The block ends at a dedent,
    /// at a list item, or at end of input.
    pub fn parse_object(&self, start: usize, depth: usize) -> Result<(Map, usize)> {
        if depth > MAX_DEPTH {
            let line = self.lines.get(start).map_or(0, |l| l.number);
            return Err(Error::Message(format!(
                "line {}: nesting exceeds {} levels",
                line, MAX_DEPTH
            )));
        }
        let expected = depth * self.unit;
        let mut map = Map::new();
        let mut i = start;
        while let Some(line) = self.lines.get(i) {
            if line.indent < expected && i > start {
                break;
            }
            if line.is_list_item() {
                break;
            }

            if let Some(header) = parse_array_header(line.text) {
                let (items, next) = self.parse_array(&header, i, depth)?;
                self.insert(&mut map, header.key, Value::Array(items), line)?;
                i = next;
                continue;
            }

            match split_key_value(line.text) {
                Some((key, "")) => {
                    self.expect_block(i + 1, depth + 1, &key)?;
                    let (nested, next) = self.parse_object(i + 1, depth + 1)?;
                    self.insert(&mut map, key, Value::Object(nested), line)?;
                    i = next;
                }
                Some((key, value)) => {
                    self.insert(&mut map, key, parse_primitive(value), line)?;
                    i += 1;
                }
                None => {
                    if self.strict {
                        return Err(Error::syntax(
                            line.number,
                            format!("unrecognized line: {}", line.text),
                        ));
                    }
                    debug!("skipping unrecognized line {}: {}", line.number, line.text);
                    i += 1;
                }
            }
        }
        Ok((map, i))
    }

    /// Dispatch an array header found at `at`; its items sit at `depth + 1`.
    fn parse_array(
        &self,
        header: &ArrayHeader<'_>,
        at: usize,
        depth: usize,
    ) -> Result<(Vec<Value>, usize)> {
        let line = &self.lines[at];
        let kind = header.kind();
        trace!(
            "line {}: {:?} array `{}` declares {} item(s)",
            line.number, kind, header.key, header.len
        );
        match (kind, &header.fields) {
            (ArrayKind::Tabular, Some(fields)) => {
                if self.strict {
                    check_tabular_header(header, fields, line)?;
                }
                self.parse_tabular(header, fields, at + 1, depth + 1)
            }
            (ArrayKind::Inline, _) => {
                let items: Vec<Value> = split_fields(header.inline)
                    .into_iter()
                    .map(parse_primitive)
                    .collect();
                if self.strict && items.len() != header.len {
                    return Err(count_mismatch(header, items.len(), line));
                }
                Ok((items, at + 1))
            }
            _ => self.parse_list(header, at + 1, depth + 1),
        }
    }

    fn parse_tabular(
        &self,
        header: &ArrayHeader<'_>,
        fields: &[String],
        start: usize,
        depth: usize,
    ) -> Result<(Vec<Value>, usize)> {
        let expected = depth * self.unit;
        let mut rows = Vec::new();
        let mut i = start;
        while rows.len() < header.len {
            let Some(line) = self.lines.get(i) else {
                break;
            };
            if line.indent < expected {
                break;
            }
            let cells = split_fields(line.text);
            if self.strict && cells.len() != fields.len() {
                return Err(Error::syntax(
                    line.number,
                    format!(
                        "row has {} field(s), header declares {}",
                        cells.len(),
                        fields.len()
                    ),
                ));
            }
            let mut row = Row::with_capacity(fields.len());
            for (j, field) in fields.iter().enumerate() {
                let cell = cells.get(j).map_or(Value::Null, |c| parse_primitive(c));
                row.insert(field.clone(), cell);
            }
            rows.push(Value::Object(row));
            i += 1;
        }
        if self.strict {
            self.check_len(header, rows.len(), start, i, |l| l.indent >= expected)?;
        }
        Ok((rows, i))
    }

    fn parse_list(
        &self,
        header: &ArrayHeader<'_>,
        start: usize,
        depth: usize,
    ) -> Result<(Vec<Value>, usize)> {
        let expected = depth * self.unit;
        let mut items = Vec::new();
        let mut i = start;
        while items.len() < header.len {
            let Some(line) = self.lines.get(i) else {
                break;
            };
            if line.indent < expected {
                break;
            }
            let Some(body) = line.list_item() else {
                break;
            };
            let body = body.trim();
            let Some(colon) = find_unquoted_colon(body) else {
                items.push(parse_primitive(body));
                i += 1;
                continue;
            };
            let key = unquote(&body[..colon]);
            let value = body[colon + 1..].trim();
            let mut entry = Map::with_capacity(1);
            if value.is_empty() {
                self.expect_block(i + 1, depth + 1, &key)?;
                let (nested, next) = self.parse_object(i + 1, depth + 1)?;
                entry.insert(key, Value::Object(nested));
                i = next;
            } else {
                entry.insert(key, parse_primitive(value));
                i += 1;
            }
            items.push(Value::Object(entry));
        }
        if self.strict {
            self.check_len(header, items.len(), start, i, |l| {
                l.indent >= expected && l.is_list_item()
            })?;
        }
        Ok((items, i))
    }

    fn insert(&self, map: &mut Map, key: String, value: Value, line: &Line<'_>) -> Result<()> {
        if map.contains_key(&key) {
            if self.strict {
                return Err(Error::syntax(line.number, format!("duplicate key: {}", key)));
            }
            debug!("line {}: duplicate key `{}`, last value wins", line.number, key);
        }
        map.insert(key, value);
        Ok(())
    }

    /// Strict mode: the line after `key:` must open a deeper block, otherwise
    /// lenient parsing would pull a sibling into the nested object.
    fn expect_block(&self, at: usize, depth: usize, key: &str) -> Result<()> {
        if !self.strict {
            return Ok(());
        }
        match self.lines.get(at) {
            Some(next) if next.indent < depth * self.unit => Err(Error::syntax(
                next.number,
                format!("expected an indented block after `{}:`", key),
            )),
            _ => Ok(()),
        }
    }

    /// Strict mode: the declared `[N]` must match the items consumed, and no
    /// further item may follow at the item indentation.
    fn check_len(
        &self,
        header: &ArrayHeader<'_>,
        found: usize,
        start: usize,
        next: usize,
        is_item: impl Fn(&Line<'_>) -> bool,
    ) -> Result<()> {
        let header_line = &self.lines[start - 1];
        if found < header.len {
            return Err(count_mismatch(header, found, header_line));
        }
        if let Some(line) = self.lines.get(next) {
            if is_item(line) {
                return Err(Error::syntax(
                    line.number,
                    format!(
                        "array `{}` declares {} item(s) but more follow",
                        header.key, header.len
                    ),
                ));
            }
        }
        Ok(())
    }
}

fn count_mismatch(header: &ArrayHeader<'_>, found: usize, line: &Line<'_>) -> Error {
    Error::syntax(
        line.number,
        format!(
            "array `{}` declares {} item(s), found {}",
            header.key, header.len, found
        ),
    )
}

fn check_tabular_header(header: &ArrayHeader<'_>, fields: &[String], line: &Line<'_>) -> Result<()> {
    if !header.inline.is_empty() {
        return Err(Error::syntax(
            line.number,
            format!("unexpected text after tabular header: {}", header.inline),
        ));
    }
    for (i, field) in fields.iter().enumerate() {
        if field.is_empty() {
            return Err(Error::syntax(line.number, "empty field name in tabular header"));
        }
        if fields[..i].contains(field) {
            return Err(Error::syntax(
                line.number,
                format!("duplicate header field: {}", field),
            ));
        }
    }
    Ok(())
}
