//! Read-only lookups over table rows.
//!
//! The free functions work on rows already in hand; the [`ToonLoader`]
//! methods load the named table first. Misses are `None` or empty, never errors.

use std::collections::HashMap;
use std::path::Path;

use log::debug;

use crate::error::Result;
use crate::loader::ToonLoader;
use crate::value::{Map, Row, Value};

/// Column names used by a tier (quantity range) lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TierColumns<'a> {
    pub min_field: &'a str,
    pub max_field: &'a str,
    pub value_field: &'a str,
}

impl<'a> TierColumns<'a> {
    /// Default range columns with a custom value column.
    pub fn value(value_field: &'a str) -> Self {
        Self {
            value_field,
            ..TierColumns::default()
        }
    }
}

impl Default for TierColumns<'_> {
    fn default() -> Self {
        Self {
            min_field: "qty_min",
            max_field: "qty_max",
            value_field: "price",
        }
    }
}

/// Map each row's `key_field` (rendered with `Display`) to its `value_field`.
///
/// Rows without the key, or with a `null` key, are skipped. A missing value
/// maps to `Null`. On duplicate keys the later row wins, including keys that
/// only render the same (`1` and `"1"`).
pub fn table_as_dict(rows: &[Value], key_field: &str, value_field: &str) -> Map {
    let mut out = Map::new();
    let mut key_types: HashMap<String, &'static str> = HashMap::new();
    for row in rows.iter().filter_map(Value::as_object) {
        let key_value = match row.get(key_field) {
            None | Some(Value::Null) => continue,
            Some(k) => k,
        };
        let key = key_value.to_string();
        if let Some(prev) = key_types.insert(key.clone(), key_value.type_name()) {
            if prev != key_value.type_name() {
                debug!(
                    "`{}` key {} ({}) overwrites an earlier {} key",
                    key_field,
                    key,
                    key_value.type_name(),
                    prev
                );
            }
        }
        let value = row.get(value_field).cloned().unwrap_or(Value::Null);
        out.insert(key, value);
    }
    out
}

/// Value column of the first row whose `[min, max]` range contains `quantity`.
///
/// A missing or `null` minimum counts as 0 and a missing or `null` maximum as
/// unbounded. Rows are scanned in order and are not sorted; the first match
/// wins even when its value column is empty. Non-numeric bounds never match.
pub fn tier_value(rows: &[Value], quantity: f64, columns: &TierColumns<'_>) -> Option<Value> {
    for row in rows.iter().filter_map(Value::as_object) {
        let min = match row.get(columns.min_field) {
            None | Some(Value::Null) => 0.0,
            Some(v) => match v.as_f64() {
                Some(min) => min,
                None => continue,
            },
        };
        let below_max = match row.get(columns.max_field) {
            None | Some(Value::Null) => true,
            Some(v) => match v.as_f64() {
                Some(max) => quantity <= max,
                None => continue,
            },
        };
        if min <= quantity && below_max {
            return row
                .get(columns.value_field)
                .filter(|v| !v.is_null())
                .cloned();
        }
    }
    None
}

/// First object row where every `(field, value)` condition holds.
///
/// Values compare by variant, except that `Int` and `Float` compare by
/// numeric value. An empty condition list matches the first object row.
pub fn find_row(rows: &[Value], conditions: &[(&str, Value)]) -> Option<Row> {
    rows.iter()
        .filter_map(Value::as_object)
        .find(|row| {
            conditions.iter().all(|(field, expected)| {
                row.get(*field)
                    .is_some_and(|cell| cell_matches(cell, expected))
            })
        })
        .cloned()
}

fn cell_matches(cell: &Value, expected: &Value) -> bool {
    match (cell, expected) {
        (Value::Int(i), Value::Float(f)) | (Value::Float(f), Value::Int(i)) => *i as f64 == *f,
        _ => cell == expected,
    }
}

/// Numeric types accepted as a tier lookup quantity.
pub trait Quantity {
    fn to_f64(self) -> f64;
}

macro_rules! impl_quantity {
    ($($t:ty),*) => {
        $(
            impl Quantity for $t {
                fn to_f64(self) -> f64 {
                    self as f64
                }
            }
        )*
    };
}

impl_quantity!(i32, i64, u32, u64, usize, f32, f64);

impl ToonLoader {
    pub fn get_table_as_dict(
        &mut self,
        path: impl AsRef<Path>,
        table: &str,
        key_field: &str,
        value_field: &str,
    ) -> Result<Map> {
        self.with_table(path, table, |rows| table_as_dict(rows, key_field, value_field))
    }

    pub fn get_tier_value(
        &mut self,
        path: impl AsRef<Path>,
        table: &str,
        quantity: impl Quantity,
        columns: &TierColumns<'_>,
    ) -> Result<Option<Value>> {
        let quantity = quantity.to_f64();
        self.with_table(path, table, |rows| tier_value(rows, quantity, columns))
    }

    pub fn find_row(
        &mut self,
        path: impl AsRef<Path>,
        table: &str,
        conditions: &[(&str, Value)],
    ) -> Result<Option<Row>> {
        self.with_table(path, table, |rows| find_row(rows, conditions))
    }
}
