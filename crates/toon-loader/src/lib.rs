#![doc = include_str!("../README.md")]

pub mod decode;
pub mod error;
pub mod loader;
pub mod options;
pub mod query;
pub mod value;

pub use crate::decode::parse_str;
pub use crate::error::{Error, Result};
pub use crate::loader::ToonLoader;
pub use crate::options::Options;
pub use crate::query::{Quantity, TierColumns};
pub use crate::value::{Map, Row, Value};

use std::io::Read;

#[cfg(feature = "json")]
use serde::de::DeserializeOwned;

/// Parse a document and deserialize it into `T`.
#[cfg(feature = "json")]
pub fn decode_from_str<T: DeserializeOwned>(s: &str, options: &Options) -> Result<T> {
    let v = parse_str(s, options)?;
    let t = serde_json::from_value(serde_json::Value::from(v))?;
    Ok(t)
}

#[cfg(feature = "json")]
pub fn decode_from_reader<R: Read, T: DeserializeOwned>(mut reader: R, options: &Options) -> Result<T> {
    let mut s = String::new();
    reader.read_to_string(&mut s)?;
    decode_from_str(&s, options)
}

/// Parse a document from any reader into a [`Value`].
pub fn parse_reader<R: Read>(mut reader: R, options: &Options) -> Result<Value> {
    let mut s = String::new();
    reader.read_to_string(&mut s)?;
    parse_str(&s, options)
}
