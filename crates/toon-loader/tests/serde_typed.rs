#![cfg(feature = "json")]
use std::io::Write;

use serde::Deserialize;
use tempfile::NamedTempFile;
use toon_loader::{Options, ToonLoader};

#[derive(Debug, Deserialize, PartialEq)]
struct Paper {
    name: String,
    weight: String,
    price: i64,
}

#[derive(Debug, Deserialize, PartialEq)]
struct Shipping {
    base: i64,
    free_over: Option<i64>,
}

#[derive(Debug, Deserialize, PartialEq)]
struct Sheet {
    paper: Vec<Paper>,
    shipping: Shipping,
    sizes: Vec<String>,
}

const SHEET: &str = "paper[2]{name,weight,price}:\n  아트지,120g,54\n  모조지,100g,31\nshipping:\n  base: 3000\n  free_over: null\nsizes[2]: A4,A3\n";

#[test]
fn decode_into_struct() -> Result<(), Box<dyn std::error::Error>> {
    let sheet: Sheet = toon_loader::decode_from_str(SHEET, &Options::default())?;
    assert_eq!(sheet.paper.len(), 2);
    assert_eq!(sheet.paper[1].name, "모조지");
    assert_eq!(sheet.shipping, Shipping { base: 3000, free_over: None });
    assert_eq!(sheet.sizes, vec!["A4", "A3"]);
    Ok(())
}

#[test]
fn decode_from_reader_matches_str() -> Result<(), Box<dyn std::error::Error>> {
    let a: serde_json::Value = toon_loader::decode_from_str(SHEET, &Options::default())?;
    let b: serde_json::Value = toon_loader::decode_from_reader(SHEET.as_bytes(), &Options::default())?;
    assert_eq!(a, b);
    Ok(())
}

#[test]
fn typed_table_rows() -> Result<(), Box<dyn std::error::Error>> {
    let mut tmp = NamedTempFile::new()?;
    tmp.write_all(SHEET.as_bytes())?;
    tmp.flush()?;
    let mut loader = ToonLoader::new();
    let papers: Vec<Paper> = loader.load_table_as(tmp.path(), "paper")?;
    assert_eq!(
        papers[0],
        Paper { name: "아트지".into(), weight: "120g".into(), price: 54 }
    );
    Ok(())
}

#[test]
fn type_mismatch_is_a_serde_error() {
    let err = toon_loader::decode_from_str::<Sheet>("paper: none\n", &Options::default()).unwrap_err();
    assert!(matches!(err, toon_loader::Error::SerdeJson(_)));
}

#[test]
fn value_serializes_in_document_order() -> Result<(), Box<dyn std::error::Error>> {
    let v = toon_loader::parse_str("z: 1\na: 2\nm:\n  k: x\n", &Options::default())?;
    assert_eq!(serde_json::to_string(&v)?, r#"{"z":1,"a":2,"m":{"k":"x"}}"#);
    Ok(())
}
