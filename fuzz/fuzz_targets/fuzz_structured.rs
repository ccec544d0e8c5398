#![no_main]
use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use toon_loader::{Options, TierColumns, parse_str, query};

#[derive(Debug, Arbitrary)]
struct Tier {
    min: Option<i32>,
    max: Option<i32>,
    rate: u8,
}

#[derive(Debug, Arbitrary)]
struct Input {
    tiers: Vec<Tier>,
    quantity: i32,
    indent: u8,
}

fuzz_target!(|input: Input| {
    let unit = usize::from(input.indent % 8).max(1);
    let pad = " ".repeat(unit);
    let mut s = format!("tiers[{}]{{qty_min,qty_max,rate}}:\n", input.tiers.len());
    for t in &input.tiers {
        let cell = |v: Option<i32>| v.map_or_else(|| "null".to_string(), |n| n.to_string());
        s.push_str(&format!("{pad}{},{},{}\n", cell(t.min), cell(t.max), t.rate));
    }
    let opts = Options {
        indent: unit,
        strict: true,
        ..Options::default()
    };
    let doc = parse_str(&s, &opts).expect("generated tables are well-formed");
    let rows = doc.get("tiers").and_then(|v| v.as_array()).unwrap_or_default();
    assert_eq!(rows.len(), input.tiers.len());

    let q = f64::from(input.quantity);
    let expected = input.tiers.iter().find(|t| {
        f64::from(t.min.unwrap_or(0)) <= q && t.max.is_none_or(|m| q <= f64::from(m))
    });
    let got = query::tier_value(rows, q, &TierColumns::value("rate"));
    assert_eq!(got.and_then(|v| v.as_i64()), expected.map(|t| i64::from(t.rate)));
});
