use toon_loader::Value;
use toon_loader::decode::primitive::{parse_primitive, unescape};

#[test]
fn options_defaults() {
    let opts = toon_loader::Options::default();
    assert!(!opts.strict);
    assert!(opts.cache);
    assert_eq!(opts.indent, 2);
}

#[test]
fn bare_words_become_strings() {
    assert_eq!(parse_primitive("아트지"), Value::from("아트지"));
    assert_eq!(parse_primitive("NULL"), Value::from("NULL"));
    assert_eq!(parse_primitive("True"), Value::from("True"));
}

#[test]
fn numbers_split_on_decimal_point() {
    assert_eq!(parse_primitive("100"), Value::Int(100));
    assert_eq!(parse_primitive("+5"), Value::Int(5));
    assert_eq!(parse_primitive("100.0"), Value::Float(100.0));
    assert_eq!(parse_primitive(".5"), Value::Float(0.5));
    assert_eq!(parse_primitive("-0.25"), Value::Float(-0.25));
}

#[test]
fn quoted_tokens_are_strings_even_when_numeric() {
    assert_eq!(parse_primitive("\"54\""), Value::from("54"));
    assert_eq!(parse_primitive("\"null\""), Value::from("null"));
    assert_eq!(parse_primitive("\"\""), Value::from(""));
}

#[test]
fn surrounding_whitespace_is_ignored() {
    assert_eq!(parse_primitive("  42 "), Value::Int(42));
    assert_eq!(parse_primitive("   "), Value::Null);
}

#[test]
fn all_five_escapes() {
    assert_eq!(unescape(r#"a\n\t\"b\\c"#), "a\n\t\"b\\c");
    assert_eq!(unescape(r"x\ry"), "x\ry");
}

#[test]
fn unknown_escape_is_kept() {
    assert_eq!(unescape(r"C:\path"), r"C:\path");
}
