//! Decoding pipeline: preprocess lines, optionally validate indentation, then
//! descend over indentation depth.

pub mod header;
pub mod parser;
pub mod primitive;
pub mod scanner;
pub mod split;
pub mod validation;

use crate::error::Result;
use crate::options::Options;
use crate::value::Value;

/// Parse a whole document. The root is always an object.
pub fn parse_str(input: &str, options: &Options) -> Result<Value> {
    let lines = scanner::scan(input);
    if options.strict {
        validation::validate_indentation(&lines, options.indent_unit())?;
    }
    parser::Parser::from_lines(lines, options).parse_document()
}
