//! Strict-mode indentation checks
use crate::decode::scanner::Line;

#[derive(Debug)]
pub struct ValidationError {
    pub line: usize,
    pub message: String,
}

impl From<ValidationError> for crate::error::Error {
    fn from(e: ValidationError) -> Self {
        crate::error::Error::Syntax {
            line: e.line,
            message: e.message,
        }
    }
}

/// Validate indentation against the configured unit (typically 2 or 4).
///
/// Tabs may not appear in leading whitespace, an indent may only grow by one
/// unit at a time, and it may only shrink by whole units.
pub fn validate_indentation(lines: &[Line<'_>], indent_size: usize) -> Result<(), ValidationError> {
    let indent_size = if indent_size == 0 { 2 } else { indent_size };
    let mut prev_indent: Option<usize> = None;

    for line in lines {
        if line
            .raw
            .chars()
            .take_while(|c| c.is_whitespace())
            .any(|c| c == '\t')
        {
            return Err(ValidationError {
                line: line.number,
                message: "tab character used in indentation".to_string(),
            });
        }

        if let Some(pi) = prev_indent {
            if line.indent > pi {
                if line.indent != pi + indent_size {
                    return Err(ValidationError {
                        line: line.number,
                        message: format!(
                            "indent increase must be +{}, got {}->{}",
                            indent_size, pi, line.indent
                        ),
                    });
                }
            } else if line.indent < pi && (pi - line.indent) % indent_size != 0 {
                return Err(ValidationError {
                    line: line.number,
                    message: format!(
                        "indent decrease must be multiple of {}, got {}->{}",
                        indent_size, pi, line.indent
                    ),
                });
            }
        } else if line.indent % indent_size != 0 {
            return Err(ValidationError {
                line: line.number,
                message: format!(
                    "indent must be a multiple of {}, got {}",
                    indent_size, line.indent
                ),
            });
        }
        prev_indent = Some(line.indent);
    }
    Ok(())
}
