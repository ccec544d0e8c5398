/// Parser and loader settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// Indentation unit in columns (default: 2). Zero falls back to 2.
    pub indent: usize,
    /// Reject malformed lines and declared-length mismatches instead of
    /// skipping them.
    pub strict: bool,
    /// Keep parsed documents in the loader cache (default: on).
    pub cache: bool,
}

impl Options {
    pub(crate) fn indent_unit(&self) -> usize {
        if self.indent == 0 { 2 } else { self.indent }
    }
}

impl Default for Options {
    fn default() -> Self {
        Self {
            indent: 2,
            strict: false,
            cache: true,
        }
    }
}
