//! Line preprocessor: drops blank and comment lines, keeps indentation.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line<'a> {
    /// 1-based line number in the source text.
    pub number: usize,
    /// Count of leading whitespace characters.
    pub indent: usize,
    /// Content with surrounding whitespace removed.
    pub text: &'a str,
    /// The line before trimming, without its line terminator.
    pub raw: &'a str,
}

impl<'a> Line<'a> {
    /// Body of a `- ` list item, if this line is one.
    pub fn list_item(&self) -> Option<&'a str> {
        self.text.strip_prefix("- ")
    }

    pub fn is_list_item(&self) -> bool {
        self.text.starts_with("- ")
    }
}

pub fn scan(input: &str) -> Vec<Line<'_>> {
    iter(input).collect()
}

pub struct LineIter<'a> {
    rest: &'a str,
    number: usize,
}

pub fn iter(input: &str) -> LineIter<'_> {
    LineIter {
        rest: input,
        number: 0,
    }
}

impl<'a> Iterator for LineIter<'a> {
    type Item = Line<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.rest.is_empty() {
                return None;
            }
            let raw = match self.rest.find('\n') {
                Some(pos) => {
                    let (line, remaining) = self.rest.split_at(pos + 1);
                    self.rest = remaining;
                    line
                }
                None => core::mem::take(&mut self.rest),
            };
            self.number += 1;
            let raw = raw.trim_end_matches('\n').trim_end_matches('\r');
            if let Some(line) = parse_line(self.number, raw) {
                return Some(line);
            }
        }
    }
}

fn parse_line(number: usize, raw: &str) -> Option<Line<'_>> {
    let text = raw.trim();
    if text.is_empty() || text.starts_with('#') {
        return None;
    }
    let indent = raw.chars().take_while(|c| c.is_whitespace()).count();
    Some(Line {
        number,
        indent,
        text,
        raw,
    })
}
