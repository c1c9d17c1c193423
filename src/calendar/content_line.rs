//! Structured reader for `NAME[;PARAM=VALUE...]:VALUE` lines.
//
// Parameter values may be quoted, and a quoted value may contain `;` or `:`
// without ending the parameter or the name section.

/// One physical line split into its name, parameters and value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentLine<'a> {
    pub name: &'a str,
    pub params: Vec<(&'a str, &'a str)>,
    pub value: &'a str,
}

impl<'a> ContentLine<'a> {
    pub fn parse(line: &'a str) -> Self {
        let (head, value) = split_value(line);

        let mut sections = split_unquoted(head, ';').into_iter();
        let name = sections.next().unwrap_or("");
        let params = sections
            .map(|param| match param.find('=') {
                Some(eq) => (&param[..eq], &param[eq + 1..]),
                None => (param, ""),
            })
            .collect();

        Self { name, params, value }
    }

    /// Parameter value with surrounding quotes removed. Names compare case-insensitively.
    pub fn param(&self, name: &str) -> Option<&'a str> {
        self.params
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|&(_, value)| unquote(value))
    }
}

/// Splits at the first colon outside quotes. No colon yields an empty value.
fn split_value(line: &str) -> (&str, &str) {
    let mut in_quotes = false;
    for (idx, c) in line.char_indices() {
        match c {
            '"' => in_quotes = !in_quotes,
            ':' if !in_quotes => return (&line[..idx], &line[idx + 1..]),
            _ => {}
        }
    }
    (line, "")
}

fn split_unquoted(input: &str, delimiter: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut in_quotes = false;
    let mut start = 0;
    for (idx, c) in input.char_indices() {
        if c == '"' {
            in_quotes = !in_quotes;
        } else if c == delimiter && !in_quotes {
            parts.push(&input[start..idx]);
            start = idx + c.len_utf8();
        }
    }
    parts.push(&input[start..]);
    parts
}

fn unquote(value: &str) -> &str {
    let value = value.trim();
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value)
}
