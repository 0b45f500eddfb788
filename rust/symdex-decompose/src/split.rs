//! String splitting shared by the decomposers.

/// Truncates `input` to at most `max_len` bytes at a codepoint boundary.
pub(crate) fn truncate_str(input: &str, max_len: usize) -> &str {
    if input.len() <= max_len {
        return input;
    }
    let mut boundary = max_len;
    while boundary > 0 && !input.is_char_boundary(boundary) {
        boundary -= 1;
    }
    &input[..boundary]
}

/// Applies the symbol length limits: too short is dropped, too long is truncated.
pub(crate) fn bounded(symbol: &str, min_len: usize, max_len: usize) -> Option<&str> {
    if symbol.len() < min_len {
        return None;
    }
    let symbol = truncate_str(symbol, max_len);
    (!symbol.is_empty()).then_some(symbol)
}

/// Length of the longest separator that `input` starts with.
pub(crate) fn separator_at(input: &str, separators: &[String]) -> Option<usize> {
    separators
        .iter()
        .filter(|sep| !sep.is_empty() && input.starts_with(sep.as_str()))
        .map(String::len)
        .max()
}

/// Splits `input` on any of `separators`, longest match first, dropping
/// empty parts.
pub(crate) fn split_on<'a>(input: &'a str, separators: &[String]) -> Vec<&'a str> {
    let mut parts = Vec::new();
    let mut start = 0;
    let mut pos = 0;
    while pos < input.len() {
        if let Some(len) = separator_at(&input[pos..], separators) {
            if pos > start {
                parts.push(&input[start..pos]);
            }
            pos += len;
            start = pos;
        } else {
            pos += input[pos..].chars().next().map_or(1, char::len_utf8);
        }
    }
    if input.len() > start {
        parts.push(&input[start..]);
    }
    parts
}

/// Splits a word at case and letter/digit transitions.
///
/// `fooBar` splits into `foo`, `Bar`; an uppercase run followed by a
/// lowercase letter keeps its last capital for the next part, so
/// `HTTPServer` splits into `HTTP`, `Server`. With `digits`, `utf8Decode`
/// splits into `utf`, `8`, `Decode`.
pub(crate) fn split_words(input: &str, camel_case: bool, digits: bool) -> Vec<&str> {
    let chars: Vec<(usize, char)> = input.char_indices().collect();
    let mut parts = Vec::new();
    let mut start = 0;
    for i in 1..chars.len() {
        let (pos, c) = chars[i];
        let prev = chars[i - 1].1;
        let next = chars.get(i + 1).map(|&(_, c)| c);

        let case_break = camel_case
            && (((prev.is_lowercase() || prev.is_numeric()) && c.is_uppercase())
                || (prev.is_uppercase()
                    && c.is_uppercase()
                    && next.is_some_and(char::is_lowercase)));
        let digit_break = digits
            && prev.is_alphanumeric()
            && c.is_alphanumeric()
            && prev.is_numeric() != c.is_numeric();

        if case_break || digit_break {
            parts.push(&input[start..pos]);
            start = pos;
        }
    }
    if input.len() > start {
        parts.push(&input[start..]);
    }
    parts
}
