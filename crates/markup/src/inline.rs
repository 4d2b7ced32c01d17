//! Inline `**bold**` span parsing.

use docpipe_core::Span;

const BOLD_DELIMITER: &str = "**";

/// Split a line into literal and bold spans.
///
/// Delimiters pair up left to right. An odd trailing `**` has no partner
/// and is kept as literal text. Empty literal spans are omitted.
pub fn parse_spans(line: &str) -> Vec<Span> {
    let parts: Vec<&str> = line.split(BOLD_DELIMITER).collect();
    let delimiters = parts.len() - 1;
    let paired = delimiters - delimiters % 2;

    let mut spans = Vec::new();
    let mut literal = String::new();

    for (i, part) in parts.iter().enumerate() {
        if i > paired {
            literal.push_str(BOLD_DELIMITER);
            literal.push_str(part);
        } else if i % 2 == 1 {
            if !literal.is_empty() {
                spans.push(Span::plain(std::mem::take(&mut literal)));
            }
            spans.push(Span::bold(*part));
        } else {
            literal.push_str(part);
        }
    }

    if !literal.is_empty() {
        spans.push(Span::plain(literal));
    }

    spans
}
