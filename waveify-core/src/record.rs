//! Record tokenizer
//!
//! Recognizes one log record per line:
//!
//! ```text
//! <time> <category> [<label>]
//! ```
//!
//! `time` is a run of ASCII digits, `category` a run of non-whitespace and
//! `label` an optional run of non-whitespace. The match is anchored at the
//! start of the line, and anything after the label is ignored.

use crate::types::Time;

/// A recognized record, borrowing from the line it was read from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Record<'a> {
    pub time: Time,
    pub category: &'a str,
    /// Empty when the line has no label
    pub label: &'a str,
}

/// Parse a single line (without its line terminator)
///
/// Returns `None` when the line does not match the record grammar.
pub fn parse_record(line: &str) -> Option<Record<'_>> {
    let (digits, rest) = split_while(line, |c| c.is_ascii_digit());
    if digits.is_empty() {
        return None;
    }
    let time = digits.parse::<Time>().ok()?;

    let (gap, rest) = split_while(rest, char::is_whitespace);
    if gap.is_empty() {
        return None;
    }

    let (category, rest) = split_while(rest, |c| !c.is_whitespace());
    if category.is_empty() {
        return None;
    }

    // Either end of line or whitespace followed by an optional label
    let (_, rest) = split_while(rest, char::is_whitespace);
    let (label, _) = split_while(rest, |c| !c.is_whitespace());

    Some(Record {
        time,
        category,
        label,
    })
}

/// Split `s` at the first char that does not satisfy `pred`
fn split_while(s: &str, pred: impl Fn(char) -> bool) -> (&str, &str) {
    let end = s
        .char_indices()
        .find(|&(_, c)| !pred(c))
        .map(|(i, _)| i)
        .unwrap_or(s.len());
    s.split_at(end)
}
