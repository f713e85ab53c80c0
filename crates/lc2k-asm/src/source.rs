//! Source lines and the five-field line format:
//! `[label] opcode [arg0 [arg1 [arg2]]] [comment...]`.
//!
//! A label is present only when the line starts with a non-whitespace
//! character. Every line occupies one address, blank lines included.

use crate::error::AsmError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLine<'a> {
    /// 1-based line number.
    pub number: usize,
    pub addr: u32,
    pub text: &'a str,
}

/// Splits `src` into lines, rejecting any line that would not fit a
/// `max_line_length` buffer together with its newline.
pub fn lines(
    src: &str,
    max_line_length: usize,
) -> impl Iterator<Item = Result<SourceLine<'_>, AsmError>> {
    src.split_inclusive('\n').enumerate().map(move |(i, raw)| {
        let text = raw.strip_suffix('\n').unwrap_or(raw);
        if text.len() + 1 >= max_line_length {
            return Err(AsmError::LineTooLong {
                line: i + 1,
                max: max_line_length,
            });
        }
        Ok(SourceLine {
            number: i + 1,
            addr: i as u32,
            text,
        })
    })
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParsedLine<'a> {
    pub label: Option<&'a str>,
    pub opcode: Option<&'a str>,
    pub args: [Option<&'a str>; 3],
}

fn is_field_sep(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r' | '\n')
}

pub fn parse_line(text: &str) -> ParsedLine<'_> {
    let (label, rest) = match text.chars().next() {
        Some(c) if !is_field_sep(c) => {
            let end = text.find(is_field_sep).unwrap_or(text.len());
            (Some(&text[..end]), &text[end..])
        }
        _ => (None, text),
    };
    let mut fields = rest.split(is_field_sep).filter(|t| !t.is_empty());
    let opcode = fields.next();
    let args = [fields.next(), fields.next(), fields.next()];
    ParsedLine {
        label,
        opcode,
        args,
    }
}
