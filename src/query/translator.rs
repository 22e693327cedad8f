//! The simple-query parser

use crate::query::error::{ParseError, ParseResult};
use crate::query::expression::MatchExpression;

/// Translates a CloudSearch simple query into a boolean match expression.
///
/// One instance is constructed per query string and used for a single
/// translation pass. The instance only carries the immutable input, the
/// default field substituted for unqualified terms, and a cursor that moves
/// monotonically forward as terms are consumed; all parsing happens in pure
/// functions of `(input, offset)` below, so the cursor can never rewind and
/// never passes `input.len()`.
///
/// Offsets are byte offsets into the input string.
#[derive(Debug)]
pub struct QueryTranslator<'a> {
    input: &'a str,
    default_field: &'a str,
    offset: usize,
}

impl<'a> QueryTranslator<'a> {
    /// Create a translator over `input`.
    ///
    /// `default_field` qualifies every term that carries no explicit field,
    /// so it is part of each call's input rather than optional state.
    pub fn new(input: &'a str, default_field: &'a str) -> Self {
        Self {
            input,
            default_field,
            offset: 0,
        }
    }

    /// Current cursor position: the number of input bytes consumed so far.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Translate the whole query.
    ///
    /// Successive terms are joined with a single space, the engine's implicit
    /// AND. An empty or whitespace-only query yields `Ok(None)`: there is no
    /// match expression, but that is not a parse error — whether an empty
    /// search is acceptable is the request handler's policy.
    pub fn translate(&mut self) -> ParseResult<Option<MatchExpression>> {
        let mut fragments = Vec::new();
        while skip_whitespace(self.input, self.offset) < self.input.len() {
            fragments.push(self.translate_term()?);
        }
        if fragments.is_empty() {
            Ok(None)
        } else {
            Ok(Some(MatchExpression::raw(fragments.join(" "))))
        }
    }

    /// Translate the next term, individual or phrase.
    ///
    /// Leading whitespace is consumed first; the cursor stays absolute, so
    /// the skipped whitespace counts toward the consumed length observed by
    /// the caller.
    pub fn translate_term(&mut self) -> ParseResult<String> {
        let (fragment, offset) = term(self.input, self.offset, self.default_field)?;
        self.offset = offset;
        Ok(fragment)
    }

    /// Translate an individual (unquoted) term starting at the cursor.
    ///
    /// The scan stops at whitespace or end of input. Single quotes do not
    /// terminate the term — `let's` is one five-character term — and every
    /// quote, however it was written, comes out escaped as `\'` in the
    /// produced value.
    pub fn translate_individual_term(&mut self) -> String {
        let (fragment, offset) = individual_term(self.input, self.offset, self.default_field);
        self.offset = offset;
        fragment
    }

    /// Translate a phrase term starting at the cursor.
    ///
    /// The cursor must sit on the opening double quote; `translate_term` is
    /// the dispatcher that guarantees it. The returned fragment is the whole
    /// quoted span, double quotes included, wrapped in single quotes — the
    /// engine takes a double-quoted phrase as a single-quoted literal value.
    pub fn translate_phrase_term(&mut self) -> ParseResult<String> {
        let (fragment, offset) = phrase_term(self.input, self.offset)?;
        self.offset = offset;
        Ok(fragment)
    }
}

fn skip_whitespace(input: &str, offset: usize) -> usize {
    input[offset..]
        .char_indices()
        .find(|(_, c)| !c.is_whitespace())
        .map(|(i, _)| offset + i)
        .unwrap_or(input.len())
}

fn term(input: &str, offset: usize, default_field: &str) -> ParseResult<(String, usize)> {
    let offset = skip_whitespace(input, offset);
    if input[offset..].starts_with('"') {
        phrase_term(input, offset)
    } else {
        Ok(individual_term(input, offset, default_field))
    }
}

fn individual_term(input: &str, offset: usize, default_field: &str) -> (String, usize) {
    let rest = &input[offset..];
    let mut value = String::new();
    let mut consumed = rest.len();
    let mut chars = rest.char_indices().peekable();
    while let Some((index, c)) = chars.next() {
        if c.is_whitespace() {
            consumed = index;
            break;
        }
        match c {
            // An escaped quote: keep both characters as the escaped form.
            '\\' if matches!(chars.peek(), Some((_, '\''))) => {
                chars.next();
                value.push_str("\\'");
            }
            // A bare quote is a literal character, not a phrase opener, but
            // it must always be escaped in the produced value.
            '\'' => value.push_str("\\'"),
            _ => value.push(c),
        }
    }
    let fragment = format!("{}:'{}'", default_field, value);
    (fragment, offset + consumed)
}

fn phrase_term(input: &str, offset: usize) -> ParseResult<(String, usize)> {
    let rest = &input[offset..];
    assert!(
        rest.starts_with('"'),
        "phrase term does not start with a double quote at offset {offset}"
    );
    // No escaping inside a phrase: the first double quote after the opening
    // one terminates it, matching the 2011-02-01 behavior.
    for (index, c) in rest.char_indices().skip(1) {
        if c == '"' {
            let end = index + c.len_utf8();
            let fragment = format!("'{}'", &rest[..end]);
            return Ok((fragment, offset + end));
        }
    }
    Err(ParseError::UnterminatedPhrase { offset })
}
