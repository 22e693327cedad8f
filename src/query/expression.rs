//! Boolean match expressions

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;
use std::fmt;

/// A field reference inside a match expression: `field:'...'`.
static FIELD_REFERENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:^|[\s(])([A-Za-z][A-Za-z0-9_]*):'").unwrap());

/// A boolean match expression in the engine's native syntax.
///
/// Either the output of [`QueryTranslator`](crate::query::QueryTranslator)
/// or a raw `bq` parameter passed through verbatim. The engine consumes it as
/// a string; the request handler additionally inspects the fields it
/// references to reject expressions over undefined fields before they reach
/// the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchExpression(String);

impl MatchExpression {
    /// Wrap an expression string without inspecting it.
    pub fn raw(expression: impl Into<String>) -> Self {
        Self(expression.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Names of the fields referenced in `field:'value'` position, in order
    /// of first appearance.
    pub fn field_references(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        FIELD_REFERENCE
            .captures_iter(&self.0)
            .map(|captures| captures[1].to_string())
            .filter(|name| seen.insert(name.clone()))
            .collect()
    }
}

impl fmt::Display for MatchExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
