//! Simple-query translation into boolean match expressions
//!
//! CloudSearch's `q` parameter carries a restrictive free-text query
//! language: whitespace-separated terms, double-quoted phrases, and nothing
//! else. The downstream engine only understands its boolean match-expression
//! syntax (`field:'value'` fragments combined by implicit AND), so every
//! search request runs the raw `q` string through [`QueryTranslator`] before
//! it reaches the engine:
//!
//! ```
//! use cloudsearch_gateway::query::QueryTranslator;
//!
//! let mut translator = QueryTranslator::new("star wars", "label");
//! let expr = translator.translate().unwrap().unwrap();
//! assert_eq!(expr.as_str(), "label:'star' label:'wars'");
//! ```
//!
//! The `bq` parameter bypasses translation entirely — the caller is already
//! speaking the engine's syntax — and is wrapped as a raw
//! [`MatchExpression`] so the request handler can still validate the fields
//! it references.

mod error;
mod expression;
mod translator;

pub use error::{ParseError, ParseResult};
pub use expression::MatchExpression;
pub use translator::QueryTranslator;
