//! Front end of the directive language.
//!
//! Stylesheet text is a map literal from style name to a list of call tuples.
//! The parser turns it into a [`StyleSheet`] of [`Call`]s; nothing here knows
//! what any directive means.

/// Expression tree and stylesheet containers.
pub mod ast;
/// Recursive-descent parser for stylesheet text.
pub mod parser;
/// Dynamically typed values exchanged with the node layer.
pub mod value;

pub use ast::{Call, Expr, StyleSheet};
pub use parser::{MAX_NESTING, parse, parse_expression, parse_lenient};
pub use value::Value;

use serde::Serialize;
use thiserror::Error;

/// Convenience result alias for parser operations.
pub type ParseResult<T> = std::result::Result<T, ParseError>;

/// Malformed directive-language text.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("{message} at line {line}, column {column} (byte {offset})")]
pub struct ParseError {
    /// Byte offset into the source text.
    pub offset: usize,
    /// 1-based line number.
    pub line: usize,
    /// 1-based column, counted in characters.
    pub column: usize,
    /// What went wrong.
    pub message: String,
}

impl ParseError {
    /// Build an error at `offset`, computing line and column from `source`.
    pub fn at(source: &str, offset: usize, message: impl Into<String>) -> Self {
        let offset = offset.min(source.len());
        let prefix = source.get(..offset).unwrap_or(source);
        let line = prefix.matches('\n').count() + 1;
        let line_start = prefix.rfind('\n').map(|idx| idx + 1).unwrap_or(0);
        let column = prefix[line_start..].chars().count() + 1;
        Self {
            offset,
            line,
            column,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_position_counts_lines_and_columns() {
        let src = "%{\n  \"a\" => ?\n}";
        let offset = src.find('?').unwrap();
        let err = ParseError::at(src, offset, "unexpected character");
        assert_eq!(err.line, 2);
        assert_eq!(err.column, 10);
        assert!(err.to_string().contains("line 2, column 10"));
    }
}
