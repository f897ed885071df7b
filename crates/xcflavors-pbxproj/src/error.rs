//! Parse error type.

/// A syntax error in a property-list source, with a 1-based position.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("line {line}, column {column}: {message}")]
pub struct ParseError {
    /// 1-based line number.
    pub line: usize,
    /// 1-based column, counted in characters.
    pub column: usize,
    /// What went wrong.
    pub message: String,
}

impl ParseError {
    /// Build an error for the byte `offset` within `src`.
    pub fn at(src: &str, offset: usize, message: impl Into<String>) -> Self {
        let offset = offset.min(src.len());
        let before = src.get(..offset).unwrap_or(src);
        let line = before.matches('\n').count() + 1;
        let line_begin = before.rfind('\n').map(|i| i + 1).unwrap_or(0);
        let column = before[line_begin..].chars().count() + 1;
        Self {
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
    fn test_position_first_line() {
        let err = ParseError::at("abc", 2, "boom");
        assert_eq!(err.line, 1);
        assert_eq!(err.column, 3);
    }

    #[test]
    fn test_position_after_newlines() {
        let err = ParseError::at("{\n\tfoo\n\tbar", 9, "boom");
        assert_eq!(err.line, 3);
        assert_eq!(err.column, 3);
        assert_eq!(err.to_string(), "line 3, column 3: boom");
    }

    #[test]
    fn test_offset_past_end_is_clamped() {
        let err = ParseError::at("ab", 50, "eof");
        assert_eq!(err.line, 1);
        assert_eq!(err.column, 3);
    }
}
