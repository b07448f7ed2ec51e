use thiserror::Error;

/// Errors produced while parsing a literal expression
///
/// Every variant records the byte offset into the parsed text so callers can
/// point at the exact declaration that failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LiteralError {
    #[error("unexpected end of input at byte {offset}")]
    UnexpectedEnd { offset: usize },

    #[error("unexpected character '{found}' at byte {offset}")]
    UnexpectedChar { found: char, offset: usize },

    #[error("unterminated string starting at byte {offset}")]
    UnterminatedString { offset: usize },

    #[error("unterminated block comment starting at byte {offset}")]
    UnterminatedComment { offset: usize },

    #[error("invalid escape sequence at byte {offset}")]
    InvalidEscape { offset: usize },

    #[error("invalid number '{text}' at byte {offset}")]
    InvalidNumber { text: String, offset: usize },

    #[error("`{text}` at byte {offset} requires evaluation and is not a literal")]
    NotALiteral { text: String, offset: usize },

    #[error("template interpolation at byte {offset} is not a literal")]
    Interpolation { offset: usize },

    #[error("nesting exceeds {limit} levels at byte {offset}")]
    TooDeep { limit: usize, offset: usize },

    #[error("unexpected trailing content at byte {offset}")]
    TrailingContent { offset: usize },
}

impl LiteralError {
    pub fn offset(&self) -> usize {
        match self {
            LiteralError::UnexpectedEnd { offset }
            | LiteralError::UnexpectedChar { offset, .. }
            | LiteralError::UnterminatedString { offset }
            | LiteralError::UnterminatedComment { offset }
            | LiteralError::InvalidEscape { offset }
            | LiteralError::InvalidNumber { offset, .. }
            | LiteralError::NotALiteral { offset, .. }
            | LiteralError::Interpolation { offset }
            | LiteralError::TooDeep { offset, .. }
            | LiteralError::TrailingContent { offset } => *offset,
        }
    }
}
