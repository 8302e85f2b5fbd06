#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Lexical,
    Syntax,
    Semantic,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, thiserror::Error)]
pub enum CompileError {
    #[error("Line {line}, Column {column}: Lexical error: {message}")]
    Lexical {
        line: usize,
        column: usize,
        message: String,
    },
    #[error("Line {line}, Column {column}: Syntax error: {message}")]
    Syntax {
        line: usize,
        column: usize,
        message: String,
    },
    #[error("Line {line}, Column {column}: Semantic error: {message}")]
    Semantic {
        line: usize,
        column: usize,
        message: String,
    },
}

impl CompileError {
    pub fn lexical(line: usize, column: usize, message: impl Into<String>) -> Self {
        Self::Lexical {
            line,
            column,
            message: message.into(),
        }
    }

    pub fn syntax(line: usize, column: usize, message: impl Into<String>) -> Self {
        Self::Syntax {
            line,
            column,
            message: message.into(),
        }
    }

    pub fn semantic(line: usize, column: usize, message: impl Into<String>) -> Self {
        Self::Semantic {
            line,
            column,
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Lexical { .. } => ErrorKind::Lexical,
            Self::Syntax { .. } => ErrorKind::Syntax,
            Self::Semantic { .. } => ErrorKind::Semantic,
        }
    }

    pub fn line(&self) -> usize {
        match *self {
            Self::Lexical { line, .. } | Self::Syntax { line, .. } | Self::Semantic { line, .. } => {
                line
            }
        }
    }

    pub fn column(&self) -> usize {
        match *self {
            Self::Lexical { column, .. }
            | Self::Syntax { column, .. }
            | Self::Semantic { column, .. } => column,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Lexical { message, .. }
            | Self::Syntax { message, .. }
            | Self::Semantic { message, .. } => message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_carries_position_and_kind() {
        let error = CompileError::syntax(3, 7, "expected \".\", found end of input");

        assert_eq!(
            error.to_string(),
            "Line 3, Column 7: Syntax error: expected \".\", found end of input"
        );
        assert_eq!(error.kind(), ErrorKind::Syntax);
        assert_eq!((error.line(), error.column()), (3, 7));
    }

    #[test]
    fn semantic_message_is_kept_verbatim() {
        let error = CompileError::semantic(1, 5, "variable 'x' not declared");

        assert_eq!(error.message(), "variable 'x' not declared");
        assert_eq!(error.kind(), ErrorKind::Semantic);
    }
}
