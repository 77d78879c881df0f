use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ParseError {
    #[error("unexpected end of line")]
    EndOfLine,
    #[error("invalid token '{0}'")]
    InvalidToken(String),
    #[error("expected {0}, got '{1}'")]
    TypeMismatch(&'static str, String),
    #[error("invalid BFC statement '{0}'")]
    InvalidBfcStatement(String),
    #[error("unexpected command '{0}'")]
    UnexpectedCommand(String),
    #[error("multipart document is not allowed here")]
    MultipartDocument,
}

/// Parse failure annotated with its 1-based source line.
#[derive(Debug, Error, PartialEq)]
#[error("line {line}: {error}")]
pub struct DocumentParseError {
    pub line: usize,
    #[source]
    pub error: ParseError,
}

#[derive(Debug, Error, PartialEq)]
pub enum ColorDefinitionParseError {
    #[error("unknown material '{0}'")]
    UnknownMaterial(String),
    #[error(transparent)]
    ParseError(#[from] ParseError),
    #[error(transparent)]
    DocumentParseError(#[from] DocumentParseError),
}
