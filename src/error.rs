use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HTMLErrorLevel {
    FatalError,
    Error,
    Warning,
}

impl std::fmt::Display for HTMLErrorLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match *self {
            Self::FatalError => write!(f, "fatal error"),
            Self::Error => write!(f, "error"),
            Self::Warning => write!(f, "warning"),
        }
    }
}

#[derive(Debug, Clone)]
pub enum HTMLError {
    // general errors
    InternalError,
    // reader misuse
    ParserUnknownFeature,
    ParserUnknownProperty,
    // scanner errors
    //
    // A state/input pair with no transition row means the state table
    // itself is ill-formed.  This is a programmer error, not a parse error.
    ScannerNoTransition,
    // schema builder misuse
    SchemaUndeclaredElementType,
    SchemaUndeclaredParent,
    SchemaUndeclaredChild,
    // input errors
    ParserUnresolvableInput,
    ParserMalformedInput,
    // I/O errors
    IOError(Arc<std::io::Error>),
}

impl std::fmt::Display for HTMLError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

impl std::error::Error for HTMLError {}

impl From<std::io::Error> for HTMLError {
    fn from(value: std::io::Error) -> Self {
        Self::IOError(Arc::new(value))
    }
}
