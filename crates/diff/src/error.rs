use derive_more::Display;

/// Errors raised while reading diff output produced by a line-diff engine
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ParseError {
    /// The header line has no closing `@@` marker
    #[display(fmt = "missing closing '@@' marker in hunk header: {:?}", _0)]
    MissingMarker(String),

    /// A range field is not of the form `-A[,B]` / `+C[,D]`
    #[display(fmt = "malformed range in hunk header: {:?}", _0)]
    MalformedRange(String),

    /// A range field contains a non-numeric component
    #[display(fmt = "invalid number in hunk header: {:?}", _0)]
    InvalidNumber(String),

    /// A navigation direction other than first/last/next/prev
    #[display(fmt = "unknown navigation direction: {:?}", _0)]
    UnknownDirection(String),
}

impl std::error::Error for ParseError {}
