//! All errors related to linting a message title.

use std::fmt;

use winnow::error::{ContextError, ErrMode};

/// The error returned when a message title is rejected.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Error {
    kind: ErrorKind,

    line: Option<String>,

    ty: Option<String>,
}

impl Error {
    /// Create a new error from a `ErrorKind`.
    pub(crate) fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            line: None,
            ty: None,
        }
    }

    pub(crate) fn with_parser(line: &str, err: ErrMode<ContextError>) -> Self {
        let err = match err {
            ErrMode::Backtrack(err) | ErrMode::Cut(err) => err,
            ErrMode::Incomplete(_) => unreachable!("complete input never needs more data"),
        };
        if let Some(label) = err.context().next() {
            tracing::trace!(%label, "grammar rejected message");
        }

        Self::new(ErrorKind::Format).set_line(line)
    }

    pub(crate) fn set_line(mut self, line: &str) -> Self {
        self.line = Some(line.to_owned());
        self
    }

    pub(crate) fn set_type(mut self, ty: &str) -> Self {
        self.ty = Some(ty.to_owned());
        self
    }

    /// The kind of error.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// The offending line, when known.
    pub fn line(&self) -> Option<&str> {
        self.line.as_deref()
    }

    /// The `<type>` of the rejected message, once it got past the grammar.
    pub fn type_(&self) -> Option<&str> {
        self.ty.as_deref()
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.kind.fmt(f)
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        None
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Self::new(kind)
    }
}

/// All possible reasons a message title is rejected.
///
/// Exactly one kind is reported per message, see [`verify`][crate::verify()] for the
/// order in which they are checked.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[non_exhaustive]
pub enum ErrorKind {
    /// The line does not match `<type>(<scope>): <subject>`, or the subject is
    /// blank.
    Format,

    /// The scope parentheses are present but hold nothing.
    Scope,

    /// The type is lowercase but not part of the configured vocabulary.
    Type,

    /// The type is not lowercase, or the scope fails its shape rule.
    Style,

    /// The subject fails its shape rule.
    Subject,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Format => f.write_str("invalid format error"),
            ErrorKind::Scope => f.write_str("invalid scope error"),
            ErrorKind::Type => f.write_str("invalid type error"),
            ErrorKind::Style => f.write_str("invalid style error"),
            ErrorKind::Subject => f.write_str("invalid subject error"),
        }
    }
}
