//! The parsed message title and its components.

use std::fmt;
use std::ops::Deref;

use crate::parser::parse;
use crate::{Error, ErrorKind};

/// A message title split into `<type>(<scope>): <subject>`.
///
/// A `Message` from [`Message::parse`] only exists for a line that matched the
/// grammar; none of its fields are ever left unset.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Message<'a> {
    ty: Type<'a>,
    scope: Option<Scope<'a>>,
    subject: Subject<'a>,
}

impl<'a> Message<'a> {
    /// Split a message title into its components.
    ///
    /// Only the first line of `line` is considered.
    ///
    /// # Errors
    ///
    /// - [`ErrorKind::Format`] when the line does not match the grammar or the
    ///   subject is blank.
    /// - [`ErrorKind::Scope`] when the scope parentheses are present but hold
    ///   nothing but whitespace.
    pub fn parse(line: &'a str) -> Result<Self, Error> {
        let mut input = line;
        let (ty, scope, subject) =
            parse(&mut input).map_err(|err| Error::with_parser(line, err))?;

        if subject.is_empty() {
            return Err(Error::new(ErrorKind::Format).set_line(line));
        }
        if scope.is_some_and(|scope| scope.trim().is_empty()) {
            return Err(Error::new(ErrorKind::Scope).set_line(line));
        }

        Ok(Self {
            ty: Type::new_unchecked(ty),
            scope: scope.map(Scope::new_unchecked),
            subject: Subject::new_unchecked(subject),
        })
    }

    /// Piece together a message without going through the grammar.
    ///
    /// Nothing is checked here; see `parse` for ensuring the data is valid.
    /// [`verify`][crate::verify()] still reports an empty type or subject as
    /// [`ErrorKind::Format`] and a blank scope as [`ErrorKind::Scope`].
    pub const fn new_unchecked(
        ty: Type<'a>,
        scope: Option<Scope<'a>>,
        subject: Subject<'a>,
    ) -> Self {
        Self { ty, scope, subject }
    }

    /// The type of the message.
    pub const fn type_(&self) -> Type<'a> {
        self.ty
    }

    /// The optional scope; `None` marks a global change.
    pub const fn scope(&self) -> Option<Scope<'a>> {
        self.scope
    }

    /// The subject, with surrounding whitespace removed.
    pub const fn subject(&self) -> Subject<'a> {
        self.subject
    }
}

impl fmt::Display for Message<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.ty)?;

        if let Some(scope) = &self.scope {
            write!(f, "({scope})")?;
        }

        write!(f, ": {}", self.subject)
    }
}

macro_rules! components {
    ($($ty:ident),+) => (
        $(
            /// A component of the message title.
            #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
            pub struct $ty<'a>(&'a str);

            impl<'a> $ty<'a> {
                /// See `Message::parse` for ensuring the data is valid.
                pub const fn new_unchecked(value: &'a str) -> Self {
                    $ty(value)
                }

                /// Access `str` representation
                pub const fn as_str(&self) -> &'a str {
                    self.0
                }
            }

            impl Deref for $ty<'_> {
                type Target = str;

                fn deref(&self) -> &Self::Target {
                    self.as_str()
                }
            }

            impl PartialEq<&'_ str> for $ty<'_> {
                fn eq(&self, other: &&str) -> bool {
                    self.0 == *other
                }
            }

            impl fmt::Display for $ty<'_> {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.0)
                }
            }
        )+
    )
}

components![Type, Scope, Subject];

impl Type<'_> {
    /// Whether the type is written entirely in lowercase.
    pub fn is_lowercase(&self) -> bool {
        self.0 == self.0.to_lowercase()
    }

    /// Case-insensitive comparison, for spotting "right idea, wrong case".
    pub fn eq_ignore_case(&self, other: &str) -> bool {
        unicase::UniCase::new(self.0) == unicase::UniCase::new(other)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_valid_simple_message() {
        let message = Message::parse("feat(test): samples").unwrap();

        assert_eq!(message.type_(), "feat");
        assert_eq!(message.scope().unwrap(), "test");
        assert_eq!(message.subject(), "samples");
    }

    #[test]
    fn test_wide_separator() {
        let message = Message::parse("feat(test):                         samples").unwrap();

        assert_eq!(message.type_(), "feat");
        assert_eq!(message.scope().unwrap(), "test");
        assert_eq!(message.subject(), "samples");
    }

    #[test]
    fn test_no_scope() {
        let message = Message::parse("feat: global").unwrap();

        assert_eq!(message.type_(), "feat");
        assert_eq!(message.scope(), None);
        assert_eq!(message.subject(), "global");
    }

    #[test]
    fn test_parenthetical_statement() {
        let message = Message::parse("fix: hello world (#1)").unwrap();

        assert_eq!(message.scope(), None);
        assert_eq!(message.subject(), "hello world (#1)");
    }

    #[test]
    fn test_only_first_line() {
        let message = Message::parse("chore: bump deps\n\nBody text.\n").unwrap();

        assert_eq!(message.type_(), "chore");
        assert_eq!(message.subject(), "bump deps");
    }

    #[test]
    fn test_case_is_kept() {
        let message = Message::parse("Feat(Test): Samples").unwrap();

        assert_eq!(message.type_(), "Feat");
        assert_ne!(message.type_(), "feat");
        assert_eq!(message.scope().unwrap(), "Test");
        assert_eq!(message.subject(), "Samples");
    }

    #[test]
    fn test_missing_separator_space() {
        let err = Message::parse("feat(test):samples").unwrap_err();

        assert_eq!(ErrorKind::Format, err.kind());
        assert_eq!(err.line(), Some("feat(test):samples"));
    }

    #[test]
    fn test_empty_scope() {
        let err = Message::parse("feat(): global").unwrap_err();
        assert_eq!(ErrorKind::Scope, err.kind());

        let err = Message::parse("feat(  ): global").unwrap_err();
        assert_eq!(ErrorKind::Scope, err.kind());
    }

    #[test]
    fn test_missing_type() {
        let err = Message::parse("(test): test").unwrap_err();

        assert_eq!(ErrorKind::Format, err.kind());
    }

    #[test]
    fn test_blank_subject() {
        for line in ["feat(test):", "feat(test):   ", "feat(test):        \t\t ", "feat():  "] {
            let err = Message::parse(line).unwrap_err();
            assert_eq!(ErrorKind::Format, err.kind(), "{line:?}");
        }
    }

    #[test]
    fn test_display() {
        let message = Message::parse("fix(parser):   handle tabs").unwrap();
        assert_eq!(message.to_string(), "fix(parser): handle tabs");

        let message = Message::parse("docs: readme").unwrap();
        assert_eq!(message.to_string(), "docs: readme");
    }

    #[test]
    fn test_type_case() {
        assert!(Type::new_unchecked("feat").is_lowercase());
        assert!(!Type::new_unchecked("Feat").is_lowercase());
        assert!(Type::new_unchecked("FEAT").eq_ignore_case("feat"));
        assert!(!Type::new_unchecked("feet").eq_ignore_case("feat"));
    }
}
