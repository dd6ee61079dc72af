//! Lint a commit message title, or a pull-request title, against
//! `<type>(<scope>): <subject>` and a set of rules.
//!
//! # Example
//!
//! ```rust
//! use commit_lint::{lint, ErrorKind, Message, Outcome, RuleConfig};
//!
//! let rules = RuleConfig::conventional();
//!
//! // Titles are split into their three components.
//! let message = Message::parse("feat(parser): accept tabs after the colon").unwrap();
//! assert_eq!(message.type_(), "feat");
//! assert_eq!(message.scope().unwrap(), "parser");
//! assert_eq!(message.subject(), "accept tabs after the colon");
//!
//! // The scope may be left out, but not left empty.
//! assert_eq!(lint("fix: global change", &rules), Outcome::Pass);
//! let outcome = lint("fix(): global change", &rules);
//! assert_eq!(outcome.error().unwrap().kind(), ErrorKind::Scope);
//!
//! // Exactly one problem is reported, the type before the subject.
//! let outcome = lint("feature: Add a thing", &rules);
//! assert_eq!(outcome.error().unwrap().kind(), ErrorKind::Type);
//!
//! // Generated lines are waved through.
//! assert_eq!(lint("Merge branch 'main' into dev", &rules), Outcome::Skipped);
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod message;
mod parser;
mod render;
mod source;
mod verify;

pub use config::{
    load, ConfigError, ConfigSource, FileSource, RuleConfig, ShapeRule, TypeRule, FORMAT_DOC,
};
pub use error::{Error, ErrorKind};
pub use message::{Message, Scope, Subject, Type};
pub use render::{Context, Diagnostic, Paint};
pub use source::{pull_request_title, MessageSource, Origin, SourceError, COMMIT_EDITMSG};
pub use verify::{lint, verify, verify_message, Outcome};
