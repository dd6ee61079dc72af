//! Human-readable diagnostics for rejected titles.

use std::fmt;

use colored::Colorize;

use crate::config::FORMAT_DOC;
use crate::{Error, ErrorKind, RuleConfig, Type, TypeRule};

const TITLE: &str = "============================ Invalid Message ================================";
const FOOTER: &str = "=============================================================================";

/// How a [`Diagnostic`] is styled.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum Paint {
    /// No escape sequences.
    #[default]
    Plain,
    /// ANSI colors, for terminals.
    Ansi,
}

/// The part of a diagnostic that depends on what went wrong.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Context<'a> {
    /// The allowed `<type>` vocabulary.
    Vocabulary(&'a [TypeRule]),
    /// A documentation string from the rules.
    Doc(&'a str),
}

/// Everything needed to explain why `line` was rejected.
#[derive(Copy, Clone, Debug)]
pub struct Diagnostic<'a> {
    line: &'a str,
    kind: ErrorKind,
    rejected_type: Option<&'a str>,
    config: &'a RuleConfig,
}

impl<'a> Diagnostic<'a> {
    /// Explain a `kind` failure of `line` under `config`.
    ///
    /// Without the rejected type there is nothing to suggest; see
    /// [`Diagnostic::from_error`].
    pub fn new(line: &'a str, kind: ErrorKind, config: &'a RuleConfig) -> Self {
        Self {
            line,
            kind,
            rejected_type: None,
            config,
        }
    }

    /// Explain `err`, raised while checking `line` under `config`.
    pub fn from_error(line: &'a str, err: &'a Error, config: &'a RuleConfig) -> Self {
        Self {
            line,
            kind: err.kind(),
            rejected_type: err.type_(),
            config,
        }
    }

    /// The rejected line.
    pub fn line(&self) -> &'a str {
        self.line
    }

    /// Why the line was rejected.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Vocabulary for format and type errors, the matching doc string otherwise.
    pub fn context(&self) -> Context<'a> {
        match self.kind {
            ErrorKind::Format | ErrorKind::Type => Context::Vocabulary(self.config.type_rules()),
            ErrorKind::Style => Context::Doc(self.config.style_doc()),
            ErrorKind::Scope => Context::Doc(self.config.scope_doc()),
            ErrorKind::Subject => Context::Doc(self.config.subject_doc()),
        }
    }

    /// The vocabulary spelling of a rejected type that only differs by case.
    pub fn suggestion(&self) -> Option<&'a str> {
        if self.kind != ErrorKind::Style {
            return None;
        }
        let ty = self.rejected_type?;
        if self.config.allows_type(ty) {
            return None;
        }
        self.config
            .type_rules()
            .iter()
            .find(|rule| Type::new_unchecked(ty).eq_ignore_case(&rule.type_))
            .map(|rule| rule.type_.as_str())
    }

    /// The full diagnostic block.
    pub fn render(&self, paint: Paint) -> String {
        let style = Style(paint);
        let mut out = String::new();
        out.push('\n');
        out.push_str(&style.red(TITLE));
        out.push_str(&format!("\ntitle message:\t{}", style.red(self.line)));
        out.push_str(&format!("\ncorrect format:\t{}\n\n", style.green(FORMAT_DOC)));
        match self.context() {
            Context::Vocabulary(rules) => {
                out.push_str("Allowed <type> values\n");
                for rule in rules {
                    out.push_str(&format!("{}\t{}\n", style.yellow(&rule.type_), rule.description));
                }
            }
            Context::Doc(doc) => {
                out.push_str(&style.yellow(doc));
                if let Some(suggestion) = self.suggestion() {
                    out.push_str(&format!("\nDid you mean `{}`?", style.yellow(suggestion)));
                }
            }
        }
        out.push_str(&format!("\n\nSee: {}\n", style.green(self.config.reference())));
        out.push('\n');
        out.push_str(&style.red(FOOTER));
        out
    }
}

impl fmt::Display for Diagnostic<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(Paint::Plain))
    }
}

struct Style(Paint);

impl Style {
    fn red(&self, s: &str) -> String {
        match self.0 {
            Paint::Plain => s.to_owned(),
            Paint::Ansi => s.red().to_string(),
        }
    }

    fn green(&self, s: &str) -> String {
        match self.0 {
            Paint::Plain => s.to_owned(),
            Paint::Ansi => s.bright_green().to_string(),
        }
    }

    fn yellow(&self, s: &str) -> String {
        match self.0 {
            Paint::Plain => s.to_owned(),
            Paint::Ansi => s.bright_yellow().to_string(),
        }
    }
}
