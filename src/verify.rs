//! Rule checks run against a parsed message.

use crate::{Error, ErrorKind, Message, RuleConfig};

type Check = fn(&Message<'_>, &RuleConfig) -> Result<(), ErrorKind>;

// Earlier checks win; later ones never run once one fails.
const CHECKS: [(&str, Check); 3] = [
    ("type", check_type),
    ("scope", check_scope),
    ("subject", check_subject),
];

/// The verdict on one message title.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Every check passed.
    Pass,
    /// The line starts with a skip prefix and was not checked.
    ///
    /// Only [`lint`] produces this.
    Skipped,
    /// The first check that failed.
    Fail(Error),
}

impl Outcome {
    /// Whether the message is acceptable, checked or not.
    pub fn is_success(&self) -> bool {
        !matches!(self, Outcome::Fail(_))
    }

    /// The reason for failure, if any.
    pub fn error(&self) -> Option<&Error> {
        match self {
            Outcome::Fail(err) => Some(err),
            Outcome::Pass | Outcome::Skipped => None,
        }
    }
}

/// Check a parsed message against `config`.
///
/// Checks run in a fixed order, type then scope then subject, and stop at the
/// first failure.
///
/// # Errors
///
/// - [`ErrorKind::Format`] when the type or subject is empty, which only
///   happens for a [`Message::new_unchecked`].
/// - [`ErrorKind::Scope`] when the scope is present but blank.
/// - [`ErrorKind::Style`] when the type is not in the vocabulary and is not
///   lowercase, or when the scope fails its shape rule.
/// - [`ErrorKind::Type`] when the type is lowercase but not in the vocabulary.
/// - [`ErrorKind::Subject`] when the subject fails its shape rule.
pub fn verify(message: &Message<'_>, config: &RuleConfig) -> Result<(), Error> {
    for (name, check) in CHECKS {
        if let Err(kind) = check(message, config) {
            tracing::trace!(check = name, %kind, "check failed");
            return Err(Error::new(kind).set_type(&message.type_()));
        }
        tracing::trace!(check = name, "check passed");
    }
    Ok(())
}

/// [`verify`], folded into an [`Outcome`].
pub fn verify_message(message: &Message<'_>, config: &RuleConfig) -> Outcome {
    match verify(message, config) {
        Ok(()) => Outcome::Pass,
        Err(err) => Outcome::Fail(err),
    }
}

/// Skip-prefix check, parse and verify one raw line.
///
/// The skip prefixes are compared against `line` as given, before any
/// trimming.
pub fn lint(line: &str, config: &RuleConfig) -> Outcome {
    if let Some(prefix) = config.skip_prefix(line) {
        tracing::debug!(%prefix, "skipping message");
        return Outcome::Skipped;
    }

    let message = match Message::parse(line) {
        Ok(message) => message,
        Err(err) => return Outcome::Fail(err),
    };
    match verify(&message, config) {
        Ok(()) => Outcome::Pass,
        Err(err) => Outcome::Fail(err.set_line(line)),
    }
}

fn check_type(message: &Message<'_>, config: &RuleConfig) -> Result<(), ErrorKind> {
    let ty = message.type_();
    if ty.is_empty() {
        Err(ErrorKind::Format)
    } else if config.allows_type(&ty) {
        Ok(())
    } else if !ty.is_lowercase() {
        Err(ErrorKind::Style)
    } else {
        Err(ErrorKind::Type)
    }
}

fn check_scope(message: &Message<'_>, config: &RuleConfig) -> Result<(), ErrorKind> {
    match message.scope() {
        Some(scope) if scope.trim().is_empty() => Err(ErrorKind::Scope),
        Some(scope) if !config.scope_rule().matches(&scope) => Err(ErrorKind::Style),
        _ => Ok(()),
    }
}

fn check_subject(message: &Message<'_>, config: &RuleConfig) -> Result<(), ErrorKind> {
    let subject = message.subject();
    if subject.is_empty() {
        Err(ErrorKind::Format)
    } else if !config.subject_rule().matches(&subject) {
        Err(ErrorKind::Subject)
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Scope, Subject, Type};

    fn kind(line: &str) -> Option<ErrorKind> {
        lint(line, &RuleConfig::conventional()).error().map(Error::kind)
    }

    #[test]
    fn passes_well_formed_titles() {
        for line in [
            "feat(test): samples",
            "fix(parser): handle tabs",
            "perf(cache-layer): avoid a copy",
            "docs: global change",
            "chore(deps): bump winnow to 0.7",
            "refactor(x86): 1st pass",
            "build(ci):\tuse tabs",
        ] {
            assert_eq!(lint(line, &RuleConfig::conventional()), Outcome::Pass, "{line:?}");
        }
    }

    #[test]
    fn unscoped_titles_pass() {
        let config = RuleConfig::conventional();
        for rule in config.type_rules() {
            let line = format!("{}: do something", rule.type_);
            let message = Message::parse(&line).unwrap();

            assert_eq!(message.scope(), None);
            assert_eq!(verify_message(&message, &config), Outcome::Pass);
        }
    }

    #[test]
    fn format_errors() {
        assert_eq!(kind("feat(test):samples"), Some(ErrorKind::Format));
        assert_eq!(kind("(test): test"), Some(ErrorKind::Format));
        assert_eq!(kind("feat(test):   "), Some(ErrorKind::Format));
        assert_eq!(kind("feat(test):\t "), Some(ErrorKind::Format));
        assert_eq!(kind("just some words"), Some(ErrorKind::Format));
        assert_eq!(kind(""), Some(ErrorKind::Format));
    }

    #[test]
    fn scope_errors() {
        assert_eq!(kind("feat(): global"), Some(ErrorKind::Scope));
    }

    #[test]
    fn type_errors() {
        assert_eq!(kind("invalid(test): test"), Some(ErrorKind::Type));
        assert_eq!(kind("feature: test"), Some(ErrorKind::Type));
    }

    #[test]
    fn style_errors() {
        assert_eq!(kind("Feat(test): test"), Some(ErrorKind::Style));
        assert_eq!(kind("FIX: test"), Some(ErrorKind::Style));
        assert_eq!(kind("Invalid(test): test"), Some(ErrorKind::Style));
        assert_eq!(kind("feat(Test): test"), Some(ErrorKind::Style));
        assert_eq!(kind("feat(Hest): test"), Some(ErrorKind::Style));
    }

    #[test]
    fn subject_errors() {
        assert_eq!(kind("feat(test): Samples"), Some(ErrorKind::Subject));
        assert_eq!(kind("docs: README tweaks"), Some(ErrorKind::Subject));
    }

    #[test]
    fn earliest_check_wins() {
        // type beats subject
        assert_eq!(kind("invalid: Test"), Some(ErrorKind::Type));
        assert_eq!(kind("Invalid: Test"), Some(ErrorKind::Style));
        // type beats scope
        assert_eq!(kind("invalid(Test): test"), Some(ErrorKind::Type));
        // scope beats subject
        assert_eq!(kind("feat(Test): Test"), Some(ErrorKind::Style));
        // parse errors beat everything
        assert_eq!(kind("Invalid(): Test"), Some(ErrorKind::Scope));
        assert_eq!(kind("Invalid(Test):Test"), Some(ErrorKind::Format));
    }

    #[test]
    fn skip_prefixes_bypass_everything() {
        let config = RuleConfig::conventional();

        assert_eq!(lint("Merge branch 'main' into dev", &config), Outcome::Skipped);
        assert_eq!(lint("BREAKING: Whatever(): goes", &config), Outcome::Skipped);
        assert_eq!(lint("Merge branch ", &config), Outcome::Skipped);
        assert!(Outcome::Skipped.is_success());

        assert_eq!(
            lint(" Merge branch 'main'", &config).error().map(Error::kind),
            Some(ErrorKind::Format)
        );
        assert_eq!(
            lint("Merge pull request #1", &config).error().map(Error::kind),
            Some(ErrorKind::Format)
        );
    }

    #[test]
    fn failures_carry_the_line() {
        let outcome = lint("feat(test): Samples", &RuleConfig::conventional());

        let err = outcome.error().unwrap();
        assert_eq!(err.line(), Some("feat(test): Samples"));
        assert!(!outcome.is_success());
    }

    #[test]
    fn custom_rules() {
        let config = RuleConfig::from_yaml(
            b"type_rules:\n  - type: Feat\nscope_pattern: '^[a-z]+/[a-z]+$'\nsubject_pattern: '^[a-z]'\n",
        )
        .unwrap();

        assert_eq!(lint("Feat(api/auth): add login", &config), Outcome::Pass);
        assert_eq!(
            lint("Feat(api): add login", &config).error().map(Error::kind),
            Some(ErrorKind::Style)
        );
        assert_eq!(
            lint("Feat(api/auth): 2fa", &config).error().map(Error::kind),
            Some(ErrorKind::Subject)
        );
        assert_eq!(
            lint("feat: add login", &config).error().map(Error::kind),
            Some(ErrorKind::Type)
        );
    }

    #[test]
    fn blank_subject_from_direct_construction() {
        let message = Message::new_unchecked(
            Type::new_unchecked("feat"),
            Some(Scope::new_unchecked("x")),
            Subject::new_unchecked(""),
        );

        assert_eq!(
            verify(&message, &RuleConfig::conventional()).unwrap_err().kind(),
            ErrorKind::Format
        );
    }

    #[test]
    fn blank_scope_from_direct_construction() {
        for scope in ["", "  "] {
            let message = Message::new_unchecked(
                Type::new_unchecked("feat"),
                Some(Scope::new_unchecked(scope)),
                Subject::new_unchecked("x"),
            );

            assert_eq!(
                verify(&message, &RuleConfig::conventional()).unwrap_err().kind(),
                ErrorKind::Scope,
                "{scope:?}"
            );
        }
    }

    #[test]
    fn empty_type_from_direct_construction() {
        let config = RuleConfig::from_yaml(b"type_rules:\n  - type: ''\n").unwrap();
        for scope in [None, Some(Scope::new_unchecked(""))] {
            let message =
                Message::new_unchecked(Type::new_unchecked(""), scope, Subject::new_unchecked("x"));

            assert_eq!(verify(&message, &config).unwrap_err().kind(), ErrorKind::Format);
        }
    }

    #[test]
    fn failures_carry_the_type() {
        let config = RuleConfig::conventional();

        let outcome = lint("Feat(test): test", &config);
        assert_eq!(outcome.error().unwrap().type_(), Some("Feat"));

        let outcome = lint("feat(test):samples", &config);
        assert_eq!(outcome.error().unwrap().type_(), None);
    }

    #[test]
    fn separator_is_ascii_whitespace_only() {
        assert_eq!(kind("feat:\u{a0}x"), Some(ErrorKind::Format));
        assert_eq!(kind("feat:\u{2003}x"), Some(ErrorKind::Format));
        assert_eq!(kind("feat(test):\u{b}x"), Some(ErrorKind::Format));
        assert_eq!(kind("feat:\x0Cx"), None);
    }

    #[test]
    fn carriage_return_stays_in_subject() {
        let message = Message::parse("feat: x\rY").unwrap();

        assert_eq!(message.subject(), "x\rY");
        assert_eq!(kind("feat: x\rY"), None);
        assert_eq!(kind("feat: \r"), Some(ErrorKind::Format));
    }

    #[test]
    fn verification_is_repeatable() {
        let config = RuleConfig::conventional();
        let message = Message::parse("feat(Test): test").unwrap();

        let first = verify_message(&message, &config);
        for _ in 0..3 {
            assert_eq!(verify_message(&message, &config), first);
        }
    }
}
