//! Lint rules and how they are loaded.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use regex::Regex;
use serde::{Deserialize, Serialize};

/// The layout every message title must follow.
pub const FORMAT_DOC: &str = "<type>(<scope>): <subject>";

const REFERENCE: &str = "https://www.conventionalcommits.org/en/v1.0.0/#summary";
const STYLE_DOC: &str = "The <type> and <scope> should always be lowercase.";
const SCOPE_DOC: &str = "The <scope> can be empty (e.g. if the change is a global or difficult to assign to a single component), in which case the parentheses are omitted.";
const SUBJECT_DOC: &str = "The first letter of <subject> should be lowercase.";

const SKIP_PREFIXES: [&str; 2] = ["Merge branch ", "BREAKING: "];

const TYPE_RULES: [(&str, &str); 9] = [
    ("feat", "for a new feature for the user, not a new feature for build script."),
    ("fix", "for a bug fix for the user, not a fix to a build script."),
    ("perf", "for performance improvements."),
    ("docs", "for changes to the documentation."),
    ("style", "for formatting changes, missing semicolons, etc."),
    ("refactor", "for refactoring production code, e.g. renaming a variable."),
    ("test", "for adding missing tests, refactoring tests; no production code change."),
    ("build", "for updating build configuration, development tools or other changes irrelevant to the user."),
    ("chore", "for updates that do not apply to the above, such as dependency updates."),
];

/// One entry of the allowed `<type>` vocabulary.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TypeRule {
    /// The type name, expected to be lowercase.
    #[serde(rename = "type")]
    pub type_: String,
    /// What the type is for; only shown in diagnostics.
    #[serde(default)]
    pub description: String,
}

impl TypeRule {
    /// Pair a type name with its description.
    pub fn new(type_: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            type_: type_.into(),
            description: description.into(),
        }
    }
}

/// A predicate a scope or subject must satisfy.
#[derive(Clone, Debug)]
#[non_exhaustive]
pub enum ShapeRule {
    /// The whole value equals its lowercase form.
    Lowercase,
    /// The first character is not uppercase.
    LowercaseInitial,
    /// The value matches the pattern somewhere; anchor it to match the whole value.
    Pattern(Regex),
}

impl ShapeRule {
    /// Whether `value` has the expected shape.
    pub fn matches(&self, value: &str) -> bool {
        match self {
            ShapeRule::Lowercase => value == value.to_lowercase(),
            ShapeRule::LowercaseInitial => !value.chars().next().is_some_and(char::is_uppercase),
            ShapeRule::Pattern(re) => re.is_match(value),
        }
    }

    fn pattern(field: &'static str, pattern: &str) -> Result<Self, ConfigError> {
        Regex::new(pattern)
            .map(ShapeRule::Pattern)
            .map_err(|source| ConfigError::Pattern { field, source })
    }
}

impl fmt::Display for ShapeRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShapeRule::Lowercase => f.write_str("lowercase"),
            ShapeRule::LowercaseInitial => f.write_str("lowercase initial"),
            ShapeRule::Pattern(re) => write!(f, "/{}/", re.as_str()),
        }
    }
}

/// The full set of rules a message title is checked against.
///
/// Built once, then only read.
#[derive(Clone, Debug)]
pub struct RuleConfig {
    skip_prefixes: Vec<String>,
    type_rules: Vec<TypeRule>,
    scope_rule: ShapeRule,
    subject_rule: ShapeRule,
    reference: String,
    style_doc: String,
    scope_doc: String,
    subject_doc: String,
}

impl RuleConfig {
    /// The built-in rules: the nine conventional commit types, lowercase
    /// scopes and lowercase-initial subjects.
    pub fn conventional() -> Self {
        Self {
            skip_prefixes: SKIP_PREFIXES.iter().map(|p| (*p).to_owned()).collect(),
            type_rules: TYPE_RULES
                .iter()
                .map(|(ty, description)| TypeRule::new(*ty, *description))
                .collect(),
            scope_rule: ShapeRule::Lowercase,
            subject_rule: ShapeRule::LowercaseInitial,
            reference: REFERENCE.to_owned(),
            style_doc: STYLE_DOC.to_owned(),
            scope_doc: SCOPE_DOC.to_owned(),
            subject_doc: SUBJECT_DOC.to_owned(),
        }
    }

    /// Decode a YAML rule document.
    ///
    /// Keys missing from the document keep their built-in value.
    pub fn from_yaml(document: &[u8]) -> Result<Self, ConfigError> {
        let document: RuleDocument =
            serde_yaml::from_slice(document).map_err(|source| ConfigError::Decode {
                origin: "<inline>".to_owned(),
                source,
            })?;
        document.into_config()
    }

    /// Prefixes that exempt a line from every check.
    pub fn skip_prefixes(&self) -> impl Iterator<Item = &str> {
        self.skip_prefixes.iter().map(String::as_str)
    }

    /// The first skip prefix `line` starts with, compared without trimming.
    pub fn skip_prefix(&self, line: &str) -> Option<&str> {
        self.skip_prefixes().find(|prefix| line.starts_with(prefix))
    }

    /// The allowed `<type>` vocabulary, in documentation order.
    pub fn type_rules(&self) -> &[TypeRule] {
        &self.type_rules
    }

    /// Whether `ty` is exactly one of the allowed types.
    pub fn allows_type(&self, ty: &str) -> bool {
        self.type_rules.iter().any(|rule| rule.type_ == ty)
    }

    /// Shape a non-empty scope must have.
    pub fn scope_rule(&self) -> &ShapeRule {
        &self.scope_rule
    }

    /// Shape a subject must have.
    pub fn subject_rule(&self) -> &ShapeRule {
        &self.subject_rule
    }

    /// Link shown at the bottom of every diagnostic.
    pub fn reference(&self) -> &str {
        &self.reference
    }

    /// Explains type and scope casing.
    pub fn style_doc(&self) -> &str {
        &self.style_doc
    }

    /// Explains when a scope may be left out.
    pub fn scope_doc(&self) -> &str {
        &self.scope_doc
    }

    /// Explains subject casing.
    pub fn subject_doc(&self) -> &str {
        &self.subject_doc
    }
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self::conventional()
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RuleDocument {
    skip_prefixes: Option<Vec<String>>,
    type_rules: Option<Vec<TypeRule>>,
    reference: Option<String>,
    style_doc: Option<String>,
    scope_doc: Option<String>,
    subject_doc: Option<String>,
    scope_pattern: Option<String>,
    subject_pattern: Option<String>,
}

impl RuleDocument {
    fn into_config(self) -> Result<RuleConfig, ConfigError> {
        let mut config = RuleConfig::conventional();
        if let Some(skip_prefixes) = self.skip_prefixes {
            config.skip_prefixes = skip_prefixes;
        }
        if let Some(type_rules) = self.type_rules {
            if type_rules.is_empty() {
                return Err(ConfigError::NoTypes);
            }
            config.type_rules = type_rules;
        }
        if let Some(pattern) = self.scope_pattern {
            config.scope_rule = ShapeRule::pattern("scope_pattern", &pattern)?;
        }
        if let Some(pattern) = self.subject_pattern {
            config.subject_rule = ShapeRule::pattern("subject_pattern", &pattern)?;
        }
        if let Some(reference) = self.reference {
            config.reference = reference;
        }
        if let Some(style_doc) = self.style_doc {
            config.style_doc = style_doc;
        }
        if let Some(scope_doc) = self.scope_doc {
            config.scope_doc = scope_doc;
        }
        if let Some(subject_doc) = self.subject_doc {
            config.subject_doc = subject_doc;
        }
        Ok(config)
    }
}

/// Where a rule document comes from.
pub trait ConfigSource {
    /// Human-readable name of the source, for error messages.
    fn origin(&self) -> String;

    /// The raw, still encoded, document.
    fn read(&self) -> std::io::Result<Vec<u8>>;
}

/// A rule document on disk.
#[derive(Clone, Debug)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    /// Read rules from `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The path rules are read from.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ConfigSource for FileSource {
    fn origin(&self) -> String {
        self.path.display().to_string()
    }

    fn read(&self) -> std::io::Result<Vec<u8>> {
        fs::read(&self.path)
    }
}

/// Load rules from `source`, or the built-in rules when there is none.
pub fn load(source: Option<&dyn ConfigSource>) -> Result<RuleConfig, ConfigError> {
    let Some(source) = source else {
        tracing::debug!("using built-in rules");
        return Ok(RuleConfig::conventional());
    };

    let origin = source.origin();
    tracing::debug!(%origin, "loading rules");
    let bytes = source.read().map_err(|source| ConfigError::Read {
        origin: origin.clone(),
        source,
    })?;
    match RuleConfig::from_yaml(&bytes) {
        Err(ConfigError::Decode { source, .. }) => Err(ConfigError::Decode { origin, source }),
        result => result,
    }
}

/// Failure to produce a usable [`RuleConfig`].
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// The document could not be read.
    #[error("failed to open config {origin}")]
    Read {
        /// Where the document was expected.
        origin: String,
        /// Underlying I/O failure.
        source: std::io::Error,
    },
    /// The document is not valid YAML or has unexpected keys.
    #[error("failed to parse config {origin}")]
    Decode {
        /// Where the document came from.
        origin: String,
        /// Underlying decode failure.
        source: serde_yaml::Error,
    },
    /// A shape pattern is not a valid regular expression.
    #[error("invalid `{field}`")]
    Pattern {
        /// The document key holding the pattern.
        field: &'static str,
        /// Underlying regex failure.
        source: regex::Error,
    },
    /// `type_rules` is present but lists nothing.
    #[error("`type_rules` must list at least one type")]
    NoTypes,
}
