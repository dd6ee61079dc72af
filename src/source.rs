//! Finding the line to lint.

use std::fs;
use std::io::{self, BufRead};
use std::path::{Path, PathBuf};

/// Where git keeps the message of the commit being made.
pub const COMMIT_EDITMSG: &str = ".git/COMMIT_EDITMSG";

/// Where a line came from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Origin {
    /// Piped in on standard input.
    Stdin,
    /// The first line of a commit message file.
    CommitFile(PathBuf),
    /// A pull-request title supplied by CI.
    PullRequest,
}

/// The candidate origins of a message title, tried in order.
///
/// 1. the first non-empty line of `stdin`
/// 2. the first non-empty, non-comment line of the commit message file
/// 3. the pull-request title
#[derive(Debug)]
pub struct MessageSource<R> {
    stdin: Option<R>,
    commit_file: PathBuf,
    pr_title: Option<String>,
}

impl<R: BufRead> MessageSource<R> {
    /// Look in `stdin` first, when there is one, then in `commit_file`.
    pub fn new(stdin: Option<R>, commit_file: impl Into<PathBuf>) -> Self {
        Self {
            stdin,
            commit_file: commit_file.into(),
            pr_title: None,
        }
    }

    /// Fall back to `title` when nothing else has a line.
    pub fn with_pr_title(mut self, title: Option<String>) -> Self {
        self.pr_title = title.filter(|title| !title.trim().is_empty());
        self
    }

    /// Take the first line available.
    pub fn resolve(self) -> Result<(Origin, String), SourceError> {
        if let Some(stdin) = self.stdin {
            let line = first_line(stdin, |_| false).map_err(|source| SourceError::Read {
                origin: "stdin".to_owned(),
                source,
            })?;
            if let Some(line) = line {
                return Ok((Origin::Stdin, line));
            }
        }

        if let Some(line) = read_commit_file(&self.commit_file)? {
            return Ok((Origin::CommitFile(self.commit_file), line));
        }

        if let Some(title) = self.pr_title {
            return Ok((Origin::PullRequest, strip_line_ending(&title).to_owned()));
        }

        Err(SourceError::NotFound)
    }
}

fn read_commit_file(path: &Path) -> Result<Option<String>, SourceError> {
    let file = match fs::File::open(path) {
        Ok(file) => file,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "no commit message file");
            return Ok(None);
        }
        Err(source) => {
            return Err(SourceError::Read {
                origin: path.display().to_string(),
                source,
            })
        }
    };
    first_line(io::BufReader::new(file), |line| line.starts_with('#')).map_err(|source| {
        SourceError::Read {
            origin: path.display().to_string(),
            source,
        }
    })
}

fn first_line(
    mut reader: impl BufRead,
    ignore: impl Fn(&str) -> bool,
) -> io::Result<Option<String>> {
    let mut buf = String::new();
    loop {
        buf.clear();
        if reader.read_line(&mut buf)? == 0 {
            return Ok(None);
        }
        let line = strip_line_ending(&buf);
        if !line.trim().is_empty() && !ignore(line) {
            return Ok(Some(line.to_owned()));
        }
    }
}

fn strip_line_ending(line: &str) -> &str {
    line.trim_end_matches(['\r', '\n'])
}

/// The pull-request title from a GitHub Actions event payload.
pub fn pull_request_title(event: &[u8]) -> Option<String> {
    let event: serde_json::Value = serde_json::from_slice(event).ok()?;
    event
        .pointer("/pull_request/title")?
        .as_str()
        .map(str::to_owned)
}

/// Failure to find a line to lint.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum SourceError {
    /// An origin exists but could not be read.
    #[error("failed to read message from {origin}")]
    Read {
        /// The origin being read.
        origin: String,
        /// Underlying I/O failure.
        source: io::Error,
    },
    /// No origin had a line.
    #[error("no message found on stdin, in the commit message file, or as a pull-request title")]
    NotFound,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn source(stdin: Option<&str>, commit_file: &Path) -> MessageSource<Cursor<Vec<u8>>> {
        MessageSource::new(stdin.map(|s| Cursor::new(s.as_bytes().to_vec())), commit_file)
    }

    #[test]
    fn stdin_first_non_empty_line() {
        let dir = tempfile::tempdir().unwrap();
        let (origin, line) = source(Some("\n  \nfeat: x\r\nfix: y\n"), &dir.path().join("none"))
            .resolve()
            .unwrap();

        assert_eq!(origin, Origin::Stdin);
        assert_eq!(line, "feat: x");
    }

    #[test]
    fn stdin_keeps_surrounding_spaces() {
        let dir = tempfile::tempdir().unwrap();
        let (_, line) = source(Some(" Merge branch 'x'  \n"), &dir.path().join("none"))
            .resolve()
            .unwrap();

        assert_eq!(line, " Merge branch 'x'  ");
    }

    #[test]
    fn empty_stdin_falls_back_to_commit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("COMMIT_EDITMSG");
        fs::write(&path, "# comment\n\nfix(parser): handle tabs\n\nbody\n").unwrap();

        let (origin, line) = source(Some(""), &path).resolve().unwrap();

        assert_eq!(origin, Origin::CommitFile(path));
        assert_eq!(line, "fix(parser): handle tabs");
    }

    #[test]
    fn falls_back_to_pr_title() {
        let dir = tempfile::tempdir().unwrap();
        let (origin, line) = source(None, &dir.path().join("none"))
            .with_pr_title(Some("docs: readme".to_owned()))
            .resolve()
            .unwrap();

        assert_eq!(origin, Origin::PullRequest);
        assert_eq!(line, "docs: readme");
    }

    #[test]
    fn nothing_found() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("COMMIT_EDITMSG");
        fs::write(&path, "# only comments\n\n").unwrap();

        let err = source(Some("\n"), &path)
            .with_pr_title(Some("  ".to_owned()))
            .resolve()
            .unwrap_err();

        assert!(matches!(err, SourceError::NotFound));
    }

    #[cfg(unix)]
    #[test]
    fn unreadable_commit_file() {
        let dir = tempfile::tempdir().unwrap();

        // a directory opens on unix but fails to read
        let err = source(None, dir.path()).resolve().unwrap_err();

        assert!(matches!(err, SourceError::Read { .. }));
    }

    #[test]
    fn github_event_payload() {
        let event = br#"{"action":"opened","pull_request":{"number":7,"title":"feat(ci): lint titles"}}"#;
        assert_eq!(pull_request_title(event).as_deref(), Some("feat(ci): lint titles"));

        assert_eq!(pull_request_title(br#"{"push":{}}"#), None);
        assert_eq!(pull_request_title(b"not json"), None);
    }
}
