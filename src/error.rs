use std::fmt;
use std::io;
use std::path::PathBuf;

/// Per-game problems that do not stop a record from being produced,
/// joined with `; `.
#[derive(Debug, Clone, Default)]
pub struct ErrorAccumulator(Option<String>);

impl ErrorAccumulator {
    pub fn push(&mut self, msg: &str) {
        match &mut self.0 {
            Some(joined) => {
                joined.push_str("; ");
                joined.push_str(msg);
            }
            None => self.0 = Some(msg.to_string()),
        }
    }

    pub fn take(&mut self) -> Option<String> {
        self.0.take()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_none()
    }
}

/// Failure to load games, snapshots or the opening table from disk.
#[derive(Debug)]
pub enum LoadError {
    Io { path: PathBuf, source: io::Error },
    Pattern(glob::PatternError),
    Snapshot {
        path: PathBuf,
        line: usize,
        source: serde_json::Error,
    },
    NoInput(String),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "Failed to read '{}': {}", path.display(), source)
            }
            Self::Pattern(e) => write!(f, "Invalid input pattern: {}", e),
            Self::Snapshot { path, line, source } => write!(
                f,
                "Invalid snapshot record in '{}' at line {}: {}",
                path.display(),
                line,
                source
            ),
            Self::NoInput(pattern) => write!(f, "No input files match '{}'", pattern),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Pattern(e) => Some(e),
            Self::Snapshot { source, .. } => Some(source),
            Self::NoInput(_) => None,
        }
    }
}

impl From<glob::PatternError> for LoadError {
    fn from(e: glob::PatternError) -> Self {
        Self::Pattern(e)
    }
}
