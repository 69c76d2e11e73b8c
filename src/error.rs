use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// A non-fatal message attached to a report. Warnings never change the outcome.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub code: String,
    pub file: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.file.display())?;
        if let Some(path) = &self.path {
            write!(f, " [{}]", path)?;
        }
        write!(f, ": {} ({})", self.message, self.code)
    }
}

/// Error kind for parse failures.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParseErrorKind {
    /// The file could not be read.
    Read,
    /// The file is not valid UTF-8.
    Encoding,
    /// The YAML or JSON text is malformed.
    Syntax,
}

/// Produced when a candidate file cannot be turned into documents.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseError {
    pub file: PathBuf,
    pub kind: ParseErrorKind,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<usize>,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.line, self.column) {
            (Some(line), Some(col)) => write!(
                f,
                "{}:{}:{}: {}",
                self.file.display(),
                line,
                col,
                self.message
            ),
            (Some(line), None) => write!(f, "{}:{}: {}", self.file.display(), line, self.message),
            _ => write!(f, "{}: {}", self.file.display(), self.message),
        }
    }
}

impl std::error::Error for ParseError {}

/// A field-level schema violation in one rule record or ruleset document.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaError {
    pub file: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule_id: Option<String>,
    pub path: String,
    pub message: String,
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "In {} at {} rule id='{}': {}",
            self.file.display(),
            self.path,
            self.rule_id.as_deref().unwrap_or("<missing>"),
            self.message
        )
    }
}

impl std::error::Error for SchemaError {}

/// A rule id that was already defined earlier in the corpus.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuplicateIdError {
    pub id: String,
    pub first_file: PathBuf,
    pub second_file: PathBuf,
    pub path: String,
}

impl fmt::Display for DuplicateIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Duplicate id '{}' found in {} and {}",
            self.id,
            self.first_file.display(),
            self.second_file.display()
        )
    }
}

impl std::error::Error for DuplicateIdError {}

/// Any error that makes a parsed corpus fail validation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValidationError {
    Schema(SchemaError),
    DuplicateId(DuplicateIdError),
}

impl ValidationError {
    /// File the error was found in. For duplicates this is the later file.
    pub fn file(&self) -> &std::path::Path {
        match self {
            ValidationError::Schema(e) => &e.file,
            ValidationError::DuplicateId(e) => &e.second_file,
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::Schema(e) => write!(f, "{}", e),
            ValidationError::DuplicateId(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Fatal error raised while locating candidate files.
#[derive(Debug)]
pub enum DiscoveryError {
    /// A glob pattern could not be compiled.
    Pattern { pattern: String, message: String },
    /// The file system could not be walked.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl fmt::Display for DiscoveryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiscoveryError::Pattern { pattern, message } => {
                write!(f, "invalid glob pattern '{}': {}", pattern, message)
            }
            DiscoveryError::Io { path, source } => {
                write!(f, "cannot access {}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for DiscoveryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DiscoveryError::Pattern { .. } => None,
            DiscoveryError::Io { source, .. } => Some(source),
        }
    }
}

/// Fatal error raised while loading a configuration file.
#[derive(Debug)]
pub enum ConfigError {
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    Syntax {
        path: PathBuf,
        message: String,
    },
    UnknownProfile(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Read { path, source } => {
                write!(f, "failed to read config {}: {}", path.display(), source)
            }
            ConfigError::Syntax { path, message } => {
                write!(f, "invalid config {}: {}", path.display(), message)
            }
            ConfigError::UnknownProfile(name) => write!(
                f,
                "unknown profile '{}' (expected 'ruleset' or 'versioned')",
                name
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Read { source, .. } => Some(source),
            _ => None,
        }
    }
}
