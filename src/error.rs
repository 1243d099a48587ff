//! Error types for embedding parsing, task registration, lookup, and execution.
//!
//! Parse and registration errors are fatal to an invocation. Task execution
//! errors are recovered by the pipeline and surfaced only in the report of the
//! task that raised them.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Errors raised while deserializing a word-vector file.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("missing size header: the embedding doesn't contain the N x M size in its header line")]
    MissingSizeHeader,

    #[error("too many header values: expected `<word_count> <dim>` but found {found} values")]
    TooManyHeaderValues { found: usize },

    #[error("header values must be integers, but the header line is '{line}'")]
    NonIntegerHeader { line: String },

    #[error("vector dimension declared in the header must be at least 1")]
    ZeroDimension,

    #[error(
        "vector size mismatch: promised word vector size {expected} from header \
         wasn't matched on line {line} with a size of {actual}"
    )]
    VectorSizeMismatch {
        expected: usize,
        actual: usize,
        line: usize,
    },

    #[error("invalid vector value '{token}' on line {line}")]
    InvalidFloat { token: String, line: usize },

    #[error("duplicate word '{word}' on line {line}")]
    DuplicateWord { word: String, line: usize },

    #[error(
        "word count mismatch: promised word count {expected} from header \
         wasn't matched with a count of {actual}"
    )]
    WordCountMismatch { expected: usize, actual: usize },

    #[error("truncated binary stream at record {record}: {detail}")]
    TruncatedBinary { record: usize, detail: String },

    #[error("binary stream has {count} unexpected trailing bytes after {records} declared records")]
    TrailingBytes { count: usize, records: usize },

    #[error("empty word token at record {record}")]
    EmptyWord { record: usize },

    #[error("duplicate word '{word}' at record {record}")]
    DuplicateRecord { word: String, record: usize },

    #[error("word '{word}' at record {record} contains whitespace and cannot be stored")]
    WhitespaceInWord { word: String, record: usize },

    #[error("declared vector dimension {dim} is too large")]
    DimensionTooLarge { dim: usize },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A [`ParseError`] tied to the file it was raised for.
#[derive(Debug, Error)]
#[error("unable to load embedding from '{}': {source}", .path.display())]
pub struct LoadError {
    pub path: PathBuf,
    #[source]
    pub source: ParseError,
}

/// Errors raised while registering or discovering tasks.
#[derive(Debug, Error)]
pub enum RegistrationError {
    #[error("a task must have a non-empty name which is used for discovery")]
    MissingName,

    #[error("location '{}' to load task plugins from does not exist", .path.display())]
    LocationNotFound { path: PathBuf },

    #[error("unable to load plugin module '{module}' from '{}': {reason}", .path.display())]
    PluginLoad {
        module: String,
        path: PathBuf,
        reason: String,
    },
}

/// Errors raised when looking up a task or a word by name.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("no task with name '{name}' registered. Choose one of: {}", .known.join(", "))]
    UnknownTask { name: String, known: Vec<String> },

    #[error("word '{0}' not in vocabulary")]
    UnknownWord(String),
}

/// Errors raised while a task evaluates an embedding.
#[derive(Debug, Error)]
pub enum TaskExecutionError {
    #[error("task '{task}' failed: {source:#}")]
    Failed {
        task: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("task '{task}' panicked: {message}")]
    Panicked { task: String, message: String },

    #[error("task '{task}' did not finish within {}s", .timeout.as_secs_f64())]
    TimedOut { task: String, timeout: Duration },
}
