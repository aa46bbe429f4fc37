//! Error types for certificate generation

use std::path::PathBuf;

/// Errors raised while parsing arguments or producing certificate artifacts
#[derive(Debug, thiserror::Error)]
pub enum CertgenError {
    /// Invalid command line input
    #[error("Usage error: {0}")]
    Usage(String),
    /// IO failure without a known path
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// IO failure on a specific file or directory
    #[error("File operation failed on {path}: {source}")]
    FileOperation {
        /// Path the operation was applied to
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },
    /// Ed25519 key pair could not be generated
    #[error("Key generation failed: {0}")]
    KeyGeneration(String),
    /// Certificate signing request could not be built
    #[error("CSR generation failed: {0}")]
    CsrGeneration(String),
    /// Certificate could not be issued from the request
    #[error("Certificate signing failed: {0}")]
    Signing(String),
    /// PEM or DER input could not be decoded
    #[error("Certificate parsing failed: {0}")]
    CertificateParsing(String),
    /// External tool exited unsuccessfully
    #[error("{program} failed during {step} ({status}): {stderr}")]
    ExternalTool {
        /// Program that was run
        program: String,
        /// Pipeline step the invocation belonged to
        step: &'static str,
        /// Exit status as reported by the OS
        status: String,
        /// Trimmed standard error of the tool
        stderr: String,
    },
    /// External tool could not be started
    #[error("Cannot run {program}: {source}")]
    ToolUnavailable {
        /// Program that was looked up
        program: String,
        /// Spawn error
        #[source]
        source: std::io::Error,
    },
}

impl CertgenError {
    /// Wrap an IO error with the path it occurred on
    pub fn file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileOperation {
            path: path.into(),
            source,
        }
    }

    /// Whether this error came from invalid command line input
    #[must_use]
    pub fn is_usage(&self) -> bool {
        matches!(self, Self::Usage(_))
    }
}

/// Result type alias for certgen operations
pub type Result<T> = std::result::Result<T, CertgenError>;
