//! Cryptographic capability providers
//!
//! A backend performs the three issuing steps (Ed25519 key, CSR, self-signed
//! certificate) and decodes the issued certificate for the report:
//! - `native`: in-process, built on `rcgen` and `x509-parser`
//! - `openssl`: shells out to the `openssl` command line tool

pub mod native;
pub mod openssl;

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::config::ConfigDocuments;
use crate::error::Result;
use crate::paths::GeneratedArtifacts;
use crate::request::CertRequest;

pub use native::NativeBackend;
pub use openssl::OpensslBackend;

/// Provider of key generation, CSR creation, signing and decoding
#[async_trait]
pub trait CryptoBackend: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Produce the private key, CSR and certificate for `request`
    ///
    /// Steps run in order and stop at the first failure; artifacts written
    /// by earlier steps stay on disk. `documents` are only materialized by
    /// backends that drive an external tool; the native backend ignores them.
    async fn issue(
        &self,
        request: &CertRequest,
        documents: &ConfigDocuments,
        artifacts: &GeneratedArtifacts,
    ) -> Result<()>;

    /// Human-readable decode of an issued certificate
    async fn describe(&self, certificate: &Path) -> Result<String>;
}

/// Backend selectable from the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum BackendKind {
    /// In-process generation, no external tools
    #[default]
    Native,
    /// Delegate to the `openssl` binary
    Openssl,
}

impl BackendKind {
    /// Instantiate the backend
    ///
    /// `openssl_program` and `work_dir` only apply to [`BackendKind::Openssl`].
    #[must_use]
    pub fn build(self, openssl_program: &str, work_dir: PathBuf) -> Box<dyn CryptoBackend> {
        match self {
            Self::Native => Box::new(NativeBackend::new()),
            Self::Openssl => Box::new(OpensslBackend::new(openssl_program, work_dir)),
        }
    }
}
