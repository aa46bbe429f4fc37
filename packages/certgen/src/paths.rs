//! Output path derivation
//!
//! Artifacts land in `<output>/ed25519-<primary>/<primary>.{key,csr,crt}`.

use std::path::{Path, PathBuf};

use certgen_common::LoggingTransformer;
use tokio::io::AsyncWriteExt;

use crate::error::{CertgenError, Result};
use crate::request::CertRequest;

/// Prefix of the per-domain output subdirectory
pub const DIRECTORY_PREFIX: &str = "ed25519-";

/// Paths of the three files produced for one request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedArtifacts {
    /// PEM encoded PKCS#8 private key
    pub private_key: PathBuf,
    /// PEM encoded PKCS#10 certificate signing request
    pub csr: PathBuf,
    /// PEM encoded X.509 certificate
    pub certificate: PathBuf,
}

impl GeneratedArtifacts {
    /// Derive artifact paths for a request without touching the filesystem
    #[must_use]
    pub fn for_request(request: &CertRequest) -> Self {
        let prefix = file_prefix(request.output_dir(), request.primary_domain());
        Self {
            private_key: with_extension(&prefix, "key"),
            csr: with_extension(&prefix, "csr"),
            certificate: with_extension(&prefix, "crt"),
        }
    }

    /// Directory holding all three artifacts
    #[must_use]
    pub fn directory(&self) -> &Path {
        self.certificate.parent().unwrap_or_else(|| Path::new("."))
    }

    /// Create the artifact directory and any missing ancestors
    ///
    /// Succeeds if the directory already exists.
    ///
    /// # Errors
    ///
    /// Returns [`CertgenError::FileOperation`] if the directory cannot be created.
    pub async fn create_directory(&self) -> Result<()> {
        let directory = self.directory();
        tokio::fs::create_dir_all(directory)
            .await
            .map_err(|e| CertgenError::file(directory, e))?;
        log::debug!("Output directory ready: {}", directory.display());
        Ok(())
    }
}

/// Subdirectory for a primary domain, e.g. `/tmp/ed25519-example.com`
#[must_use]
pub fn artifact_directory(output_dir: &Path, primary: &str) -> PathBuf {
    output_dir.join(format!("{DIRECTORY_PREFIX}{primary}"))
}

/// Common prefix of every artifact path, e.g. `/tmp/ed25519-example.com/example.com`
#[must_use]
pub fn file_prefix(output_dir: &Path, primary: &str) -> PathBuf {
    artifact_directory(output_dir, primary).join(primary)
}

// Appended rather than `set_extension`, which would replace the last label
// of a domain such as `example.com`.
fn with_extension(prefix: &Path, extension: &str) -> PathBuf {
    let mut path = prefix.as_os_str().to_owned();
    path.push(".");
    path.push(extension);
    PathBuf::from(path)
}

/// Write an artifact, logging its size
///
/// # Errors
///
/// Returns [`CertgenError::FileOperation`] if the write fails.
pub(crate) async fn write_artifact(kind: &str, path: &Path, contents: &str) -> Result<()> {
    tokio::fs::write(path, contents)
        .await
        .map_err(|e| CertgenError::file(path, e))?;
    LoggingTransformer::log_artifact_written(kind, path, contents.len());
    Ok(())
}

/// Write a private key that is never readable by anyone but the owner
///
/// A new file is created with mode 0600 on unix; an existing file is
/// truncated and restricted before the key is written into it.
///
/// # Errors
///
/// Returns [`CertgenError::FileOperation`] if the file cannot be opened,
/// restricted or written.
pub async fn write_private_key(path: &Path, key_pem: &str) -> Result<()> {
    let mut options = tokio::fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    options.mode(0o600);

    let mut file = options
        .open(path)
        .await
        .map_err(|e| CertgenError::file(path, e))?;
    restrict_permissions(path).await?;
    file.write_all(key_pem.as_bytes())
        .await
        .map_err(|e| CertgenError::file(path, e))?;
    file.flush().await.map_err(|e| CertgenError::file(path, e))?;

    LoggingTransformer::log_artifact_written("private key", path, key_pem.len());
    Ok(())
}

/// Restrict a private key file to its owner
///
/// # Errors
///
/// Returns [`CertgenError::FileOperation`] if permissions cannot be changed.
#[cfg(unix)]
pub(crate) async fn restrict_permissions(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let mut perms = tokio::fs::metadata(path)
        .await
        .map_err(|e| CertgenError::file(path, e))?
        .permissions();
    perms.set_mode(0o600);
    tokio::fs::set_permissions(path, perms)
        .await
        .map_err(|e| CertgenError::file(path, e))
}

#[cfg(not(unix))]
pub(crate) async fn restrict_permissions(_path: &Path) -> Result<()> {
    Ok(())
}
