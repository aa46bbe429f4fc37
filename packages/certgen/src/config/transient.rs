//! Transient configuration files
//!
//! The files are written under fixed names into a working directory,
//! overwriting what is there, and removed when the guard is dropped.
//! Two runs sharing a working directory race on these names.

use std::path::{Path, PathBuf};

use certgen_common::LoggingTransformer;

use super::templates::ConfigDocuments;
use crate::error::Result;
use crate::paths::write_artifact;

/// File name of the CSR configuration
pub const CSR_CONFIG_FILE: &str = "csr.conf";

/// File name of the certificate configuration
pub const CERT_CONFIG_FILE: &str = "cert.conf";

/// Owner of the on-disk configuration files for one run
#[derive(Debug)]
pub struct TransientConfigFiles {
    csr: PathBuf,
    cert: PathBuf,
}

impl TransientConfigFiles {
    /// Write both documents into `work_dir`
    ///
    /// # Errors
    ///
    /// Returns an error if either file cannot be written. A file written
    /// before the failure is still removed.
    pub async fn write(work_dir: &Path, documents: &ConfigDocuments) -> Result<Self> {
        let files = Self {
            csr: work_dir.join(CSR_CONFIG_FILE),
            cert: work_dir.join(CERT_CONFIG_FILE),
        };
        write_artifact("CSR config", &files.csr, &documents.csr).await?;
        write_artifact("certificate config", &files.cert, &documents.cert).await?;
        Ok(files)
    }

    /// Path of `csr.conf`
    #[must_use]
    pub fn csr_path(&self) -> &Path {
        &self.csr
    }

    /// Path of `cert.conf`
    #[must_use]
    pub fn cert_path(&self) -> &Path {
        &self.cert
    }
}

impl Drop for TransientConfigFiles {
    fn drop(&mut self) {
        for path in [&self.csr, &self.cert] {
            match std::fs::remove_file(path) {
                Ok(()) => log::debug!("Removed {}", path.display()),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => LoggingTransformer::log_cleanup_warning(path, &e),
            }
        }
    }
}
