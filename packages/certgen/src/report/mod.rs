//! Run report
//!
//! Prints the artifact paths, an Nginx snippet referencing them and the
//! backend's decode of the issued certificate.

pub mod inspect;

use std::io::Write;

use crate::error::Result;
use crate::paths::GeneratedArtifacts;

pub use inspect::{
    describe_certificate, summarize_certificate, summarize_csr, CertificateSummary, CsrSummary,
};

/// Writes the human-facing report of a run
pub struct Reporter<W: Write> {
    out: W,
}

impl<W: Write> Reporter<W> {
    /// Report into `out`
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Print the three artifact paths
    pub fn artifacts(&mut self, artifacts: &GeneratedArtifacts) -> Result<()> {
        writeln!(self.out, "Generated files:")?;
        writeln!(self.out, "  Private key: {}", artifacts.private_key.display())?;
        writeln!(self.out, "  CSR:         {}", artifacts.csr.display())?;
        writeln!(self.out, "  Certificate: {}", artifacts.certificate.display())?;
        writeln!(self.out)?;
        Ok(())
    }

    /// Print the Nginx `ssl_certificate` / `ssl_certificate_key` lines
    pub fn nginx_hint(&mut self, artifacts: &GeneratedArtifacts) -> Result<()> {
        writeln!(self.out, "Nginx configuration:")?;
        write!(self.out, "{}", nginx_snippet(artifacts))?;
        writeln!(self.out)?;
        Ok(())
    }

    /// Print the certificate decode produced by the backend
    pub fn certificate_dump(&mut self, dump: &str) -> Result<()> {
        writeln!(self.out, "Certificate details:")?;
        write!(self.out, "{dump}")?;
        if !dump.ends_with('\n') {
            writeln!(self.out)?;
        }
        self.out.flush()?;
        Ok(())
    }

    /// Recover the underlying writer
    pub fn into_inner(self) -> W {
        self.out
    }
}

/// Nginx directives pointing at the generated certificate and key
#[must_use]
pub fn nginx_snippet(artifacts: &GeneratedArtifacts) -> String {
    format!(
        "    ssl_certificate     {};\n    ssl_certificate_key {};\n",
        artifacts.certificate.display(),
        artifacts.private_key.display()
    )
}
