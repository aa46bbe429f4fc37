//! End-to-end generation pipeline
//!
//! derive paths -> render configs -> issue -> report, strictly in order.

use std::io::Write;

use crate::backend::CryptoBackend;
use crate::config::ConfigDocuments;
use crate::error::Result;
use crate::paths::GeneratedArtifacts;
use crate::report::Reporter;
use crate::request::CertRequest;

/// Issue the certificate for `request` and write the report to `out`
///
/// # Errors
///
/// Fails on the first error from directory creation, the backend or the
/// report writer. Artifacts already written are left in place.
pub async fn run<W: Write>(
    request: &CertRequest,
    backend: &dyn CryptoBackend,
    out: W,
) -> Result<GeneratedArtifacts> {
    let artifacts = GeneratedArtifacts::for_request(request);
    artifacts.create_directory().await?;

    let documents = ConfigDocuments::render(request.domains());
    backend.issue(request, &documents, &artifacts).await?;
    log::info!(
        "Issued certificate for {} ({} days, backend: {})",
        request.domains(),
        request.validity_days(),
        backend.name()
    );

    let mut reporter = Reporter::new(out);
    reporter.artifacts(&artifacts)?;
    reporter.nginx_hint(&artifacts)?;
    let dump = backend.describe(&artifacts.certificate).await?;
    reporter.certificate_dump(&dump)?;

    Ok(artifacts)
}
