//! In-process backend built on `rcgen`
//!
//! Each step reads the previous step's output from disk, so the artifacts
//! on disk are the only state carried between steps.

use std::path::Path;

use async_trait::async_trait;
use certgen_common::LoggingTransformer;
use rcgen::{
    CertificateParams, CertificateSigningRequestParams, DistinguishedName, DnType, Issuer,
    KeyPair, SanType, PKCS_ED25519,
};
use time::OffsetDateTime;

use super::CryptoBackend;
use crate::config::ConfigDocuments;
use crate::domain::DomainSet;
use crate::error::{CertgenError, Result};
use crate::paths::{write_artifact, write_private_key, GeneratedArtifacts};
use crate::report::inspect;
use crate::request::CertRequest;

/// Last year an X.509 GeneralizedTime can express
pub const MAX_VALIDITY_YEAR: i32 = 9999;

/// Backend that generates everything in-process
#[derive(Debug, Clone, Default)]
pub struct NativeBackend;

impl NativeBackend {
    /// Create the backend
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CryptoBackend for NativeBackend {
    fn name(&self) -> &'static str {
        "native"
    }

    async fn issue(
        &self,
        request: &CertRequest,
        _documents: &ConfigDocuments,
        artifacts: &GeneratedArtifacts,
    ) -> Result<()> {
        // reject an unrepresentable validity before anything is written
        validity_window(request.validity_days())?;

        LoggingTransformer::log_step("generate Ed25519 private key", self.name());
        let key_pem = generate_private_key_pem()?;
        write_private_key(&artifacts.private_key, &key_pem).await?;

        LoggingTransformer::log_step("generate certificate signing request", self.name());
        let key_pem = read_pem(&artifacts.private_key).await?;
        let csr_pem = build_csr_pem(request.domains(), &key_pem)?;
        write_artifact("CSR", &artifacts.csr, &csr_pem).await?;

        LoggingTransformer::log_step("self-sign certificate", self.name());
        let csr_pem = read_pem(&artifacts.csr).await?;
        let cert_pem = self_sign_pem(
            request.domains(),
            &csr_pem,
            &key_pem,
            request.validity_days(),
        )?;
        write_artifact("certificate", &artifacts.certificate, &cert_pem).await
    }

    async fn describe(&self, certificate: &Path) -> Result<String> {
        let pem = read_pem(certificate).await?;
        inspect::describe_certificate(&pem)
    }
}

/// Generate a fresh Ed25519 key pair and return its PKCS#8 PEM encoding
///
/// # Errors
///
/// Returns [`CertgenError::KeyGeneration`] if the crypto provider fails.
pub fn generate_private_key_pem() -> Result<String> {
    let key_pair = KeyPair::generate_for(&PKCS_ED25519).map_err(|e| {
        LoggingTransformer::log_crypto_error("Ed25519 key generation", &e);
        CertgenError::KeyGeneration(e.to_string())
    })?;
    Ok(key_pair.serialize_pem())
}

/// Build a PEM encoded PKCS#10 request with CN = primary and a SAN per domain
///
/// # Errors
///
/// Returns [`CertgenError::CsrGeneration`] if the key cannot be loaded, a
/// domain is not a valid IA5 string, or serialization fails.
pub fn build_csr_pem(domains: &DomainSet, key_pem: &str) -> Result<String> {
    let key_pair = load_key_pair(key_pem).map_err(CertgenError::CsrGeneration)?;

    let mut params = CertificateParams::default();
    params.distinguished_name = common_name(domains.primary());
    params.subject_alt_names = dns_names(domains).map_err(CertgenError::CsrGeneration)?;

    let csr = params.serialize_request(&key_pair).map_err(|e| {
        LoggingTransformer::log_crypto_error("CSR serialization", &e);
        CertgenError::CsrGeneration(e.to_string())
    })?;
    csr.pem()
        .map_err(|e| CertgenError::CsrGeneration(format!("Failed to encode CSR: {e}")))
}

/// Issue a certificate for the CSR, signed by the CSR's own key
///
/// The certificate is valid from now for `validity_days` days and carries
/// the SAN extension for every domain.
///
/// # Errors
///
/// Returns [`CertgenError::Signing`] if the CSR or key cannot be parsed, the
/// validity ends after [`MAX_VALIDITY_YEAR`], or signing fails.
pub fn self_sign_pem(
    domains: &DomainSet,
    csr_pem: &str,
    key_pem: &str,
    validity_days: u32,
) -> Result<String> {
    let key_pair = load_key_pair(key_pem).map_err(CertgenError::Signing)?;

    let mut csr = CertificateSigningRequestParams::from_pem(csr_pem)
        .map_err(|e| CertgenError::Signing(format!("Failed to parse CSR: {e}")))?;
    csr.params.subject_alt_names = dns_names(domains).map_err(CertgenError::Signing)?;
    let (not_before, not_after) = validity_window(validity_days)?;
    csr.params.not_before = not_before;
    csr.params.not_after = not_after;

    let mut issuer_params = CertificateParams::default();
    issuer_params.distinguished_name = common_name(domains.primary());
    let issuer = Issuer::new(issuer_params, key_pair);

    let cert = csr.signed_by(&issuer).map_err(|e| {
        LoggingTransformer::log_crypto_error("self-signing", &e);
        CertgenError::Signing(e.to_string())
    })?;
    Ok(cert.pem())
}

fn load_key_pair(key_pem: &str) -> std::result::Result<KeyPair, String> {
    KeyPair::from_pem(key_pem).map_err(|e| format!("Failed to load private key: {e}"))
}

fn common_name(primary: &str) -> DistinguishedName {
    let mut distinguished_name = DistinguishedName::new();
    distinguished_name.push(DnType::CommonName, primary);
    distinguished_name
}

fn dns_names(domains: &DomainSet) -> std::result::Result<Vec<SanType>, String> {
    domains
        .iter()
        .map(|domain| {
            domain
                .try_into()
                .map(SanType::DnsName)
                .map_err(|e| invalid_dns_name(domain, e))
        })
        .collect()
}

fn invalid_dns_name(domain: &str, e: rcgen::Error) -> String {
    format!("Invalid DNS name '{domain}': {e}")
}

/// Validity period starting now and lasting `validity_days` days
///
/// # Errors
///
/// Returns [`CertgenError::Signing`] if the end lies after [`MAX_VALIDITY_YEAR`].
pub fn validity_window(validity_days: u32) -> Result<(OffsetDateTime, OffsetDateTime)> {
    let not_before = OffsetDateTime::now_utc();
    let not_after = not_before
        .checked_add(time::Duration::days(i64::from(validity_days)))
        .filter(|end| end.year() <= MAX_VALIDITY_YEAR)
        .ok_or_else(|| {
            CertgenError::Signing(format!(
                "validity of {validity_days} days ends after year {MAX_VALIDITY_YEAR}"
            ))
        })?;
    Ok((not_before, not_after))
}

async fn read_pem(path: &Path) -> Result<String> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|e| CertgenError::file(path, e))
}
