//! Backend delegating to the `openssl` command line tool
//!
//! The CSR and certificate steps read `csr.conf` / `cert.conf` from the
//! working directory; the files exist only for the duration of `issue`.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use certgen_common::LoggingTransformer;
use tokio::process::Command;

use super::CryptoBackend;
use crate::config::{ConfigDocuments, TransientConfigFiles};
use crate::error::{CertgenError, Result};
use crate::paths::{restrict_permissions, GeneratedArtifacts};
use crate::request::CertRequest;

/// Default program name, resolved through `PATH`
pub const DEFAULT_OPENSSL: &str = "openssl";

/// Backend running `openssl genpkey`, `req` and `x509`
#[derive(Debug, Clone)]
pub struct OpensslBackend {
    program: String,
    work_dir: PathBuf,
}

impl OpensslBackend {
    /// Use `program` as the openssl binary and `work_dir` for config files
    #[must_use]
    pub fn new(program: &str, work_dir: PathBuf) -> Self {
        Self {
            program: program.to_string(),
            work_dir,
        }
    }

    /// Directory receiving the transient config files
    #[must_use]
    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    /// Run one openssl invocation and return its stdout
    async fn run(&self, step: &'static str, args: Vec<OsString>) -> Result<String> {
        LoggingTransformer::log_tool_invocation(
            &self.program,
            &args
                .iter()
                .map(|a| a.to_string_lossy().into_owned())
                .collect::<Vec<_>>(),
        );

        let output = Command::new(&self.program)
            .args(&args)
            .output()
            .await
            .map_err(|source| CertgenError::ToolUnavailable {
                program: self.program.clone(),
                source,
            })?;

        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
        if !output.status.success() {
            LoggingTransformer::log_tool_failure(&self.program, step, output.status.code());
            // surface the tool's own diagnostics
            eprint!("{stderr}");
            return Err(CertgenError::ExternalTool {
                program: self.program.clone(),
                step,
                status: output.status.to_string(),
                stderr: stderr.trim().to_string(),
            });
        }
        if !stderr.trim().is_empty() {
            log::debug!("{} ({step}): {}", self.program, stderr.trim());
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[async_trait]
impl CryptoBackend for OpensslBackend {
    fn name(&self) -> &'static str {
        "openssl"
    }

    async fn issue(
        &self,
        request: &CertRequest,
        documents: &ConfigDocuments,
        artifacts: &GeneratedArtifacts,
    ) -> Result<()> {
        let configs = TransientConfigFiles::write(&self.work_dir, documents).await?;

        LoggingTransformer::log_step("generate Ed25519 private key", self.name());
        self.run("private key generation", genpkey_args(&artifacts.private_key))
            .await?;
        restrict_permissions(&artifacts.private_key).await?;

        LoggingTransformer::log_step("generate certificate signing request", self.name());
        self.run(
            "CSR generation",
            req_args(&artifacts.private_key, &artifacts.csr, configs.csr_path()),
        )
        .await?;

        LoggingTransformer::log_step("self-sign certificate", self.name());
        self.run(
            "certificate signing",
            x509_sign_args(
                &artifacts.csr,
                &artifacts.private_key,
                &artifacts.certificate,
                request.validity_days(),
                configs.cert_path(),
            ),
        )
        .await?;

        drop(configs);
        Ok(())
    }

    async fn describe(&self, certificate: &Path) -> Result<String> {
        self.run("certificate inspection", x509_text_args(certificate))
            .await
    }
}

/// `openssl genpkey -algorithm ED25519 -out <key>`
#[must_use]
pub fn genpkey_args(key: &Path) -> Vec<OsString> {
    vec![
        "genpkey".into(),
        "-algorithm".into(),
        "ED25519".into(),
        "-out".into(),
        key.into(),
    ]
}

/// `openssl req -new -key <key> -out <csr> -config <csr.conf>`
#[must_use]
pub fn req_args(key: &Path, csr: &Path, csr_config: &Path) -> Vec<OsString> {
    vec![
        "req".into(),
        "-new".into(),
        "-key".into(),
        key.into(),
        "-out".into(),
        csr.into(),
        "-config".into(),
        csr_config.into(),
    ]
}

/// `openssl x509 -req -in <csr> -signkey <key> -out <crt> -days <n> -extfile <cert.conf>`
#[must_use]
pub fn x509_sign_args(
    csr: &Path,
    key: &Path,
    certificate: &Path,
    validity_days: u32,
    cert_config: &Path,
) -> Vec<OsString> {
    vec![
        "x509".into(),
        "-req".into(),
        "-in".into(),
        csr.into(),
        "-signkey".into(),
        key.into(),
        "-out".into(),
        certificate.into(),
        "-days".into(),
        validity_days.to_string().into(),
        "-extfile".into(),
        cert_config.into(),
    ]
}

/// `openssl x509 -in <crt> -text -noout`
#[must_use]
pub fn x509_text_args(certificate: &Path) -> Vec<OsString> {
    vec![
        "x509".into(),
        "-in".into(),
        certificate.into(),
        "-text".into(),
        "-noout".into(),
    ]
}
