//! Self-signed Ed25519 TLS certificate generation
//!
//! Parses a comma-separated domain list, derives the output layout
//! `<dir>/ed25519-<primary>/<primary>.{key,csr,crt}`, issues an Ed25519 key,
//! a PKCS#10 request and a self-signed X.509 certificate carrying every domain
//! as a DNS Subject Alternative Name, then prints Nginx hints and a decode of
//! the certificate.
//!
//! ```no_run
//! use certgen::{backend::NativeBackend, pipeline, CertRequest, DomainSet};
//!
//! # async fn demo() -> certgen::Result<()> {
//! let domains = DomainSet::parse("example.com,www.example.com")?;
//! let request = CertRequest::new(domains, 1, "/tmp")?;
//! pipeline::run(&request, &NativeBackend::new(), std::io::stdout()).await?;
//! # Ok(())
//! # }
//! ```

pub mod backend;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod paths;
pub mod pipeline;
pub mod report;
pub mod request;

pub use backend::{BackendKind, CryptoBackend};
pub use domain::DomainSet;
pub use error::{CertgenError, Result};
pub use paths::GeneratedArtifacts;
pub use request::CertRequest;
