//! Command line interface

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};

use crate::backend::openssl::DEFAULT_OPENSSL;
use crate::backend::BackendKind;
use crate::domain::DomainSet;
use crate::error::{CertgenError, Result};
use crate::request::{CertRequest, DEFAULT_EXPIRY_YEARS, DEFAULT_OUTPUT_DIR};

/// Exit status for invalid or missing arguments
pub const USAGE_EXIT_CODE: u8 = 1;

/// Parsed command line arguments
#[derive(Debug, Parser)]
#[command(name = "ed25519-certgen", version)]
#[command(about = "Generate a self-signed Ed25519 TLS certificate with Nginx hints")]
pub struct Cli {
    /// Comma-separated domain names; the first one becomes the Common Name
    #[arg(short = 'd', long = "domains", value_name = "DOMAINS")]
    pub domains: String,

    /// Certificate validity in years (365 days each)
    #[arg(
        short = 'e',
        long = "expiry",
        value_name = "YEARS",
        default_value_t = DEFAULT_EXPIRY_YEARS,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub expiry_years: u32,

    /// Directory receiving the ed25519-<domain> folder
    #[arg(short = 'p', long = "path", value_name = "DIR", default_value = DEFAULT_OUTPUT_DIR)]
    pub output_dir: String,

    /// Cryptographic backend
    #[arg(short = 'b', long, value_enum, default_value_t = BackendKind::Native)]
    pub backend: BackendKind,

    /// openssl binary used by the openssl backend
    #[arg(long = "openssl", value_name = "PROGRAM", default_value = DEFAULT_OPENSSL)]
    pub openssl: String,
}

impl Cli {
    /// Validate the arguments into a certificate request
    ///
    /// # Errors
    ///
    /// Returns [`CertgenError::Usage`] for an empty domain token or a
    /// validity that does not fit in days.
    pub fn to_request(&self) -> Result<CertRequest> {
        let domains = DomainSet::parse(&self.domains)?;
        CertRequest::new(domains, self.expiry_years, &self.output_dir)
    }

    /// Usage line shown after argument errors
    #[must_use]
    pub fn usage() -> String {
        Cli::command().render_usage().to_string()
    }
}

/// Exit status for a clap parse outcome: 0 for help/version, 1 otherwise
#[must_use]
pub fn exit_code_for(kind: ErrorKind) -> u8 {
    match kind {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
        _ => USAGE_EXIT_CODE,
    }
}

/// Render a usage error the way clap renders its own
#[must_use]
pub fn usage_message(error: &CertgenError) -> String {
    format!("error: {error}\n\n{}\n\nFor more information, try '--help'.", Cli::usage())
}
