//! Certificate request assembled from command line input

use std::path::{Path, PathBuf, MAIN_SEPARATOR};

use crate::domain::DomainSet;
use crate::error::{CertgenError, Result};

/// Validity granted per requested year
pub const DAYS_PER_YEAR: u32 = 365;

/// Default validity in years
pub const DEFAULT_EXPIRY_YEARS: u32 = 10;

/// Default output directory
pub const DEFAULT_OUTPUT_DIR: &str = "./";

/// Everything needed to issue one certificate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CertRequest {
    domains: DomainSet,
    validity_days: u32,
    output_dir: PathBuf,
}

impl CertRequest {
    /// Create a request from parsed inputs
    ///
    /// # Errors
    ///
    /// Returns [`CertgenError::Usage`] if `expiry_years` is zero or the
    /// resulting number of days overflows.
    pub fn new(domains: DomainSet, expiry_years: u32, output_dir: &str) -> Result<Self> {
        Ok(Self {
            domains,
            validity_days: validity_days(expiry_years)?,
            output_dir: normalize_output_dir(output_dir),
        })
    }

    /// First domain of the list
    #[must_use]
    pub fn primary_domain(&self) -> &str {
        self.domains.primary()
    }

    /// All requested domains
    #[must_use]
    pub fn domains(&self) -> &DomainSet {
        &self.domains
    }

    /// Certificate lifetime in days
    #[must_use]
    pub fn validity_days(&self) -> u32 {
        self.validity_days
    }

    /// Normalized output directory, always ending with a separator
    #[must_use]
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }
}

/// Convert an expiry in years into days (`years * 365`)
///
/// # Errors
///
/// Returns [`CertgenError::Usage`] for zero years or on overflow.
pub fn validity_days(expiry_years: u32) -> Result<u32> {
    if expiry_years == 0 {
        return Err(CertgenError::Usage(
            "expiry must be at least one year".to_string(),
        ));
    }
    expiry_years
        .checked_mul(DAYS_PER_YEAR)
        .ok_or_else(|| CertgenError::Usage(format!("expiry of {expiry_years} years is too large")))
}

/// Make sure the output path ends with exactly one path separator
///
/// An empty path is treated as the current directory.
#[must_use]
pub fn normalize_output_dir(path: &str) -> PathBuf {
    if path.is_empty() {
        return PathBuf::from(DEFAULT_OUTPUT_DIR);
    }
    let trimmed = path.trim_end_matches(['/', MAIN_SEPARATOR]);
    if trimmed.is_empty() {
        // the filesystem root
        return PathBuf::from(MAIN_SEPARATOR.to_string());
    }
    PathBuf::from(format!("{trimmed}{MAIN_SEPARATOR}"))
}
