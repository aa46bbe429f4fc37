//! Domain list handling
//!
//! A [`DomainSet`] is the ordered, non-empty list of names a certificate is
//! issued for. The first entry is the primary domain and becomes the Common
//! Name; every entry (primary included) becomes a DNS Subject Alternative Name.

use std::fmt;

use crate::error::{CertgenError, Result};

/// Ordered, non-empty sequence of domain names
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainSet {
    domains: Vec<String>,
}

impl DomainSet {
    /// Parse a comma-separated domain list
    ///
    /// Tokens are kept verbatim, in input order, without de-duplication.
    ///
    /// # Errors
    ///
    /// Returns [`CertgenError::Usage`] if the list or any token is empty.
    pub fn parse(list: &str) -> Result<Self> {
        Self::new(list.split(',').map(str::to_string).collect())
    }

    /// Build a domain set from already separated names
    ///
    /// # Errors
    ///
    /// Returns [`CertgenError::Usage`] if there are no names or a name is empty.
    pub fn new(domains: Vec<String>) -> Result<Self> {
        if domains.is_empty() {
            return Err(CertgenError::Usage("domain list is empty".to_string()));
        }
        if let Some(position) = domains.iter().position(String::is_empty) {
            return Err(CertgenError::Usage(format!(
                "domain #{} in the list is empty",
                position + 1
            )));
        }
        Ok(Self { domains })
    }

    /// The primary domain, used as Common Name and for file naming
    #[must_use]
    pub fn primary(&self) -> &str {
        // non-empty by construction
        &self.domains[0]
    }

    /// All domains, primary first
    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.domains
    }

    /// Iterate over all domains in input order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.domains.iter().map(String::as_str)
    }

    /// Number of domains
    #[must_use]
    pub fn len(&self) -> usize {
        self.domains.len()
    }

    /// Always false; kept for API symmetry with `len`
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }
}

impl fmt::Display for DomainSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.domains.join(","))
    }
}
