//! OpenSSL-style configuration documents
//!
//! Both documents list every domain under `[ alt_names ]` as
//! `DNS.<n> = <domain>`, 1-indexed and in input order.

use std::fmt::Write as _;

use crate::domain::DomainSet;

/// Section name of the CSR extension block
pub const REQ_EXTENSIONS_SECTION: &str = "req_ext";

/// Section name listing the Subject Alternative Names
pub const ALT_NAMES_SECTION: &str = "alt_names";

/// The two rendered configuration texts for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigDocuments {
    /// Drives CSR generation: Common Name plus SAN extension request
    pub csr: String,
    /// Drives certificate signing: SAN extension only
    pub cert: String,
}

impl ConfigDocuments {
    /// Render both documents for a domain set
    #[must_use]
    pub fn render(domains: &DomainSet) -> Self {
        Self {
            csr: render_csr_config(domains),
            cert: render_cert_config(domains),
        }
    }
}

/// Render the CSR configuration (`csr.conf`)
#[must_use]
pub fn render_csr_config(domains: &DomainSet) -> String {
    let mut doc = String::new();
    doc.push_str("[ req ]\n");
    doc.push_str("prompt = no\n");
    doc.push_str("distinguished_name = dn\n");
    let _ = writeln!(doc, "req_extensions = {REQ_EXTENSIONS_SECTION}");
    doc.push('\n');
    doc.push_str("[ dn ]\n");
    let _ = writeln!(doc, "CN = {}", domains.primary());
    doc.push('\n');
    let _ = writeln!(doc, "[ {REQ_EXTENSIONS_SECTION} ]");
    let _ = writeln!(doc, "subjectAltName = @{ALT_NAMES_SECTION}");
    doc.push('\n');
    doc.push_str(&render_alt_names(domains));
    doc
}

/// Render the certificate signing configuration (`cert.conf`)
#[must_use]
pub fn render_cert_config(domains: &DomainSet) -> String {
    let mut doc = String::new();
    let _ = writeln!(doc, "subjectAltName = @{ALT_NAMES_SECTION}");
    doc.push('\n');
    doc.push_str(&render_alt_names(domains));
    doc
}

/// Render the `[ alt_names ]` section
#[must_use]
pub fn render_alt_names(domains: &DomainSet) -> String {
    let mut section = format!("[ {ALT_NAMES_SECTION} ]\n");
    for (index, domain) in domains.iter().enumerate() {
        let _ = writeln!(section, "DNS.{} = {domain}", index + 1);
    }
    section
}
