//! Certificate and CSR decoding
//!
//! `describe_certificate` renders a text dump in the layout of
//! `openssl x509 -text -noout`; the summaries expose the fields the
//! pipeline and its tests care about.

use std::fmt::Write as _;
use std::net::{Ipv4Addr, Ipv6Addr};

use certgen_common::{colon_hex, sha256_fingerprint};
use x509_parser::pem::{parse_x509_pem, Pem};
use x509_parser::prelude::*;

use crate::error::{CertgenError, Result};

const SECONDS_PER_DAY: i64 = 86_400;

/// Decoded view of an issued certificate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CertificateSummary {
    /// Subject name in `CN=...` form
    pub subject: String,
    /// Issuer name in `CN=...` form
    pub issuer: String,
    /// First Common Name of the subject, if any
    pub common_name: Option<String>,
    /// DNS entries of the Subject Alternative Name extension, in order
    pub dns_names: Vec<String>,
    /// Unix timestamp of `notBefore`
    pub not_before: i64,
    /// Unix timestamp of `notAfter`
    pub not_after: i64,
    /// Subject public key algorithm, e.g. `ED25519`
    pub public_key_algorithm: String,
    /// Signature algorithm, e.g. `ED25519`
    pub signature_algorithm: String,
    /// Serial number as colon hex
    pub serial: String,
    /// SHA-256 of the DER encoding as upper-case colon hex
    pub fingerprint_sha256: String,
}

impl CertificateSummary {
    /// Length of the validity window in whole days
    #[must_use]
    pub fn validity_days(&self) -> i64 {
        (self.not_after - self.not_before) / SECONDS_PER_DAY
    }

    /// Whether subject and issuer are the same name
    #[must_use]
    pub fn is_self_issued(&self) -> bool {
        self.subject == self.issuer
    }
}

/// Decoded view of a certificate signing request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsrSummary {
    /// Requested subject name
    pub subject: String,
    /// First Common Name of the subject, if any
    pub common_name: Option<String>,
    /// DNS names from the extension request, in order
    pub dns_names: Vec<String>,
    /// Algorithm of the embedded public key
    pub public_key_algorithm: String,
}

/// Summarize a PEM encoded certificate
///
/// # Errors
///
/// Returns [`CertgenError::CertificateParsing`] if the PEM or DER is invalid.
pub fn summarize_certificate(pem: &str) -> Result<CertificateSummary> {
    let pem = decode_pem(pem)?;
    let (_, cert) = parse_x509_certificate(&pem.contents)
        .map_err(|e| CertgenError::CertificateParsing(format!("X.509 parsing failed: {e}")))?;

    let dns_names = cert
        .extensions()
        .iter()
        .flat_map(|ext| match ext.parsed_extension() {
            ParsedExtension::SubjectAlternativeName(san) => dns_entries(&san.general_names),
            _ => Vec::new(),
        })
        .collect();

    Ok(CertificateSummary {
        subject: cert.subject().to_string(),
        issuer: cert.issuer().to_string(),
        common_name: common_name(cert.subject()),
        dns_names,
        not_before: cert.validity().not_before.timestamp(),
        not_after: cert.validity().not_after.timestamp(),
        public_key_algorithm: algorithm_name(&cert.public_key().algorithm.algorithm.to_id_string()),
        signature_algorithm: algorithm_name(&cert.signature_algorithm.algorithm.to_id_string()),
        serial: colon_hex(cert.tbs_certificate.raw_serial()),
        fingerprint_sha256: sha256_fingerprint(&pem.contents),
    })
}

/// Summarize a PEM encoded PKCS#10 request
///
/// # Errors
///
/// Returns [`CertgenError::CertificateParsing`] if the PEM or DER is invalid.
pub fn summarize_csr(pem: &str) -> Result<CsrSummary> {
    let pem = decode_pem(pem)?;
    let (_, csr) = X509CertificationRequest::from_der(&pem.contents)
        .map_err(|e| CertgenError::CertificateParsing(format!("CSR parsing failed: {e}")))?;
    let info = &csr.certification_request_info;

    let mut dns_names = Vec::new();
    if let Some(extensions) = csr.requested_extensions() {
        for extension in extensions {
            if let ParsedExtension::SubjectAlternativeName(san) = extension {
                dns_names.extend(dns_entries(&san.general_names));
            }
        }
    }

    Ok(CsrSummary {
        subject: info.subject.to_string(),
        common_name: common_name(&info.subject),
        dns_names,
        public_key_algorithm: algorithm_name(&info.subject_pki.algorithm.algorithm.to_id_string()),
    })
}

/// Render a human-readable dump of a PEM encoded certificate
///
/// # Errors
///
/// Returns [`CertgenError::CertificateParsing`] if the PEM or DER is invalid.
pub fn describe_certificate(pem: &str) -> Result<String> {
    let pem = decode_pem(pem)?;
    let (_, cert) = parse_x509_certificate(&pem.contents)
        .map_err(|e| CertgenError::CertificateParsing(format!("X.509 parsing failed: {e}")))?;

    let mut out = String::new();
    let version = cert.version().0;
    out.push_str("Certificate:\n");
    out.push_str("    Data:\n");
    let _ = writeln!(out, "        Version: {} (0x{version:x})", version + 1);
    out.push_str("        Serial Number:\n");
    let _ = writeln!(out, "            {}", colon_hex(cert.tbs_certificate.raw_serial()));
    let _ = writeln!(
        out,
        "        Signature Algorithm: {}",
        algorithm_name(&cert.signature_algorithm.algorithm.to_id_string())
    );
    let _ = writeln!(out, "        Issuer: {}", cert.issuer());
    out.push_str("        Validity\n");
    let _ = writeln!(out, "            Not Before: {}", cert.validity().not_before);
    let _ = writeln!(out, "            Not After : {}", cert.validity().not_after);
    let _ = writeln!(out, "        Subject: {}", cert.subject());
    out.push_str("        Subject Public Key Info:\n");
    let spki = cert.public_key();
    let _ = writeln!(
        out,
        "            Public Key Algorithm: {}",
        algorithm_name(&spki.algorithm.algorithm.to_id_string())
    );
    out.push_str("                pub:\n");
    hex_block(&mut out, &spki.subject_public_key.data, 15, 20);

    if !cert.extensions().is_empty() {
        out.push_str("        X509v3 extensions:\n");
        for ext in cert.extensions() {
            let critical = if ext.critical { " critical" } else { "" };
            let _ = writeln!(
                out,
                "            {}:{critical}",
                extension_name(&ext.oid.to_id_string())
            );
            let _ = writeln!(out, "                {}", extension_value(ext));
        }
    }

    let _ = writeln!(
        out,
        "    Signature Algorithm: {}",
        algorithm_name(&cert.signature_algorithm.algorithm.to_id_string())
    );
    out.push_str("    Signature Value:\n");
    hex_block(&mut out, &cert.signature_value.data, 18, 8);
    let _ = writeln!(out, "SHA256 Fingerprint={}", sha256_fingerprint(&pem.contents));
    Ok(out)
}

fn decode_pem(pem: &str) -> Result<Pem> {
    let (_, pem) = parse_x509_pem(pem.as_bytes())
        .map_err(|e| CertgenError::CertificateParsing(format!("Failed to parse PEM: {e}")))?;
    Ok(pem)
}

fn common_name(name: &X509Name<'_>) -> Option<String> {
    name.iter_common_name()
        .next()
        .and_then(|cn| cn.as_str().ok())
        .map(str::to_string)
}

fn dns_entries(names: &[GeneralName<'_>]) -> Vec<String> {
    names
        .iter()
        .filter_map(|name| match name {
            GeneralName::DNSName(dns) => Some((*dns).to_string()),
            _ => None,
        })
        .collect()
}

fn extension_value(ext: &X509Extension<'_>) -> String {
    match ext.parsed_extension() {
        ParsedExtension::SubjectAlternativeName(san) => san
            .general_names
            .iter()
            .map(general_name)
            .collect::<Vec<_>>()
            .join(", "),
        ParsedExtension::BasicConstraints(bc) => match (bc.ca, bc.path_len_constraint) {
            (true, Some(len)) => format!("CA:TRUE, pathlen:{len}"),
            (true, None) => "CA:TRUE".to_string(),
            (false, _) => "CA:FALSE".to_string(),
        },
        ParsedExtension::SubjectKeyIdentifier(id) => colon_hex(id.0).to_uppercase(),
        ParsedExtension::AuthorityKeyIdentifier(aki) => aki
            .key_identifier
            .as_ref()
            .map(|id| colon_hex(id.0).to_uppercase())
            .unwrap_or_default(),
        _ => colon_hex(ext.value),
    }
}

fn general_name(name: &GeneralName<'_>) -> String {
    match name {
        GeneralName::DNSName(dns) => format!("DNS:{dns}"),
        GeneralName::IPAddress(bytes) => match bytes.len() {
            4 => {
                let octets: [u8; 4] = [bytes[0], bytes[1], bytes[2], bytes[3]];
                format!("IP Address:{}", Ipv4Addr::from(octets))
            }
            16 => {
                let mut octets = [0u8; 16];
                octets.copy_from_slice(bytes);
                format!("IP Address:{}", Ipv6Addr::from(octets))
            }
            _ => format!("IP Address:{}", colon_hex(bytes)),
        },
        GeneralName::RFC822Name(email) => format!("email:{email}"),
        GeneralName::URI(uri) => format!("URI:{uri}"),
        other => format!("{other:?}"),
    }
}

fn algorithm_name(oid: &str) -> String {
    match oid {
        "1.3.101.112" => "ED25519",
        "1.3.101.113" => "ED448",
        "1.2.840.113549.1.1.1" => "rsaEncryption",
        "1.2.840.113549.1.1.11" => "sha256WithRSAEncryption",
        "1.2.840.10045.2.1" => "id-ecPublicKey",
        "1.2.840.10045.4.3.2" => "ecdsa-with-SHA256",
        "1.2.840.10045.4.3.3" => "ecdsa-with-SHA384",
        other => other,
    }
    .to_string()
}

fn extension_name(oid: &str) -> String {
    match oid {
        "2.5.29.14" => "X509v3 Subject Key Identifier",
        "2.5.29.15" => "X509v3 Key Usage",
        "2.5.29.17" => "X509v3 Subject Alternative Name",
        "2.5.29.19" => "X509v3 Basic Constraints",
        "2.5.29.35" => "X509v3 Authority Key Identifier",
        "2.5.29.37" => "X509v3 Extended Key Usage",
        other => other,
    }
    .to_string()
}

fn hex_block(out: &mut String, bytes: &[u8], per_line: usize, indent: usize) {
    let lines: Vec<&[u8]> = bytes.chunks(per_line).collect();
    let last = lines.len().saturating_sub(1);
    for (index, line) in lines.iter().enumerate() {
        let separator = if index == last { "" } else { ":" };
        let _ = writeln!(out, "{:indent$}{}{separator}", "", colon_hex(line));
    }
}
