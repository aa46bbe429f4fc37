//! Configuration templating
//!
//! - `templates`: renders the CSR and certificate configuration documents
//! - `transient`: materializes them as scoped files in a working directory

pub mod templates;
pub mod transient;

pub use templates::{render_alt_names, render_cert_config, render_csr_config, ConfigDocuments};
pub use transient::{TransientConfigFiles, CERT_CONFIG_FILE, CSR_CONFIG_FILE};
