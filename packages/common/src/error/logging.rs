//! Structured logging infrastructure
//!
//! Provides env_logger-based logging with consistent event formatting
//! and proper integration with the standard log crate.

use log::{debug, error, info, warn};
use std::path::Path;
use std::sync::Once;

static INIT_LOGGER: Once = Once::new();

/// Logging infrastructure using `env_logger`
pub struct LoggingTransformer;

impl LoggingTransformer {
    /// Initialize logging system (should be called once at application startup)
    ///
    /// Configure logging levels via `RUST_LOG` environment variable:
    /// - `RUST_LOG=debug` - Enable all debug logs
    /// - `RUST_LOG=info` - Pipeline steps and written artifacts
    /// - `RUST_LOG=certgen=debug` - Module-specific levels
    ///
    /// Defaults to `warn` so the report on stdout stays readable.
    pub fn init() {
        INIT_LOGGER.call_once(|| {
            env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
                .format_timestamp_micros()
                .init();

            debug!("Structured logging initialized");
        });
    }

    /// Initialize logging for test environments
    ///
    /// Use this in tests to avoid initialization conflicts
    pub fn init_test() {
        let _ = env_logger::Builder::from_default_env()
            .is_test(true)
            .try_init();
    }

    /// Log the start of a pipeline step
    pub fn log_step(step: &str, backend: &str) {
        info!("Step: {step} (backend: {backend})");
    }

    /// Log a file written by the pipeline
    pub fn log_artifact_written(kind: &str, path: &Path, size_bytes: usize) {
        info!("Wrote {kind}: {} ({size_bytes} bytes)", path.display());
    }

    /// Log an external tool invocation with its arguments
    pub fn log_tool_invocation(program: &str, args: &[String]) {
        debug!("Running: {program} {}", args.join(" "));
    }

    /// Log a non-zero exit of an external tool
    pub fn log_tool_failure(program: &str, step: &str, status: Option<i32>) {
        match status {
            Some(code) => error!("{program} failed during {step} (exit code {code})"),
            None => error!("{program} failed during {step} (terminated by signal)"),
        }
    }

    /// Secure logging of cryptographic errors
    ///
    /// Logs error types without exposing key material
    pub fn log_crypto_error(operation: &str, error: &dyn std::error::Error) {
        error!(
            "Cryptographic operation failed: {} (error_type: {})",
            operation,
            std::any::type_name_of_val(error)
        );
    }

    /// Log cleanup failures, which never abort the run
    pub fn log_cleanup_warning(path: &Path, error: &std::io::Error) {
        warn!("Failed to remove {}: {error}", path.display());
    }
}
