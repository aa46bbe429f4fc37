//! Error reporting support
//!
//! Error types live next to the code that raises them; this module carries
//! the logging side of error handling.

pub mod logging;

pub use logging::LoggingTransformer;
