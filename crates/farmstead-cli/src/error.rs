//! Error types for the `farmstead` binary.
//!
//! [`CliError`] wraps every failure a command can hit so `main` can
//! propagate with `?` and attach context through `anyhow`.

/// Top-level error for the `farmstead` binary.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: farmstead_core::config::ConfigError,
    },

    /// The account could not be read or decoded.
    #[error("account error: {source}")]
    Ingest {
        /// The underlying ingest error.
        #[from]
        source: farmstead_core::ingest::IngestError,
    },

    /// The farm could not be evaluated.
    #[error("farm error: {source}")]
    Farm {
        /// The underlying computation error.
        #[from]
        source: farmstead_world::FarmError,
    },

    /// Writing JSON output failed.
    #[error("output error: {source}")]
    Output {
        /// The underlying serialization error.
        #[from]
        source: serde_json::Error,
    },

    /// Writing to the terminal failed.
    #[error("output error: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Waiting for Ctrl-C or the poller task failed.
    #[error("runtime error: {message}")]
    Runtime {
        /// Description of the failure.
        message: String,
    },
}
