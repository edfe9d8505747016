use mutaplex::engine::config::ConfigError;
use mutaplex::engine::error::EngineError;
use std::path::PathBuf;
use thiserror::Error;

/// Result alias for every command handler.
pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    /// A ledger, resolver or workflow failure from the core library, shown as-is.
    #[error(transparent)]
    Core(#[from] EngineError),

    /// Bad `mutaplex.toml` contents or an oligo design setting the builder refused.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A FASTA, ledger, primer or saved-response file that could not be decoded.
    #[error("Failed to parse file '{path}': {source}", path = path.display())]
    FileParsing {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The design service could not be reached or returned an HTTP error status.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The design service answered, but not with the expected JSON shape.
    #[error("Unexpected response from the design service: {0}")]
    Service(String),

    /// A flag value that parsed but makes no sense for the loaded target.
    #[error("Invalid argument: {0}")]
    Argument(String),

    /// The global tracing subscriber could not be installed.
    #[error("Failed to initialize logging: {0}")]
    Logging(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        CliError::Config(e.to_string())
    }
}
