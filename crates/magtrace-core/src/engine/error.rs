use super::config::ConfigError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Failed to read log '{path}': {source}", path = path.display())]
    SourceUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("I/O error while reading log stream: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid scan configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to export series: {0}")]
    Export(#[from] csv::Error),
}
