//! Error taxonomy for the coverage pipeline.
//!
//! Only configuration errors stop a run. Corpus and reference failures are
//! logged by the runner and degrade to empty sets.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoverageError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse {} as JSON: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid configuration in {}: {message}", path.display())]
    Config { path: PathBuf, message: String },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub type Result<T> = std::result::Result<T, CoverageError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_path() {
        let err = CoverageError::Read {
            path: PathBuf::from("data/dizigui.json"),
            source: io::Error::new(io::ErrorKind::NotFound, "no such file"),
        };
        let msg = err.to_string();
        assert!(msg.contains("data/dizigui.json"));
        assert!(msg.contains("no such file"));
    }

    #[test]
    fn config_error_carries_message() {
        let err = CoverageError::Config {
            path: PathBuf::from("hanzi-coverage.toml"),
            message: "expected a table".into(),
        };
        assert_eq!(
            err.to_string(),
            "invalid configuration in hanzi-coverage.toml: expected a table"
        );
    }
}
