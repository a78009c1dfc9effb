//! Error types for the fallible edges of the crate.
//!
//! The model itself is total. Errors only arise when reading or writing
//! documents and when decoding records supplied from outside.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, SoilCdError>;

#[derive(Error, Debug)]
pub enum SoilCdError {
    /// A state record could not be decoded.
    #[error("invalid state record: {0}")]
    InvalidState(String),

    /// An export document could not be parsed or produced.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A sweep targeted a field that is not a model parameter.
    #[error("unknown parameter '{0}'")]
    UnknownParameter(String),
}

impl SoilCdError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_path() {
        let err = SoilCdError::io(
            "/tmp/out.json",
            std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        );
        let msg = err.to_string();
        assert!(msg.contains("/tmp/out.json"));
        assert!(msg.contains("missing"));
    }

    #[test]
    fn unknown_parameter_display() {
        let err = SoilCdError::UnknownParameter("color".to_string());
        assert_eq!(err.to_string(), "unknown parameter 'color'");
    }
}
