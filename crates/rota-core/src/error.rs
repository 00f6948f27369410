use thiserror::Error;

/// Top-level error type for the Rota system.
///
/// Subsystem crates define their own error types and convert into
/// `RotaError` at crate boundaries so that `?` works across the workspace.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RotaError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Assistant error: {0}")]
    Assistant(String),

    #[error("API error: {0}")]
    Api(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<toml::de::Error> for RotaError {
    fn from(err: toml::de::Error) -> Self {
        RotaError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for RotaError {
    fn from(err: toml::ser::Error) -> Self {
        RotaError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for RotaError {
    fn from(err: serde_json::Error) -> Self {
        RotaError::Serialization(err.to_string())
    }
}

/// A specialized `Result` type for Rota operations.
pub type Result<T> = std::result::Result<T, RotaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = RotaError::Config("missing section".to_string());
        assert_eq!(err.to_string(), "Configuration error: missing section");

        let err = RotaError::Store("table locked".to_string());
        assert_eq!(err.to_string(), "Store error: table locked");

        let err = RotaError::Assistant("bad query".to_string());
        assert_eq!(err.to_string(), "Assistant error: bad query");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err: RotaError = io_err.into();
        assert!(matches!(err, RotaError::Io(_)));
        assert!(err.to_string().contains("no such file"));
    }

    #[test]
    fn test_toml_error_conversion() {
        let result: std::result::Result<toml::Value, _> = toml::from_str("not = [[[ valid");
        let err: RotaError = result.unwrap_err().into();
        assert!(matches!(err, RotaError::Config(_)));
    }

    #[test]
    fn test_serde_json_error_conversion() {
        let result: std::result::Result<serde_json::Value, _> = serde_json::from_str("{ nope");
        let err: RotaError = result.unwrap_err().into();
        assert!(matches!(err, RotaError::Serialization(_)));
    }

    #[test]
    fn test_result_alias_with_question_mark() {
        fn inner() -> Result<u32> {
            let io_result: std::result::Result<u32, std::io::Error> = Ok(7);
            Ok(io_result?)
        }
        assert_eq!(inner().unwrap(), 7);
    }
}
