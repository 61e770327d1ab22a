//! Songkey Error Types
//!
//! Centralized error handling. The text utilities themselves are total and
//! never fail; errors only come from loading files.

use thiserror::Error;

/// Central error type for songkey
#[derive(Error, Debug)]
pub enum SongkeyError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Library error: {0}")]
    Library(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Result type alias for songkey operations
pub type SongkeyResult<T> = Result<T, SongkeyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = SongkeyError::Library("song 3 has no title".to_string());
        assert_eq!(err.to_string(), "Library error: song 3 has no title");

        let err = SongkeyError::Config("bad threshold".to_string());
        assert_eq!(err.to_string(), "Configuration error: bad threshold");
    }

    #[test]
    fn test_json_conversion() {
        let parse: Result<serde_json::Value, _> = serde_json::from_str("{ nope");
        let err: SongkeyError = parse.unwrap_err().into();
        assert!(matches!(err, SongkeyError::Json(_)));
    }
}
