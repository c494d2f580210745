use thiserror::Error;

/// Failures that can only happen at the ingestion boundary. The engines
/// themselves never return these; they report absent results instead.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("invalid game config: {0}")]
    InvalidConfig(String),
    #[error("invalid scorecard: {0}")]
    InvalidScorecard(String),
    #[error("invalid course: {0}")]
    InvalidCourse(String),
    #[error("parse error: {0}")]
    Parse(String),
    #[error("io error: {0}")]
    Io(String),
    #[error("{0}")]
    Other(String),
}

impl From<serde_json::Error> for CoreError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

impl From<toml::de::Error> for CoreError {
    fn from(err: toml::de::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

impl From<std::io::Error> for CoreError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<String> for CoreError {
    fn from(err: String) -> Self {
        Self::Other(err)
    }
}

impl From<&str> for CoreError {
    fn from(err: &str) -> Self {
        Self::Other(err.to_string())
    }
}
