use thiserror::Error;

/// Errors surfaced by the library API.
///
/// Missing or malformed visitor fields are never errors; they are scored as
/// absent. Only contract violations end up here.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EngineError {
    /// The visitor record was not a JSON object (or not JSON at all).
    #[error("invalid visitor input: {0}")]
    InvalidInput(String),

    /// The scoring configuration failed validation. Holds every problem found.
    #[error("invalid scoring config: {}", .0.join("; "))]
    InvalidConfig(Vec<String>),
}
