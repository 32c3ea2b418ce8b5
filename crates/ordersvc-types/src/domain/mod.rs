pub mod item;
pub mod order;

/// Raised when a request body cannot be mapped onto a record: a missing
/// required key, or a value of the wrong shape. The message is surfaced
/// verbatim in the HTTP 400 body.
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct DataValidationError(pub String);

impl From<serde_json::Error> for DataValidationError {
    fn from(err: serde_json::Error) -> Self {
        Self(err.to_string())
    }
}
