use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Kinds of failures reported to the client when a request could
/// not be served at all. Rejected form data is not one of these,
/// it is answered with a regular envelope.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Error {
  Internal,
  InvalidBody,
  NotFound,
  ReadonlyMode,
}

impl Display for Error {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Error::Internal => f.write_str("Failed to perform request"),
      Error::InvalidBody => f.write_str("User performed request with malformed body"),
      Error::NotFound => f.write_str("Resource not found"),
      Error::ReadonlyMode => f.write_str("Attempt to write read-only database"),
    }
  }
}
