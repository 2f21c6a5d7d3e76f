use actix_web::web::Bytes;
use error_stack::Report;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::{http::Error, types};

#[derive(Debug, Error)]
#[error("Received a malformed JSON body")]
pub struct MalformedBody;

/// Decodes a raw request body as JSON.
///
/// Handlers take the body as [`Bytes`] and call this once their gates
/// have passed, so a redirect or a failure page always wins over a
/// broken payload.
pub fn from_json<T: DeserializeOwned>(body: &Bytes) -> Result<T, Error> {
  serde_json::from_slice(body).map_err(|e| {
    let report = Report::new(MalformedBody).attach_printable(e.to_string());
    Error::from_report(types::Error::InvalidBody, report)
  })
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::Value;

  #[test]
  fn test_from_json() {
    let value: Value = from_json(&Bytes::from_static(br#"{"a": 1}"#)).unwrap();
    assert_eq!(value["a"], 1);

    let error = from_json::<Value>(&Bytes::from_static(b"{ not json")).unwrap_err();
    assert_eq!(error.as_type(), &types::Error::InvalidBody);
    assert!(error.downcast_ref::<MalformedBody>().is_some());
  }
}
