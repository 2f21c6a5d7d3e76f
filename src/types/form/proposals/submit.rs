//! Payload of a proposal submission.
//!
//! The payload is checked on its raw JSON form first so the
//! proposer gets told precisely which piece is missing, and only
//! then turned into a typed [`Request`].
use serde::Deserialize;
use serde_json::{Map, Value};
use std::borrow::Cow;
use thiserror::Error;
use validator::extras::validate_length;

use crate::types::enums::SessionType;

pub const TITLE_MIN: usize = 5;
pub const TITLE_MAX: usize = 150;
pub const ABSTRACT_MIN: usize = 50;

/// Bio given to presenters who did not write one.
pub const DEFAULT_BIO: &str = "A human being.";

const MANDATORY_KEYS: &[&str] = &["title", "abstract", "session_type", "presenters"];
const PRESENTER_MANDATORY_KEYS: &[&str] = &["lead", "email", "name", "country", "state"];

/// Longest value each textual presenter attribute may hold.
fn presenter_max(key: &str) -> usize {
  if key == "country" {
    100
  } else {
    200
  }
}

/// Human readable reason why a submission was turned down.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct Rejection(Cow<'static, str>);

impl Rejection {
  fn new(message: impl Into<Cow<'static, str>>) -> Self {
    Self(message.into())
  }

  fn malformed() -> Self {
    Self::new("proposal data is malformed")
  }

  #[must_use]
  pub fn message(&self) -> &str {
    &self.0
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Request {
  pub title: String,
  #[serde(rename = "abstract")]
  pub text: String,
  pub session_type: SessionType,
  pub presenters: Vec<Presenter>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Presenter {
  pub email: String,
  pub name: String,
  #[serde(default)]
  pub bio: Option<String>,
  pub country: String,
  pub state: String,
  pub lead: bool,
}

impl Presenter {
  #[must_use]
  pub fn bio(&self) -> &str {
    match self.bio.as_deref().map(str::trim) {
      Some(bio) if !bio.is_empty() => bio,
      _ => DEFAULT_BIO,
    }
  }
}

impl Request {
  /// Validates the raw payload and converts it into a request
  /// with its title and abstract trimmed.
  pub fn from_json(data: &Value) -> Result<Self, Rejection> {
    validate_proposal_data(data)?;

    let mut request = Self::deserialize(data).map_err(|_| Rejection::malformed())?;
    request.title = request.title.trim().to_string();
    request.text = request.text.trim().to_string();
    Ok(request)
  }

  #[must_use]
  pub fn lead(&self) -> Option<&Presenter> {
    self.presenters.iter().find(|v| v.lead)
  }
}

/// Checks the proposal data in order and reports the first problem found.
pub fn validate_proposal_data(data: &Value) -> Result<(), Rejection> {
  let Value::Object(data) = data else {
    return Err(Rejection::malformed());
  };

  for key in MANDATORY_KEYS {
    match data.get(*key) {
      None => {
        return Err(Rejection::new(format!(
          "{key} information is not present in proposal"
        )))
      }
      Some(Value::Null) => {
        return Err(Rejection::new(format!(
          "{key} information should not be empty"
        )))
      }
      Some(..) => {}
    }
  }

  let Some(Value::Array(presenters)) = data.get("presenters") else {
    return Err(Rejection::new("presenters data is malformed"));
  };
  if presenters.is_empty() {
    return Err(Rejection::new("At least one presenter needed"));
  }

  let title = string_field(data, "title")?;
  if !validate_length(title.trim(), Some(TITLE_MIN), None) {
    return Err(Rejection::new("Title is too short"));
  }
  if !validate_length(title.trim(), None, Some(TITLE_MAX)) {
    return Err(Rejection::new("Title is too long"));
  }

  let text = string_field(data, "abstract")?;
  if !validate_length(text.trim(), Some(ABSTRACT_MIN), None) {
    return Err(Rejection::new("Proposal too short"));
  }

  validate_presenters(presenters)?;

  let session_type = string_field(data, "session_type")?;
  session_type
    .parse::<SessionType>()
    .map_err(|e| Rejection::new(e.to_string()))?;

  Ok(())
}

fn string_field<'a>(data: &'a Map<String, Value>, key: &'static str) -> Result<&'a str, Rejection> {
  data
    .get(key)
    .and_then(Value::as_str)
    .ok_or_else(|| Rejection::new(format!("{key} information is malformed")))
}

/// Every presenter must be fully described and at most one
/// of them may be marked as the lead presenter.
pub fn validate_presenters(presenters: &[Value]) -> Result<(), Rejection> {
  let mut lead_presenter: Option<&str> = None;
  for presenter in presenters {
    let Value::Object(presenter) = presenter else {
      return Err(Rejection::new("presenters data is malformed"));
    };

    for key in PRESENTER_MANDATORY_KEYS {
      let valid = match presenter.get(*key) {
        None => {
          return Err(Rejection::new(format!(
            "{key} attribute is mandatory for Presenters"
          )))
        }
        Some(Value::Null) => false,
        Some(Value::Bool(..)) => *key == "lead",
        Some(Value::String(..)) => *key != "lead",
        Some(..) => false,
      };
      if !valid {
        return Err(Rejection::new(format!(
          "{key} attribute should have valid data"
        )));
      }
    }

    for key in &PRESENTER_MANDATORY_KEYS[1..] {
      let value = presenter.get(*key).and_then(Value::as_str).unwrap_or_default();
      if !validate_length(value, None, Some(presenter_max(key))) {
        return Err(Rejection::new(format!("{key} attribute is too long")));
      }
    }

    let is_lead = presenter.get("lead").and_then(Value::as_bool).unwrap_or_default();
    let email = presenter.get("email").and_then(Value::as_str).unwrap_or_default();
    if is_lead {
      if let Some(first) = lead_presenter {
        return Err(Rejection::new(format!(
          "{email} and {first} are both marked as lead presenters"
        )));
      }
      lead_presenter = Some(email);
    }
  }
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  fn presenter(email: &str, lead: bool) -> Value {
    json!({
      "email": email,
      "name": "A",
      "country": "UK",
      "state": "",
      "lead": lead,
    })
  }

  fn proposal() -> Value {
    json!({
      "title": "ABCDE",
      "abstract": "A".repeat(50),
      "session_type": "talk",
      "presenters": [presenter("a@x.com", true)],
    })
  }

  #[track_caller]
  fn assert_rejected(data: &Value, message: &str) {
    let error = validate_proposal_data(data).unwrap_err();
    assert_eq!(error.message(), message, "payload: {data}");
  }

  #[test]
  fn test_valid_payload() {
    assert!(validate_proposal_data(&proposal()).is_ok());

    let request = Request::from_json(&proposal()).unwrap();
    assert_eq!(request.title, "ABCDE");
    assert_eq!(request.session_type, SessionType::Talk);
    assert_eq!(request.presenters.len(), 1);
    assert_eq!(request.lead().map(|v| v.email.as_str()), Some("a@x.com"));
    assert_eq!(request.presenters[0].bio(), DEFAULT_BIO);
  }

  #[test]
  fn test_missing_keys() {
    for key in MANDATORY_KEYS {
      let mut data = proposal();
      data.as_object_mut().unwrap().remove(*key);
      assert_rejected(&data, &format!("{key} information is not present in proposal"));

      let mut data = proposal();
      data[*key] = Value::Null;
      assert_rejected(&data, &format!("{key} information should not be empty"));
    }
  }

  #[test]
  fn test_presenters_shape() {
    let mut data = proposal();
    data["presenters"] = json!("a@x.com");
    assert_rejected(&data, "presenters data is malformed");

    data["presenters"] = json!([]);
    assert_rejected(&data, "At least one presenter needed");

    data["presenters"] = json!([42]);
    assert_rejected(&data, "presenters data is malformed");

    assert_rejected(&json!(["not", "an", "object"]), "proposal data is malformed");
  }

  #[test]
  fn test_lengths() {
    let mut data = proposal();
    data["title"] = json!("ABCD");
    assert_rejected(&data, "Title is too short");

    // whitespace does not count towards the title
    data["title"] = json!("   AB   ");
    assert_rejected(&data, "Title is too short");

    let mut data = proposal();
    data["abstract"] = json!("A".repeat(49));
    assert_rejected(&data, "Proposal too short");

    let mut data = proposal();
    data["title"] = json!(12345);
    assert_rejected(&data, "title information is malformed");
  }

  #[test]
  fn test_length_limits() {
    let mut data = proposal();
    data["title"] = json!("T".repeat(TITLE_MAX));
    assert!(validate_proposal_data(&data).is_ok());

    data["title"] = json!("T".repeat(TITLE_MAX + 1));
    assert_rejected(&data, "Title is too long");

    // limits are counted in characters, not bytes
    data["title"] = json!("é".repeat(TITLE_MAX));
    assert!(validate_proposal_data(&data).is_ok());

    let mut data = proposal();
    data["presenters"][0]["name"] = json!("N".repeat(200));
    data["presenters"][0]["country"] = json!("C".repeat(100));
    assert!(validate_proposal_data(&data).is_ok());

    data["presenters"][0]["country"] = json!("C".repeat(101));
    assert_rejected(&data, "country attribute is too long");

    let mut data = proposal();
    data["presenters"][0]["email"] = json!(format!("{}@x.com", "a".repeat(200)));
    assert_rejected(&data, "email attribute is too long");

    let mut data = proposal();
    data["presenters"][0]["state"] = json!("S".repeat(201));
    assert_rejected(&data, "state attribute is too long");
  }

  #[test]
  fn test_presenter_attributes() {
    for key in PRESENTER_MANDATORY_KEYS {
      let mut data = proposal();
      data["presenters"][0].as_object_mut().unwrap().remove(*key);
      assert_rejected(&data, &format!("{key} attribute is mandatory for Presenters"));

      let mut data = proposal();
      data["presenters"][0][*key] = Value::Null;
      assert_rejected(&data, &format!("{key} attribute should have valid data"));
    }

    let mut data = proposal();
    data["presenters"][0]["lead"] = json!("yes");
    assert_rejected(&data, "lead attribute should have valid data");
  }

  #[test]
  fn test_two_leads() {
    let mut data = proposal();
    data["presenters"] = json!([
      presenter("a@x.com", true),
      presenter("b@x.com", false),
      presenter("c@x.com", true),
    ]);
    assert_rejected(&data, "c@x.com and a@x.com are both marked as lead presenters");

    data["presenters"][2]["lead"] = json!(false);
    assert!(validate_proposal_data(&data).is_ok());
  }

  #[test]
  fn test_session_type_checked_last() {
    let mut data = proposal();
    data["session_type"] = json!("lightning");
    assert_rejected(&data, "lightning is not a known session type");

    // an earlier problem takes precedence
    data["title"] = json!("AB");
    assert_rejected(&data, "Title is too short");
  }

  #[test]
  fn test_from_json_trims() {
    let mut data = proposal();
    data["title"] = json!("  Modern C++  ");
    data["abstract"] = json!(format!("  {}  ", "B".repeat(60)));
    data["presenters"][0]["bio"] = json!("Writes compilers.");

    let request = Request::from_json(&data).unwrap();
    assert_eq!(request.title, "Modern C++");
    assert_eq!(request.text, "B".repeat(60));
    assert_eq!(request.presenters[0].bio(), "Writes compilers.");
  }
}
