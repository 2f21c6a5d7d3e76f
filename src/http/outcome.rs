use actix_web::HttpResponse;
use serde::Serialize;
use std::borrow::Cow;
use validator::ValidateError;

/// JSON answer to a form posted by the browser.
#[derive(Debug, Serialize)]
pub struct Outcome {
  pub success: bool,
  pub message: Cow<'static, str>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub redirect: Option<&'static str>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub errors: Option<ValidateError>,
}

impl Outcome {
  #[must_use]
  pub fn success(message: impl Into<Cow<'static, str>>) -> Self {
    Self {
      success: true,
      message: message.into(),
      redirect: None,
      errors: None,
    }
  }

  #[must_use]
  pub fn failure(message: impl Into<Cow<'static, str>>) -> Self {
    Self {
      success: false,
      ..Self::success(message)
    }
  }

  /// Field by field errors, the message becomes the first of them.
  #[must_use]
  pub fn invalid(errors: ValidateError) -> Self {
    let message = errors
      .first_message()
      .map_or(Cow::Borrowed("Invalid data occurred"), |v| Cow::Owned(v.to_string()));
    Self {
      errors: Some(errors),
      ..Self::failure(message)
    }
  }

  #[must_use]
  pub fn redirect(mut self, location: &'static str) -> Self {
    self.redirect = Some(location);
    self
  }
}

impl From<Outcome> for HttpResponse {
  fn from(value: Outcome) -> Self {
    HttpResponse::Ok().json(value)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  #[test]
  fn test_json_shape() {
    let outcome = Outcome::success("Done").redirect("/");
    assert_eq!(
      serde_json::to_value(&outcome).unwrap(),
      json!({ "success": true, "message": "Done", "redirect": "/" })
    );

    let mut msg = ValidateError::msg_builder();
    msg.insert("Invalid e-mail address");
    let mut fields = ValidateError::field_builder();
    fields.insert("email", msg.build());

    let outcome = Outcome::invalid(fields.build());
    assert_eq!(
      serde_json::to_value(&outcome).unwrap(),
      json!({
        "success": false,
        "message": "Invalid e-mail address",
        "errors": { "email": { "_errors": ["Invalid e-mail address"] } },
      })
    );
  }
}
