use serde::{Deserialize, Serialize};
use validator::{Validate, ValidateError};

use crate::{
  types::validation::{
    is_valid_country, is_valid_email, is_valid_name, is_valid_passphrase, is_valid_phone,
    is_valid_postal_code, is_valid_state, is_valid_street_address,
  },
  util::Sensitive,
};

/// Missing fields decode as empty so they surface as field errors.
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Request {
  pub email: String,
  pub passphrase: Sensitive<String>,
  pub name: String,
  pub street_address: String,
  pub town_city: String,
  pub postal_code: String,
  pub country: String,
  pub state: Option<String>,
  pub phone: Option<String>,
}

impl Request {
  /// Blank optional fields are the same as leaving them out.
  #[must_use]
  pub fn state(&self) -> Option<&str> {
    self.state.as_deref().map(str::trim).filter(|v| !v.is_empty())
  }

  #[must_use]
  pub fn phone(&self) -> Option<&str> {
    self.phone.as_deref().map(str::trim).filter(|v| !v.is_empty())
  }
}

fn check(valid: bool, message: &'static str) -> ValidateError {
  let mut error = ValidateError::msg_builder();
  if !valid {
    error.insert(message);
  }
  error.build()
}

impl Validate for Request {
  fn validate(&self) -> Result<(), ValidateError> {
    let mut fields = ValidateError::field_builder();
    fields.insert(
      "email",
      check(is_valid_email(self.email.trim()), "Invalid e-mail address"),
    );
    fields.insert(
      "passphrase",
      check(
        is_valid_passphrase(self.passphrase.as_str()),
        "Passphrases must be eight or more characters",
      ),
    );
    fields.insert(
      "name",
      check(is_valid_name(self.name.trim()), "Names must be two or more characters"),
    );
    fields.insert(
      "street_address",
      check(
        is_valid_street_address(&self.street_address),
        "Invalid street address",
      ),
    );
    fields.insert(
      "town_city",
      check(!self.town_city.trim().is_empty(), "Town or city is required"),
    );
    fields.insert(
      "postal_code",
      check(is_valid_postal_code(&self.postal_code), "Invalid postal code"),
    );
    fields.insert(
      "country",
      check(is_valid_country(self.country.trim()), "Unknown country"),
    );
    if let Some(state) = self.state() {
      fields.insert("state", check(is_valid_state(state), "Invalid state"));
    }
    if let Some(phone) = self.phone() {
      fields.insert("phone", check(is_valid_phone(phone), "Invalid phone number"));
    }
    fields.build().into_result()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn request() -> Request {
    Request {
      email: "russel@winder.org.uk".into(),
      passphrase: "a nice lengthy förmé".into(),
      name: "Russel Winder".into(),
      street_address: "41 Buckmaster Road".into(),
      town_city: "London".into(),
      postal_code: "SW11 1EN".into(),
      country: "United Kingdom".into(),
      state: Some("  ".into()),
      phone: None,
    }
  }

  #[track_caller]
  fn must_fail(form: &Request, field: &str) {
    let Err(ValidateError::Fields(fields)) = form.validate() else {
      panic!("expected field errors for {field}");
    };
    assert!(fields.contains_key(field), "{field} not in {fields:?}");
  }

  #[test]
  fn test_valid_request() {
    let form = request();
    assert!(form.validate().is_ok());
    assert_eq!(form.state(), None);
  }

  #[test]
  fn test_invalid_fields() {
    let mut form = request();
    form.email = "russel.winder.org.uk".into();
    must_fail(&form, "email");

    let mut form = request();
    form.passphrase = "xx".into();
    must_fail(&form, "passphrase");

    let mut form = request();
    form.name = "r".into();
    must_fail(&form, "name");

    let mut form = request();
    form.country = "Middle Earth".into();
    must_fail(&form, "country");

    let mut form = request();
    form.phone = Some("xxxxxxxx".into());
    must_fail(&form, "phone");

    let mut form = request();
    form.town_city = String::new();
    must_fail(&form, "town_city");
  }
}
