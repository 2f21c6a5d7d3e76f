use indexmap::IndexMap;
use serde::{ser::SerializeMap, Serialize};
use std::borrow::Cow;

fn serialize_index_map<K: Serialize, V: Serialize, S: serde::Serializer>(
  map: &IndexMap<K, V>,
  serializer: S,
) -> Result<S::Ok, S::Error> {
  let mut map_ser = serializer.serialize_map(Some(map.len()))?;
  for (key, value) in map {
    map_ser.serialize_entry(key, value)?;
  }
  map_ser.end()
}

pub struct MessageBuilder(Vec<Cow<'static, str>>);

impl MessageBuilder {
  #[must_use]
  pub const fn new() -> Self {
    Self(Vec::new())
  }

  pub fn insert(&mut self, message: impl Into<Cow<'static, str>>) {
    self.0.push(message.into());
  }

  #[must_use]
  pub fn build(self) -> ValidateError {
    ValidateError::Messages(self.0)
  }
}

pub struct SliceBuilder(Vec<Option<ValidateError>>);

impl SliceBuilder {
  #[must_use]
  pub const fn new() -> Self {
    Self(Vec::new())
  }

  pub fn insert_empty(&mut self) {
    self.0.push(None);
  }

  pub fn insert(&mut self, value: ValidateError) {
    self.0.push(if value.is_empty() { None } else { Some(value) });
  }

  #[must_use]
  pub fn build(self) -> ValidateError {
    ValidateError::Slice(self.0)
  }
}

pub struct FieldBuilder(IndexMap<Cow<'static, str>, ValidateError>);

#[allow(clippy::new_without_default)]
impl FieldBuilder {
  #[must_use]
  pub fn new() -> Self {
    Self(IndexMap::default())
  }

  pub fn insert(&mut self, key: impl Into<Cow<'static, str>>, value: ValidateError) {
    if !value.is_empty() {
      self.0.insert(key.into(), value);
    }
  }

  #[must_use]
  pub fn build(self) -> ValidateError {
    ValidateError::Fields(self.0)
  }
}

// ---------------------------------------------------- //

#[derive(Clone, PartialEq, Eq)]
pub enum ValidateError {
  Fields(IndexMap<Cow<'static, str>, ValidateError>),
  Messages(Vec<Cow<'static, str>>),
  Slice(Vec<Option<ValidateError>>),
}

impl std::fmt::Display for ValidateError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str("Invalid data occurred")
  }
}

impl std::error::Error for ValidateError {}

impl std::fmt::Debug for ValidateError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      ValidateError::Fields(n) => n.fmt(f),
      ValidateError::Messages(n) => f.debug_map().entry(&"_errors", &n).finish(),
      ValidateError::Slice(n) => n.fmt(f),
    }
  }
}

impl ValidateError {
  #[must_use]
  pub fn field_builder() -> FieldBuilder {
    FieldBuilder::new()
  }

  #[must_use]
  pub fn msg_builder() -> MessageBuilder {
    MessageBuilder::new()
  }

  #[must_use]
  pub fn slice_builder() -> SliceBuilder {
    SliceBuilder::new()
  }
}

impl ValidateError {
  #[must_use]
  pub fn is_empty(&self) -> bool {
    match self {
      ValidateError::Slice(n) => n.iter().all(Option::is_none),
      ValidateError::Fields(n) => n.is_empty(),
      ValidateError::Messages(n) => n.is_empty(),
    }
  }

  pub fn into_result(self) -> Result<(), Self> {
    if self.is_empty() {
      Ok(())
    } else {
      Err(self)
    }
  }

  /// The first message found, walking fields in insertion order.
  #[must_use]
  pub fn first_message(&self) -> Option<&str> {
    match self {
      ValidateError::Fields(n) => n.values().find_map(ValidateError::first_message),
      ValidateError::Messages(n) => n.first().map(|m| &**m),
      ValidateError::Slice(n) => n.iter().flatten().find_map(ValidateError::first_message),
    }
  }
}

impl Serialize for ValidateError {
  fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
  where
    S: serde::Serializer,
  {
    match self {
      ValidateError::Fields(n) => serialize_index_map(n, serializer),
      ValidateError::Messages(n) => {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry("_errors", &n)?;
        map.end()
      },
      ValidateError::Slice(n) => n.serialize(serializer),
    }
  }
}

#[cfg(test)]
mod tests {
  use crate::Validate;

  use super::*;
  use serde_test::Token;

  #[derive(Debug)]
  struct Attendee {
    emails: Vec<&'static str>,
    name: &'static str,
  }

  impl Validate for Attendee {
    fn validate(&self) -> Result<(), ValidateError> {
      fn validate_emails(emails: &[&'static str]) -> Result<(), ValidateError> {
        let mut slice = ValidateError::slice_builder();
        for email in emails {
          let mut msg = ValidateError::msg_builder();
          if !email.contains('@') {
            msg.insert("Invalid email address");
          }
          slice.insert(msg.build());
        }
        slice.build().into_result()
      }

      let mut fields = ValidateError::field_builder();
      if let Err(e) = validate_emails(&self.emails) {
        fields.insert("emails", e);
      }
      {
        let mut msg = ValidateError::msg_builder();
        if self.name.len() < 2 {
          msg.insert("Name is too short");
        }
        fields.insert("name", msg.build());
      }
      fields.build().into_result()
    }
  }

  fn invalid_attendee() -> ValidateError {
    Attendee { emails: vec!["a@x.com", "nope", "b@x.com"], name: "r" }
      .validate()
      .unwrap_err()
  }

  #[test]
  fn test_debug_fmt() {
    const EXPECTED_FMT_MSG: &str = r#"{"emails": [None, Some({"_errors": ["Invalid email address"]}), None], "name": {"_errors": ["Name is too short"]}}"#;
    assert_eq!(EXPECTED_FMT_MSG, format!("{:?}", invalid_attendee()));
  }

  #[test]
  fn test_first_message() {
    assert_eq!(Some("Invalid email address"), invalid_attendee().first_message());
    assert_eq!(None, ValidateError::field_builder().build().first_message());
  }

  #[test]
  fn test_serde_impl() {
    serde_test::assert_ser_tokens(
      &invalid_attendee(),
      &[
        Token::Map { len: Some(2) },
        Token::Str("emails"),
        Token::Seq { len: Some(3) },
        Token::None,
        Token::Some,
        Token::Map { len: Some(1) },
        Token::Str("_errors"),
        Token::Seq { len: Some(1) },
        Token::Str("Invalid email address"),
        Token::SeqEnd,
        Token::MapEnd,
        Token::None,
        Token::SeqEnd,
        Token::Str("name"),
        Token::Map { len: Some(1) },
        Token::Str("_errors"),
        Token::Seq { len: Some(1) },
        Token::Str("Name is too short"),
        Token::SeqEnd,
        Token::MapEnd,
        Token::MapEnd,
      ],
    );
  }

  #[test]
  fn test_json_shape() {
    let mut msg = ValidateError::msg_builder();
    msg.insert("Invalid e-mail address");
    let mut fields = ValidateError::field_builder();
    fields.insert("email", msg.build());

    let value = serde_json::to_value(fields.build()).unwrap();
    assert_eq!(value, serde_json::json!({ "email": { "_errors": ["Invalid e-mail address"] } }));
  }

  #[test]
  fn validate_error_is_empty() {
    assert!(MessageBuilder::new().build().is_empty());
    assert!(FieldBuilder::new().build().is_empty());

    let mut msg = MessageBuilder::new();
    msg.insert("Hello world!");
    assert!(!msg.build().is_empty());

    {
      let mut msg = MessageBuilder::new();
      msg.insert("Hello world!");

      let mut err = FieldBuilder::new();
      err.insert("country", msg.build());
      assert!(!err.build().is_empty());
    }

    {
      let mut msg = MessageBuilder::new();
      msg.insert("Hello world!");

      let mut err = SliceBuilder::new();
      err.insert(msg.build());
      assert!(!err.build().is_empty());

      let mut err = SliceBuilder::new();
      err.insert_empty();
      assert!(err.build().is_empty());
    }
  }
}
