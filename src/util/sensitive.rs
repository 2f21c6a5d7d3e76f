use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Display};
use std::ops::Deref;

/// Keeps the raw sensitive data in memory but it cannot be
/// accidentally leaked through the console or logs.
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Sensitive<T>(T);

impl<T> Sensitive<T> {
  #[must_use]
  pub const fn new(value: T) -> Self {
    Self(value)
  }

  #[must_use]
  pub fn into_inner(self) -> T {
    self.0
  }
}

impl<T> Debug for Sensitive<T> {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str("<hidden>")
  }
}

impl<T> Display for Sensitive<T> {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str("<hidden>")
  }
}

impl<T> AsRef<T> for Sensitive<T> {
  fn as_ref(&self) -> &T {
    &self.0
  }
}

impl<T: AsRef<str>> Sensitive<T> {
  #[must_use]
  pub fn as_str(&self) -> &str {
    self.0.as_ref()
  }
}

impl<T: Deref> Deref for Sensitive<T> {
  type Target = T::Target;

  fn deref(&self) -> &Self::Target {
    self.0.deref()
  }
}

impl<T> From<T> for Sensitive<T> {
  fn from(value: T) -> Self {
    Self(value)
  }
}

impl From<&str> for Sensitive<String> {
  fn from(value: &str) -> Self {
    Self(value.to_string())
  }
}

#[cfg(test)]
mod tests {
  use super::Sensitive;
  use serde::{Deserialize, Serialize};
  use serde_test::Token;

  #[test]
  fn test_serde_impl() {
    #[derive(Debug, PartialEq, Deserialize, Serialize)]
    struct Login {
      email: String,
      passphrase: Sensitive<String>,
    }

    let login = Login {
      email: "russel@winder.org.uk".into(),
      passphrase: "xxxxxxxx".into(),
    };
    serde_test::assert_tokens(
      &login,
      &[
        Token::Struct { name: "Login", len: 2 },
        Token::Str("email"),
        Token::Str("russel@winder.org.uk"),
        Token::Str("passphrase"),
        Token::Str("xxxxxxxx"),
        Token::StructEnd,
      ],
    );
  }

  #[test]
  fn test_fmt() {
    let value = Sensitive::new("hello");
    assert_eq!(value.to_string(), "<hidden>");
    assert_eq!(format!("{value:?}"), "<hidden>");
    assert_eq!(value.as_str(), "hello");
  }
}
