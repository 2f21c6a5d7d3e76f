//! Field checks shared by the registration form.
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;
use validator::extras::validate_length;

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
  Regex::new(r"^([a-zA-Z0-9_.+-])+@(([a-zA-Z0-9-_])+\.)+([a-zA-Z0-9])+$")
    .unwrap_or_else(|e| unreachable!("email regex: {e}"))
});

// Only the start has to look like a phone number.
static PHONE_REGEX: Lazy<Regex> =
  Lazy::new(|| Regex::new(r"^\+?[0-9 ]+").unwrap_or_else(|e| unreachable!("phone regex: {e}")));

static COUNTRIES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
  include_str!("countries.txt")
    .lines()
    .map(str::trim)
    .filter(|line| !line.is_empty())
    .collect()
});

pub const EMAIL_MAX: usize = 200;
pub const NAME_MIN: usize = 2;
pub const NAME_MAX: usize = 200;
pub const PASSPHRASE_MIN: usize = 8;
pub const PHONE_MAX: usize = 18;

pub fn is_valid_email(email: &str) -> bool {
  EMAIL_REGEX.is_match(email) && validate_length(email, None, Some(EMAIL_MAX))
}

/// Passphrases are required to be eight or more characters.
pub fn is_valid_passphrase(passphrase: &str) -> bool {
  validate_length(passphrase, Some(PASSPHRASE_MIN), None)
}

/// Names are required to be 2 or more characters.
pub fn is_valid_name(name: &str) -> bool {
  validate_length(name, Some(NAME_MIN), Some(NAME_MAX))
}

pub fn is_valid_phone(phone: &str) -> bool {
  PHONE_REGEX.is_match(phone) && validate_length(phone, None, Some(PHONE_MAX))
}

/// The country must be one from the bundled list of country names.
pub fn is_valid_country(country: &str) -> bool {
  COUNTRIES.contains(country)
}

pub fn is_valid_state(_state: &str) -> bool {
  true
}

pub fn is_valid_postal_code(_postal_code: &str) -> bool {
  true
}

pub fn is_valid_street_address(_street_address: &str) -> bool {
  true
}

/// Every known country, sorted, for populating form selections.
pub fn countries() -> Vec<&'static str> {
  let mut list = COUNTRIES.iter().copied().collect::<Vec<_>>();
  list.sort_unstable();
  list
}
