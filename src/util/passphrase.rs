use sha2::{Digest, Sha512};

/// Passphrases are stored as the hex encoded SHA-512 digest.
#[must_use]
pub fn hash_passphrase(text: &str) -> String {
  let mut hasher = Sha512::default();
  hasher.update(text.as_bytes());
  hex::encode(hasher.finalize())
}

/// Compares a plain passphrase against its stored digest.
#[must_use]
pub fn verify_passphrase(text: &str, digest: &str) -> bool {
  let attempt = hash_passphrase(text);
  if attempt.len() != digest.len() {
    return false;
  }
  attempt
    .bytes()
    .zip(digest.bytes())
    .fold(true, |matched, (a, b)| matched & (a == b))
}
