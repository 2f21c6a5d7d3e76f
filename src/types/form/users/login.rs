use serde::{Deserialize, Serialize};

use crate::util::Sensitive;

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Request {
  pub email: String,
  pub passphrase: Sensitive<String>,
}
