use serde_json::{Map, Value};

/// Merges two JSON objects into a distinct third one. Keys
/// present in both take the value from `b`.
#[must_use]
pub fn md(a: &Map<String, Value>, b: &Map<String, Value>) -> Map<String, Value> {
  let mut rv = a.clone();
  rv.extend(b.iter().map(|(k, v)| (k.clone(), v.clone())));
  rv
}

#[cfg(test)]
mod tests {
  use super::md;
  use serde_json::json;

  fn object(value: serde_json::Value) -> serde_json::Map<String, serde_json::Value> {
    match value {
      serde_json::Value::Object(map) => map,
      _ => unreachable!(),
    }
  }

  #[test]
  fn test_later_keys_win() {
    let a = object(json!({ "title": "Submit", "year": 2018 }));
    let b = object(json!({ "data": "Must be logged in", "title": "Failure" }));

    let merged = md(&a, &b);
    assert_eq!(
      serde_json::Value::Object(merged),
      json!({ "title": "Failure", "year": 2018, "data": "Must be logged in" })
    );

    // inputs are left untouched
    assert_eq!(a.get("title"), Some(&json!("Submit")));
    assert_eq!(b.len(), 2);
  }
}
