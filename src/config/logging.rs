use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Logging {
  /// [`EnvFilter`](tracing_subscriber::EnvFilter) directives deciding
  /// which spans and events get logged. `RUST_LOG` takes precedence.
  ///
  /// **Environment variables**:
  /// - `CFP_LOGGING_TARGETS`
  #[serde(default = "Logging::default_targets")]
  pub targets: String,
}

impl Logging {
  fn default_targets() -> String {
    "info".into()
  }
}

impl Default for Logging {
  fn default() -> Self {
    Self {
      targets: Self::default_targets(),
    }
  }
}
