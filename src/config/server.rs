use error_stack::{Report, Result, ResultExt};
use serde::Deserialize;
use std::net::{IpAddr, Ipv4Addr};
use std::num::NonZeroUsize;
use validator::{extras::validate_length, Validate, ValidateError};

use super::ParseError;
use crate::util::{figment::FigmentErrorAttachable, validator::IntoValidatorReport, Sensitive};

#[derive(Debug, Deserialize)]
pub struct Server {
  /// **Environment variables**:
  /// - `CFP_IP`
  #[serde(default = "Server::default_ip")]
  pub ip: IpAddr,
  /// **Environment variables**:
  /// - `CFP_PORT`
  #[serde(default = "Server::default_port")]
  pub port: u16,
  /// Amount of HTTP workers. Defaults to the available parallelism
  /// of the machine.
  ///
  /// **Environment variables**:
  /// - `CFP_WORKERS`
  pub workers: Option<NonZeroUsize>,
  /// Year of the conference.
  ///
  /// **Environment variables**:
  /// - `CFP_YEAR`
  #[serde(default = "Server::default_year")]
  pub year: u16,
  /// Turns away every visitor from pages that need to write.
  ///
  /// **Environment variables**:
  /// - `CFP_MAINTENANCE`
  #[serde(default)]
  pub maintenance: bool,
  /// **Environment variables**:
  /// - `CFP_CALL_OPEN`
  #[serde(default = "Server::default_call_open")]
  pub call_open: bool,
  /// Keeps registration, login and submission reachable after the
  /// call for proposals has been closed.
  ///
  /// **Environment variables**:
  /// - `CFP_REVIEWING_ALLOWED`
  #[serde(default)]
  pub reviewing_allowed: bool,
  /// Signs session cookies.
  ///
  /// **Environment variables**:
  /// - `CFP_SECRET_KEY` or `SECRET_KEY`
  pub secret_key: Sensitive<String>,
  /// Postgres is optional when the server runs with an in-memory store.
  pub db: Option<super::Database>,
  #[serde(default)]
  pub logging: super::Logging,
}

impl Validate for Server {
  fn validate(&self) -> std::result::Result<(), ValidateError> {
    let mut fields = ValidateError::field_builder();

    let mut secret_key = ValidateError::msg_builder();
    if !validate_length(self.secret_key.as_str(), Some(12), Some(1024)) {
      secret_key.insert("Invalid secret key");
    }
    fields.insert("secret_key", secret_key.build());

    if let Some(Err(error)) = self.db.as_ref().map(Validate::validate) {
      fields.insert("db", error);
    }
    fields.build().into_result()
  }
}

impl Server {
  pub fn load() -> Result<Self, ParseError> {
    dotenvy::dotenv().ok();

    let config = Self::figment()
      .extract::<Self>()
      .map_err(|e| Report::new(ParseError).attach_figment_error(e))?;

    config
      .validate()
      .into_validator_report()
      .change_context(ParseError)?;

    Ok(config)
  }

  #[must_use]
  pub fn workers(&self) -> usize {
    self
      .workers
      .or_else(|| std::thread::available_parallelism().ok())
      .map_or(1, NonZeroUsize::get)
  }

  /// Whether the call for proposals machinery (registration, login
  /// and submission) can be used right now.
  #[must_use]
  pub fn is_call_reachable(&self) -> bool {
    !self.maintenance && (self.call_open || self.reviewing_allowed)
  }
}

impl Server {
  const DEFAULT_CONFIG_FILE: &'static str = "cfp.toml";
  const DEFAULT_PORT: u16 = 8000;
  const DEFAULT_YEAR: u16 = 2018;

  const fn default_ip() -> IpAddr {
    IpAddr::V4(Ipv4Addr::LOCALHOST)
  }

  const fn default_port() -> u16 {
    Self::DEFAULT_PORT
  }

  const fn default_year() -> u16 {
    Self::DEFAULT_YEAR
  }

  const fn default_call_open() -> bool {
    true
  }

  /// Creates a default [`Figment`] object to load server
  /// configuration. This function is there for testing.
  ///
  /// [`Figment`]: figment::Figment
  pub(crate) fn figment() -> figment::Figment {
    use figment::{
      providers::{Env, Format, Toml},
      Figment,
    };

    Figment::new()
      .merge(Toml::file(Self::DEFAULT_CONFIG_FILE))
      // Fields with underscores in them have to be mapped by
      // hand, the rest are split into nested keys.
      .merge(Env::prefixed("CFP_").map(|v| match v.as_str() {
        "CALL_OPEN" => "call_open".into(),
        "REVIEWING_ALLOWED" => "reviewing_allowed".into(),
        "SECRET_KEY" => "secret_key".into(),

        "DB_PRIMARY_MIN_IDLE" => "db.primary.min_idle".into(),
        "DB_PRIMARY_POOL_SIZE" => "db.primary.pool_size".into(),

        "DB_REPLICA_MIN_IDLE" => "db.replica.min_idle".into(),
        "DB_REPLICA_POOL_SIZE" => "db.replica.pool_size".into(),

        "DB_ENFORCE_TLS" => "db.enforce_tls".into(),
        "DB_TIMEOUT_SECS" => "db.timeout_secs".into(),

        _ => v.as_str().replace('_', ".").into(),
      }))
      // Environment variable aliases
      .merge(
        Env::raw()
          .only(&["DATABASE_URL", "SECRET_KEY"])
          .map(|v| match v.as_str() {
            "DATABASE_URL" => "db.primary.url".into(),
            _ => v.into(),
          }),
      )
  }

  #[cfg(test)]
  pub(crate) fn for_tests() -> Self {
    Self {
      ip: Self::default_ip(),
      port: Self::default_port(),
      workers: None,
      year: Self::default_year(),
      maintenance: false,
      call_open: true,
      reviewing_allowed: false,
      secret_key: "a very secret test key".into(),
      db: None,
      logging: super::Logging::default(),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use figment::Jail;
  use std::num::{NonZeroU32, NonZeroU64};

  #[test]
  fn test_defaults() {
    Jail::expect_with(|jail| {
      jail.set_env("SECRET_KEY", "hello world! hello world!");

      let config: Server = Server::figment().extract()?;
      assert_eq!(config.ip, Server::default_ip());
      assert_eq!(config.port, 8000);
      assert_eq!(config.year, 2018);
      assert!(!config.maintenance);
      assert!(config.call_open);
      assert!(!config.reviewing_allowed);
      assert_eq!(config.logging.targets, "info");
      assert!(config.validate().is_ok());

      Ok(())
    });
  }

  #[test]
  fn test_toml_file() {
    Jail::expect_with(|jail| {
      jail.create_file(
        "cfp.toml",
        r#"
          port = 9000
          year = 2019
          call_open = false
          reviewing_allowed = true
          secret_key = "short"
        "#,
      )?;

      let config: Server = Server::figment().extract()?;
      assert_eq!(config.port, 9000);
      assert_eq!(config.year, 2019);
      assert!(!config.call_open);
      assert!(config.is_call_reachable());

      let Err(ValidateError::Fields(fields)) = config.validate() else {
        panic!("short secret key should be rejected");
      };
      assert!(fields.contains_key("secret_key"));

      Ok(())
    });
  }

  #[test]
  fn test_env_aliases() {
    Jail::expect_with(|jail| {
      jail.set_env("DATABASE_URL", "hello world!");
      jail.set_env("CFP_SECRET_KEY", "hello world! hello world!");
      jail.set_env("CFP_CALL_OPEN", "false");
      jail.set_env("CFP_MAINTENANCE", "true");
      jail.set_env("CFP_LOGGING_TARGETS", "cfp=debug");

      jail.set_env("CFP_DB_PRIMARY_MIN_IDLE", "100");
      jail.set_env("CFP_DB_PRIMARY_POOL_SIZE", "100");

      jail.set_env("CFP_DB_REPLICA_URL", "required");
      jail.set_env("CFP_DB_REPLICA_MIN_IDLE", "589");
      jail.set_env("CFP_DB_REPLICA_POOL_SIZE", "589");

      jail.set_env("CFP_DB_ENFORCE_TLS", "false");
      jail.set_env("CFP_DB_TIMEOUT_SECS", "3030");

      let config: Server = Server::figment().extract()?;
      assert_eq!(config.secret_key.as_str(), "hello world! hello world!");
      assert!(!config.call_open);
      assert!(config.maintenance);
      assert!(!config.is_call_reachable());
      assert_eq!(config.logging.targets, "cfp=debug");

      let db = config.db.as_ref().unwrap();
      assert_eq!(db.primary.url.as_str(), "hello world!");
      assert_eq!(db.primary.min_idle.unwrap(), NonZeroU32::new(100).unwrap());
      assert_eq!(db.primary.pool_size, NonZeroU32::new(100).unwrap());

      let replica = db.replica.as_ref().unwrap();
      assert_eq!(replica.url.as_str(), "required");
      assert_eq!(replica.min_idle.unwrap(), NonZeroU32::new(589).unwrap());
      assert_eq!(replica.pool_size, NonZeroU32::new(589).unwrap());

      assert!(!db.enforce_tls);
      assert_eq!(db.timeout_secs, NonZeroU64::new(3030).unwrap());

      Ok(())
    });
  }
}
