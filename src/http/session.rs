//! Cookie based sessions.
//!
//! Logging in stores a signed token naming the user's email address
//! in the `session` cookie. [`Session`] resolves it back to a user.
use actix_web::{cookie::Cookie, cookie::SameSite, web, FromRequest};
use chrono::Utc;
use futures::future::{ready, LocalBoxFuture};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

use super::Error;
use crate::{schema::User, types, App};

pub const COOKIE_NAME: &str = "session";

#[derive(Debug, Deserialize, Serialize)]
struct Claims {
  email: String,
  iat: i64,
}

#[derive(Debug)]
pub enum Session {
  Anonymous,
  User(User),
}

impl Session {
  #[must_use]
  pub fn user(&self) -> Option<&User> {
    match self {
      Self::User(user) => Some(user),
      Self::Anonymous => None,
    }
  }

  #[must_use]
  pub fn is_logged_in(&self) -> bool {
    matches!(self, Self::User(..))
  }
}

impl Session {
  #[tracing::instrument(skip_all)]
  pub fn encode(email: &str, app: &App) -> Result<String, Error> {
    let header = Header::new(Algorithm::HS512);
    let claims = Claims {
      email: email.to_string(),
      iat: Utc::now().timestamp(),
    };
    let key = EncodingKey::from_secret(app.config.secret_key.as_bytes());
    jsonwebtoken::encode(&header, &claims, &key)
      .map_err(|e| Error::from_context(types::Error::Internal, e))
  }

  /// Returns the email address stored in a token if it has
  /// been signed with our secret key.
  #[tracing::instrument(skip_all)]
  pub fn decode(token: &str, app: &App) -> Option<String> {
    let key = DecodingKey::from_secret(app.config.secret_key.as_bytes());
    let mut validation = Validation::new(Algorithm::HS512);
    validation.validate_exp = false;
    validation.required_spec_claims = HashSet::new();

    jsonwebtoken::decode::<Claims>(token, &key, &validation)
      .ok()
      .map(|v| v.claims.email)
      .filter(|v| !v.is_empty())
  }

  #[must_use]
  pub fn cookie(token: String) -> Cookie<'static> {
    Cookie::build(COOKIE_NAME, token)
      .path("/")
      .http_only(true)
      .same_site(SameSite::Lax)
      .finish()
  }

  #[must_use]
  pub fn removal_cookie() -> Cookie<'static> {
    let mut cookie = Self::cookie(String::new());
    cookie.make_removal();
    cookie
  }
}

impl FromRequest for Session {
  type Error = Error;
  type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

  fn from_request(
    req: &actix_web::HttpRequest,
    _payload: &mut actix_web::dev::Payload,
  ) -> Self::Future {
    let Some(cookie) = req.cookie(COOKIE_NAME) else {
      return Box::pin(ready(Ok(Session::Anonymous)));
    };

    let Some(app) = req.app_data::<web::Data<App>>() else {
      #[derive(Debug, Error)]
      #[error("The web app has no available configuration")]
      struct NoConfig;
      return Box::pin(ready(Err(Error::from_context(
        types::Error::Internal,
        NoConfig,
      ))));
    };

    let app = app.clone();
    let Some(email) = Session::decode(cookie.value(), &app) else {
      return Box::pin(ready(Ok(Session::Anonymous)));
    };

    Box::pin(async move {
      if let Some(user) = app.store.find_user_by_email(&email).await? {
        Ok(Session::User(user))
      } else {
        Ok(Session::Anonymous)
      }
    })
  }
}
