use actix_web::{http::header, HttpResponse};

use crate::config;

/// Sends visitors back to the home page while the call machinery
/// is closed or the site is under maintenance.
#[must_use]
pub fn check_route(config: &config::Server) -> Option<HttpResponse> {
  if config.is_call_reachable() {
    None
  } else {
    Some(redirect("/"))
  }
}

#[must_use]
pub fn redirect(location: &str) -> HttpResponse {
  HttpResponse::Found()
    .insert_header((header::LOCATION, location))
    .finish()
}
