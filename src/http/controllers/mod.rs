use actix_web::{http::header, middleware::DefaultHeaders, web, HttpResponse};
use thiserror::Error;

use crate::{http::Error, types};

pub mod index;
pub mod schedule;
pub mod submit;
pub mod users;


pub fn configure(cfg: &mut web::ServiceConfig) {
  cfg
    .route("/", web::get().to(index::index))
    .service(
      web::resource("/register")
        .route(web::get().to(users::register_form))
        .route(web::post().to(users::register)),
    )
    .service(
      web::resource("/login")
        .route(web::get().to(users::login_form))
        .route(web::post().to(users::login)),
    )
    .route("/logout", web::get().to(users::logout))
    .service(
      web::resource("/submit")
        .route(web::get().to(submit::submit_form))
        .route(web::post().to(submit::submit)),
    )
    // Read by the schedule viewer, which lives on another origin.
    .service(
      web::resource("/presentations")
        .wrap(DefaultHeaders::new().add((header::ACCESS_CONTROL_ALLOW_ORIGIN, "*")))
        .route(web::get().to(schedule::presentations)),
    )
    .service(
      web::resource("/presenters")
        .wrap(DefaultHeaders::new().add((header::ACCESS_CONTROL_ALLOW_ORIGIN, "*")))
        .route(web::get().to(schedule::presenters)),
    )
    .default_service(web::to(not_found));
}

async fn not_found() -> Result<HttpResponse, Error> {
  #[derive(Debug, Error)]
  #[error("No route matches the request")]
  struct NoRoute;
  Err(Error::from_context(types::Error::NotFound, NoRoute))
}
