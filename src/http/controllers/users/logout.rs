use actix_web::{http::header, HttpResponse};

use crate::http::Session;

pub async fn logout() -> HttpResponse {
  HttpResponse::Found()
    .insert_header((header::LOCATION, "/"))
    .cookie(Session::removal_cookie())
    .finish()
}
