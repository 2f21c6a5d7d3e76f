use actix_web::{
  web::{self, Bytes},
  HttpResponse,
};
use serde_json::json;

use crate::{
  http::{body, gate, templates, Error, Outcome, Session},
  types::form::users::login,
  util::passphrase::verify_passphrase,
  App,
};

#[tracing::instrument(skip_all)]
pub async fn login_form(app: web::Data<App>, session: Session) -> Result<HttpResponse, Error> {
  if let Some(redirect) = gate::check_route(&app.config) {
    return Ok(redirect);
  }

  let year = app.config.year;
  templates::render(
    &app,
    &session,
    "login.html",
    json!({ "title": format!("Login for ACCU {year}") }),
  )
}

#[tracing::instrument(skip_all)]
pub async fn login(app: web::Data<App>, body: Bytes) -> Result<HttpResponse, Error> {
  if let Some(redirect) = gate::check_route(&app.config) {
    return Ok(redirect);
  }

  let form: login::Request = body::from_json(&body)?;
  let user = app.store.find_user_by_email(form.email.trim()).await?;
  let user = user.filter(|v| verify_passphrase(form.passphrase.as_str(), &v.passphrase));
  let Some(user) = user else {
    return Ok(Outcome::failure("Email or passphrase is not correct").into());
  };

  let token = Session::encode(&user.email, &app)?;
  tracing::info!(id = %user.id, "user logged in");

  Ok(
    HttpResponse::Ok()
      .cookie(Session::cookie(token))
      .json(Outcome::success("Login successful").redirect("/")),
  )
}
