use actix_web::{
  web::{self, Bytes},
  HttpResponse,
};
use serde_json::json;
use validator::Validate;

use crate::{
  http::{body, gate, templates, Error, Outcome, Session},
  store::CreateUser,
  types::{enums::Role, form::users::register, validation::countries},
  util::hash_passphrase,
  App,
};

#[tracing::instrument(skip_all)]
pub async fn register_form(app: web::Data<App>, session: Session) -> Result<HttpResponse, Error> {
  if let Some(redirect) = gate::check_route(&app.config) {
    return Ok(redirect);
  }

  let year = app.config.year;
  templates::render(
    &app,
    &session,
    "register.html",
    json!({
      "title": format!("Register for ACCU {year}"),
      "countries": countries(),
    }),
  )
}

#[tracing::instrument(skip_all)]
pub async fn register(
  app: web::Data<App>,
  body: Bytes,
) -> Result<HttpResponse, Error> {
  if let Some(redirect) = gate::check_route(&app.config) {
    return Ok(redirect);
  }

  let form: register::Request = body::from_json(&body)?;
  if let Err(errors) = form.validate() {
    return Ok(Outcome::invalid(errors).into());
  }

  let passphrase = hash_passphrase(form.passphrase.as_str());
  let user = app
    .store
    .create_user(&CreateUser {
      email: form.email.trim(),
      passphrase: &passphrase,
      name: form.name.trim(),
      role: Role::User,
      street_address: form.street_address.trim(),
      town_city: form.town_city.trim(),
      state: form.state(),
      postal_code: form.postal_code.trim(),
      country: form.country.trim(),
      phone: form.phone(),
    })
    .await?;

  let Some(user) = user else {
    return Ok(Outcome::failure("The email address is already registered.").into());
  };
  tracing::info!(id = %user.id, "user registered");

  let year = app.config.year;
  Ok(
    Outcome::success(format!(
      "You have successfully registered for submitting proposals for ACCU {year}."
    ))
    .redirect("/login")
    .into(),
  )
}
