use actix_web::{
  web::{self, Bytes},
  HttpResponse,
};
use serde_json::{json, Value};

use crate::{
  http::{body, gate, templates, Error, Outcome, Session},
  types::{enums::SessionType, form::proposals::submit},
  App,
};

const MUST_LOG_IN: &str = "Must be logged in to submit a proposal.";

#[tracing::instrument(skip_all)]
pub async fn submit_form(app: web::Data<App>, session: Session) -> Result<HttpResponse, Error> {
  if let Some(redirect) = gate::check_route(&app.config) {
    return Ok(redirect);
  }

  let Some(user) = session.user() else {
    return templates::failure(&app, &session, "Submit", MUST_LOG_IN);
  };

  let year = app.config.year;
  templates::render(
    &app,
    &session,
    "submit.html",
    json!({
      "title": format!("Submit a proposal for ACCU {year}"),
      "name": user.name,
      "proposer": {
        "email": user.email,
        "name": user.name,
        "bio": submit::DEFAULT_BIO,
        "country": user.country,
        "state": user.state,
      },
      "session_types": SessionType::ALL
        .iter()
        .copied()
        .map(SessionType::as_str)
        .collect::<Vec<_>>(),
    }),
  )
}

#[tracing::instrument(skip_all)]
pub async fn submit(
  app: web::Data<App>,
  session: Session,
  body: Bytes,
) -> Result<HttpResponse, Error> {
  if let Some(redirect) = gate::check_route(&app.config) {
    return Ok(redirect);
  }

  let Some(user) = session.user() else {
    return templates::failure(&app, &session, "Submit", MUST_LOG_IN);
  };

  let data: Value = body::from_json(&body)?;
  let form = match submit::Request::from_json(&data) {
    Ok(form) => form,
    Err(rejection) => {
      tracing::debug!(reason = rejection.message(), "proposal rejected");
      return Ok(Outcome::failure(rejection.message().to_string()).into());
    }
  };

  let proposal = app.store.submit_proposal(user.id, &form).await?;
  tracing::info!(id = %proposal.id, "proposal submitted");

  let year = app.config.year;
  Ok(
    Outcome::success(format!(
      "Thank you, you have successfully submitted a proposal for the ACCU {year} conference!"
    ))
    .redirect("/")
    .into(),
  )
}
