use actix_web::{web, HttpResponse};
use serde_json::json;

use crate::{
  http::{templates, Error, Session},
  App,
};

#[tracing::instrument(skip_all)]
pub async fn index(app: web::Data<App>, session: Session) -> Result<HttpResponse, Error> {
  let year = app.config.year;
  let data = if app.config.maintenance {
    "The site is undergoing maintenance, please come back later.".to_string()
  } else if app.config.call_open {
    format!("The call for proposals for ACCU {year} is open.")
  } else {
    format!("The call for proposals for ACCU {year} is closed.")
  };

  templates::render(
    &app,
    &session,
    "index.html",
    json!({ "title": format!("ACCU {year}"), "data": data }),
  )
}
