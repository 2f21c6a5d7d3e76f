use actix_web::{body::BoxBody, http::StatusCode, HttpResponse};
use error_stack::Report;

use super::Error;
use crate::{database, types::Error as ErrorType};

impl actix_web::ResponseError for Error {
  fn status_code(&self) -> StatusCode {
    match self.error_type {
      ErrorType::Internal => StatusCode::INTERNAL_SERVER_ERROR,
      ErrorType::InvalidBody => StatusCode::BAD_REQUEST,
      ErrorType::NotFound => StatusCode::NOT_FOUND,
      ErrorType::ReadonlyMode => StatusCode::SERVICE_UNAVAILABLE,
    }
  }

  fn error_response(&self) -> HttpResponse<BoxBody> {
    if self.status_code().is_server_error() {
      tracing::error!(error = %self, "request failed");
    }
    HttpResponse::build(self.status_code()).json(&self.error_type)
  }
}

impl From<Report<database::Error>> for Error {
  fn from(value: Report<database::Error>) -> Self {
    match value.current_context() {
      database::Error::Readonly => Error::from_report(ErrorType::ReadonlyMode, value),
      _ => Error::from_report(ErrorType::Internal, value),
    }
  }
}

impl From<tera::Error> for Error {
  fn from(value: tera::Error) -> Self {
    Error::from_context(ErrorType::Internal, value)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use actix_web::ResponseError;

  #[test]
  fn test_database_errors() {
    let error = Error::from(Report::new(database::Error::Readonly));
    assert_eq!(error.as_type(), &ErrorType::ReadonlyMode);
    assert_eq!(error.status_code(), StatusCode::SERVICE_UNAVAILABLE);
    assert!(error.downcast_ref::<database::Error>().is_some());

    let error = Error::from(Report::new(database::Error::UnhealthyPool));
    assert_eq!(error.as_type(), &ErrorType::Internal);
    assert_eq!(error.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
  }
}
