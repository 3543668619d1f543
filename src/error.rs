use std::io::Cursor;

use rocket::{
    http::{ContentType, Status},
    response::Responder,
    serde::json::serde_json::json,
    Request, Response,
};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Request-level failures, rendered as the standard response envelope by the
/// [`Responder`] impl below.
#[derive(Debug, Error)]
pub enum Error {
    /// Required input was missing from the request.
    #[error("{0}")]
    BadRequest(String),
    /// Credential or code mismatch. The message never reveals which check
    /// failed.
    #[error("{0}")]
    Unauthorized(String),
    /// The voter's state forbids the operation.
    #[error("{0}")]
    Forbidden(String),
    #[error(transparent)]
    Db(#[from] mongodb::error::Error),
    #[error(transparent)]
    Jwt(#[from] jsonwebtoken::errors::Error),
    #[error(transparent)]
    Roster(#[from] csv::Error),
    #[error("{0}")]
    ObjectStore(String),
}

impl Error {
    pub fn status(&self) -> Status {
        match self {
            Self::BadRequest(_) => Status::BadRequest,
            Self::Unauthorized(_) => Status::Unauthorized,
            Self::Forbidden(_) => Status::Forbidden,
            Self::Db(_) | Self::Jwt(_) | Self::Roster(_) | Self::ObjectStore(_) => {
                Status::InternalServerError
            }
        }
    }
}

impl<'r, 'o: 'r> Responder<'r, 'o> for Error {
    /// Every error becomes `{"success": false, "message": <error>}` with the
    /// mapped status code.
    fn respond_to(self, _: &'r Request<'_>) -> rocket::response::Result<'o> {
        let status = self.status();
        if status == Status::InternalServerError {
            error!("{self}");
        }
        let body = json!({
            "success": false,
            "message": self.to_string(),
        })
        .to_string();
        Response::build()
            .status(status)
            .header(ContentType::JSON)
            .sized_body(body.len(), Cursor::new(body))
            .ok()
    }
}
