use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use strum_macros::AsRefStr;

use crate::model;

pub type WebResult<T> = core::result::Result<T, Error>;

#[derive(Debug, AsRefStr, thiserror::Error)]
pub enum Error {
    #[error("request body could not be decoded: {0}")]
    BodyRejected(String),
    #[error("method not allowed")]
    MethodNotAllowed,

    #[error("model error: {0}")]
    Model(#[from] model::Error),
}

impl Error {
    pub fn status_code_and_client_error(&self) -> (StatusCode, ClientError) {
        use ClientError::*;

        match self {
            Error::BodyRejected(_) | Error::Model(model::Error::EmailMissing) => {
                (StatusCode::BAD_REQUEST, EmailRequired)
            }
            Error::Model(model::Error::EmailInvalid(_)) => (StatusCode::BAD_REQUEST, InvalidEmail),
            Error::MethodNotAllowed => (StatusCode::METHOD_NOT_ALLOWED, MethodNotAllowed),
            Error::Model(model::Error::Load(_)) => {
                (StatusCode::INTERNAL_SERVER_ERROR, StorageReadFailed)
            }
            Error::Model(model::Error::Save(_)) => {
                (StatusCode::INTERNAL_SERVER_ERROR, StorageWriteFailed)
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        tracing::debug!("{:<12} - into_response(Error: {self:?})", "INTO_RESP");

        // Construct a response
        let mut res = StatusCode::INTERNAL_SERVER_ERROR.into_response();

        // Insert the Error into response so that the response mapper can build the client body.
        res.extensions_mut().insert(Arc::new(self));

        res
    }
}

/// What the caller gets to see, the `Display` output is the `message` of the response body.
#[derive(Debug, AsRefStr, derive_more::Display)]
pub enum ClientError {
    #[display("Email is required")]
    EmailRequired,
    #[display("Invalid email format")]
    InvalidEmail,
    #[display("Method not allowed")]
    MethodNotAllowed,
    #[display("Failed to load subscriptions")]
    StorageReadFailed,
    #[display("Failed to save subscription")]
    StorageWriteFailed,
}
