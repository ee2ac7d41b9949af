use std::sync::Arc;

use axum::{
    http::{HeaderMap, Method, Uri},
    response::{IntoResponse, Response},
    Json,
};
use uuid::Uuid;

use crate::web::{log, types::SubscribeResponse, Error, REQUEST_ID_HEADER};

/// Turns a `web::Error` stashed in the response extensions into the JSON body the client sees
/// and logs the request.
pub async fn response_mapper(
    req_method: Method,
    uri: Uri,
    req_headers: HeaderMap,
    resp: Response,
) -> Response {
    let uuid = req_headers
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| Uuid::parse_str(v).ok())
        .unwrap_or_else(Uuid::new_v4);

    let web_error = resp.extensions().get::<Arc<Error>>().map(Arc::as_ref);
    let client_status_and_error = web_error.map(Error::status_code_and_client_error);

    let status = client_status_and_error
        .as_ref()
        .map(|(status, _)| *status)
        .unwrap_or(resp.status());

    log::log_request(
        &uuid,
        &req_method,
        &uri,
        status,
        web_error,
        client_status_and_error.as_ref().map(|(_, ce)| ce),
    );

    let err_resp = client_status_and_error.map(|(status, cl_err)| {
        let client_error_body = SubscribeResponse::failure(cl_err.to_string());
        (status, Json(client_error_body)).into_response()
    });

    err_resp.unwrap_or(resp)
}
