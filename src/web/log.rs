use axum::http::{Method, StatusCode, Uri};
use serde::Serialize;
use serde_json::json;
use serde_with::skip_serializing_none;
use tracing::{error, info};
use uuid::Uuid;

use super::error::ClientError;
use crate::web::Error;

/// Emits one structured line per request, at `error` level for server errors.
pub fn log_request(
    uuid: &Uuid,
    req_method: &Method,
    uri: &Uri,
    status_code: StatusCode,
    web_error: Option<&Error>,
    client_error: Option<&ClientError>,
) {
    let logline = LogLine {
        timestamp: chrono::Utc::now().to_rfc3339(),
        uuid: uuid.to_string(),
        req_method: req_method.to_string(),
        uri: uri.to_string(),
        status_code: status_code.as_u16(),
        client_error_type: client_error.map(|ce| ce.as_ref().to_string()),
        web_error_type: web_error.map(|we| we.as_ref().to_string()),
        web_error_detail: web_error.map(|we| we.to_string()),
    };

    if status_code.is_server_error() {
        error!("LOGLINE: {}", json!(logline));
    } else {
        info!("LOGLINE: {}", json!(logline));
    }
}

#[skip_serializing_none]
#[derive(Serialize)]
struct LogLine {
    timestamp: String,
    uuid: String,

    req_method: String,
    uri: String,
    status_code: u16,

    client_error_type: Option<String>,
    web_error_type: Option<String>,
    web_error_detail: Option<String>,
}
