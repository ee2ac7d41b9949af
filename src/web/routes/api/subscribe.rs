use axum::{body::Bytes, extract::State, Json};
use tracing::debug;

use crate::{
    web::{
        types::{SubscribeRequest, SubscribeResponse},
        Error, WebResult,
    },
    AppState,
};

// ###################################
// ->   API
// ###################################
/// Adds the posted email to the newsletter list.
///
/// A duplicate is not an error: it answers `200` with `success: false`.
/// The body is read as JSON whatever `Content-Type` the caller sent.
/// A body that can't be decoded is treated like a missing email.
#[tracing::instrument(
    name = "Subscribing to the newsletter",
    skip(app_state, body),
    fields(subscriber_email = tracing::field::Empty)
)]
pub async fn subscribe(
    State(app_state): State<AppState>,
    body: Bytes,
) -> WebResult<Json<SubscribeResponse>> {
    let request: SubscribeRequest = serde_json::from_slice(&body).map_err(|er| {
        debug!("{:<20} - body rejected: {er}", "subscribe");
        Error::BodyRejected(er.to_string())
    })?;

    if let Some(email) = request.email.as_deref() {
        tracing::Span::current().record("subscriber_email", email.trim());
    }

    let outcome = app_state
        .model_mgr
        .subscribe(request.email.as_deref())
        .await?;

    Ok(Json(outcome.into()))
}

/// Every method other than `POST` on the subscribe route ends up here.
pub async fn method_not_allowed() -> WebResult<()> {
    Err(Error::MethodNotAllowed)
}
