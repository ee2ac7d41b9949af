//! Request and response bodies of the `web` module.

use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use crate::model::SubscribeOutcome;

// ###################################
// ->   STRUCTS
// ###################################
/// Deserializable subscribe request.
/// `email` stays optional so a missing field can be told apart from an invalid one.
#[derive(Debug, Deserialize)]
pub struct SubscribeRequest {
    pub email: Option<String>,
}

/// Body of every `/api/subscribe` response, errors included.
#[skip_serializing_none]
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SubscribeResponse {
    pub success: bool,
    pub message: String,
    pub total: Option<usize>,
}

impl SubscribeResponse {
    pub fn failure(message: impl Into<String>) -> Self {
        SubscribeResponse {
            success: false,
            message: message.into(),
            total: None,
        }
    }
}

impl From<SubscribeOutcome> for SubscribeResponse {
    fn from(outcome: SubscribeOutcome) -> Self {
        match outcome {
            SubscribeOutcome::Accepted { total } => SubscribeResponse {
                success: true,
                message: "Successfully subscribed".to_string(),
                total: Some(total),
            },
            SubscribeOutcome::AlreadySubscribed => Self::failure("Email already subscribed"),
        }
    }
}
