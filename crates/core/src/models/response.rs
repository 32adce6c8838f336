use serde::{Deserialize, Serialize};

/// Body shared by every response: a numeric status mirroring the HTTP
/// status, a human-readable message, and the endpoint's own fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    #[serde(rename = "sCode")]
    pub s_code: u16,
    pub message: String,
    #[serde(flatten)]
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            s_code: 200,
            message: message.into(),
            data,
        }
    }
}

/// Payload for responses that carry nothing beyond status and message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoData {}
