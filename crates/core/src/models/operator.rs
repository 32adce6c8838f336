use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::SlotError;
use crate::models::ids::OperatorId;

/// Longest operator name accepted at registration.
pub const MAX_OPERATOR_NAME_LEN: usize = 225;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Operator {
    pub id: OperatorId,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateOperatorRequest {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateOperatorResponse {
    pub operator_id: OperatorId,
}

/// Trims a requested operator name and checks its length.
pub fn normalize_operator_name(raw: &str) -> Result<String, SlotError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(SlotError::Validation("name must not be blank".to_string()));
    }
    if name.chars().count() > MAX_OPERATOR_NAME_LEN {
        return Err(SlotError::Validation(format!(
            "name must be at most {MAX_OPERATOR_NAME_LEN} characters"
        )));
    }
    Ok(name.to_string())
}
