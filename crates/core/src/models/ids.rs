use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::SlotError;

/// Longest identifier accepted from clients or storage.
pub const MAX_ID_LEN: usize = 225;

/// Length of identifiers minted by [`OperatorId::generate`] and [`BookingId::generate`].
pub const GENERATED_ID_LEN: usize = 24;

fn validate_id(kind: &str, raw: &str) -> Result<(), SlotError> {
    if raw.is_empty() {
        return Err(SlotError::Validation(format!("{kind} must not be empty")));
    }
    if raw.len() > MAX_ID_LEN {
        return Err(SlotError::Validation(format!(
            "{kind} must be at most {MAX_ID_LEN} characters"
        )));
    }
    if !raw
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(SlotError::Validation(format!(
            "{kind} may only contain ASCII letters, digits, '-' and '_'"
        )));
    }
    Ok(())
}

// The decimal form of a v4 UUID always has at least 24 digits because the
// version nibble sits above bit 76.
fn generate_numeric_id() -> String {
    Uuid::new_v4()
        .as_u128()
        .to_string()
        .chars()
        .take(GENERATED_ID_LEN)
        .collect()
}

macro_rules! opaque_id {
    ($(#[$meta:meta])* $name:ident, $kind:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Mints a fresh random identifier.
            pub fn generate() -> Self {
                Self(generate_numeric_id())
            }

            /// Validates and wraps a raw identifier.
            pub fn parse(raw: impl Into<String>) -> Result<Self, SlotError> {
                let raw = raw.into();
                validate_id($kind, &raw)?;
                Ok(Self(raw))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = SlotError;

            fn try_from(raw: String) -> Result<Self, Self::Error> {
                Self::parse(raw)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

opaque_id!(
    /// Identifier of a registered operator.
    OperatorId,
    "operator_id"
);

opaque_id!(
    /// Identifier of a booking record.
    BookingId,
    "booking_id"
);
