use serde::{Deserialize, Serialize};

use crate::EngineError;

/// Role of a user account.
///
/// The server treats roles as:
/// - `admin`: sees and mutates every order, manages account activation.
/// - `user`: sees and mutates only its own orders.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Admin,
    User,
}

impl UserRole {
    /// Returns the canonical role string stored in the database.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::User => "user",
        }
    }
}

impl TryFrom<&str> for UserRole {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "admin" => Ok(Self::Admin),
            "user" => Ok(Self::User),
            other => Err(EngineError::InvalidInput(format!(
                "invalid user role: {other}"
            ))),
        }
    }
}
