use serde::{Deserialize, Serialize};

use crate::EngineError;

/// Lifecycle status of an order.
///
/// `Deleted` is a transition value only: requesting it removes the row,
/// so it is never observed at rest.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Received,
    Processing,
    Paused,
    Shipped,
    Deleted,
}

impl OrderStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Received => "received",
            Self::Processing => "processing",
            Self::Paused => "paused",
            Self::Shipped => "shipped",
            Self::Deleted => "deleted",
        }
    }
}

impl TryFrom<&str> for OrderStatus {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "received" => Ok(Self::Received),
            "processing" => Ok(Self::Processing),
            "paused" => Ok(Self::Paused),
            "shipped" => Ok(Self::Shipped),
            "deleted" => Ok(Self::Deleted),
            other => Err(EngineError::InvalidInput(format!(
                "invalid order status: {other}"
            ))),
        }
    }
}
