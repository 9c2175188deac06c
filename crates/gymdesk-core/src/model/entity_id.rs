// ── Entity identity ──
//
// Backends hand out numeric ids on most deployments and string ids on a
// few. EntityId keeps whichever arrived so it round-trips unchanged into
// request paths and bodies.

use std::fmt;
use std::str::FromStr;

use gymdesk_api::ResourceId;
use serde::{Deserialize, Serialize};

/// Canonical identifier for a member or plan.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntityId {
    Number(i64),
    Text(String),
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => write!(f, "{s}"),
        }
    }
}

impl FromStr for EntityId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

impl From<i64> for EntityId {
    fn from(n: i64) -> Self {
        Self::Number(n)
    }
}

impl From<&str> for EntityId {
    fn from(s: &str) -> Self {
        let trimmed = s.trim();
        trimmed
            .parse::<i64>()
            .map_or_else(|_| Self::Text(trimmed.to_owned()), Self::Number)
    }
}

impl From<String> for EntityId {
    fn from(s: String) -> Self {
        Self::from(s.as_str())
    }
}

impl From<ResourceId> for EntityId {
    fn from(id: ResourceId) -> Self {
        match id {
            ResourceId::Number(n) => Self::Number(n),
            ResourceId::Text(s) => Self::Text(s),
        }
    }
}

impl From<&EntityId> for ResourceId {
    fn from(id: &EntityId) -> Self {
        match id {
            EntityId::Number(n) => Self::Number(*n),
            EntityId::Text(s) => Self::Text(s.clone()),
        }
    }
}
