use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque key the backend hands out to a participant on registration.
///
/// Doubles as the participant's identity token for status lookups.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityKey(String);

impl EntityKey {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for EntityKey {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for EntityKey {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<EntityKey> for String {
    fn from(value: EntityKey) -> Self {
        value.0
    }
}
