//! Identity mode of the client

use crate::EntityKey;

/// Which identity the client is operating as.
///
/// A credential and an identity token can never be held at the same time.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionMode {
    #[default]
    Unresolved,
    /// Privileged observer holding the admin credential
    Admin { credential: String },
    /// Participant identified by its entity key
    User { token: EntityKey },
}

impl SessionMode {
    pub fn admin(credential: impl Into<String>) -> Self {
        Self::Admin {
            credential: credential.into(),
        }
    }

    pub fn user(token: impl Into<EntityKey>) -> Self {
        Self::User {
            token: token.into(),
        }
    }

    /// True for `Admin` and `User`
    pub fn is_active(&self) -> bool {
        !matches!(self, Self::Unresolved)
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin { .. })
    }

    pub fn credential(&self) -> Option<&str> {
        match self {
            Self::Admin { credential } => Some(credential),
            _ => None,
        }
    }

    pub fn identity_token(&self) -> Option<&EntityKey> {
        match self {
            Self::User { token } => Some(token),
            _ => None,
        }
    }
}

// Keep credentials out of logs.
impl std::fmt::Display for SessionMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unresolved => f.write_str("unresolved"),
            Self::Admin { .. } => f.write_str("admin"),
            Self::User { token } => write!(f, "user({token})"),
        }
    }
}
