//! Decides which identity the client runs as.

use std::sync::Arc;

use goldrush_domain::{EntityKey, SessionMode, UserStatus};
use tracing::{info, warn};

use crate::application::error::LoginError;
use crate::ports::outbound::{ApiError, GameApiPort};

/// Which field of the login form was filled in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoginKind {
    #[default]
    Admin,
    User,
}

/// Turn interactive login input into a session mode.
///
/// No network call is made. A user token is accepted as-is and validated
/// lazily by the first status fetch.
pub fn resolve_login(kind: LoginKind, input: &str) -> Result<SessionMode, LoginError> {
    match kind {
        LoginKind::Admin if input.trim().is_empty() => Err(LoginError::EmptyCredential),
        LoginKind::Admin => Ok(SessionMode::admin(input)),
        LoginKind::User => {
            let token = input.trim();
            if token.is_empty() {
                return Err(LoginError::EmptyToken);
            }
            Ok(SessionMode::user(token))
        }
    }
}

/// Outcome of the startup identity check
#[derive(Debug, Clone, PartialEq)]
pub enum StartupResolution {
    /// No token was supplied
    Anonymous,
    /// The token was accepted; its status seeds the user view
    Validated {
        mode: SessionMode,
        status: UserStatus,
    },
    /// The token was rejected or the backend was unreachable. Not retried.
    Rejected { token: EntityKey, error: ApiError },
}

/// Validates an identity token supplied out-of-band (deep link, page query).
#[derive(Clone)]
pub struct ModeResolver {
    api: Arc<dyn GameApiPort>,
}

impl ModeResolver {
    pub fn new(api: Arc<dyn GameApiPort>) -> Self {
        Self { api }
    }

    /// Make exactly one status request for `token`, if there is one.
    pub async fn resolve_startup(&self, token: Option<EntityKey>) -> StartupResolution {
        let Some(token) = token.filter(|t| !t.as_str().trim().is_empty()) else {
            return StartupResolution::Anonymous;
        };

        match self.api.fetch_status(&token).await {
            Ok(status) => {
                info!(entity_key = %token, "Identity token accepted");
                StartupResolution::Validated {
                    mode: SessionMode::User { token },
                    status,
                }
            }
            Err(error) => {
                warn!(entity_key = %token, error = %error, "Identity token rejected");
                StartupResolution::Rejected { token, error }
            }
        }
    }
}
