//! Service layer error types

use thiserror::Error;

use crate::ports::outbound::ApiError;

/// Rejected interactive login input. Shown inline; no request is made.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum LoginError {
    #[error("Password required")]
    EmptyCredential,
    #[error("Entity key required")]
    EmptyToken,
}

/// Errors that can occur in service operations
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ServiceError {
    /// Operation needs the admin credential
    #[error("Admin session required")]
    NotAuthorized,

    /// The session changed while the request was in flight; the result was dropped
    #[error("Session changed before the response arrived")]
    Superseded,

    #[error(transparent)]
    Api(#[from] ApiError),
}
