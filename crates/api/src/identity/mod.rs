//! Identity verification and password sign-in.
//!
//! The service never issues credentials itself. A bearer token is handed to
//! an [`IdentityProvider`], which either returns the stable user id it was
//! issued for or fails with [`CoreError::Unauthorized`]. Every rejection
//! carries the same message, so callers cannot tell an expired token from a
//! forged or malformed one.
//!
//! - [`firebase`] -- Firebase ID tokens and the password sign-in endpoint.
//! - [`static_tokens`] -- fixed tokens for tests and local development.

pub mod firebase;
pub mod static_tokens;

use std::sync::Arc;

use async_trait::async_trait;
use poopyrus_core::error::CoreError;
use poopyrus_core::types::OwnerId;
use serde::Serialize;

pub use firebase::FirebaseIdentity;
pub use static_tokens::StaticIdentity;

/// Shared identity provider handle held in application state.
pub type SharedIdentity = Arc<dyn IdentityProvider>;

/// A successful password sign-in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignIn {
    pub access_token: String,
    /// Token lifetime in seconds.
    pub expires_in: i64,
}

#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Exchange a bearer credential for the user id it was issued to.
    async fn verify(&self, token: &str) -> Result<OwnerId, CoreError>;

    /// Forward email/password credentials to the provider's sign-in endpoint.
    async fn sign_in(&self, email: &str, password: &str) -> Result<SignIn, CoreError>;
}
