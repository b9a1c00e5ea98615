//! Fixed-token identity provider.
//!
//! Maps known bearer tokens to user ids and known email/password pairs to
//! tokens. Used by the integration tests and by `IDENTITY_BACKEND=static`
//! for running the API without an external provider.

use std::collections::HashMap;

use async_trait::async_trait;
use poopyrus_core::error::CoreError;
use poopyrus_core::types::OwnerId;

use super::{IdentityProvider, SignIn};

/// Lifetime reported for static sign-ins, matching Firebase ID tokens.
const STATIC_EXPIRES_IN: i64 = 3600;

/// Configuration for the static provider.
#[derive(Debug, Clone)]
pub struct StaticConfig {
    pub token: String,
    pub user_id: String,
    pub email: Option<String>,
    pub password: Option<String>,
}

impl StaticConfig {
    /// Load static provider configuration from environment variables.
    ///
    /// | Env Var           | Required | Default      |
    /// |-------------------|----------|--------------|
    /// | `STATIC_TOKEN`    | **yes**  | --           |
    /// | `STATIC_USER_ID`  | no       | `local-user` |
    /// | `STATIC_EMAIL`    | no       | --           |
    /// | `STATIC_PASSWORD` | no       | --           |
    ///
    /// # Panics
    ///
    /// Panics if `STATIC_TOKEN` is not set or is empty.
    pub fn from_env() -> Self {
        let token = std::env::var("STATIC_TOKEN").expect("STATIC_TOKEN must be set");
        assert!(!token.is_empty(), "STATIC_TOKEN must not be empty");

        Self {
            token,
            user_id: std::env::var("STATIC_USER_ID").unwrap_or_else(|_| "local-user".into()),
            email: std::env::var("STATIC_EMAIL").ok(),
            password: std::env::var("STATIC_PASSWORD").ok(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct StaticIdentity {
    tokens: HashMap<String, OwnerId>,
    accounts: HashMap<String, (String, String)>,
}

impl StaticIdentity {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept `token` as a credential for `user_id`.
    pub fn with_token(mut self, token: impl Into<String>, user_id: impl Into<String>) -> Self {
        self.tokens.insert(token.into(), user_id.into());
        self
    }

    /// Let `email`/`password` sign in and receive `token`.
    pub fn with_account(
        mut self,
        email: impl Into<String>,
        password: impl Into<String>,
        token: impl Into<String>,
    ) -> Self {
        self.accounts
            .insert(email.into(), (password.into(), token.into()));
        self
    }

    pub fn from_config(config: &StaticConfig) -> Self {
        let identity = Self::new().with_token(config.token.clone(), config.user_id.clone());
        match (&config.email, &config.password) {
            (Some(email), Some(password)) => {
                identity.with_account(email.clone(), password.clone(), config.token.clone())
            }
            _ => identity,
        }
    }
}

#[async_trait]
impl IdentityProvider for StaticIdentity {
    async fn verify(&self, token: &str) -> Result<OwnerId, CoreError> {
        self.tokens
            .get(token)
            .cloned()
            .ok_or_else(CoreError::unauthorized)
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<SignIn, CoreError> {
        match self.accounts.get(email) {
            Some((expected, token)) if expected == password => Ok(SignIn {
                access_token: token.clone(),
                expires_in: STATIC_EXPIRES_IN,
            }),
            _ => Err(CoreError::unauthorized()),
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn identity() -> StaticIdentity {
        StaticIdentity::new()
            .with_token("good", "user-1")
            .with_account("a@example.com", "hunter2", "good")
    }

    #[tokio::test]
    async fn known_token_maps_to_user() {
        assert_eq!(identity().verify("good").await.unwrap(), "user-1");
    }

    #[tokio::test]
    async fn unknown_and_empty_tokens_fail_identically() {
        let a = identity().verify("BAD_TOKEN").await.unwrap_err();
        let b = identity().verify("").await.unwrap_err();
        assert_eq!(a.to_string(), b.to_string());
        assert_matches!(a, CoreError::Unauthorized(_));
    }

    #[tokio::test]
    async fn sign_in_checks_password() {
        let ok = identity().sign_in("a@example.com", "hunter2").await.unwrap();
        assert_eq!(ok.access_token, "good");
        assert_eq!(ok.expires_in, STATIC_EXPIRES_IN);

        assert_matches!(
            identity().sign_in("a@example.com", "wrong").await,
            Err(CoreError::Unauthorized(_))
        );
        assert_matches!(
            identity().sign_in("nobody@example.com", "hunter2").await,
            Err(CoreError::Unauthorized(_))
        );
    }

    #[test]
    fn from_config_registers_account_only_with_both_credentials() {
        let config = StaticConfig {
            token: "t".into(),
            user_id: "u".into(),
            email: Some("e@example.com".into()),
            password: None,
        };
        let identity = StaticIdentity::from_config(&config);
        assert!(identity.accounts.is_empty());
        assert_eq!(identity.tokens.get("t").map(String::as_str), Some("u"));
    }
}
