//! Firebase identity provider.
//!
//! ID tokens are RS256 JWTs signed by Google. Verification fetches the
//! published JWK set, picks the key named by the token's `kid`, and checks
//! signature, expiry, audience (the project id) and issuer. Password sign-in
//! is forwarded to the Identity Toolkit `signInWithPassword` endpoint.
//!
//! Every HTTP call carries a timeout; a provider that hangs is treated like
//! one that said no.

use std::time::Duration;

use async_trait::async_trait;
use jsonwebtoken::jwk::JwkSet;
use jsonwebtoken::{decode, decode_header, Algorithm, DecodingKey, Validation};
use poopyrus_core::error::CoreError;
use poopyrus_core::types::OwnerId;
use serde::Deserialize;

use super::{IdentityProvider, SignIn};

const DEFAULT_SIGN_IN_URL: &str =
    "https://identitytoolkit.googleapis.com/v1/accounts:signInWithPassword";

const DEFAULT_JWKS_URL: &str =
    "https://www.googleapis.com/service_accounts/v1/jwk/securetoken@system.gserviceaccount.com";

/// Default timeout for identity provider calls.
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Issuer prefix for Firebase ID tokens; the project id is appended.
const ISSUER_PREFIX: &str = "https://securetoken.google.com/";

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct FirebaseConfig {
    /// Google project id; the expected token audience.
    pub project_id: String,
    pub sign_in_url: String,
    /// Web API key appended to sign-in requests as `?key=`.
    pub sign_in_key: String,
    pub jwks_url: String,
    pub timeout_secs: u64,
}

impl FirebaseConfig {
    /// Load Firebase configuration from environment variables.
    ///
    /// | Env Var                   | Required | Default                       |
    /// |---------------------------|----------|-------------------------------|
    /// | `GOOGLE_PROJECT`          | **yes**  | --                            |
    /// | `GOOGLE_AUTH_SIGN_IN_KEY` | **yes**  | --                            |
    /// | `GOOGLE_AUTH_SIGN_IN_URL` | no       | Identity Toolkit endpoint     |
    /// | `GOOGLE_AUTH_JWKS_URL`    | no       | securetoken JWK set           |
    /// | `IDENTITY_TIMEOUT_SECS`   | no       | `10`                          |
    ///
    /// # Panics
    ///
    /// Panics if a required variable is missing or the timeout is not a number.
    pub fn from_env() -> Self {
        let project_id = std::env::var("GOOGLE_PROJECT").expect("GOOGLE_PROJECT must be set");
        let sign_in_key =
            std::env::var("GOOGLE_AUTH_SIGN_IN_KEY").expect("GOOGLE_AUTH_SIGN_IN_KEY must be set");

        let timeout_secs: u64 = std::env::var("IDENTITY_TIMEOUT_SECS")
            .unwrap_or_else(|_| DEFAULT_TIMEOUT_SECS.to_string())
            .parse()
            .expect("IDENTITY_TIMEOUT_SECS must be a valid u64");

        Self {
            project_id,
            sign_in_url: std::env::var("GOOGLE_AUTH_SIGN_IN_URL")
                .unwrap_or_else(|_| DEFAULT_SIGN_IN_URL.into()),
            sign_in_key,
            jwks_url: std::env::var("GOOGLE_AUTH_JWKS_URL")
                .unwrap_or_else(|_| DEFAULT_JWKS_URL.into()),
            timeout_secs,
        }
    }

    fn issuer(&self) -> String {
        format!("{ISSUER_PREFIX}{}", self.project_id)
    }
}

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Why a verification or sign-in was refused. Logged, never returned to callers.
#[derive(Debug, thiserror::Error)]
pub enum FirebaseError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Token rejected: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    #[error("Token header has no key id")]
    MissingKeyId,

    #[error("No published key with id {0}")]
    UnknownKey(String),

    #[error("Token carries no user id")]
    MissingUserId,

    #[error("Sign-in returned HTTP {0}")]
    SignInStatus(u16),

    #[error("Malformed sign-in response: {0}")]
    MalformedSignIn(String),
}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct IdTokenClaims {
    sub: String,
    #[serde(default)]
    user_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SignInResponse {
    id_token: Option<String>,
    expires_in: Option<String>,
}

/// Prefer the `user_id` claim, falling back to `sub`.
fn user_id_from_claims(claims: IdTokenClaims) -> Result<OwnerId, FirebaseError> {
    claims
        .user_id
        .filter(|id| !id.is_empty())
        .or_else(|| Some(claims.sub).filter(|id| !id.is_empty()))
        .ok_or(FirebaseError::MissingUserId)
}

fn sign_in_from_response(body: SignInResponse) -> Result<SignIn, FirebaseError> {
    let access_token = body
        .id_token
        .filter(|t| !t.is_empty())
        .ok_or_else(|| FirebaseError::MalformedSignIn("missing idToken".into()))?;
    let expires_in = body
        .expires_in
        .ok_or_else(|| FirebaseError::MalformedSignIn("missing expiresIn".into()))?
        .parse::<i64>()
        .map_err(|e| FirebaseError::MalformedSignIn(format!("expiresIn: {e}")))?;

    Ok(SignIn {
        access_token,
        expires_in,
    })
}

// ---------------------------------------------------------------------------
// Provider
// ---------------------------------------------------------------------------

pub struct FirebaseIdentity {
    config: FirebaseConfig,
    client: reqwest::Client,
}

impl FirebaseIdentity {
    pub fn new(config: FirebaseConfig) -> Result<Self, FirebaseError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { config, client })
    }

    async fn fetch_keys(&self) -> Result<JwkSet, FirebaseError> {
        let keys = self
            .client
            .get(&self.config.jwks_url)
            .send()
            .await?
            .error_for_status()?
            .json::<JwkSet>()
            .await?;
        Ok(keys)
    }

    async fn verify_token(&self, token: &str) -> Result<OwnerId, FirebaseError> {
        // Reject malformed tokens before any network round trip.
        let header = decode_header(token)?;
        let kid = header.kid.ok_or(FirebaseError::MissingKeyId)?;

        let keys = self.fetch_keys().await?;
        let jwk = keys
            .find(&kid)
            .ok_or_else(|| FirebaseError::UnknownKey(kid.clone()))?;
        let key = DecodingKey::from_jwk(jwk)?;

        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_audience(&[&self.config.project_id]);
        validation.set_issuer(&[self.config.issuer()]);

        let data = decode::<IdTokenClaims>(token, &key, &validation)?;
        user_id_from_claims(data.claims)
    }

    async fn password_sign_in(&self, email: &str, password: &str) -> Result<SignIn, FirebaseError> {
        let response = self
            .client
            .post(&self.config.sign_in_url)
            .query(&[("key", self.config.sign_in_key.as_str())])
            .json(&serde_json::json!({
                "email": email,
                "password": password,
                "returnSecureToken": true,
            }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(FirebaseError::SignInStatus(response.status().as_u16()));
        }

        sign_in_from_response(response.json::<SignInResponse>().await?)
    }
}

#[async_trait]
impl IdentityProvider for FirebaseIdentity {
    async fn verify(&self, token: &str) -> Result<OwnerId, CoreError> {
        self.verify_token(token).await.map_err(|e| {
            tracing::debug!(error = %e, "Bearer token rejected");
            CoreError::unauthorized()
        })
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<SignIn, CoreError> {
        self.password_sign_in(email, password).await.map_err(|e| {
            tracing::info!(error = %e, "Password sign-in refused");
            CoreError::unauthorized()
        })
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use jsonwebtoken::{encode, EncodingKey, Header};

    use super::*;

    fn test_config() -> FirebaseConfig {
        FirebaseConfig {
            project_id: "demo-project".into(),
            sign_in_url: "http://127.0.0.1:9/signIn".into(),
            sign_in_key: "key".into(),
            jwks_url: "http://127.0.0.1:9/jwks".into(),
            timeout_secs: 1,
        }
    }

    #[test]
    fn issuer_includes_project() {
        assert_eq!(
            test_config().issuer(),
            "https://securetoken.google.com/demo-project"
        );
    }

    #[test]
    fn user_id_claim_wins_over_sub() {
        let claims = IdTokenClaims {
            sub: "sub-id".into(),
            user_id: Some("uid".into()),
        };
        assert_eq!(user_id_from_claims(claims).unwrap(), "uid");

        let claims = IdTokenClaims {
            sub: "sub-id".into(),
            user_id: Some(String::new()),
        };
        assert_eq!(user_id_from_claims(claims).unwrap(), "sub-id");

        let claims = IdTokenClaims {
            sub: String::new(),
            user_id: None,
        };
        assert_matches!(user_id_from_claims(claims), Err(FirebaseError::MissingUserId));
    }

    #[test]
    fn sign_in_response_relays_token_and_expiry() {
        let body: SignInResponse = serde_json::from_value(serde_json::json!({
            "idToken": "abc",
            "expiresIn": "3600",
            "localId": "ignored",
        }))
        .unwrap();
        let sign_in = sign_in_from_response(body).unwrap();
        assert_eq!(sign_in.access_token, "abc");
        assert_eq!(sign_in.expires_in, 3600);
    }

    #[test]
    fn sign_in_response_without_token_or_numeric_expiry_is_refused() {
        let body: SignInResponse =
            serde_json::from_value(serde_json::json!({ "expiresIn": "3600" })).unwrap();
        assert_matches!(
            sign_in_from_response(body),
            Err(FirebaseError::MalformedSignIn(_))
        );

        let body: SignInResponse = serde_json::from_value(serde_json::json!({
            "idToken": "abc",
            "expiresIn": "soon",
        }))
        .unwrap();
        assert_matches!(
            sign_in_from_response(body),
            Err(FirebaseError::MalformedSignIn(_))
        );
    }

    #[tokio::test]
    async fn malformed_token_is_unauthorized_without_network() {
        let identity = FirebaseIdentity::new(test_config()).unwrap();
        assert_matches!(
            identity.verify_token("BAD_TOKEN").await,
            Err(FirebaseError::Token(_))
        );
        assert_matches!(
            identity.verify("BAD_TOKEN").await,
            Err(CoreError::Unauthorized(msg)) if msg == "Unauthorized"
        );
    }

    #[tokio::test]
    async fn token_without_key_id_is_refused() {
        let token = encode(
            &Header::default(),
            &serde_json::json!({ "sub": "x", "exp": 4_000_000_000_i64 }),
            &EncodingKey::from_secret(b"not-google"),
        )
        .unwrap();
        let identity = FirebaseIdentity::new(test_config()).unwrap();
        assert_matches!(
            identity.verify_token(&token).await,
            Err(FirebaseError::MissingKeyId)
        );
    }

    #[tokio::test]
    async fn unreachable_sign_in_endpoint_is_unauthorized() {
        let identity = FirebaseIdentity::new(test_config()).unwrap();
        assert_matches!(
            identity.sign_in("a@example.com", "pw").await,
            Err(CoreError::Unauthorized(_))
        );
    }
}
