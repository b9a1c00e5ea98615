//! Authentication extractors.
//!
//! - [`auth::AuthUser`] -- Verifies the Bearer token and yields the owner id.
//! - [`auth::BasicCredentials`] -- Email/password from a Basic `Authorization` header.
//! - [`auth::AppJson`] -- JSON body extractor whose rejections use the API error format.
//! - [`auth::AppPath`] -- Path extractor with the same rejection format.

pub mod auth;
