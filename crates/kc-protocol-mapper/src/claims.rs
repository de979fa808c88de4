//! Token representations handed to protocol mappers.
//!
//! The host builds these claim sets before signing and passes them to each
//! configured mapper by mutable reference. Claim names follow RFC 7519 and
//! `OpenID` Connect Core 1.0.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// A token whose issuer claim a mapper may rewrite.
pub trait IssuedToken {
    /// Returns the current `iss` claim.
    fn issuer(&self) -> &str;

    /// Replaces the `iss` claim.
    fn set_issuer(&mut self, issuer: String);
}

/// Access token claims.
///
/// Also used for `UserInfo` responses, which share the same claim layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessTokenClaims {
    /// Issuer - URL of the authorization server.
    pub iss: String,

    /// Subject - unique identifier for the user.
    pub sub: String,

    /// Audience - intended recipient(s) of the token.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aud: Option<Audience>,

    /// Expiration time (Unix timestamp).
    pub exp: i64,

    /// Issued at time (Unix timestamp).
    pub iat: i64,

    /// JWT ID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jti: Option<String>,

    /// Authorized party - client ID that requested the token.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub azp: Option<String>,

    /// Session ID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sid: Option<String>,

    /// Space-separated scopes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,

    /// Token type (usually "Bearer").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub typ: Option<String>,

    /// Preferred username.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_username: Option<String>,

    /// Email address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Claims added by other mappers.
    #[serde(flatten)]
    pub additional: HashMap<String, serde_json::Value>,
}

impl AccessTokenClaims {
    /// Creates new access token claims.
    #[must_use]
    pub fn new(issuer: String, subject: String, expires_at: DateTime<Utc>) -> Self {
        Self {
            iss: issuer,
            sub: subject,
            aud: None,
            exp: expires_at.timestamp(),
            iat: Utc::now().timestamp(),
            jti: Some(Uuid::now_v7().to_string()),
            azp: None,
            sid: None,
            scope: None,
            typ: Some("Bearer".to_string()),
            preferred_username: None,
            email: None,
            additional: HashMap::new(),
        }
    }

    /// Sets the audience.
    #[must_use]
    pub fn with_audience(mut self, audience: impl Into<Audience>) -> Self {
        self.aud = Some(audience.into());
        self
    }

    /// Sets the authorized party (client ID).
    #[must_use]
    pub fn with_azp(mut self, client_id: impl Into<String>) -> Self {
        self.azp = Some(client_id.into());
        self
    }

    /// Sets the scope.
    #[must_use]
    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = Some(scope.into());
        self
    }

    /// Adds a custom claim.
    #[must_use]
    pub fn with_claim(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.additional.insert(key.into(), value);
        self
    }
}

impl IssuedToken for AccessTokenClaims {
    fn issuer(&self) -> &str {
        &self.iss
    }

    fn set_issuer(&mut self, issuer: String) {
        self.iss = issuer;
    }
}

/// ID token claims.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdTokenClaims {
    /// Issuer - URL of the authorization server.
    pub iss: String,

    /// Subject - unique identifier for the user.
    pub sub: String,

    /// Audience - client ID that requested the token.
    pub aud: Audience,

    /// Expiration time (Unix timestamp).
    pub exp: i64,

    /// Issued at time (Unix timestamp).
    pub iat: i64,

    /// Authentication time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth_time: Option<i64>,

    /// Nonce echoed from the authorization request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nonce: Option<String>,

    /// Authorized party.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub azp: Option<String>,

    /// Session ID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sid: Option<String>,

    /// Preferred username.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_username: Option<String>,

    /// Claims added by other mappers.
    #[serde(flatten)]
    pub additional: HashMap<String, serde_json::Value>,
}

impl IdTokenClaims {
    /// Creates new ID token claims.
    #[must_use]
    pub fn new(
        issuer: String,
        subject: String,
        audience: impl Into<Audience>,
        expires_at: DateTime<Utc>,
    ) -> Self {
        Self {
            iss: issuer,
            sub: subject,
            aud: audience.into(),
            exp: expires_at.timestamp(),
            iat: Utc::now().timestamp(),
            auth_time: None,
            nonce: None,
            azp: None,
            sid: None,
            preferred_username: None,
            additional: HashMap::new(),
        }
    }

    /// Sets the nonce.
    #[must_use]
    pub fn with_nonce(mut self, nonce: impl Into<String>) -> Self {
        self.nonce = Some(nonce.into());
        self
    }
}

impl IssuedToken for IdTokenClaims {
    fn issuer(&self) -> &str {
        &self.iss
    }

    fn set_issuer(&mut self, issuer: String) {
        self.iss = issuer;
    }
}

/// JWT audience claim (single string or array).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum Audience {
    /// Single audience.
    Single(String),
    /// Multiple audiences.
    Multiple(Vec<String>),
}

impl From<String> for Audience {
    fn from(s: String) -> Self {
        Self::Single(s)
    }
}

impl From<&str> for Audience {
    fn from(s: &str) -> Self {
        Self::Single(s.to_string())
    }
}
