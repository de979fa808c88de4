//! Protocol Mapper SPI for customizing token claims.
//!
//! ## Design
//!
//! - [`ProtocolMapper`] carries identity and admin UI metadata
//! - [`AccessTokenMapper`], [`IdTokenMapper`] and [`UserInfoMapper`] are the
//!   per-token-type hooks the host calls during issuance
//! - [`MapperContext`] carries ambient request context; mappers are free to
//!   ignore it
//!
//! ## Example
//!
//! ```rust,ignore
//! struct TenantMapper;
//!
//! impl ProtocolMapper for TenantMapper {
//!     fn id(&self) -> &'static str { "tenant-mapper" }
//!     fn display_name(&self) -> &'static str { "Tenant" }
//!     fn category(&self) -> &'static str { "Token mapper" }
//!     fn help_text(&self) -> &'static str { "Adds the tenant claim" }
//!     fn config_properties(&self) -> Vec<ConfigProperty> { vec![] }
//!     fn token_types(&self) -> &'static [TokenType] { &[TokenType::AccessToken] }
//! }
//!
//! impl AccessTokenMapper for TenantMapper {
//!     fn transform_access_token(
//!         &self,
//!         claims: &mut AccessTokenClaims,
//!         _config: &MapperConfig,
//!         context: &MapperContext<'_>,
//!     ) -> MapperResult<()> {
//!         claims.additional.insert("tenant".into(), context.realm.into());
//!         Ok(())
//!     }
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::claims::{AccessTokenClaims, IdTokenClaims};
use crate::config::{ConfigProperty, MapperConfig};
use crate::error::MapperResult;

/// Token type that a mapper can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenType {
    /// Access token.
    AccessToken,
    /// ID token.
    IdToken,
    /// `UserInfo` response.
    UserInfo,
}

/// Context provided to mappers during token transformation.
///
/// The host fills in what it has; none of it is required.
#[derive(Debug, Clone, Copy)]
pub struct MapperContext<'a> {
    /// Realm name.
    pub realm: &'a str,

    /// Requested scopes.
    pub scopes: &'a [String],

    /// User session ID.
    pub session_id: Option<&'a str>,

    /// Authenticated user ID.
    pub user_id: Option<&'a str>,

    /// OAuth `client_id` of the requesting client.
    pub client_id: Option<&'a str>,
}

impl<'a> MapperContext<'a> {
    /// Creates a new mapper context.
    #[must_use]
    pub const fn new(realm: &'a str, scopes: &'a [String]) -> Self {
        Self {
            realm,
            scopes,
            session_id: None,
            user_id: None,
            client_id: None,
        }
    }

    /// Sets the user session ID.
    #[must_use]
    pub const fn with_session(mut self, session_id: &'a str) -> Self {
        self.session_id = Some(session_id);
        self
    }

    /// Sets the user ID.
    #[must_use]
    pub const fn with_user(mut self, user_id: &'a str) -> Self {
        self.user_id = Some(user_id);
        self
    }

    /// Sets the client ID.
    #[must_use]
    pub const fn with_client(mut self, client_id: &'a str) -> Self {
        self.client_id = Some(client_id);
        self
    }
}

/// Core trait for protocol mappers.
///
/// Each mapper has a unique ID, display information, and configuration
/// properties. Implementations must be stateless: the host calls them from
/// whatever thread is issuing the token.
pub trait ProtocolMapper: Send + Sync {
    /// Returns the unique identifier for this mapper type.
    ///
    /// This ID is used to reference the mapper in configurations.
    fn id(&self) -> &'static str;

    /// Returns the display name shown in admin UIs.
    fn display_name(&self) -> &'static str;

    /// Returns the category used for grouping in admin UIs.
    fn category(&self) -> &'static str;

    /// Returns a one-line description for admin UIs.
    fn help_text(&self) -> &'static str;

    /// Returns the configuration properties for this mapper.
    fn config_properties(&self) -> Vec<ConfigProperty>;

    /// Returns the token types this mapper can transform.
    fn token_types(&self) -> &'static [TokenType];

    /// Returns the priority for this mapper.
    ///
    /// Lower values execute first. Default is 0.
    fn priority(&self) -> i32 {
        0
    }

    /// Validates the mapper configuration before the host saves it.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    fn validate_config(&self, _config: &MapperConfig) -> MapperResult<()> {
        Ok(())
    }

    /// Builds the admin UI descriptor for this mapper.
    fn descriptor(&self) -> MapperDescriptor {
        MapperDescriptor {
            id: self.id().to_string(),
            display_name: self.display_name().to_string(),
            category: self.category().to_string(),
            help_text: self.help_text().to_string(),
            token_types: self.token_types().to_vec(),
            properties: self.config_properties(),
        }
    }
}

/// Trait for mappers that transform access tokens.
pub trait AccessTokenMapper: ProtocolMapper {
    /// Transforms an access token by adding/modifying claims.
    ///
    /// # Errors
    ///
    /// Returns an error if the transformation fails.
    fn transform_access_token(
        &self,
        claims: &mut AccessTokenClaims,
        config: &MapperConfig,
        context: &MapperContext<'_>,
    ) -> MapperResult<()>;
}

/// Trait for mappers that transform ID tokens.
pub trait IdTokenMapper: ProtocolMapper {
    /// Transforms an ID token by adding/modifying claims.
    ///
    /// # Errors
    ///
    /// Returns an error if the transformation fails.
    fn transform_id_token(
        &self,
        claims: &mut IdTokenClaims,
        config: &MapperConfig,
        context: &MapperContext<'_>,
    ) -> MapperResult<()>;
}

/// Trait for mappers that transform userinfo responses.
pub trait UserInfoMapper: ProtocolMapper {
    /// Transforms a userinfo response.
    ///
    /// # Errors
    ///
    /// Returns an error if the transformation fails.
    fn transform_userinfo(
        &self,
        claims: &mut AccessTokenClaims,
        config: &MapperConfig,
        context: &MapperContext<'_>,
    ) -> MapperResult<()>;
}

/// Serializable summary of a mapper for admin UIs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapperDescriptor {
    /// Mapper type ID.
    pub id: String,

    /// Display name.
    pub display_name: String,

    /// Display category.
    pub category: String,

    /// Help text.
    pub help_text: String,

    /// Token types the mapper applies to.
    pub token_types: Vec<TokenType>,

    /// Configuration properties.
    pub properties: Vec<ConfigProperty>,
}
