//! Realm issuer override.

use std::collections::HashMap;

use kc_protocol_mapper::{
    AccessTokenClaims, AccessTokenMapper, ConfigProperty, IdTokenClaims, IdTokenMapper,
    IssuedToken, MapperConfig, MapperContext, MapperError, MapperResult, ProtocolMapper,
    TokenType, UserInfoMapper,
};
use tracing::{debug, warn};

/// Mapper type ID under which the host registers this mapper.
pub const PROVIDER_ID: &str = "realm-issuer-override-protocol-mapper";

/// Config key holding the issuer URL to publish.
pub const REALM_ISSUER_URL: &str = "realmIssuerUrl";

const TOKEN_TYPES: &[TokenType] = &[
    TokenType::AccessToken,
    TokenType::IdToken,
    TokenType::UserInfo,
];

/// Looks up the configured issuer URL.
///
/// Surrounding whitespace is stripped and blank values count as missing.
///
/// # Errors
///
/// Returns [`MapperError::ConfigurationMissing`] if [`REALM_ISSUER_URL`] is
/// absent, empty, or only whitespace.
pub fn resolve_issuer(config: &HashMap<String, String>) -> MapperResult<&str> {
    config
        .get(REALM_ISSUER_URL)
        .map(|url| url.trim())
        .filter(|url| !url.is_empty())
        .ok_or_else(|| MapperError::configuration_missing(REALM_ISSUER_URL))
}

/// Overwrites the token's issuer with the configured URL, in place.
///
/// The token is left untouched when the configuration is missing.
///
/// # Errors
///
/// Returns [`MapperError::ConfigurationMissing`] if no usable issuer URL is
/// configured.
pub fn override_issuer<T: IssuedToken>(
    token: &mut T,
    config: &HashMap<String, String>,
) -> MapperResult<()> {
    let issuer = resolve_issuer(config)?;
    if token.issuer() != issuer {
        debug!(from = token.issuer(), to = issuer, "overriding token issuer");
        token.set_issuer(issuer.to_string());
    }
    Ok(())
}

/// Returns `token` with its issuer replaced by the configured URL.
///
/// # Errors
///
/// Returns [`MapperError::ConfigurationMissing`] if no usable issuer URL is
/// configured.
pub fn apply<T: IssuedToken>(mut token: T, config: &HashMap<String, String>) -> MapperResult<T> {
    override_issuer(&mut token, config)?;
    Ok(token)
}

/// Publishes a custom issuer URL in place of the realm's own.
#[derive(Debug, Clone, Copy, Default)]
pub struct RealmIssuerOverrideMapper;

impl RealmIssuerOverrideMapper {
    fn map<T: IssuedToken>(token: &mut T, config: &MapperConfig) -> MapperResult<()> {
        override_issuer(token, &config.config).inspect_err(|_| {
            warn!(
                mapper_name = %config.name,
                mapper_id = %config.id,
                "issuer override mapper has no '{}' configured; \
                 refusing to expose the realm issuer",
                REALM_ISSUER_URL
            );
        })
    }
}

impl ProtocolMapper for RealmIssuerOverrideMapper {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    fn display_name(&self) -> &'static str {
        "Realm Issuer URL"
    }

    fn category(&self) -> &'static str {
        "Token Mapper"
    }

    fn help_text(&self) -> &'static str {
        "Maps a custom Realm Issuer URL to the Access tokens"
    }

    fn config_properties(&self) -> Vec<ConfigProperty> {
        vec![
            ConfigProperty::string(REALM_ISSUER_URL, "Realm Issuer URL")
                .with_help("URL to use as the 'iss' (issuer) field in the token.")
                .required(),
        ]
    }

    fn token_types(&self) -> &'static [TokenType] {
        TOKEN_TYPES
    }

    fn validate_config(&self, config: &MapperConfig) -> MapperResult<()> {
        resolve_issuer(&config.config).map(|_| ())
    }
}

impl AccessTokenMapper for RealmIssuerOverrideMapper {
    fn transform_access_token(
        &self,
        claims: &mut AccessTokenClaims,
        config: &MapperConfig,
        _context: &MapperContext<'_>,
    ) -> MapperResult<()> {
        Self::map(claims, config)
    }
}

impl IdTokenMapper for RealmIssuerOverrideMapper {
    fn transform_id_token(
        &self,
        claims: &mut IdTokenClaims,
        config: &MapperConfig,
        _context: &MapperContext<'_>,
    ) -> MapperResult<()> {
        Self::map(claims, config)
    }
}

impl UserInfoMapper for RealmIssuerOverrideMapper {
    fn transform_userinfo(
        &self,
        claims: &mut AccessTokenClaims,
        config: &MapperConfig,
        _context: &MapperContext<'_>,
    ) -> MapperResult<()> {
        Self::map(claims, config)
    }
}
