//! # kc-realm-issuer-mapper
//!
//! Protocol mapper that replaces the `iss` claim of issued OIDC tokens with
//! an administrator-configured URL, hiding the realm's internal issuer.
//!
//! The mapper applies to access tokens, ID tokens, and userinfo responses.
//! It reads a single configuration key, [`REALM_ISSUER_URL`], and fails with
//! [`MapperError::ConfigurationMissing`] when that key is absent or blank
//! rather than letting the real issuer through.
//!
//! ```rust,ignore
//! let mut registry = ProtocolMapperRegistry::new();
//! kc_realm_issuer_mapper::register(&mut registry);
//!
//! let config = MapperConfig::new("public issuer", PROVIDER_ID)
//!     .with_config(REALM_ISSUER_URL, "https://auth.acme.example");
//! registry.apply_access_token_mappers(&mut claims, &[config], &context)?;
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod issuer;

pub use issuer::{
    PROVIDER_ID, REALM_ISSUER_URL, RealmIssuerOverrideMapper, apply, override_issuer,
    resolve_issuer,
};

use std::sync::Arc;

use kc_protocol_mapper::ProtocolMapperRegistry;
pub use kc_protocol_mapper::{MapperError, MapperResult};

/// Registers the issuer override mapper with a host registry.
pub fn register(registry: &mut ProtocolMapperRegistry) {
    registry.register_mapper(Arc::new(RealmIssuerOverrideMapper));
}

/// Creates a registry containing only the issuer override mapper.
#[must_use]
pub fn registry() -> ProtocolMapperRegistry {
    let mut registry = ProtocolMapperRegistry::new();
    register(&mut registry);
    registry
}
