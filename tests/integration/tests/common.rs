//! Common test utilities and fixtures.

use chrono::{Duration, Utc};
use kc_protocol_mapper::{AccessTokenClaims, IdTokenClaims, MapperConfig};
use kc_realm_issuer_mapper::{PROVIDER_ID, REALM_ISSUER_URL};

/// Issuer the realm would publish without the mapper.
pub const INTERNAL_ISSUER: &str = "https://kc.internal/realms/acme";

/// Issuer the administrator wants clients to see.
pub const PUBLIC_ISSUER: &str = "https://auth.acme.example";

/// Realm used by all fixtures.
pub const REALM: &str = "acme";

/// Installs a test subscriber once; later calls are no-ops.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("kc_protocol_mapper=debug,kc_realm_issuer_mapper=debug")
        .with_test_writer()
        .try_init();
}

/// Access token as the realm would issue it.
pub fn access_token(subject: &str) -> AccessTokenClaims {
    AccessTokenClaims::new(
        INTERNAL_ISSUER.to_string(),
        subject.to_string(),
        Utc::now() + Duration::minutes(5),
    )
    .with_audience("account")
    .with_azp("web")
    .with_scope("openid profile")
}

/// ID token as the realm would issue it.
pub fn id_token(subject: &str) -> IdTokenClaims {
    IdTokenClaims::new(
        INTERNAL_ISSUER.to_string(),
        subject.to_string(),
        "web",
        Utc::now() + Duration::minutes(5),
    )
}

/// Issuer override mapper instance pointing at [`PUBLIC_ISSUER`].
pub fn issuer_mapper() -> MapperConfig {
    MapperConfig::new("public issuer", PROVIDER_ID).with_config(REALM_ISSUER_URL, PUBLIC_ISSUER)
}
