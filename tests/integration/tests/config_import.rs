//! Mapper definitions imported from a realm export.

use kc_protocol_mapper::{MapperConfig, MapperContext, MapperError, MapperRepresentation};
use kc_realm_issuer_mapper::{PROVIDER_ID, REALM_ISSUER_URL, registry};

use crate::common::{PUBLIC_ISSUER, REALM, access_token};

const CLIENT_MAPPERS: &str = r#"[
    {
        "name": "public issuer",
        "protocol": "openid-connect",
        "protocolMapper": "realm-issuer-override-protocol-mapper",
        "consentRequired": false,
        "config": {
            "realmIssuerUrl": "https://auth.acme.example",
            "access.token.claim": "true"
        }
    },
    {
        "name": "legacy",
        "protocol": "openid-connect",
        "protocolMapper": "oidc-audience-mapper",
        "config": {}
    }
]"#;

#[test]
fn exported_mappers_apply_after_import() {
    let configs = MapperConfig::list_from_json(CLIENT_MAPPERS).unwrap();
    assert_eq!(configs.len(), 2);
    assert_eq!(configs[0].mapper_type, PROVIDER_ID);

    let scopes: Vec<String> = vec![];
    let context = MapperContext::new(REALM, &scopes);
    let mut claims = access_token("user1");

    // Unregistered mapper types in the export are skipped.
    registry()
        .apply_access_token_mappers(&mut claims, &configs, &context)
        .unwrap();

    assert_eq!(claims.iss, PUBLIC_ISSUER);
}

#[test]
fn unknown_exported_mapper_fails_validation() {
    let configs = MapperConfig::list_from_json(CLIENT_MAPPERS).unwrap();

    let err = registry().validate_configs(&configs).unwrap_err();

    assert_eq!(err, MapperError::UnknownMapper("oidc-audience-mapper".to_string()));
}

#[test]
fn config_round_trips_through_representation() {
    let config = MapperConfig::new("public issuer", PROVIDER_ID)
        .with_config(REALM_ISSUER_URL, PUBLIC_ISSUER);

    let json = serde_json::to_string(&MapperRepresentation::from(&config)).unwrap();
    let parsed = MapperConfig::from_json(&json).unwrap();

    assert_eq!(parsed, config);
}
