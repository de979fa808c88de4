//! Issuer override applied through the registry for each token type.

use kc_protocol_mapper::config::{INCLUDE_IN_ID_TOKEN, INCLUDE_IN_USERINFO};
use kc_protocol_mapper::{Audience, MapperConfig, MapperContext, MapperError};
use kc_realm_issuer_mapper::{PROVIDER_ID, REALM_ISSUER_URL, registry};

use crate::common::{
    INTERNAL_ISSUER, PUBLIC_ISSUER, REALM, access_token, id_token, init_tracing, issuer_mapper,
};

#[test]
fn access_token_gets_public_issuer() {
    init_tracing();
    let registry = registry();
    let scopes = vec!["openid".to_string()];
    let context = MapperContext::new(REALM, &scopes)
        .with_client("web")
        .with_user("user1");

    let mut claims = access_token("user1");
    let mut expected = claims.clone();
    expected.iss = PUBLIC_ISSUER.to_string();

    registry
        .apply_access_token_mappers(&mut claims, &[issuer_mapper()], &context)
        .unwrap();

    assert_eq!(claims, expected);
    assert_eq!(claims.sub, "user1");
    assert_eq!(claims.aud, Some(Audience::from("account")));
}

#[test]
fn id_token_and_userinfo_get_public_issuer() {
    init_tracing();
    let registry = registry();
    let scopes = vec!["openid".to_string()];
    let context = MapperContext::new(REALM, &scopes);
    let mappers = [issuer_mapper()];

    let mut id = id_token("user1");
    registry
        .apply_id_token_mappers(&mut id, &mappers, &context)
        .unwrap();
    assert_eq!(id.iss, PUBLIC_ISSUER);

    let mut userinfo = access_token("user1");
    registry
        .apply_userinfo_mappers(&mut userinfo, &mappers, &context)
        .unwrap();
    assert_eq!(userinfo.iss, PUBLIC_ISSUER);
}

#[test]
fn inclusion_flags_limit_token_types() {
    init_tracing();
    let registry = registry();
    let scopes: Vec<String> = vec![];
    let context = MapperContext::new(REALM, &scopes);
    let mappers = [issuer_mapper()
        .with_config(INCLUDE_IN_ID_TOKEN, "false")
        .with_config(INCLUDE_IN_USERINFO, "false")];

    let mut access = access_token("user1");
    let mut id = id_token("user1");
    let mut userinfo = access_token("user1");

    registry
        .apply_access_token_mappers(&mut access, &mappers, &context)
        .unwrap();
    registry
        .apply_id_token_mappers(&mut id, &mappers, &context)
        .unwrap();
    registry
        .apply_userinfo_mappers(&mut userinfo, &mappers, &context)
        .unwrap();

    assert_eq!(access.iss, PUBLIC_ISSUER);
    assert_eq!(id.iss, INTERNAL_ISSUER);
    assert_eq!(userinfo.iss, INTERNAL_ISSUER);
}

#[test]
fn missing_issuer_url_stops_issuance() {
    init_tracing();
    let registry = registry();
    let scopes: Vec<String> = vec![];
    let context = MapperContext::new(REALM, &scopes);
    let mappers = [MapperConfig::new("public issuer", PROVIDER_ID)];

    let mut claims = access_token("user1");
    let before = claims.clone();

    let err = registry
        .apply_access_token_mappers(&mut claims, &mappers, &context)
        .unwrap_err();

    assert_eq!(err, MapperError::configuration_missing(REALM_ISSUER_URL));
    assert!(err.is_deployment_error());
    assert_eq!(claims, before);
}

#[test]
fn empty_issuer_url_is_rejected_at_save_time() {
    let registry = registry();
    let mappers =
        [MapperConfig::new("public issuer", PROVIDER_ID).with_config(REALM_ISSUER_URL, "")];

    let err = registry.validate_configs(&mappers).unwrap_err();

    assert!(matches!(err, MapperError::ConfigurationMissing { .. }));
    assert!(registry.validate_configs(&[issuer_mapper()]).is_ok());
}

#[test]
fn reapplying_keeps_public_issuer() {
    let registry = registry();
    let scopes: Vec<String> = vec![];
    let context = MapperContext::new(REALM, &scopes);
    let mappers = [issuer_mapper(), issuer_mapper()];

    let mut claims = access_token("user1");
    registry
        .apply_access_token_mappers(&mut claims, &mappers, &context)
        .unwrap();

    assert_eq!(claims.iss, PUBLIC_ISSUER);
}

#[test]
fn registry_exposes_admin_descriptor() {
    let descriptors = registry().descriptors();

    assert_eq!(descriptors.len(), 1);
    let json = serde_json::to_value(&descriptors[0]).unwrap();
    assert_eq!(json["id"], PROVIDER_ID);
    assert_eq!(json["displayName"], "Realm Issuer URL");
    assert_eq!(json["category"], "Token Mapper");
    assert_eq!(
        json["tokenTypes"],
        serde_json::json!(["access_token", "id_token", "user_info"])
    );
    assert_eq!(json["properties"][0]["name"], REALM_ISSUER_URL);
    assert_eq!(json["properties"][0]["required"], true);
}
