//! Mapper instance configuration and property metadata.
//!
//! A [`MapperConfig`] is what an administrator saves for one mapper
//! instance: which mapper type to run and a flat string-to-string map of
//! settings. [`ConfigProperty`] values describe those settings so an admin
//! UI can render a form; they have no effect on mapping at runtime.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::MapperResult;

/// Protocol name used for all OIDC mappers.
pub const OIDC_PROTOCOL: &str = "openid-connect";

/// Config key controlling inclusion in access tokens.
pub const INCLUDE_IN_ACCESS_TOKEN: &str = "access.token.claim";
/// Config key controlling inclusion in ID tokens.
pub const INCLUDE_IN_ID_TOKEN: &str = "id.token.claim";
/// Config key controlling inclusion in `UserInfo` responses.
pub const INCLUDE_IN_USERINFO: &str = "userinfo.token.claim";

/// Configuration for a protocol mapper instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapperConfig {
    /// Unique identifier for this mapper instance.
    pub id: Uuid,

    /// Mapper name (user-defined).
    pub name: String,

    /// Protocol mapper type ID (e.g., `"realm-issuer-override-protocol-mapper"`).
    pub mapper_type: String,

    /// Protocol (always `"openid-connect"` for OIDC).
    pub protocol: String,

    /// Configuration key-value pairs.
    #[serde(default)]
    pub config: HashMap<String, String>,
}

impl MapperConfig {
    /// Creates a new mapper configuration.
    #[must_use]
    pub fn new(name: impl Into<String>, mapper_type: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7(),
            name: name.into(),
            mapper_type: mapper_type.into(),
            protocol: OIDC_PROTOCOL.to_string(),
            config: HashMap::new(),
        }
    }

    /// Sets a configuration value.
    #[must_use]
    pub fn with_config(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.insert(key.into(), value.into());
        self
    }

    /// Gets a configuration value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.config.get(key).map(String::as_str)
    }

    /// Gets a configuration value as a boolean.
    #[must_use]
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.config.get(key).and_then(|v| v.parse().ok())
    }

    /// Checks if the mapper should run for access tokens.
    #[must_use]
    pub fn include_in_access_token(&self) -> bool {
        self.get_bool(INCLUDE_IN_ACCESS_TOKEN).unwrap_or(true)
    }

    /// Checks if the mapper should run for ID tokens.
    #[must_use]
    pub fn include_in_id_token(&self) -> bool {
        self.get_bool(INCLUDE_IN_ID_TOKEN).unwrap_or(true)
    }

    /// Checks if the mapper should run for userinfo responses.
    #[must_use]
    pub fn include_in_userinfo(&self) -> bool {
        self.get_bool(INCLUDE_IN_USERINFO).unwrap_or(true)
    }

    /// Parses a single mapper from the host's JSON export format.
    ///
    /// # Errors
    ///
    /// Returns [`MapperError::InvalidRepresentation`](crate::MapperError::InvalidRepresentation)
    /// if the JSON does not describe a mapper.
    pub fn from_json(json: &str) -> MapperResult<Self> {
        let representation: MapperRepresentation = serde_json::from_str(json)?;
        Ok(representation.into())
    }

    /// Parses a JSON array of mappers, as found under a client's
    /// `protocolMappers` key in a realm export.
    ///
    /// # Errors
    ///
    /// Returns [`MapperError::InvalidRepresentation`](crate::MapperError::InvalidRepresentation)
    /// if the JSON is not an array of mappers.
    pub fn list_from_json(json: &str) -> MapperResult<Vec<Self>> {
        let representations: Vec<MapperRepresentation> = serde_json::from_str(json)?;
        Ok(representations.into_iter().map(Into::into).collect())
    }
}

/// Mapper as it appears in the host's admin API and realm exports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapperRepresentation {
    /// Instance ID; generated when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,

    /// Mapper name.
    pub name: String,

    /// Protocol the mapper belongs to.
    #[serde(default = "default_protocol")]
    pub protocol: String,

    /// Mapper type ID.
    pub protocol_mapper: String,

    /// Whether user consent is required.
    #[serde(default)]
    pub consent_required: bool,

    /// Configuration key-value pairs.
    #[serde(default)]
    pub config: HashMap<String, String>,
}

fn default_protocol() -> String {
    OIDC_PROTOCOL.to_string()
}

impl From<MapperRepresentation> for MapperConfig {
    fn from(rep: MapperRepresentation) -> Self {
        Self {
            id: rep.id.unwrap_or_else(Uuid::now_v7),
            name: rep.name,
            mapper_type: rep.protocol_mapper,
            protocol: rep.protocol,
            config: rep.config,
        }
    }
}

impl From<&MapperConfig> for MapperRepresentation {
    fn from(config: &MapperConfig) -> Self {
        Self {
            id: Some(config.id),
            name: config.name.clone(),
            protocol: config.protocol.clone(),
            protocol_mapper: config.mapper_type.clone(),
            consent_required: false,
            config: config.config.clone(),
        }
    }
}

/// Configuration property definition for mapper UIs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigProperty {
    /// Property name (config key).
    pub name: String,

    /// Display label.
    pub label: String,

    /// Help text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help_text: Option<String>,

    /// Property type.
    #[serde(rename = "type")]
    pub property_type: ConfigPropertyType,

    /// Default value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,

    /// Whether the property is required.
    #[serde(default)]
    pub required: bool,
}

/// Configuration property type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum ConfigPropertyType {
    /// Text input.
    String,
    /// Boolean checkbox.
    Boolean,
}

impl ConfigProperty {
    /// Creates a new string property.
    #[must_use]
    pub fn string(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            help_text: None,
            property_type: ConfigPropertyType::String,
            default_value: None,
            required: false,
        }
    }

    /// Creates a new boolean property.
    #[must_use]
    pub fn boolean(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            help_text: None,
            property_type: ConfigPropertyType::Boolean,
            default_value: Some("false".to_string()),
            required: false,
        }
    }

    /// Sets the help text.
    #[must_use]
    pub fn with_help(mut self, help_text: impl Into<String>) -> Self {
        self.help_text = Some(help_text.into());
        self
    }

    /// Marks the property as required.
    #[must_use]
    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }
}
