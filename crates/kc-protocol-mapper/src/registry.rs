//! Registry for protocol mappers.
//!
//! The host builds one registry at startup, registers every mapper type it
//! ships, and shares it (typically behind an `Arc`) across token-issuance
//! calls. The registry is read-only after construction.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::claims::{AccessTokenClaims, IdTokenClaims};
use crate::config::MapperConfig;
use crate::error::{MapperError, MapperResult};
use crate::mapper::{
    AccessTokenMapper, IdTokenMapper, MapperContext, MapperDescriptor, ProtocolMapper, TokenType,
    UserInfoMapper,
};

/// Registry for protocol mappers, keyed by mapper type ID.
#[derive(Default)]
pub struct ProtocolMapperRegistry {
    /// Registered mappers by ID.
    mappers: HashMap<String, Arc<dyn ProtocolMapper>>,

    /// Access token mappers.
    access_token_mappers: HashMap<String, Arc<dyn AccessTokenMapper>>,

    /// ID token mappers.
    id_token_mappers: HashMap<String, Arc<dyn IdTokenMapper>>,

    /// `UserInfo` mappers.
    userinfo_mappers: HashMap<String, Arc<dyn UserInfoMapper>>,
}

impl std::fmt::Debug for ProtocolMapperRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProtocolMapperRegistry")
            .field("mappers", &self.mapper_ids())
            .finish()
    }
}

impl ProtocolMapperRegistry {
    /// Creates a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a mapper that implements all token type traits.
    ///
    /// A later registration under the same ID replaces the earlier one.
    pub fn register_mapper<M>(&mut self, mapper: Arc<M>)
    where
        M: AccessTokenMapper + IdTokenMapper + UserInfoMapper + 'static,
    {
        let id = mapper.id().to_string();
        debug!(mapper_id = %id, "registering protocol mapper");

        self.mappers
            .insert(id.clone(), mapper.clone() as Arc<dyn ProtocolMapper>);
        self.access_token_mappers
            .insert(id.clone(), mapper.clone() as Arc<dyn AccessTokenMapper>);
        self.id_token_mappers
            .insert(id.clone(), mapper.clone() as Arc<dyn IdTokenMapper>);
        self.userinfo_mappers
            .insert(id, mapper as Arc<dyn UserInfoMapper>);
    }

    /// Gets a mapper by ID.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Arc<dyn ProtocolMapper>> {
        self.mappers.get(id)
    }

    /// Returns all registered mapper IDs, sorted.
    #[must_use]
    pub fn mapper_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.mappers.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    /// Returns admin UI descriptors for every registered mapper, sorted by ID.
    #[must_use]
    pub fn descriptors(&self) -> Vec<MapperDescriptor> {
        self.mapper_ids()
            .into_iter()
            .filter_map(|id| self.get(id))
            .map(|mapper| mapper.descriptor())
            .collect()
    }

    /// Validates mapper configurations before the host persists them.
    ///
    /// # Errors
    ///
    /// Returns [`MapperError::UnknownMapper`] for an unregistered mapper type,
    /// or the first error reported by a mapper's own validation.
    pub fn validate_configs(&self, mapper_configs: &[MapperConfig]) -> MapperResult<()> {
        for config in mapper_configs {
            let mapper = self
                .get(&config.mapper_type)
                .ok_or_else(|| MapperError::UnknownMapper(config.mapper_type.clone()))?;
            mapper.validate_config(config)?;
        }
        Ok(())
    }

    /// Applies all configured mappers to access token claims.
    ///
    /// # Errors
    ///
    /// Returns the first error raised by a mapper.
    pub fn apply_access_token_mappers(
        &self,
        claims: &mut AccessTokenClaims,
        mapper_configs: &[MapperConfig],
        context: &MapperContext<'_>,
    ) -> MapperResult<()> {
        for config in self.ordered(mapper_configs, MapperConfig::include_in_access_token) {
            let Some(mapper) = self.access_token_mappers.get(&config.mapper_type) else {
                debug!(
                    mapper_type = %config.mapper_type,
                    "no access token mapper registered, skipping"
                );
                continue;
            };
            mapper
                .transform_access_token(claims, config, context)
                .inspect_err(|e| log_failure(config, TokenType::AccessToken, context, e))?;
        }
        Ok(())
    }

    /// Applies all configured mappers to ID token claims.
    ///
    /// # Errors
    ///
    /// Returns the first error raised by a mapper.
    pub fn apply_id_token_mappers(
        &self,
        claims: &mut IdTokenClaims,
        mapper_configs: &[MapperConfig],
        context: &MapperContext<'_>,
    ) -> MapperResult<()> {
        for config in self.ordered(mapper_configs, MapperConfig::include_in_id_token) {
            let Some(mapper) = self.id_token_mappers.get(&config.mapper_type) else {
                debug!(
                    mapper_type = %config.mapper_type,
                    "no ID token mapper registered, skipping"
                );
                continue;
            };
            mapper
                .transform_id_token(claims, config, context)
                .inspect_err(|e| log_failure(config, TokenType::IdToken, context, e))?;
        }
        Ok(())
    }

    /// Applies all configured mappers to a userinfo response.
    ///
    /// # Errors
    ///
    /// Returns the first error raised by a mapper.
    pub fn apply_userinfo_mappers(
        &self,
        claims: &mut AccessTokenClaims,
        mapper_configs: &[MapperConfig],
        context: &MapperContext<'_>,
    ) -> MapperResult<()> {
        for config in self.ordered(mapper_configs, MapperConfig::include_in_userinfo) {
            let Some(mapper) = self.userinfo_mappers.get(&config.mapper_type) else {
                debug!(
                    mapper_type = %config.mapper_type,
                    "no userinfo mapper registered, skipping"
                );
                continue;
            };
            mapper
                .transform_userinfo(claims, config, context)
                .inspect_err(|e| log_failure(config, TokenType::UserInfo, context, e))?;
        }
        Ok(())
    }

    /// Filters configs by inclusion flag and sorts them by mapper priority.
    ///
    /// The sort is stable, so equal priorities keep the host's order.
    fn ordered<'c>(
        &self,
        mapper_configs: &'c [MapperConfig],
        include: fn(&MapperConfig) -> bool,
    ) -> Vec<&'c MapperConfig> {
        let mut configs: Vec<_> = mapper_configs.iter().filter(|c| include(c)).collect();
        configs.sort_by_key(|c| self.get(&c.mapper_type).map_or(0, |m| m.priority()));
        configs
    }
}

fn log_failure(
    config: &MapperConfig,
    token_type: TokenType,
    context: &MapperContext<'_>,
    error: &MapperError,
) {
    warn!(
        mapper_type = %config.mapper_type,
        mapper_name = %config.name,
        realm = context.realm,
        ?token_type,
        code = error.error_code(),
        "protocol mapper failed: {}",
        error
    );
}
