//! # kc-protocol-mapper
//!
//! Protocol mapper SPI for Keycloak Rust.
//!
//! Protocol mappers edit token claims while the host issues OIDC tokens.
//! This crate defines the contract a mapper implements and the registry the
//! host uses to look mappers up by identifier and apply them.
//!
//! ## Modules
//!
//! - [`claims`] - Token representations handed to mappers
//! - [`config`] - Per-instance mapper configuration and property metadata
//! - [`error`] - Mapper error types
//! - [`mapper`] - Mapper traits and invocation context
//! - [`registry`] - Identifier-keyed mapper registry

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod claims;
pub mod config;
pub mod error;
pub mod mapper;
pub mod registry;

pub use claims::{AccessTokenClaims, Audience, IdTokenClaims, IssuedToken};
pub use config::{ConfigProperty, ConfigPropertyType, MapperConfig, MapperRepresentation};
pub use error::{MapperError, MapperResult};
pub use mapper::{
    AccessTokenMapper, IdTokenMapper, MapperContext, MapperDescriptor, ProtocolMapper, TokenType,
    UserInfoMapper,
};
pub use registry::ProtocolMapperRegistry;
