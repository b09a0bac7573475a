//! # strix-resources
//!
//! Resource schemas, serialization and generation for the strix control
//! plane.
//!
//! This crate provides:
//!
//! - The concrete schemas for every [`ResourceType`](strix_core::ResourceType)
//!   and the [`Resource`] enum tying them together
//! - [`Serialization`] variants (canonical JSON, YAML, base64-JSON) with
//!   marshaller/unmarshaller strategy objects
//! - The version-polymorphic [`Generator`] that produces decode targets and
//!   synthesizes derived resources (TLS secrets, endpoint aggregations)
//! - [`validate`] for admission-time checks
//!
//! ## Canonical JSON
//!
//! All content hashing goes through [`Resource::canonical_json`], which
//! serializes with lexicographically sorted map keys so that equal values
//! always produce equal text.

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod generator;
mod resource;
mod serializer;
mod types;
mod validate;

pub use generator::{generator, Generator, GeneratorV3};
pub use resource::Resource;
pub use serializer::{
    marshaller, unmarshaller, ResourceMarshaller, ResourceUnmarshaller, Serialization,
};
pub use types::{
    Address, CertificateValidationContext, Cluster, ClusterLoadAssignment, FilterChain, Listener,
    RouteConfiguration, RouteRule, Runtime, ScopedRouteConfiguration, Secret, TlsCertificate,
    TypedExtensionConfig, UpstreamHost, VirtualHost,
};
pub use validate::validate;
