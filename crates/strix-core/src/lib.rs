//! # strix-core
//!
//! Core types, traits, and error handling for the strix control plane.
//!
//! This crate provides the foundational types used across all other strix
//! crates:
//!
//! - [`StrixError`] - Error taxonomy covering every failure mode of the core
//! - [`ErrorReason`] - Closed error-kind enum with an `Unknown` fallback
//! - [`ResourceType`] - The closed set of discovery resource kinds
//! - [`TypeUrl`] - Protocol type identifiers and the kind ↔ URL mapping
//! - [`ResourceTypeRegistry`] - String-indexed lookups over registered kinds
//! - [`NodeId`] - Identity under which an agent's configuration is tracked
//! - [`ResourceVersion`] - Content-addressable version strings
//!
//! ## Example
//!
//! ```rust
//! use strix_core::{ApiVersion, NodeId, ResourceType, TypeUrl};
//!
//! let node = NodeId::new("proxy-node-1");
//! let url = TypeUrl::of(ResourceType::Cluster, ApiVersion::V3);
//! assert_eq!(url.short_name(), "Cluster");
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod error;
mod node;
mod registry;
mod resource_type;
mod type_url;
mod version;

pub use error::{reason_for_error, ErrorReason, StrixError};
pub use node::NodeId;
pub use registry::{ResourceTypeInfo, ResourceTypeRegistry};
pub use resource_type::{ApiVersion, ResourceType, RESOURCE_TYPE_COUNT};
pub use type_url::TypeUrl;
pub use version::{ResourceVersion, VersionTracker};

/// Result type alias using [`StrixError`].
pub type Result<T> = std::result::Result<T, StrixError>;
