//! # strix-reconciler
//!
//! Reconciliation engine: turns an ordered list of declarative
//! [`ResourceDefinition`]s into a versioned snapshot and installs it in the
//! cache only when something actually changed.
//!
//! This crate provides:
//!
//! - [`ResourceDefinition`] / [`Blueprint`] - The declarative input model
//! - [`EndpointResolver`] / [`SecretLookup`] - Injected collaborators that
//!   abstract the discovery backend and the secret store
//! - [`CacheReconciler`] - The reconciliation algorithm itself
//!
//! ## Key Design Decisions
//!
//! - A reconciliation either commits a complete snapshot or leaves the
//!   cache untouched; there are no partial writes
//! - Unchanged per-type versions skip the cache write entirely, so agents
//!   whose configuration has not changed receive no redundant pushes
//! - External calls and the cache write race a `CancellationToken`;
//!   cancellation surfaces as a distinct error kind

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod definition;
mod discovery;
mod reconciler;

pub use definition::{Blueprint, ResourceDefinition};
pub use discovery::{EndpointResolver, SecretLookup, SecretMaterial};
pub use reconciler::CacheReconciler;
