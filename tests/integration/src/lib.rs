//! Integration tests for the strix workspace.
//!
//! These tests exercise the public API through the `strix-xds` umbrella
//! crate, crossing crate boundaries the way an embedding control plane
//! would.

#![cfg(test)]

mod cache_tests;
mod reconciler_tests;
mod snapshot_tests;
