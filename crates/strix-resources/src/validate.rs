//! Admission-time resource validation.

use strix_core::{ApiVersion, ResourceType, Result};

use crate::serializer::{unmarshaller, Serialization};

/// Decode `value` as a resource of kind `rtype` and discard the result.
///
/// Used by admission-time checks external to the cache core. Has no side
/// effects and never mutates cache state.
pub fn validate(
    value: &str,
    encoding: Serialization,
    version: ApiVersion,
    rtype: ResourceType,
) -> Result<()> {
    unmarshaller(encoding, version)
        .unmarshal(value, rtype)
        .map(|_| ())
}
