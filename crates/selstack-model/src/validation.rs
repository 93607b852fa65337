//! Structural validation for request arguments.
//!
//! These checks run locally inside the request builders, before any network
//! call. They cover only what can be decided from the arguments themselves;
//! everything else (existence, permissions, quota) is the service's call.

use http::header::HeaderName;

use crate::error::StorageError;
use crate::types::Metadata;

/// Maximum container name length in bytes.
const MAX_CONTAINER_NAME_BYTES: usize = 256;

/// Maximum object key length in bytes.
const MAX_OBJECT_KEY_BYTES: usize = 1024;

/// Maximum listing page size the service accepts.
const MAX_LIST_LIMIT: u32 = 10_000;

/// Maximum total size (bytes) of custom metadata keys plus values.
const MAX_METADATA_SIZE: usize = 4096;

/// Validate a container name.
///
/// Rules:
/// - non-empty, at most 256 bytes
/// - must not contain `/` (the container is a single path segment)
///
/// # Errors
///
/// Returns [`StorageError::InvalidArgument`] if a rule is violated.
pub fn validate_container_name(name: &str) -> Result<(), StorageError> {
    if name.is_empty() {
        return Err(StorageError::invalid_argument(
            "container name must not be empty",
        ));
    }
    if name.len() > MAX_CONTAINER_NAME_BYTES {
        return Err(StorageError::invalid_argument(format!(
            "container name must not exceed {MAX_CONTAINER_NAME_BYTES} bytes, got {}",
            name.len()
        )));
    }
    if name.contains('/') {
        return Err(StorageError::invalid_argument(
            "container name must not contain '/'",
        ));
    }
    Ok(())
}

/// Validate an object key.
///
/// Rules:
/// - non-empty, at most 1024 bytes
///
/// Keys may contain `/` to emulate folders.
///
/// # Errors
///
/// Returns [`StorageError::InvalidArgument`] if a rule is violated.
pub fn validate_object_key(key: &str) -> Result<(), StorageError> {
    if key.is_empty() {
        return Err(StorageError::invalid_argument(
            "object key must not be empty",
        ));
    }
    if key.len() > MAX_OBJECT_KEY_BYTES {
        return Err(StorageError::invalid_argument(format!(
            "object key must not exceed {MAX_OBJECT_KEY_BYTES} bytes, got {}",
            key.len()
        )));
    }
    Ok(())
}

/// Validate a listing page size.
///
/// # Errors
///
/// Returns [`StorageError::InvalidArgument`] when the limit is zero or
/// exceeds the service maximum of 10 000.
pub fn validate_limit(limit: u32) -> Result<(), StorageError> {
    if limit == 0 || limit > MAX_LIST_LIMIT {
        return Err(StorageError::invalid_argument(format!(
            "limit must be between 1 and {MAX_LIST_LIMIT}, got {limit}"
        )));
    }
    Ok(())
}

/// Validate custom metadata.
///
/// Rules:
/// - every key must form a legal HTTP header name once prefixed
/// - total size of keys plus values must not exceed 4 KB
///
/// # Errors
///
/// Returns [`StorageError::InvalidArgument`] if a rule is violated.
pub fn validate_metadata(metadata: &Metadata) -> Result<(), StorageError> {
    for key in metadata.keys() {
        if key.is_empty() {
            return Err(StorageError::invalid_argument(
                "metadata key must not be empty",
            ));
        }
        // The prefix itself is a legal header name, so legality of the
        // combined name depends only on the key part.
        let candidate = format!("x-object-meta-{key}");
        if HeaderName::from_bytes(candidate.as_bytes()).is_err() {
            return Err(StorageError::invalid_argument(format!(
                "metadata key {key:?} is not a legal header name"
            )));
        }
    }

    let total_size: usize = metadata.iter().map(|(k, v)| k.len() + v.len()).sum();
    if total_size > MAX_METADATA_SIZE {
        return Err(StorageError::invalid_argument(format!(
            "custom metadata must not exceed {MAX_METADATA_SIZE} bytes, got {total_size}"
        )));
    }

    Ok(())
}
