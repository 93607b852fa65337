//! Inputs for object operations.

use bytes::Bytes;
use chrono::{DateTime, Utc};

use crate::types::{ArchiveFormat, ConditionalHeaders, CorsHeaders, Metadata};

/// List objects in a container. Maps to `GET /{container}`.
#[derive(Debug, Clone, Default)]
pub struct ListObjectsInput {
    /// HTTP label (URI path).
    pub container: String,
    /// HTTP query: `limit`. Page size, at most 10 000.
    pub limit: Option<u32>,
    /// HTTP query: `marker`. Name of the last entry of the previous page.
    pub marker: Option<String>,
    /// HTTP query: `prefix`. Only keys starting with this prefix.
    pub prefix: Option<String>,
    /// HTTP query: `path`. Only keys directly inside this virtual folder.
    pub path: Option<String>,
    /// HTTP query: `delimiter`. Collapse keys past this character into
    /// `subdir` pseudo-entries.
    pub delimiter: Option<char>,
}

/// Download an object. Maps to `GET /{container}/{key}`.
#[derive(Debug, Clone, Default)]
pub struct GetObjectInput {
    /// HTTP label (URI path).
    pub container: String,
    /// HTTP label (URI path). May contain `/` to address virtual folders.
    pub key: String,
    /// HTTP headers: `If-Match`, `If-None-Match`, `If-Modified-Since`,
    /// `If-Unmodified-Since`.
    pub conditional: ConditionalHeaders,
    /// Skip the auth token for objects in public containers.
    pub anonymous: bool,
}

/// Upload an object. Maps to `PUT /{container}/{key}`.
#[derive(Debug, Clone, Default)]
pub struct UploadObjectInput {
    /// HTTP label (URI path).
    pub container: String,
    /// HTTP label (URI path).
    pub key: String,
    /// HTTP payload body. Fully materialized; no streaming.
    pub body: Bytes,
    /// Compare the returned ETag against a locally computed MD5 of the body
    /// and fail the call on disagreement, even when the HTTP status was
    /// success.
    pub validate_checksum: bool,
    /// HTTP header: `Content-Type`. The service infers one when unset.
    pub content_type: Option<String>,
    /// HTTP header: `Content-Disposition`.
    pub content_disposition: Option<String>,
    /// HTTP header: `X-Delete-At`. Absolute expiry, sent as Unix seconds.
    pub delete_at: Option<DateTime<Utc>>,
    /// HTTP header: `X-Delete-After`. Expiry in seconds from now.
    pub delete_after: Option<u64>,
    /// HTTP prefix headers: `X-Object-Meta-`.
    pub metadata: Metadata,
}

/// Delete an object. Maps to `DELETE /{container}/{key}`.
#[derive(Debug, Clone, Default)]
pub struct DeleteObjectInput {
    /// HTTP label (URI path).
    pub container: String,
    /// HTTP label (URI path).
    pub key: String,
}

/// Replace object metadata. Maps to `POST /{container}/{key}`.
#[derive(Debug, Clone, Default)]
pub struct UpdateObjectMetaInput {
    /// HTTP label (URI path).
    pub container: String,
    /// HTTP label (URI path).
    pub key: String,
    /// HTTP prefix headers: `X-Object-Meta-`.
    pub metadata: Metadata,
    /// HTTP headers: `Access-Control-*`, `Cache-Control`.
    pub cors: CorsHeaders,
}

/// Upload an archive for server-side extraction. Maps to
/// `PUT /{container}[/{path}]?extract-archive={format}`.
#[derive(Debug, Clone)]
pub struct UploadArchiveInput {
    /// HTTP label (URI path).
    pub container: String,
    /// HTTP payload body. The archive bytes, uploaded as-is.
    pub body: Bytes,
    /// HTTP query: `extract-archive`.
    pub format: ArchiveFormat,
    /// HTTP label (URI path). Virtual folder to extract into, when set.
    pub path: Option<String>,
}
