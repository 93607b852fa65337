//! HTTP response to typed output translation.
//!
//! Each Output struct in `selstack-model` implements
//! [`FromStorageResponse`]; the dispatch facade calls it with the response
//! status and headers, the collected body, and the request context. Outputs
//! are a pure function of those three values.
//!
//! Header decoding is permissive (see [`crate::codec`]); body decoding is
//! not: a listing or extraction report that fails to parse is a
//! [`StorageError::Decode`].

use bytes::Bytes;
use http::{HeaderMap, StatusCode};

use selstack_model::StorageError;
use selstack_model::output::{
    CreateContainerOutput, DeleteContainerOutput, DeleteObjectOutput, GetContainerInfoOutput,
    GetObjectOutput, ListContainersOutput, ListObjectsOutput, SetContainerToGalleryOutput,
    UpdateContainerMetaOutput, UpdateObjectMetaOutput, UploadArchiveOutput, UploadObjectOutput,
};
use selstack_model::types::{ContainerType, CreateContainerStatus};

use crate::codec;
use crate::request::RequestContext;

/// The response head handed to result builders.
#[derive(Debug, Clone)]
pub struct ResponseParts {
    /// HTTP status of the response; always a success status by the time a
    /// result builder runs.
    pub status: StatusCode,
    /// Response headers.
    pub headers: HeaderMap,
}

/// Trait for constructing a typed output from an HTTP response.
pub trait FromStorageResponse: Sized {
    /// Build the output from response head, body, and request context.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Decode`] when a structured body cannot be
    /// parsed, or [`StorageError::ChecksumMismatch`] when an upload
    /// requested verification and the returned ETag disagrees with the
    /// locally computed hash.
    fn from_storage_response(
        parts: &ResponseParts,
        body: Bytes,
        ctx: &RequestContext,
    ) -> Result<Self, StorageError>;
}

/// Normalize an ETag for comparison: surrounding quotes stripped, lowercase.
fn normalize_etag(etag: &str) -> String {
    etag.trim_matches('"').to_ascii_lowercase()
}

/// Outputs with nothing to decode.
macro_rules! impl_empty_response {
    ($ty:ty) => {
        impl FromStorageResponse for $ty {
            fn from_storage_response(
                _parts: &ResponseParts,
                _body: Bytes,
                _ctx: &RequestContext,
            ) -> Result<Self, StorageError> {
                Ok(Self::default())
            }
        }
    };
}

impl_empty_response!(DeleteContainerOutput);
impl_empty_response!(UpdateContainerMetaOutput);
impl_empty_response!(SetContainerToGalleryOutput);
impl_empty_response!(DeleteObjectOutput);
impl_empty_response!(UpdateObjectMetaOutput);

// ---------------------------------------------------------------------------
// Container operations
// ---------------------------------------------------------------------------

/// Headers `GetContainerInfoOutput` maps to typed fields.
const CONTAINER_INFO_RECOGNIZED: &[&str] = &[
    codec::CONTAINER_OBJECT_COUNT,
    codec::CONTAINER_BYTES_USED,
    codec::TRANSFERRED_BYTES,
    codec::RECEIVED_BYTES,
    codec::CONTAINER_TYPE,
    "x-container-meta-access-control-allow-origin",
    "x-container-meta-access-control-max-age",
    "x-container-meta-access-control-expose-headers",
    "x-container-meta-cache-control",
];

impl FromStorageResponse for GetContainerInfoOutput {
    fn from_storage_response(
        parts: &ResponseParts,
        _body: Bytes,
        ctx: &RequestContext,
    ) -> Result<Self, StorageError> {
        let headers = &parts.headers;
        Ok(Self {
            name: ctx.container.clone().unwrap_or_default(),
            object_count: codec::header_parse(headers, codec::CONTAINER_OBJECT_COUNT)
                .unwrap_or_default(),
            bytes_used: codec::header_parse(headers, codec::CONTAINER_BYTES_USED)
                .unwrap_or_default(),
            transferred_bytes: codec::header_parse(headers, codec::TRANSFERRED_BYTES)
                .unwrap_or_default(),
            received_bytes: codec::header_parse(headers, codec::RECEIVED_BYTES)
                .unwrap_or_default(),
            container_type: codec::header_str(headers, codec::CONTAINER_TYPE)
                .map(|s| ContainerType::from(s.as_str()))
                .unwrap_or_default(),
            cors: codec::decode_container_cors(headers),
            metadata: codec::collect_metadata(
                headers,
                codec::CONTAINER_META_PREFIX,
                CONTAINER_INFO_RECOGNIZED,
            ),
        })
    }
}

impl FromStorageResponse for ListContainersOutput {
    fn from_storage_response(
        _parts: &ResponseParts,
        body: Bytes,
        _ctx: &RequestContext,
    ) -> Result<Self, StorageError> {
        let entries = serde_json::from_slice(&body)
            .map_err(|e| StorageError::decode(format!("container listing: {e}")))?;
        Ok(Self { entries })
    }
}

impl FromStorageResponse for CreateContainerOutput {
    fn from_storage_response(
        parts: &ResponseParts,
        _body: Bytes,
        _ctx: &RequestContext,
    ) -> Result<Self, StorageError> {
        let status = if parts.status == StatusCode::ACCEPTED {
            CreateContainerStatus::AlreadyExists
        } else {
            CreateContainerStatus::Created
        };
        Ok(Self { status })
    }
}

// ---------------------------------------------------------------------------
// Object operations
// ---------------------------------------------------------------------------

impl FromStorageResponse for ListObjectsOutput {
    fn from_storage_response(
        _parts: &ResponseParts,
        body: Bytes,
        _ctx: &RequestContext,
    ) -> Result<Self, StorageError> {
        let entries = serde_json::from_slice(&body)
            .map_err(|e| StorageError::decode(format!("object listing: {e}")))?;
        Ok(Self { entries })
    }
}

/// Headers `GetObjectOutput` maps to typed fields.
const GET_OBJECT_RECOGNIZED: &[&str] = &[
    "content-type",
    "content-length",
    "content-disposition",
    "etag",
    "last-modified",
    codec::DELETE_AT,
];

impl FromStorageResponse for GetObjectOutput {
    fn from_storage_response(
        parts: &ResponseParts,
        body: Bytes,
        ctx: &RequestContext,
    ) -> Result<Self, StorageError> {
        let headers = &parts.headers;
        Ok(Self {
            name: ctx.key.clone().unwrap_or_default(),
            content_type: codec::header_str(headers, "content-type"),
            content_length: codec::header_parse(headers, "content-length"),
            etag: codec::header_str(headers, "etag").map(|e| normalize_etag(&e)),
            last_modified: codec::header_timestamp(headers, "last-modified"),
            content_disposition: codec::header_str(headers, "content-disposition"),
            delete_at: codec::header_unix_timestamp(headers, codec::DELETE_AT),
            metadata: codec::collect_metadata(
                headers,
                codec::OBJECT_META_PREFIX,
                GET_OBJECT_RECOGNIZED,
            ),
            body,
        })
    }
}

impl FromStorageResponse for UploadObjectOutput {
    fn from_storage_response(
        parts: &ResponseParts,
        _body: Bytes,
        ctx: &RequestContext,
    ) -> Result<Self, StorageError> {
        let etag = codec::header_str(&parts.headers, "etag").map(|e| normalize_etag(&e));
        if let Some(expected) = &ctx.expected_etag {
            let actual = etag.as_deref().unwrap_or("(none)");
            if actual != expected {
                return Err(StorageError::ChecksumMismatch {
                    expected: expected.clone(),
                    actual: actual.to_owned(),
                });
            }
        }
        Ok(Self { etag })
    }
}

impl FromStorageResponse for UploadArchiveOutput {
    fn from_storage_response(
        _parts: &ResponseParts,
        body: Bytes,
        _ctx: &RequestContext,
    ) -> Result<Self, StorageError> {
        serde_json::from_slice(&body)
            .map_err(|e| StorageError::decode(format!("extraction report: {e}")))
    }
}
