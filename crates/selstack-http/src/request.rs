//! Typed input to HTTP request translation.
//!
//! Each Input struct in `selstack-model` implements [`IntoStorageRequest`],
//! producing [`RequestParts`]: HTTP method, percent-encoded target path,
//! query parameters (only those that are set), header set, and body.
//! Builders validate only structural constraints they can check locally;
//! they never touch the network.

use bytes::Bytes;
use http::{HeaderMap, Method};
use md5::{Digest, Md5};
use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};

use selstack_model::StorageError;
use selstack_model::StorageOperation;
use selstack_model::input::{
    CreateContainerInput, DeleteContainerInput, DeleteObjectInput, GetContainerInfoInput,
    GetObjectInput, ListContainersInput, ListObjectsInput, SetContainerToGalleryInput,
    UpdateContainerMetaInput, UpdateObjectMetaInput, UploadArchiveInput, UploadObjectInput,
};
use selstack_model::output::{
    CreateContainerOutput, DeleteContainerOutput, DeleteObjectOutput, GetContainerInfoOutput,
    GetObjectOutput, ListContainersOutput, ListObjectsOutput, SetContainerToGalleryOutput,
    UpdateContainerMetaOutput, UpdateObjectMetaOutput, UploadArchiveOutput, UploadObjectOutput,
};
use selstack_model::types::{ContainerType, CorsHeaders, Metadata};
use selstack_model::validation::{
    validate_container_name, validate_limit, validate_metadata, validate_object_key,
};

use crate::codec;
use crate::response::FromStorageResponse;

/// Characters percent-encoded inside a single path segment.
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}')
    .add(b'%')
    .add(b'/');

/// Like [`SEGMENT`] but keeps `/`, so object keys retain their virtual
/// folder structure.
const OBJECT_KEY: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}')
    .add(b'%');

/// Context carried through dispatch alongside the raw request.
///
/// Result builders need it to echo the object name and to enforce the
/// upload checksum post-condition; the facade needs it for tracing and to
/// decide whether to attach the auth token.
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// The operation being performed.
    pub operation: StorageOperation,
    /// Target container, when the operation has one.
    pub container: Option<String>,
    /// Target object key, when the operation has one.
    pub key: Option<String>,
    /// Locally computed hex MD5 of an uploaded body; set only when the
    /// caller requested checksum validation.
    pub expected_etag: Option<String>,
    /// Skip the auth token for this call.
    pub anonymous: bool,
}

impl RequestContext {
    /// Create a context for an operation with no target yet.
    #[must_use]
    pub fn new(operation: StorageOperation) -> Self {
        Self {
            operation,
            container: None,
            key: None,
            expected_etag: None,
            anonymous: false,
        }
    }

    /// Set the target container.
    #[must_use]
    pub fn with_container(mut self, container: impl Into<String>) -> Self {
        self.container = Some(container.into());
        self
    }

    /// Set the target object key.
    #[must_use]
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }
}

/// Everything the transport needs to perform one HTTP call.
///
/// Immutable once constructed; the facade only reads it.
#[derive(Debug, Clone)]
pub struct RequestParts {
    /// HTTP method.
    pub method: Method,
    /// Percent-encoded path below the account storage URL, starting with
    /// `/`.
    pub path: String,
    /// Query parameters; empty entries are never emitted.
    pub query: Vec<(String, String)>,
    /// Outgoing header set, excluding the auth token.
    pub headers: HeaderMap,
    /// Request body, fully materialized.
    pub body: Bytes,
    /// Dispatch context.
    pub context: RequestContext,
}

/// Trait for converting a typed Input into HTTP request parts.
///
/// `Output` ties each request to the result type the dispatch facade
/// decodes the response into.
pub trait IntoStorageRequest {
    /// The result type this request produces.
    type Output: FromStorageResponse;

    /// Build the HTTP request parts.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::InvalidArgument`] when a structural
    /// constraint on the arguments fails; no network call has happened at
    /// that point.
    fn into_storage_request(self) -> Result<RequestParts, StorageError>;
}

// ---------------------------------------------------------------------------
// Path and header helpers
// ---------------------------------------------------------------------------

/// Encode `/{container}`.
fn container_path(container: &str) -> String {
    format!("/{}", utf8_percent_encode(container, SEGMENT))
}

/// Encode `/{container}/{key}`, preserving `/` inside the key.
fn object_path(container: &str, key: &str) -> String {
    format!(
        "/{}/{}",
        utf8_percent_encode(container, SEGMENT),
        utf8_percent_encode(key, OBJECT_KEY)
    )
}

/// Push a query parameter when the value is set.
fn push_query<T: ToString>(query: &mut Vec<(String, String)>, name: &str, value: Option<T>) {
    if let Some(value) = value {
        query.push((name.to_owned(), value.to_string()));
    }
}

/// Header set shared by create-container and update-container-meta.
fn container_meta_headers(
    container_type: ContainerType,
    metadata: &Metadata,
    cors: &CorsHeaders,
) -> Result<HeaderMap, StorageError> {
    validate_metadata(metadata)?;
    let mut headers = HeaderMap::new();
    codec::set_header(&mut headers, codec::CONTAINER_TYPE, container_type.as_str());
    codec::encode_container_cors(&mut headers, cors);
    codec::set_metadata_headers(&mut headers, codec::CONTAINER_META_PREFIX, metadata);
    Ok(headers)
}

// ---------------------------------------------------------------------------
// Container operations
// ---------------------------------------------------------------------------

impl IntoStorageRequest for GetContainerInfoInput {
    type Output = GetContainerInfoOutput;

    fn into_storage_request(self) -> Result<RequestParts, StorageError> {
        validate_container_name(&self.container)?;
        Ok(RequestParts {
            method: Method::HEAD,
            path: container_path(&self.container),
            query: Vec::new(),
            headers: HeaderMap::new(),
            body: Bytes::new(),
            context: RequestContext::new(StorageOperation::GetContainerInfo)
                .with_container(self.container),
        })
    }
}

impl IntoStorageRequest for ListContainersInput {
    type Output = ListContainersOutput;

    fn into_storage_request(self) -> Result<RequestParts, StorageError> {
        if let Some(limit) = self.limit {
            validate_limit(limit)?;
        }
        let mut query = vec![("format".to_owned(), "json".to_owned())];
        push_query(&mut query, "limit", self.limit);
        push_query(&mut query, "marker", self.marker);
        Ok(RequestParts {
            method: Method::GET,
            path: "/".to_owned(),
            query,
            headers: HeaderMap::new(),
            body: Bytes::new(),
            context: RequestContext::new(StorageOperation::ListContainers),
        })
    }
}

impl IntoStorageRequest for CreateContainerInput {
    type Output = CreateContainerOutput;

    fn into_storage_request(self) -> Result<RequestParts, StorageError> {
        validate_container_name(&self.container)?;
        let headers = container_meta_headers(self.container_type, &self.metadata, &self.cors)?;
        Ok(RequestParts {
            method: Method::PUT,
            path: container_path(&self.container),
            query: Vec::new(),
            headers,
            body: Bytes::new(),
            context: RequestContext::new(StorageOperation::CreateContainer)
                .with_container(self.container),
        })
    }
}

impl IntoStorageRequest for DeleteContainerInput {
    type Output = DeleteContainerOutput;

    fn into_storage_request(self) -> Result<RequestParts, StorageError> {
        validate_container_name(&self.container)?;
        Ok(RequestParts {
            method: Method::DELETE,
            path: container_path(&self.container),
            query: Vec::new(),
            headers: HeaderMap::new(),
            body: Bytes::new(),
            context: RequestContext::new(StorageOperation::DeleteContainer)
                .with_container(self.container),
        })
    }
}

impl IntoStorageRequest for UpdateContainerMetaInput {
    type Output = UpdateContainerMetaOutput;

    fn into_storage_request(self) -> Result<RequestParts, StorageError> {
        validate_container_name(&self.container)?;
        let headers = container_meta_headers(self.container_type, &self.metadata, &self.cors)?;
        Ok(RequestParts {
            method: Method::POST,
            path: container_path(&self.container),
            query: Vec::new(),
            headers,
            body: Bytes::new(),
            context: RequestContext::new(StorageOperation::UpdateContainerMeta)
                .with_container(self.container),
        })
    }
}

impl IntoStorageRequest for SetContainerToGalleryInput {
    type Output = SetContainerToGalleryOutput;

    fn into_storage_request(self) -> Result<RequestParts, StorageError> {
        validate_container_name(&self.container)?;
        let mut headers = HeaderMap::new();
        codec::set_header(
            &mut headers,
            codec::CONTAINER_TYPE,
            ContainerType::Gallery.as_str(),
        );
        codec::set_optional_header(&mut headers, codec::GALLERY_SECRET, self.secret.as_deref());
        Ok(RequestParts {
            method: Method::POST,
            path: container_path(&self.container),
            query: Vec::new(),
            headers,
            body: Bytes::new(),
            context: RequestContext::new(StorageOperation::SetContainerToGallery)
                .with_container(self.container),
        })
    }
}

// ---------------------------------------------------------------------------
// Object operations
// ---------------------------------------------------------------------------

impl IntoStorageRequest for ListObjectsInput {
    type Output = ListObjectsOutput;

    fn into_storage_request(self) -> Result<RequestParts, StorageError> {
        validate_container_name(&self.container)?;
        if let Some(limit) = self.limit {
            validate_limit(limit)?;
        }
        let mut query = vec![("format".to_owned(), "json".to_owned())];
        push_query(&mut query, "limit", self.limit);
        push_query(&mut query, "marker", self.marker);
        push_query(&mut query, "prefix", self.prefix);
        push_query(&mut query, "path", self.path);
        push_query(&mut query, "delimiter", self.delimiter);
        Ok(RequestParts {
            method: Method::GET,
            path: container_path(&self.container),
            query,
            headers: HeaderMap::new(),
            body: Bytes::new(),
            context: RequestContext::new(StorageOperation::ListObjects)
                .with_container(self.container),
        })
    }
}

impl IntoStorageRequest for GetObjectInput {
    type Output = GetObjectOutput;

    fn into_storage_request(self) -> Result<RequestParts, StorageError> {
        validate_container_name(&self.container)?;
        validate_object_key(&self.key)?;
        let mut headers = HeaderMap::new();
        codec::encode_conditional(&mut headers, &self.conditional);
        let mut context = RequestContext::new(StorageOperation::GetObject)
            .with_container(self.container.clone())
            .with_key(self.key.clone());
        context.anonymous = self.anonymous;
        Ok(RequestParts {
            method: Method::GET,
            path: object_path(&self.container, &self.key),
            query: Vec::new(),
            headers,
            body: Bytes::new(),
            context,
        })
    }
}

impl IntoStorageRequest for UploadObjectInput {
    type Output = UploadObjectOutput;

    fn into_storage_request(self) -> Result<RequestParts, StorageError> {
        validate_container_name(&self.container)?;
        validate_object_key(&self.key)?;
        validate_metadata(&self.metadata)?;

        let mut headers = HeaderMap::new();
        codec::set_optional_header(&mut headers, "content-type", self.content_type.as_deref());
        codec::set_optional_header(
            &mut headers,
            "content-disposition",
            self.content_disposition.as_deref(),
        );
        codec::set_unix_timestamp_header(&mut headers, codec::DELETE_AT, self.delete_at.as_ref());
        codec::set_optional_u64_header(&mut headers, codec::DELETE_AFTER, self.delete_after);
        codec::set_metadata_headers(&mut headers, codec::OBJECT_META_PREFIX, &self.metadata);

        let mut context = RequestContext::new(StorageOperation::UploadObject)
            .with_container(self.container.clone())
            .with_key(self.key.clone());
        if self.validate_checksum {
            context.expected_etag = Some(hex::encode(Md5::digest(&self.body)));
        }

        Ok(RequestParts {
            method: Method::PUT,
            path: object_path(&self.container, &self.key),
            query: Vec::new(),
            headers,
            body: self.body,
            context,
        })
    }
}

impl IntoStorageRequest for DeleteObjectInput {
    type Output = DeleteObjectOutput;

    fn into_storage_request(self) -> Result<RequestParts, StorageError> {
        validate_container_name(&self.container)?;
        validate_object_key(&self.key)?;
        Ok(RequestParts {
            method: Method::DELETE,
            path: object_path(&self.container, &self.key),
            query: Vec::new(),
            headers: HeaderMap::new(),
            body: Bytes::new(),
            context: RequestContext::new(StorageOperation::DeleteObject)
                .with_container(self.container)
                .with_key(self.key),
        })
    }
}

impl IntoStorageRequest for UpdateObjectMetaInput {
    type Output = UpdateObjectMetaOutput;

    fn into_storage_request(self) -> Result<RequestParts, StorageError> {
        validate_container_name(&self.container)?;
        validate_object_key(&self.key)?;
        validate_metadata(&self.metadata)?;
        let mut headers = HeaderMap::new();
        codec::encode_object_cors(&mut headers, &self.cors);
        codec::set_metadata_headers(&mut headers, codec::OBJECT_META_PREFIX, &self.metadata);
        Ok(RequestParts {
            method: Method::POST,
            path: object_path(&self.container, &self.key),
            query: Vec::new(),
            headers,
            body: Bytes::new(),
            context: RequestContext::new(StorageOperation::UpdateObjectMeta)
                .with_container(self.container)
                .with_key(self.key),
        })
    }
}

impl IntoStorageRequest for UploadArchiveInput {
    type Output = UploadArchiveOutput;

    fn into_storage_request(self) -> Result<RequestParts, StorageError> {
        validate_container_name(&self.container)?;
        if let Some(path) = &self.path {
            validate_object_key(path)?;
        }

        let path = match &self.path {
            Some(folder) => object_path(&self.container, folder),
            None => container_path(&self.container),
        };
        let query = vec![(
            "extract-archive".to_owned(),
            self.format.as_str().to_owned(),
        )];
        let mut headers = HeaderMap::new();
        // The extraction report comes back as JSON only when asked for.
        codec::set_header(&mut headers, "accept", mime::APPLICATION_JSON.as_ref());

        Ok(RequestParts {
            method: Method::PUT,
            path,
            query,
            headers,
            body: self.body,
            context: RequestContext::new(StorageOperation::UploadArchive)
                .with_container(self.container),
        })
    }
}
