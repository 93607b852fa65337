//! The storage client and its dispatch facade.
//!
//! [`StorageClient::execute`] is the single path every operation goes
//! through: build request parts (local validation), one HTTP call, decode
//! the response. The auth token is attached here and nowhere else.

use std::path::Path;
use std::sync::Arc;

use selstack_http::request::{IntoStorageRequest, RequestParts};
use selstack_http::response::{FromStorageResponse, ResponseParts};
use selstack_model::StorageError;
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
use selstack_model::types::{ArchiveFormat, ListEntry, ObjectEntry};

use crate::config::ClientConfig;
use crate::credentials::CredentialProvider;

/// Async client for an OpenStack-Swift-compatible storage account.
///
/// Cheap to clone; clones share the underlying connection pool. Distinct
/// calls are fully independent; no ordering guarantees exist between
/// concurrently issued operations.
#[derive(Clone)]
pub struct StorageClient {
    http: reqwest::Client,
    storage_url: reqwest::Url,
    credentials: Arc<dyn CredentialProvider>,
}

impl std::fmt::Debug for StorageClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorageClient")
            .field("storage_url", &self.storage_url.as_str())
            .finish_non_exhaustive()
    }
}

impl StorageClient {
    /// Create a client from configuration and a credential provider.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::InvalidArgument`] when the storage URL does
    /// not parse, or [`StorageError::Transport`] when the HTTP client
    /// cannot be constructed.
    pub fn new(
        config: ClientConfig,
        credentials: impl CredentialProvider + 'static,
    ) -> Result<Self, StorageError> {
        let storage_url = reqwest::Url::parse(&config.storage_url).map_err(|e| {
            StorageError::invalid_argument(format!(
                "storage URL {:?} does not parse: {e}",
                config.storage_url
            ))
        })?;
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent)
            .build()
            .map_err(|e| StorageError::transport("failed to build HTTP client", e))?;
        Ok(Self {
            http,
            storage_url,
            credentials: Arc::new(credentials),
        })
    }

    /// Execute one operation: one HTTP call, one decoded result.
    ///
    /// # Errors
    ///
    /// Local validation failures surface before any network activity;
    /// transport failures as [`StorageError::Transport`]; non-2xx responses
    /// as [`StorageError::Service`] carrying status and error body; and a
    /// requested-but-failed upload checksum as
    /// [`StorageError::ChecksumMismatch`].
    pub async fn execute<R: IntoStorageRequest>(
        &self,
        input: R,
    ) -> Result<R::Output, StorageError> {
        let RequestParts {
            method,
            path,
            query,
            headers,
            body,
            context: ctx,
        } = input.into_storage_request()?;

        let mut url = self.storage_url.clone();
        let full_path = format!("{}{path}", self.storage_url.path().trim_end_matches('/'));
        url.set_path(&full_path);
        if !query.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(query.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        }

        let mut request = self.http.request(method, url).headers(headers);
        if !ctx.anonymous {
            if let Some(credentials) = self.credentials.current() {
                request = request.header(selstack_http::codec::AUTH_TOKEN, credentials.token);
            }
        }
        if !body.is_empty() {
            request = request.body(body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| StorageError::transport("request failed", e))?;
        let status = response.status();
        let response_headers = response.headers().clone();
        let body = response
            .bytes()
            .await
            .map_err(|e| StorageError::transport("failed to read response body", e))?;

        tracing::debug!(
            operation = %ctx.operation,
            container = ?ctx.container,
            key = ?ctx.key,
            status = %status,
            "storage operation completed"
        );

        if !status.is_success() {
            return Err(StorageError::service(
                status,
                String::from_utf8_lossy(&body).into_owned(),
            ));
        }

        R::Output::from_storage_response(
            &ResponseParts {
                status,
                headers: response_headers,
            },
            body,
            &ctx,
        )
    }

    // -----------------------------------------------------------------------
    // Container operations
    // -----------------------------------------------------------------------

    /// Fetch container metadata.
    ///
    /// # Errors
    ///
    /// See [`execute`](Self::execute).
    pub async fn container_info(
        &self,
        container: &str,
    ) -> Result<GetContainerInfoOutput, StorageError> {
        self.execute(GetContainerInfoInput {
            container: container.to_owned(),
        })
        .await
    }

    /// List containers in the account.
    ///
    /// # Errors
    ///
    /// See [`execute`](Self::execute).
    pub async fn list_containers(
        &self,
        input: ListContainersInput,
    ) -> Result<ListContainersOutput, StorageError> {
        self.execute(input).await
    }

    /// Create a container.
    ///
    /// # Errors
    ///
    /// See [`execute`](Self::execute).
    pub async fn create_container(
        &self,
        input: CreateContainerInput,
    ) -> Result<CreateContainerOutput, StorageError> {
        self.execute(input).await
    }

    /// Delete an empty container. Deleting a non-empty container fails with
    /// a 409 service error.
    ///
    /// # Errors
    ///
    /// See [`execute`](Self::execute).
    pub async fn delete_container(
        &self,
        container: &str,
    ) -> Result<DeleteContainerOutput, StorageError> {
        self.execute(DeleteContainerInput {
            container: container.to_owned(),
        })
        .await
    }

    /// Replace container metadata.
    ///
    /// # Errors
    ///
    /// See [`execute`](Self::execute).
    pub async fn update_container_meta(
        &self,
        input: UpdateContainerMetaInput,
    ) -> Result<UpdateContainerMetaOutput, StorageError> {
        self.execute(input).await
    }

    /// Turn a container into a gallery, optionally protected by a password.
    ///
    /// # Errors
    ///
    /// See [`execute`](Self::execute).
    pub async fn set_container_to_gallery(
        &self,
        container: &str,
        secret: Option<String>,
    ) -> Result<SetContainerToGalleryOutput, StorageError> {
        self.execute(SetContainerToGalleryInput {
            container: container.to_owned(),
            secret,
        })
        .await
    }

    // -----------------------------------------------------------------------
    // Object operations
    // -----------------------------------------------------------------------

    /// List one page of objects in a container.
    ///
    /// # Errors
    ///
    /// See [`execute`](Self::execute).
    pub async fn list_objects(
        &self,
        input: ListObjectsInput,
    ) -> Result<ListObjectsOutput, StorageError> {
        self.execute(input).await
    }

    /// Enumerate every object in a container by paging with markers.
    ///
    /// Each page carries the previous page's last entry name as its marker;
    /// iteration stops when a page comes back shorter than `page_size`.
    ///
    /// # Errors
    ///
    /// See [`execute`](Self::execute).
    pub async fn list_all_objects(
        &self,
        container: &str,
        page_size: u32,
    ) -> Result<Vec<ObjectEntry>, StorageError> {
        let mut all = Vec::new();
        let mut marker: Option<String> = None;
        loop {
            let page = self
                .execute(ListObjectsInput {
                    container: container.to_owned(),
                    limit: Some(page_size),
                    marker: marker.take(),
                    ..Default::default()
                })
                .await?;
            let page_len = page.entries.len();
            marker = page.last_name().map(ToOwned::to_owned);
            all.extend(page.entries.into_iter().filter_map(|e| match e {
                ListEntry::Object(o) => Some(o),
                ListEntry::Subdir(_) => None,
            }));
            if page_len < page_size as usize || marker.is_none() {
                return Ok(all);
            }
        }
    }

    /// Download an object.
    ///
    /// # Errors
    ///
    /// See [`execute`](Self::execute).
    pub async fn get_object(&self, input: GetObjectInput) -> Result<GetObjectOutput, StorageError> {
        self.execute(input).await
    }

    /// Upload an object from in-memory bytes.
    ///
    /// # Errors
    ///
    /// See [`execute`](Self::execute).
    pub async fn upload_object(
        &self,
        input: UploadObjectInput,
    ) -> Result<UploadObjectOutput, StorageError> {
        self.execute(input).await
    }

    /// Upload an object from a local file, reading it fully into memory.
    ///
    /// The `body` field of `input` is replaced with the file contents.
    ///
    /// # Errors
    ///
    /// [`StorageError::LocalFile`] when the file cannot be read; otherwise
    /// see [`execute`](Self::execute).
    pub async fn upload_file_from_path(
        &self,
        local_path: impl AsRef<Path>,
        mut input: UploadObjectInput,
    ) -> Result<UploadObjectOutput, StorageError> {
        input.body = read_local_file(local_path.as_ref()).await?;
        self.execute(input).await
    }

    /// Delete an object.
    ///
    /// # Errors
    ///
    /// See [`execute`](Self::execute).
    pub async fn delete_object(
        &self,
        container: &str,
        key: &str,
    ) -> Result<DeleteObjectOutput, StorageError> {
        self.execute(DeleteObjectInput {
            container: container.to_owned(),
            key: key.to_owned(),
        })
        .await
    }

    /// Replace object metadata.
    ///
    /// # Errors
    ///
    /// See [`execute`](Self::execute).
    pub async fn update_object_meta(
        &self,
        input: UpdateObjectMetaInput,
    ) -> Result<UpdateObjectMetaOutput, StorageError> {
        self.execute(input).await
    }

    /// Upload an archive for server-side extraction.
    ///
    /// # Errors
    ///
    /// See [`execute`](Self::execute).
    pub async fn upload_archive(
        &self,
        input: UploadArchiveInput,
    ) -> Result<UploadArchiveOutput, StorageError> {
        self.execute(input).await
    }

    /// Upload a local archive for server-side extraction, inferring the
    /// format from the file name when not supplied.
    ///
    /// # Errors
    ///
    /// [`StorageError::UnsupportedArchiveFormat`] when the format is
    /// neither supplied nor inferable (raised before any I/O);
    /// [`StorageError::LocalFile`] when the file cannot be read; otherwise
    /// see [`execute`](Self::execute).
    pub async fn upload_archive_from_path(
        &self,
        container: &str,
        local_path: impl AsRef<Path>,
        path: Option<String>,
        format: Option<ArchiveFormat>,
    ) -> Result<UploadArchiveOutput, StorageError> {
        let local_path = local_path.as_ref();
        let Some(format) =
            format.or_else(|| ArchiveFormat::from_path(&local_path.to_string_lossy()))
        else {
            return Err(StorageError::UnsupportedArchiveFormat {
                path: local_path.display().to_string(),
            });
        };
        let body = read_local_file(local_path).await?;
        self.execute(UploadArchiveInput {
            container: container.to_owned(),
            body,
            format,
            path,
        })
        .await
    }
}

/// Read a local file fully into memory.
async fn read_local_file(path: &Path) -> Result<bytes::Bytes, StorageError> {
    tokio::fs::read(path)
        .await
        .map(bytes::Bytes::from)
        .map_err(|source| StorageError::LocalFile {
            path: path.display().to_string(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use crate::credentials::StaticCredentials;

    use super::*;

    fn test_client() -> StorageClient {
        StorageClient::new(ClientConfig::default(), StaticCredentials::new("tok"))
            .expect("default config should build")
    }

    #[test]
    fn test_should_reject_unparseable_storage_url() {
        let config = ClientConfig {
            storage_url: "not a url".to_owned(),
            ..Default::default()
        };
        let err = StorageClient::new(config, StaticCredentials::new("tok")).unwrap_err();
        assert!(matches!(err, StorageError::InvalidArgument { .. }));
    }

    #[tokio::test]
    async fn test_should_fail_archive_upload_for_unknown_suffix_without_io() {
        // The file does not exist; format resolution must fail first, so
        // this proves neither the filesystem nor the network was touched.
        let err = test_client()
            .upload_archive_from_path("backups", "no-such-file.zip", None, None)
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::UnsupportedArchiveFormat { .. }));
    }

    #[tokio::test]
    async fn test_should_surface_local_read_failure_for_known_suffix() {
        let err = test_client()
            .upload_archive_from_path("backups", "no-such-file.tar", None, None)
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::LocalFile { .. }));
    }

    #[tokio::test]
    async fn test_should_fail_local_validation_before_any_network_call() {
        // Empty container name: the builder rejects it locally, so this
        // completes instantly even though no server is listening.
        let err = test_client().container_info("").await.unwrap_err();
        assert!(err.is_local());
    }
}
