//! Outputs for container operations.

use crate::types::{ContainerEntry, ContainerType, CorsHeaders, CreateContainerStatus, Metadata};

/// Container metadata, decoded from the `HEAD /{container}` response headers.
#[derive(Debug, Clone, Default)]
pub struct GetContainerInfoOutput {
    /// Container name, echoed from the request.
    pub name: String,
    /// HTTP header: `X-Container-Object-Count`.
    pub object_count: u64,
    /// HTTP header: `X-Container-Bytes-Used`.
    pub bytes_used: u64,
    /// HTTP header: `X-Transfered-Bytes` (spelled this way on the wire).
    pub transferred_bytes: u64,
    /// HTTP header: `X-Received-Bytes`.
    pub received_bytes: u64,
    /// HTTP header: `X-Container-Meta-Type`.
    pub container_type: ContainerType,
    /// HTTP headers: `X-Container-Meta-Access-Control-*`.
    pub cors: CorsHeaders,
    /// Remaining `X-Container-Meta-*` headers, prefix stripped, plus any
    /// unrecognized headers under their full names.
    pub metadata: Metadata,
}

/// Account-level container listing, decoded from the JSON body.
#[derive(Debug, Clone, Default)]
pub struct ListContainersOutput {
    /// Entries in the order the service returned them.
    pub entries: Vec<ContainerEntry>,
}

impl ListContainersOutput {
    /// Name of the last entry, usable as the `marker` of the next page.
    #[must_use]
    pub fn last_name(&self) -> Option<&str> {
        self.entries.last().map(|e| e.name.as_str())
    }
}

/// Result of a create-container call.
#[derive(Debug, Clone, Default)]
pub struct CreateContainerOutput {
    /// Whether the container was created or already existed.
    pub status: CreateContainerStatus,
}

/// Result of a delete-container call.
#[derive(Debug, Clone, Default)]
pub struct DeleteContainerOutput {}

/// Result of a container metadata update.
#[derive(Debug, Clone, Default)]
pub struct UpdateContainerMetaOutput {}

/// Result of turning a container into a gallery.
#[derive(Debug, Clone, Default)]
pub struct SetContainerToGalleryOutput {}
