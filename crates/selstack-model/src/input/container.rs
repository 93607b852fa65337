//! Inputs for container operations.

use crate::types::{ContainerType, CorsHeaders, Metadata};

/// Fetch container metadata. Maps to `HEAD /{container}`.
#[derive(Debug, Clone, Default)]
pub struct GetContainerInfoInput {
    /// HTTP label (URI path).
    pub container: String,
}

/// List containers in the account. Maps to `GET /`.
#[derive(Debug, Clone, Default)]
pub struct ListContainersInput {
    /// HTTP query: `limit`. Page size, at most 10 000.
    pub limit: Option<u32>,
    /// HTTP query: `marker`. Name of the last entry of the previous page.
    pub marker: Option<String>,
}

/// Create a container. Maps to `PUT /{container}`.
#[derive(Debug, Clone, Default)]
pub struct CreateContainerInput {
    /// HTTP label (URI path).
    pub container: String,
    /// HTTP header: `X-Container-Meta-Type`.
    pub container_type: ContainerType,
    /// HTTP prefix headers: `X-Container-Meta-`.
    pub metadata: Metadata,
    /// HTTP headers: `X-Container-Meta-Access-Control-*`.
    pub cors: CorsHeaders,
}

/// Delete an empty container. Maps to `DELETE /{container}`.
///
/// Deleting a non-empty container fails with a 409 service error.
#[derive(Debug, Clone, Default)]
pub struct DeleteContainerInput {
    /// HTTP label (URI path).
    pub container: String,
}

/// Replace container metadata. Maps to `POST /{container}`.
#[derive(Debug, Clone, Default)]
pub struct UpdateContainerMetaInput {
    /// HTTP label (URI path).
    pub container: String,
    /// HTTP header: `X-Container-Meta-Type`.
    pub container_type: ContainerType,
    /// HTTP prefix headers: `X-Container-Meta-`.
    pub metadata: Metadata,
    /// HTTP headers: `X-Container-Meta-Access-Control-*`.
    pub cors: CorsHeaders,
}

/// Turn a container into a gallery. Maps to `POST /{container}` with
/// `X-Container-Meta-Type: gallery`.
#[derive(Debug, Clone, Default)]
pub struct SetContainerToGalleryInput {
    /// HTTP label (URI path).
    pub container: String,
    /// HTTP header: `X-Container-Meta-Gallery-Secret`. Optional access
    /// password for the gallery.
    pub secret: Option<String>,
}
