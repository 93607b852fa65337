//! Enumeration of all storage operations.

/// All operations the client can perform.
///
/// Used for dispatch tracing; each variant corresponds 1:1 to an Input
/// struct in [`crate::input`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageOperation {
    /// Fetch container metadata (headers only).
    GetContainerInfo,
    /// List containers in the account.
    ListContainers,
    /// Create a container.
    CreateContainer,
    /// Delete an empty container.
    DeleteContainer,
    /// Replace container metadata.
    UpdateContainerMeta,
    /// Turn a container into a gallery.
    SetContainerToGallery,
    /// List objects in a container.
    ListObjects,
    /// Download an object.
    GetObject,
    /// Upload an object.
    UploadObject,
    /// Delete an object.
    DeleteObject,
    /// Replace object metadata.
    UpdateObjectMeta,
    /// Upload an archive and extract it server-side.
    UploadArchive,
}

impl StorageOperation {
    /// Returns the operation name as a string.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GetContainerInfo => "GetContainerInfo",
            Self::ListContainers => "ListContainers",
            Self::CreateContainer => "CreateContainer",
            Self::DeleteContainer => "DeleteContainer",
            Self::UpdateContainerMeta => "UpdateContainerMeta",
            Self::SetContainerToGallery => "SetContainerToGallery",
            Self::ListObjects => "ListObjects",
            Self::GetObject => "GetObject",
            Self::UploadObject => "UploadObject",
            Self::DeleteObject => "DeleteObject",
            Self::UpdateObjectMeta => "UpdateObjectMeta",
            Self::UploadArchive => "UploadArchive",
        }
    }
}

impl std::fmt::Display for StorageOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
