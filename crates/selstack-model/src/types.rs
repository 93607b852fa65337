//! Shared types used by inputs and outputs.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};

/// Custom metadata attached to a container or object.
///
/// Keys are stored without the `X-Container-Meta-` / `X-Object-Meta-` prefix;
/// the prefix convention is applied by the header codec.
pub type Metadata = HashMap<String, String>;

/// Visibility type of a container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ContainerType {
    /// Default variant. Objects require an auth token to read.
    #[default]
    Private,
    /// Objects are readable without authentication.
    Public,
    /// Container is served as a web gallery.
    Gallery,
}

impl ContainerType {
    /// Returns the wire value of this container type.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Private => "private",
            Self::Public => "public",
            Self::Gallery => "gallery",
        }
    }
}

impl std::fmt::Display for ContainerType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for ContainerType {
    fn from(s: &str) -> Self {
        match s {
            "public" => Self::Public,
            "gallery" => Self::Gallery,
            _ => Self::default(),
        }
    }
}

/// Archive format accepted by the upload-and-extract endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArchiveFormat {
    /// Plain tar archive.
    Tar,
    /// Gzip-compressed tar archive.
    TarGz,
    /// Bzip2-compressed tar archive.
    TarBz2,
}

impl ArchiveFormat {
    /// Returns the wire value used in the `extract-archive` query parameter.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Tar => "tar",
            Self::TarGz => "tar.gz",
            Self::TarBz2 => "tar.bz2",
        }
    }

    /// Infer the archive format from a local file name.
    ///
    /// Recognized suffixes are `.tar`, `.tar.gz`, and `.tar.bz2`. Returns
    /// `None` when no suffix matches; callers turn that into an
    /// unsupported-format error before any I/O happens.
    #[must_use]
    pub fn from_path(path: &str) -> Option<Self> {
        if path.ends_with(".tar") {
            Some(Self::Tar)
        } else if path.ends_with(".tar.gz") {
            Some(Self::TarGz)
        } else if path.ends_with(".tar.bz2") {
            Some(Self::TarBz2)
        } else {
            None
        }
    }
}

impl std::fmt::Display for ArchiveFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// CORS and cache configuration for a container or object.
///
/// On containers these encode as `X-Container-Meta-Access-Control-*`
/// headers; on objects they encode under their plain header names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CorsHeaders {
    /// Origins allowed to read the resource, space-separated.
    pub access_control_allow_origin: Option<String>,
    /// How long (seconds) a preflight response may be cached.
    pub access_control_max_age: Option<u64>,
    /// Response headers exposed to cross-origin readers, space-separated.
    pub access_control_expose_headers: Option<String>,
    /// Cache-Control value served with the resource.
    pub cache_control: Option<String>,
}

impl CorsHeaders {
    /// Returns `true` if no field is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.access_control_allow_origin.is_none()
            && self.access_control_max_age.is_none()
            && self.access_control_expose_headers.is_none()
            && self.cache_control.is_none()
    }
}

/// Conditional predicates attached to an object read.
///
/// The service evaluates these, not the client; a failed predicate comes
/// back as a 304 or 412 service error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConditionalHeaders {
    /// HTTP header: `If-Match`.
    pub if_match: Option<String>,
    /// HTTP header: `If-None-Match`.
    pub if_none_match: Option<String>,
    /// HTTP header: `If-Modified-Since`.
    pub if_modified_since: Option<DateTime<Utc>>,
    /// HTTP header: `If-Unmodified-Since`.
    pub if_unmodified_since: Option<DateTime<Utc>>,
}

/// Outcome of a create-container call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CreateContainerStatus {
    /// Default variant. The container was created (HTTP 201).
    #[default]
    Created,
    /// The container already existed (HTTP 202).
    AlreadyExists,
}

/// One entry in an account-level container listing.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ContainerEntry {
    /// Container name.
    pub name: String,
    /// Number of objects stored in the container.
    #[serde(default)]
    pub count: u64,
    /// Total bytes stored in the container.
    #[serde(default)]
    pub bytes: u64,
}

/// One object entry in a container listing.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ObjectEntry {
    /// Object key within the container.
    pub name: String,
    /// Object size in bytes.
    #[serde(default)]
    pub bytes: u64,
    /// MD5 checksum of the object content, hex-encoded.
    #[serde(default)]
    pub hash: Option<String>,
    /// Stored content type.
    #[serde(default)]
    pub content_type: Option<String>,
    /// Last modification time; `None` when the service value is unparseable.
    #[serde(default, deserialize_with = "listing_timestamp")]
    pub last_modified: Option<DateTime<Utc>>,
}

/// Pseudo-entry returned for a virtual folder when listing with a delimiter.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SubdirEntry {
    /// The common prefix, including the trailing delimiter.
    pub subdir: String,
}

/// One entry of a container listing, in the order the service returned it.
///
/// Delimiter listings interleave real objects with `subdir` pseudo-entries;
/// the order is preserved as-is and never re-sorted.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ListEntry {
    /// A virtual folder marker.
    Subdir(SubdirEntry),
    /// A stored object.
    Object(ObjectEntry),
}

impl ListEntry {
    /// The name of this entry: object key or subdir prefix.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Subdir(s) => &s.subdir,
            Self::Object(o) => &o.name,
        }
    }
}

/// Parse the listing timestamp format (`2016-07-13T12:33:45.137730`).
///
/// The value has no timezone designator and fractional seconds; it is UTC by
/// protocol. Unparseable values decode to `None` rather than failing the
/// whole listing.
fn listing_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(parse_listing_timestamp))
}

/// Parse a listing timestamp string, trying the native format then RFC 3339.
#[must_use]
pub fn parse_listing_timestamp(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(naive) = chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}
