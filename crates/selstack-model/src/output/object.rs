//! Outputs for object operations.

use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::types::{ListEntry, Metadata, ObjectEntry};

/// Container listing, decoded from the JSON body.
#[derive(Debug, Clone, Default)]
pub struct ListObjectsOutput {
    /// Entries (objects and `subdir` pseudo-entries) in service order.
    pub entries: Vec<ListEntry>,
}

impl ListObjectsOutput {
    /// Iterate over the real object entries, skipping `subdir` markers.
    pub fn objects(&self) -> impl Iterator<Item = &ObjectEntry> {
        self.entries.iter().filter_map(|e| match e {
            ListEntry::Object(o) => Some(o),
            ListEntry::Subdir(_) => None,
        })
    }

    /// Name of the last entry, usable as the `marker` of the next page.
    #[must_use]
    pub fn last_name(&self) -> Option<&str> {
        self.entries.last().map(ListEntry::name)
    }
}

/// A downloaded object: content bytes plus decoded headers.
#[derive(Debug, Clone, Default)]
pub struct GetObjectOutput {
    /// Object key, echoed from the request.
    pub name: String,
    /// The object content.
    pub body: Bytes,
    /// HTTP header: `Content-Type`.
    pub content_type: Option<String>,
    /// HTTP header: `Content-Length`.
    pub content_length: Option<u64>,
    /// HTTP header: `ETag`. Hex MD5 of the content.
    pub etag: Option<String>,
    /// HTTP header: `Last-Modified`.
    pub last_modified: Option<DateTime<Utc>>,
    /// HTTP header: `Content-Disposition`.
    pub content_disposition: Option<String>,
    /// HTTP header: `X-Delete-At`, Unix seconds.
    pub delete_at: Option<DateTime<Utc>>,
    /// `X-Object-Meta-*` headers, prefix stripped, plus any unrecognized
    /// headers under their full names.
    pub metadata: Metadata,
}

/// Result of an object upload.
#[derive(Debug, Clone, Default)]
pub struct UploadObjectOutput {
    /// HTTP header: `ETag`. Hex MD5 the service computed for the stored
    /// content.
    pub etag: Option<String>,
}

/// Result of an object delete.
#[derive(Debug, Clone, Default)]
pub struct DeleteObjectOutput {}

/// Result of an object metadata update.
#[derive(Debug, Clone, Default)]
pub struct UpdateObjectMetaOutput {}

/// Server-side extraction report, decoded from the JSON body of an archive
/// upload.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UploadArchiveOutput {
    /// Number of files the service created from the archive.
    #[serde(rename = "Number Files Created", default)]
    pub files_created: u64,
    /// Status line of the extraction, e.g. `201 Created`.
    #[serde(rename = "Response Status", default)]
    pub response_status: String,
    /// Per-entry failures as `(name, reason)` pairs.
    #[serde(rename = "Errors", default)]
    pub errors: Vec<(String, String)>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SubdirEntry;

    #[test]
    fn test_should_derive_next_marker_from_last_entry() {
        let out = ListObjectsOutput {
            entries: vec![
                ListEntry::Object(ObjectEntry {
                    name: "a.txt".to_owned(),
                    bytes: 1,
                    hash: None,
                    content_type: None,
                    last_modified: None,
                }),
                ListEntry::Subdir(SubdirEntry {
                    subdir: "b/".to_owned(),
                }),
            ],
        };
        assert_eq!(out.last_name(), Some("b/"));
        assert_eq!(out.objects().count(), 1);
    }

    #[test]
    fn test_should_return_no_marker_for_empty_listing() {
        assert!(ListObjectsOutput::default().last_name().is_none());
    }

    #[test]
    fn test_should_decode_extraction_report() {
        let json = r#"{
            "Number Files Created": 3,
            "Response Status": "201 Created",
            "Errors": [["bad/name", "400 Bad Request"]],
            "Response Body": ""
        }"#;
        let out: UploadArchiveOutput = serde_json::from_str(json).expect("should decode");
        assert_eq!(out.files_created, 3);
        assert_eq!(out.response_status, "201 Created");
        assert_eq!(out.errors.len(), 1);
        assert_eq!(out.errors[0].0, "bad/name");
    }

    #[test]
    fn test_should_decode_extraction_report_with_missing_fields() {
        let out: UploadArchiveOutput = serde_json::from_str("{}").expect("should decode");
        assert_eq!(out.files_created, 0);
        assert!(out.errors.is_empty());
    }
}
