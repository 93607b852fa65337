//! Header codec for the Swift REST protocol.
//!
//! Decoding is permissive: a malformed value (bad timestamp, non-numeric
//! size) leaves the target field unset and parsing continues; the service
//! is trusted but not infallible. Every header a result type does not
//! recognize is preserved as opaque custom metadata, never dropped.
//!
//! Encoding applies the `X-Container-Meta-` / `X-Object-Meta-` prefix
//! convention to custom metadata keys. A key whose prefixed form collides
//! with a reserved header name is skipped: the reserved value wins.

use std::str::FromStr;

use chrono::{DateTime, TimeZone, Utc};
use http::header::{HeaderMap, HeaderName, HeaderValue};
use selstack_model::types::{ConditionalHeaders, CorsHeaders, Metadata};

/// HTTP header: auth token attached by the dispatch facade.
pub const AUTH_TOKEN: &str = "x-auth-token";

/// Prefix of container custom-metadata headers.
pub const CONTAINER_META_PREFIX: &str = "x-container-meta-";

/// Prefix of object custom-metadata headers.
pub const OBJECT_META_PREFIX: &str = "x-object-meta-";

/// HTTP header: container visibility type.
pub const CONTAINER_TYPE: &str = "x-container-meta-type";

/// HTTP header: gallery access password.
pub const GALLERY_SECRET: &str = "x-container-meta-gallery-secret";

/// HTTP header: number of objects in a container.
pub const CONTAINER_OBJECT_COUNT: &str = "x-container-object-count";

/// HTTP header: bytes stored in a container.
pub const CONTAINER_BYTES_USED: &str = "x-container-bytes-used";

/// HTTP header: bytes transferred out of a container. The wire name drops
/// one `r`.
pub const TRANSFERRED_BYTES: &str = "x-transfered-bytes";

/// HTTP header: bytes received into a container.
pub const RECEIVED_BYTES: &str = "x-received-bytes";

/// HTTP header: absolute object expiry, Unix seconds.
pub const DELETE_AT: &str = "x-delete-at";

/// HTTP header: relative object expiry, seconds from now.
pub const DELETE_AFTER: &str = "x-delete-after";

/// Container-scoped CORS headers (meta-prefixed).
const CONTAINER_CORS_ALLOW_ORIGIN: &str = "x-container-meta-access-control-allow-origin";
const CONTAINER_CORS_MAX_AGE: &str = "x-container-meta-access-control-max-age";
const CONTAINER_CORS_EXPOSE_HEADERS: &str = "x-container-meta-access-control-expose-headers";
const CONTAINER_CORS_CACHE_CONTROL: &str = "x-container-meta-cache-control";

/// Object-scoped CORS headers (plain names).
const OBJECT_CORS_ALLOW_ORIGIN: &str = "access-control-allow-origin";
const OBJECT_CORS_MAX_AGE: &str = "access-control-max-age";
const OBJECT_CORS_EXPOSE_HEADERS: &str = "access-control-expose-headers";
const OBJECT_CORS_CACHE_CONTROL: &str = "cache-control";

/// Every CORS header name the container codec recognizes.
pub const CONTAINER_CORS_HEADERS: &[&str] = &[
    CONTAINER_CORS_ALLOW_ORIGIN,
    CONTAINER_CORS_MAX_AGE,
    CONTAINER_CORS_EXPOSE_HEADERS,
    CONTAINER_CORS_CACHE_CONTROL,
];

/// Header names custom metadata must not shadow; on collision the reserved
/// value wins and the metadata entry is skipped.
const RESERVED_HEADERS: &[&str] = &[
    AUTH_TOKEN,
    CONTAINER_TYPE,
    GALLERY_SECRET,
    DELETE_AT,
    DELETE_AFTER,
    "content-type",
    "content-disposition",
    "content-length",
    "etag",
    CONTAINER_CORS_ALLOW_ORIGIN,
    CONTAINER_CORS_MAX_AGE,
    CONTAINER_CORS_EXPOSE_HEADERS,
    CONTAINER_CORS_CACHE_CONTROL,
];

/// Standard transport headers excluded from custom-metadata collection.
const TRANSPORT_HEADERS: &[&str] = &[
    "date",
    "server",
    "connection",
    "keep-alive",
    "transfer-encoding",
    "vary",
    "accept-ranges",
    "content-length",
    "content-type",
    "last-modified",
    "etag",
    "x-trans-id",
    "x-openstack-request-id",
    "x-timestamp",
];

/// `true` when custom metadata must not write this header name.
#[must_use]
pub fn is_reserved(name: &str) -> bool {
    RESERVED_HEADERS.contains(&name)
}

// ---------------------------------------------------------------------------
// Decoding
// ---------------------------------------------------------------------------

/// Extract a header value as a string.
#[must_use]
pub fn header_str(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(ToOwned::to_owned)
}

/// Extract a header value and parse it into a type implementing `FromStr`.
///
/// A malformed value yields `None`; the caller keeps the field's default.
#[must_use]
pub fn header_parse<T: FromStr>(headers: &HeaderMap, name: &str) -> Option<T> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.trim().parse().ok())
}

/// Extract a header value and parse it as an HTTP date.
#[must_use]
pub fn header_timestamp(headers: &HeaderMap, name: &str) -> Option<DateTime<Utc>> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .and_then(parse_http_date)
}

/// Extract a header value and parse it as Unix seconds.
#[must_use]
pub fn header_unix_timestamp(headers: &HeaderMap, name: &str) -> Option<DateTime<Utc>> {
    let secs: i64 = header_parse(headers, name)?;
    Utc.timestamp_opt(secs, 0).single()
}

/// Parse an HTTP date string.
///
/// Tries RFC 3339, RFC 2822, and the bare IMF-fixdate form in that order;
/// returns `None` when nothing matches.
#[must_use]
pub fn parse_http_date(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = chrono::NaiveDateTime::parse_from_str(s, "%a, %d %b %Y %H:%M:%S GMT") {
        return Some(dt.and_utc());
    }
    None
}

/// Format a timestamp as an IMF-fixdate header value.
#[must_use]
pub fn format_http_date(dt: &DateTime<Utc>) -> String {
    dt.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

/// Collect custom metadata from response headers.
///
/// Headers matching `prefix` land in the map with the prefix stripped.
/// Headers that are neither `recognized` (typed fields of the target
/// result) nor standard transport headers are preserved under their full
/// lowercase name. Unknown headers are never dropped.
#[must_use]
pub fn collect_metadata(headers: &HeaderMap, prefix: &str, recognized: &[&str]) -> Metadata {
    let mut metadata = Metadata::new();
    for (name, value) in headers {
        let name = name.as_str();
        if recognized.contains(&name) || TRANSPORT_HEADERS.contains(&name) {
            continue;
        }
        let Ok(value) = value.to_str() else {
            continue;
        };
        if let Some(key) = name.strip_prefix(prefix) {
            metadata.insert(key.to_owned(), value.to_owned());
        } else {
            metadata.insert(name.to_owned(), value.to_owned());
        }
    }
    metadata
}

/// Decode container-scoped CORS headers.
#[must_use]
pub fn decode_container_cors(headers: &HeaderMap) -> CorsHeaders {
    CorsHeaders {
        access_control_allow_origin: header_str(headers, CONTAINER_CORS_ALLOW_ORIGIN),
        access_control_max_age: header_parse(headers, CONTAINER_CORS_MAX_AGE),
        access_control_expose_headers: header_str(headers, CONTAINER_CORS_EXPOSE_HEADERS),
        cache_control: header_str(headers, CONTAINER_CORS_CACHE_CONTROL),
    }
}

// ---------------------------------------------------------------------------
// Encoding
// ---------------------------------------------------------------------------

/// Set a header from a static name, dropping values that cannot be encoded.
pub fn set_header(headers: &mut HeaderMap, name: &'static str, value: &str) {
    if let Ok(value) = HeaderValue::from_str(value) {
        headers.insert(HeaderName::from_static(name), value);
    }
}

/// Set a header when the value is present.
pub fn set_optional_header(headers: &mut HeaderMap, name: &'static str, value: Option<&str>) {
    if let Some(value) = value {
        set_header(headers, name, value);
    }
}

/// Set a numeric header when the value is present.
pub fn set_optional_u64_header(headers: &mut HeaderMap, name: &'static str, value: Option<u64>) {
    if let Some(value) = value {
        set_header(headers, name, &value.to_string());
    }
}

/// Set a Unix-seconds timestamp header when the value is present.
pub fn set_unix_timestamp_header(
    headers: &mut HeaderMap,
    name: &'static str,
    value: Option<&DateTime<Utc>>,
) {
    if let Some(value) = value {
        set_header(headers, name, &value.timestamp().to_string());
    }
}

/// Set an IMF-fixdate timestamp header when the value is present.
pub fn set_http_date_header(
    headers: &mut HeaderMap,
    name: &'static str,
    value: Option<&DateTime<Utc>>,
) {
    if let Some(value) = value {
        set_header(headers, name, &format_http_date(value));
    }
}

/// Encode custom metadata under the given prefix.
///
/// Keys whose prefixed form is reserved are skipped (reserved wins); keys
/// that do not form a legal header name were already rejected by
/// validation, and are skipped defensively here as well.
pub fn set_metadata_headers(headers: &mut HeaderMap, prefix: &str, metadata: &Metadata) {
    for (key, value) in metadata {
        let name = format!("{prefix}{}", key.to_ascii_lowercase());
        if is_reserved(&name) {
            continue;
        }
        let Ok(name) = HeaderName::from_bytes(name.as_bytes()) else {
            continue;
        };
        if let Ok(value) = HeaderValue::from_str(value) {
            headers.insert(name, value);
        }
    }
}

/// Encode container-scoped CORS headers (meta-prefixed form).
pub fn encode_container_cors(headers: &mut HeaderMap, cors: &CorsHeaders) {
    set_optional_header(
        headers,
        CONTAINER_CORS_ALLOW_ORIGIN,
        cors.access_control_allow_origin.as_deref(),
    );
    set_optional_u64_header(headers, CONTAINER_CORS_MAX_AGE, cors.access_control_max_age);
    set_optional_header(
        headers,
        CONTAINER_CORS_EXPOSE_HEADERS,
        cors.access_control_expose_headers.as_deref(),
    );
    set_optional_header(
        headers,
        CONTAINER_CORS_CACHE_CONTROL,
        cors.cache_control.as_deref(),
    );
}

/// Encode object-scoped CORS headers (plain form).
pub fn encode_object_cors(headers: &mut HeaderMap, cors: &CorsHeaders) {
    set_optional_header(
        headers,
        OBJECT_CORS_ALLOW_ORIGIN,
        cors.access_control_allow_origin.as_deref(),
    );
    set_optional_u64_header(headers, OBJECT_CORS_MAX_AGE, cors.access_control_max_age);
    set_optional_header(
        headers,
        OBJECT_CORS_EXPOSE_HEADERS,
        cors.access_control_expose_headers.as_deref(),
    );
    set_optional_header(
        headers,
        OBJECT_CORS_CACHE_CONTROL,
        cors.cache_control.as_deref(),
    );
}

/// Encode conditional read predicates.
pub fn encode_conditional(headers: &mut HeaderMap, cond: &ConditionalHeaders) {
    set_optional_header(headers, "if-match", cond.if_match.as_deref());
    set_optional_header(headers, "if-none-match", cond.if_none_match.as_deref());
    set_http_date_header(headers, "if-modified-since", cond.if_modified_since.as_ref());
    set_http_date_header(
        headers,
        "if-unmodified-since",
        cond.if_unmodified_since.as_ref(),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers_from(pairs: &[(&str, &str)]) -> HeaderMap {
        let mut headers = HeaderMap::new();
        for (name, value) in pairs {
            headers.insert(
                HeaderName::from_bytes(name.as_bytes()).expect("valid name"),
                HeaderValue::from_str(value).expect("valid value"),
            );
        }
        headers
    }

    // -----------------------------------------------------------------------
    // Decoding
    // -----------------------------------------------------------------------

    #[test]
    fn test_should_parse_numeric_header() {
        let headers = headers_from(&[(CONTAINER_OBJECT_COUNT, "42")]);
        assert_eq!(
            header_parse::<u64>(&headers, CONTAINER_OBJECT_COUNT),
            Some(42)
        );
    }

    #[test]
    fn test_should_ignore_malformed_numeric_header() {
        let headers = headers_from(&[(CONTAINER_OBJECT_COUNT, "many")]);
        assert_eq!(header_parse::<u64>(&headers, CONTAINER_OBJECT_COUNT), None);
    }

    #[test]
    fn test_should_parse_http_dates_in_multiple_formats() {
        assert!(parse_http_date("2024-01-15T10:30:00Z").is_some());
        assert!(parse_http_date("Mon, 15 Jan 2024 10:30:00 +0000").is_some());
        assert!(parse_http_date("Mon, 15 Jan 2024 10:30:00 GMT").is_some());
        assert!(parse_http_date("three days ago").is_none());
    }

    #[test]
    fn test_should_parse_unix_timestamp_header() {
        let headers = headers_from(&[(DELETE_AT, "1700000000")]);
        let dt = header_unix_timestamp(&headers, DELETE_AT).expect("should parse");
        assert_eq!(dt.timestamp(), 1_700_000_000);
    }

    #[test]
    fn test_should_strip_prefix_when_collecting_metadata() {
        let headers = headers_from(&[("x-object-meta-color", "red")]);
        let meta = collect_metadata(&headers, OBJECT_META_PREFIX, &[]);
        assert_eq!(meta.get("color").map(String::as_str), Some("red"));
    }

    #[test]
    fn test_should_preserve_unknown_headers_as_metadata() {
        let headers = headers_from(&[("x-custom-header", "1"), ("date", "ignored")]);
        let meta = collect_metadata(&headers, OBJECT_META_PREFIX, &[]);
        assert_eq!(meta.get("x-custom-header").map(String::as_str), Some("1"));
        assert!(!meta.contains_key("date"));
    }

    #[test]
    fn test_should_skip_recognized_headers_when_collecting_metadata() {
        let headers = headers_from(&[(CONTAINER_TYPE, "public")]);
        let meta = collect_metadata(&headers, CONTAINER_META_PREFIX, &[CONTAINER_TYPE]);
        assert!(meta.is_empty());
    }

    // -----------------------------------------------------------------------
    // Encoding
    // -----------------------------------------------------------------------

    #[test]
    fn test_should_round_trip_custom_metadata() {
        let mut metadata = Metadata::new();
        metadata.insert("color".to_owned(), "red".to_owned());

        let mut headers = HeaderMap::new();
        set_metadata_headers(&mut headers, OBJECT_META_PREFIX, &metadata);
        let decoded = collect_metadata(&headers, OBJECT_META_PREFIX, &[]);

        assert_eq!(decoded, metadata);
    }

    #[test]
    fn test_should_let_reserved_header_win_over_metadata() {
        let mut metadata = Metadata::new();
        metadata.insert("type".to_owned(), "sneaky".to_owned());

        let mut headers = HeaderMap::new();
        set_header(&mut headers, CONTAINER_TYPE, "private");
        set_metadata_headers(&mut headers, CONTAINER_META_PREFIX, &metadata);

        assert_eq!(
            header_str(&headers, CONTAINER_TYPE).as_deref(),
            Some("private")
        );
    }

    #[test]
    fn test_should_translate_deletion_policy_headers() {
        let mut headers = HeaderMap::new();
        set_optional_u64_header(&mut headers, DELETE_AFTER, Some(60));
        let at = Utc.timestamp_opt(1_700_000_000, 0).single().unwrap();
        set_unix_timestamp_header(&mut headers, DELETE_AT, Some(&at));

        assert_eq!(header_str(&headers, DELETE_AFTER).as_deref(), Some("60"));
        assert_eq!(
            header_str(&headers, DELETE_AT).as_deref(),
            Some("1700000000")
        );
    }

    #[test]
    fn test_should_round_trip_container_cors() {
        let cors = CorsHeaders {
            access_control_allow_origin: Some("https://example.com".to_owned()),
            access_control_max_age: Some(600),
            access_control_expose_headers: Some("etag".to_owned()),
            cache_control: Some("max-age=300".to_owned()),
        };
        let mut headers = HeaderMap::new();
        encode_container_cors(&mut headers, &cors);
        assert_eq!(decode_container_cors(&headers), cors);
    }

    #[test]
    fn test_should_encode_conditional_headers() {
        let cond = ConditionalHeaders {
            if_match: Some("abc".to_owned()),
            if_modified_since: Utc.timestamp_opt(1_700_000_000, 0).single(),
            ..Default::default()
        };
        let mut headers = HeaderMap::new();
        encode_conditional(&mut headers, &cond);

        assert_eq!(header_str(&headers, "if-match").as_deref(), Some("abc"));
        let since = header_str(&headers, "if-modified-since").expect("should be set");
        assert!(since.ends_with("GMT"), "unexpected format: {since}");
        assert!(headers.get("if-none-match").is_none());
    }

    #[test]
    fn test_should_skip_unencodable_metadata_defensively() {
        let mut metadata = Metadata::new();
        metadata.insert("bad key".to_owned(), "v".to_owned());
        let mut headers = HeaderMap::new();
        set_metadata_headers(&mut headers, OBJECT_META_PREFIX, &metadata);
        assert!(headers.is_empty());
    }
}
