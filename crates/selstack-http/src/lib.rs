//! HTTP mapping layer for the selstack Swift storage client.
//!
//! This crate translates between the typed model in `selstack-model` and raw
//! HTTP. It handles:
//!
//! - **Header codec** ([`codec`]): decoding response headers into typed
//!   fields and custom metadata, and encoding typed options (container type,
//!   CORS, conditional predicates, deletion policy, metadata) into outgoing
//!   header sets.
//!
//! - **Request building** ([`request`]): converting per-operation Input
//!   structs into [`RequestParts`](request::RequestParts): method, encoded
//!   path, query parameters, headers, and body, via the
//!   [`IntoStorageRequest`](request::IntoStorageRequest) trait.
//!
//! - **Response decoding** ([`response`]): constructing per-operation Output
//!   structs from response status, headers, and body via the
//!   [`FromStorageResponse`](response::FromStorageResponse) trait.
//!
//! The network itself is not touched here; the dispatch facade in
//! `selstack-client` owns the transport.
//!
//! # Architecture
//!
//! ```text
//! Input struct
//!   -> IntoStorageRequest (validation, path/query/header encoding)
//!   -> RequestParts + RequestContext
//!   -> [transport performs one HTTP call]
//!   -> ResponseParts + body
//!   -> FromStorageResponse (header codec, body decoding, checksum check)
//! Output struct
//! ```

pub mod codec;
pub mod request;
pub mod response;

pub use request::{IntoStorageRequest, RequestContext, RequestParts};
pub use response::{FromStorageResponse, ResponseParts};
