//! Typed request and result model for the selstack Swift storage client.
//!
//! Every storage operation is described by an Input struct (what the caller
//! supplies) and an Output struct (what the service answered). Inputs carry
//! their wire mapping in field docs (`HTTP header:`, `HTTP query:`,
//! `HTTP label (URI path)`); Outputs are pure functions of the HTTP response
//! they were built from. The HTTP translation itself lives in
//! `selstack-http`; this crate holds only data.

pub mod error;
pub mod input;
pub mod operations;
pub mod output;
pub mod request;
pub mod types;
pub mod validation;

pub use error::StorageError;
pub use operations::StorageOperation;
pub use request::Credentials;
pub use types::{ArchiveFormat, ConditionalHeaders, ContainerType, CorsHeaders, Metadata};
