//! Async client for Selectel Cloud Storage (OpenStack Swift).
//!
//! Every operation is a single request/response exchange: the typed method
//! builds an immutable request from its input struct, the dispatch facade
//! performs one HTTP call, and the response is decoded into a typed output.
//! There is no retry, no caching, and no shared mutable state between calls;
//! concurrent invocations are fully independent.
//!
//! # Usage
//!
//! ```rust,no_run
//! use selstack_client::{ClientConfig, StaticCredentials, StorageClient};
//! use selstack_model::input::UploadObjectInput;
//!
//! # async fn run() -> Result<(), selstack_model::StorageError> {
//! let client = StorageClient::new(
//!     ClientConfig::from_env(),
//!     StaticCredentials::new("auth-token"),
//! )?;
//!
//! let uploaded = client
//!     .upload_object(UploadObjectInput {
//!         container: "photos".to_owned(),
//!         key: "2024/cat.jpg".to_owned(),
//!         body: b"...".as_ref().into(),
//!         validate_checksum: true,
//!         ..Default::default()
//!     })
//!     .await?;
//! println!("stored with etag {:?}", uploaded.etag);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod credentials;

pub use client::StorageClient;
pub use config::ClientConfig;
pub use credentials::{Anonymous, CredentialProvider, StaticCredentials};
