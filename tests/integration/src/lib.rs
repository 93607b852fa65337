//! Integration tests for the selstack storage client.
//!
//! These tests require a live storage account. Point them at one with
//! `SELSTACK_STORAGE_URL` and `SELSTACK_AUTH_TOKEN` (an unauthenticated
//! local Swift works too, e.g. a swift-all-in-one container). They are
//! marked `#[ignore]` so they don't run during normal `cargo test`.
//!
//! Run them with:
//! ```text
//! cargo test -p selstack-integration -- --ignored
//! ```

use std::sync::Once;
use std::sync::atomic::{AtomicU32, Ordering};

use selstack_client::{ClientConfig, StaticCredentials, StorageClient};

mod test_container;
mod test_object;

static INIT: Once = Once::new();

/// Counter making test resource names unique within a run.
static COUNTER: AtomicU32 = AtomicU32::new(0);

/// Initialize tracing (once).
fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_test_writer()
            .init();
    });
}

/// Create a client pointing at the configured account.
#[must_use]
pub fn storage_client() -> StorageClient {
    init_tracing();
    let credentials =
        StaticCredentials::from_env().unwrap_or_else(|| StaticCredentials::new("test"));
    StorageClient::new(ClientConfig::from_env(), credentials).expect("client should build")
}

/// Generate a unique container name for a test.
#[must_use]
pub fn test_container_name(prefix: &str) -> String {
    let n = COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("selstack-test-{prefix}-{}-{n}", std::process::id())
}

/// Delete every object in a container, then the container itself.
pub async fn cleanup_container(client: &StorageClient, container: &str) {
    if let Ok(objects) = client.list_all_objects(container, 1000).await {
        for object in objects {
            let _ = client.delete_object(container, &object.name).await;
        }
    }
    let _ = client.delete_container(container).await;
}
