//! Async wrapper around [`DmClient`] for use in async runtimes (Tokio, etc.).
//!
//! Runs all client operations on a blocking thread pool via
//! [`tokio::task::spawn_blocking`], keeping the async event loop free.
//!
//! # Example
//!
//! ```no_run
//! use dmcollection_client::{AsyncDmClient, PageNumber, SearchFilter};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let client = AsyncDmClient::builder().build().await.unwrap();
//!
//!     let page = client.run(|c| {
//!         c.cards().search(PageNumber::FIRST, &SearchFilter::new())
//!     }).await.unwrap();
//! }
//! ```

use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::error::{DmError, Result};
use crate::models::AuthState;
use crate::DmClient;

// ---------------------------------------------------------------------------
// AsyncDmClientBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing an [`AsyncDmClient`].
#[derive(Default)]
pub struct AsyncDmClientBuilder {
    base_url: Option<String>,
    timeout: Option<Duration>,
    from_env: bool,
}

impl AsyncDmClientBuilder {
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn from_env(mut self) -> Self {
        self.from_env = true;
        self
    }

    /// Build the async client. Construction of the blocking HTTP client runs
    /// on the blocking thread pool.
    pub async fn build(self) -> Result<AsyncDmClient> {
        tokio::task::spawn_blocking(move || {
            let mut builder = DmClient::builder();
            if let Some(url) = self.base_url {
                builder = builder.base_url(url);
            }
            if let Some(timeout) = self.timeout {
                builder = builder.timeout(timeout);
            }
            if self.from_env {
                builder = builder.from_env();
            }
            let client = builder.build()?;
            Ok(AsyncDmClient::from_client(client))
        })
        .await
        .map_err(|e| DmError::InvalidArgument(format!("Task join error: {e}")))?
    }
}

// ---------------------------------------------------------------------------
// AsyncDmClient
// ---------------------------------------------------------------------------

/// Async wrapper around [`DmClient`].
///
/// The client is guarded by a [`Mutex`] since it keeps its auth record and
/// reference cache in `RefCell`s. Calls are serialized, so responses are
/// applied in the order the calls were made.
pub struct AsyncDmClient {
    inner: Arc<Mutex<DmClient>>,
}

impl AsyncDmClient {
    pub fn builder() -> AsyncDmClientBuilder {
        AsyncDmClientBuilder::default()
    }

    /// Wrap an already built client, e.g. one with a custom transport.
    pub fn from_client(client: DmClient) -> Self {
        Self {
            inner: Arc::new(Mutex::new(client)),
        }
    }

    /// Run a sync client operation on the blocking thread pool.
    pub async fn run<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&DmClient) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let client = self.inner.clone();
        tokio::task::spawn_blocking(move || {
            let guard = client
                .lock()
                .map_err(|_| DmError::InvalidArgument("client lock poisoned".into()))?;
            f(&guard)
        })
        .await
        .map_err(|e| DmError::InvalidArgument(format!("Task join error: {e}")))?
    }

    /// Refresh the auth record asynchronously.
    pub async fn check_auth_status(&self) -> Result<AuthState> {
        self.run(|c| Ok(c.check_auth_status())).await
    }

    pub async fn auth_state(&self) -> Result<AuthState> {
        self.run(|c| Ok(c.auth_state())).await
    }
}
