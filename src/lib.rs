//! Client for the DM collection backend.
//!
//! Provides a typed client for browsing cards, keeping a card collection and
//! decks, and signing in. Card searches are described by a [`SearchFilter`]
//! that converts to and from URL query parameters, so a filter can be carried
//! in a link and restored on the next visit.
//!
//! # Quick start
//!
//! ```no_run
//! use dmcollection_client::{DmClient, PageNumber, SearchFilter, Civilization};
//!
//! let client = DmClient::builder().base_url("https://cards.example.org").build().unwrap();
//!
//! let mut filter = SearchFilter::new();
//! filter.set_included_civs([Civilization::Fire]);
//! let page = client.cards().search(PageNumber::FIRST, &filter).unwrap();
//!
//! let sets = client.sets();
//! ```

#[cfg(feature = "async")]
pub mod async_client;
pub mod auth;
pub mod cache;
pub mod config;
pub mod deck;
pub mod error;
pub mod filter;
pub mod loaders;
pub mod models;
pub mod queries;
pub mod query_params;
pub mod transport;

#[cfg(feature = "async")]
pub use async_client::AsyncDmClient;
pub use auth::{AuthService, LogoutOutcome};
pub use cache::ReferenceCache;
pub use deck::{AmountUpdate, Deck};
pub use error::{DmError, Result};
pub use filter::SearchFilter;
pub use models::*;
pub use query_params::QueryParams;
pub use transport::{ApiClient, ApiRequest, ApiResponse, HttpTransport, Transport};

use std::cell::RefCell;
use std::fmt;
use std::time::Duration;

use uuid::Uuid;

// ---------------------------------------------------------------------------
// DmClientBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing a [`DmClient`].
///
/// Use [`DmClient::builder()`] to obtain a builder, chain configuration
/// methods, and call [`build()`](DmClientBuilder::build).
pub struct DmClientBuilder {
    base_url: String,
    timeout: Duration,
    transport: Option<Box<dyn Transport + Send>>,
}

impl Default for DmClientBuilder {
    fn default() -> Self {
        Self {
            base_url: config::DEFAULT_BASE_URL.to_string(),
            timeout: config::DEFAULT_TIMEOUT,
            transport: None,
        }
    }
}

impl DmClientBuilder {
    /// Set the backend's base URL. Defaults to `http://localhost:8080`.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the HTTP request timeout. Defaults to 30 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Override base URL and timeout from `DMCOLLECTION_BASE_URL` and
    /// `DMCOLLECTION_TIMEOUT_SECS` when they are set.
    pub fn from_env(mut self) -> Self {
        if let Some(url) = config::base_url_from_env() {
            self.base_url = url;
        }
        if let Some(timeout) = config::timeout_from_env() {
            self.timeout = timeout;
        }
        self
    }

    /// Use a custom transport instead of the reqwest-backed one. Base URL
    /// and timeout are ignored in that case.
    pub fn transport<T: Transport + Send + 'static>(mut self, transport: T) -> Self {
        self.transport = Some(Box::new(transport));
        self
    }

    /// Build the client. Nothing is fetched eagerly.
    pub fn build(self) -> Result<DmClient> {
        let transport = match self.transport {
            Some(transport) => transport,
            None => Box::new(HttpTransport::new(&self.base_url, self.timeout)?),
        };
        Ok(DmClient {
            api: ApiClient::new(transport),
            base_url: self.base_url,
            auth: RefCell::new(AuthService::new()),
            reference: RefCell::new(ReferenceCache::new()),
        })
    }
}

// ---------------------------------------------------------------------------
// DmClient
// ---------------------------------------------------------------------------

/// The main entry point.
///
/// Owns the [`ApiClient`], the auth record and the reference-data cache, and
/// exposes domain query interfaces as lightweight borrowing wrappers.
pub struct DmClient {
    api: ApiClient,
    base_url: String,
    auth: RefCell<AuthService>,
    reference: RefCell<ReferenceCache>,
}

impl DmClient {
    pub fn builder() -> DmClientBuilder {
        DmClientBuilder::default()
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    // -- Query accessors ---------------------------------------------------

    /// Access the card query interface.
    pub fn cards(&self) -> queries::CardQuery<'_> {
        queries::CardQuery::new(&self.api)
    }

    /// Access the deck and primary collection query interface.
    pub fn collections(&self) -> queries::CollectionQuery<'_> {
        queries::CollectionQuery::new(&self.api)
    }

    /// An unloaded [`Deck`] handle; call [`Deck::load`] with [`api()`](Self::api).
    pub fn deck(&self, id: Uuid) -> Deck {
        Deck::new(id)
    }

    // -- Reference data ----------------------------------------------------

    pub fn sets(&self) -> Option<Vec<CardSet>> {
        self.reference.borrow_mut().sets(&self.api)
    }

    /// Rarities, highest order first.
    pub fn rarities(&self) -> Option<Vec<Rarity>> {
        self.reference.borrow_mut().rarities(&self.api)
    }

    pub fn species(&self) -> Option<Vec<String>> {
        self.reference.borrow_mut().species(&self.api)
    }

    /// Drop cached sets, rarities and species.
    pub fn invalidate_reference(&self) {
        self.reference.borrow_mut().invalidate();
    }

    // -- Auth --------------------------------------------------------------

    /// Last known auth record.
    pub fn auth_state(&self) -> AuthState {
        self.auth.borrow().state().clone()
    }

    pub fn check_auth_status(&self) -> AuthState {
        self.auth.borrow_mut().check_status(&self.api)
    }

    pub fn login(&self, credentials: &LoginCredentials) -> AuthState {
        self.auth.borrow_mut().login(&self.api, credentials)
    }

    pub fn register(&self, request: &RegistrationRequest) -> AuthState {
        self.auth.borrow_mut().register(&self.api, request)
    }

    pub fn check_username(&self, username: &str) -> bool {
        self.auth.borrow().check_username(&self.api, username)
    }

    pub fn logout(&self) -> LogoutOutcome {
        self.auth.borrow_mut().logout(&self.api)
    }
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

impl fmt::Display for DmClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let auth = self.auth.borrow();
        write!(
            f,
            "DmClient(base_url={}, authenticated={}, user={})",
            self.base_url,
            auth.is_authenticated(),
            auth.state().username.as_deref().unwrap_or("-")
        )
    }
}
