//! Authentication state and the login/registration/logout calls.
//!
//! [`AuthService`] is the only writer of the [`AuthState`] record. None of its
//! operations fail: network errors and rejected requests fall back to the
//! server's authoritative status, or to "not authenticated" when even that
//! cannot be fetched.

use tracing::{info, warn};

use crate::config;
use crate::models::{AuthState, AuthStatus, LoginCredentials, RegistrationRequest, UsernameRequest};
use crate::transport::ApiClient;

const STATUS_PATH: &str = "/api/auth/status";
const LOGIN_PATH: &str = "/api/auth/login";
const REGISTER_PATH: &str = "/api/auth/register";
const CHECK_USERNAME_PATH: &str = "/api/auth/checkUsername";
const LOGOUT_PATH: &str = "/api/auth/logout";

/// Result of a logout attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogoutOutcome {
    /// Logged out; navigate to the contained route.
    Redirect(String),
    /// The server did not confirm the logout. Auth state is unchanged.
    Failed,
}

#[derive(Debug, Default)]
pub struct AuthService {
    state: AuthState,
}

impl AuthService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &AuthState {
        &self.state
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.authenticated
    }

    /// Refresh the auth record from `/api/auth/status`.
    ///
    /// Any failure resets the record to "not authenticated".
    pub fn check_status(&mut self, api: &ApiClient) -> AuthState {
        match api.get_json::<AuthStatus>(STATUS_PATH) {
            Ok(status) => self.state.apply(&status),
            Err(e) => {
                warn!("Auth status check failed: {}", e);
                self.state.reset();
            }
        }
        self.state.clone()
    }

    pub fn login(&mut self, api: &ApiClient, credentials: &LoginCredentials) -> AuthState {
        self.authenticate(api, LOGIN_PATH, credentials, "Authentication")
    }

    pub fn register(&mut self, api: &ApiClient, request: &RegistrationRequest) -> AuthState {
        self.authenticate(api, REGISTER_PATH, request, "Registration")
    }

    /// Whether `username` is still available. Any failure answers `false`.
    pub fn check_username(&self, api: &ApiClient, username: &str) -> bool {
        let body = UsernameRequest { username };
        match api
            .post(CHECK_USERNAME_PATH, Some(&body))
            .and_then(|r| r.json::<bool>())
        {
            Ok(available) => available,
            Err(e) => {
                warn!("Username check failed: {}", e);
                false
            }
        }
    }

    /// Log out. On success the auth record is cleared and the caller is
    /// told to navigate to the root route.
    pub fn logout(&mut self, api: &ApiClient) -> LogoutOutcome {
        match api.post::<()>(LOGOUT_PATH, None) {
            Ok(response) if response.is_success() => {
                info!("Logged out {:?}", self.state.username);
                self.invalidate();
                LogoutOutcome::Redirect(config::ROOT_ROUTE.to_string())
            }
            Ok(response) => {
                warn!("Logout failed with status {}", response.status);
                LogoutOutcome::Failed
            }
            Err(e) => {
                warn!("Logout error: {}", e);
                LogoutOutcome::Failed
            }
        }
    }

    /// Forget everything cached under the auth namespace.
    pub fn invalidate(&mut self) {
        self.state.reset();
    }

    fn authenticate<B: serde::Serialize>(
        &mut self,
        api: &ApiClient,
        path: &str,
        body: &B,
        what: &str,
    ) -> AuthState {
        let response = match api.post(path, Some(body)) {
            Ok(response) => response,
            Err(e) => {
                warn!("{} request failed: {}", what, e);
                return self.check_status(api);
            }
        };
        if !response.is_success() {
            warn!(
                "{} failed with status {} and body {}",
                what, response.status, response.body
            );
            return self.check_status(api);
        }
        match response.json::<AuthStatus>() {
            Ok(status) => {
                self.state.authenticated = status.authenticated;
                self.state.username = status.username;
                self.state.is_loading = false;
                info!("{} succeeded for {:?}", what, self.state.username);
                self.state.clone()
            }
            Err(e) => {
                warn!("{} response unreadable: {}", what, e);
                self.check_status(api)
            }
        }
    }
}
