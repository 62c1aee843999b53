use serde::{Deserialize, Serialize};

/// Authentication status as reported by `/api/auth/status`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthStatus {
    pub authenticated: bool,
    pub username: Option<String>,
    #[serde(default)]
    pub registration_code_required: bool,
}

/// Client-side auth record: the last known status plus a loading flag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthState {
    pub authenticated: bool,
    pub username: Option<String>,
    pub registration_code_required: bool,
    pub is_loading: bool,
}

impl AuthState {
    pub(crate) fn apply(&mut self, status: &AuthStatus) {
        self.authenticated = status.authenticated;
        self.username = status.username.clone();
        self.registration_code_required = status.registration_code_required;
        self.is_loading = false;
    }

    pub(crate) fn reset(&mut self) {
        self.authenticated = false;
        self.username = None;
        self.is_loading = false;
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginCredentials {
    pub username: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remember_me: Option<bool>,
}

impl LoginCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            remember_me: None,
        }
    }

    pub fn remember_me(mut self, remember: bool) -> Self {
        self.remember_me = Some(remember);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegistrationRequest {
    pub username: String,
    pub password: String,
    /// Invitation code, required when the server reports one is needed.
    pub code: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct UsernameRequest<'a> {
    pub username: &'a str,
}
