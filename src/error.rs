use reqwest::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum DmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    #[error("Unauthorized: server answered {0}")]
    Unauthorized(StatusCode),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Request failed with status {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl DmError {
    /// Classify a non-success response.
    ///
    /// 401 and 403 become [`DmError::Unauthorized`], 404 becomes
    /// [`DmError::NotFound`], everything else is a generic [`DmError::Status`].
    pub fn from_status(status: StatusCode, body: impl Into<String>) -> Self {
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => DmError::Unauthorized(status),
            StatusCode::NOT_FOUND => DmError::NotFound(body.into()),
            _ => DmError::Status {
                status,
                body: body.into(),
            },
        }
    }

    /// True for the 401/403 outcome that navigation maps to an error page.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, DmError::Unauthorized(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, DmError::NotFound(_))
    }
}

pub type Result<T> = std::result::Result<T, DmError>;
