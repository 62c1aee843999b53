use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

pub const BASE_URL_ENV: &str = "DMCOLLECTION_BASE_URL";
pub const TIMEOUT_ENV: &str = "DMCOLLECTION_TIMEOUT_SECS";

/// Cookie set by the backend carrying the anti-forgery token.
pub const XSRF_COOKIE: &str = "XSRF-TOKEN";
/// Header every mutating request mirrors the cookie value into.
pub const XSRF_HEADER: &str = "X-XSRF-TOKEN";

// Lower bound is one above i32::MIN. Kept for compatibility with existing
// bookmarked filter URLs.
pub const MAX_FILTER_INT: i32 = 2147483647;
pub const MIN_FILTER_INT: i32 = -2147483647;

/// Navigation target after a successful logout.
pub const ROOT_ROUTE: &str = "/";

pub fn base_url_from_env() -> Option<String> {
    std::env::var(BASE_URL_ENV)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

pub fn timeout_from_env() -> Option<Duration> {
    std::env::var(TIMEOUT_ENV)
        .ok()
        .and_then(|s| s.trim().parse::<u64>().ok())
        .map(Duration::from_secs)
}
