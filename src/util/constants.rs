//! Centralized constants for HTTP client configuration

use std::time::Duration;

/// Timeout for image API requests
pub const IMAGE_API_TIMEOUT: Duration = Duration::from_secs(30);

/// Timeout for establishing HTTP connections
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
