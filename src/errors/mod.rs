//! Centralized error handling for the Vavoo proxy
//!
//! Errors are split in two layers:
//!
//! - **Upstream errors**: everything that can go wrong while talking to the
//!   origin (timeouts, transport failures, bad status codes, unparsable bodies)
//! - **Application errors**: what a request handler can surface to a client
//!
//! Cache refreshes never surface errors to callers; they log them and fall
//! back to the previous payload. Proxy endpoints propagate them and the web
//! layer maps them onto status codes.
//!
//! # Usage
//!
//! ```rust
//! use vavoo_proxy::errors::{AppError, AppResult};
//!
//! fn require_url(url: Option<&str>) -> AppResult<&str> {
//!     url.filter(|u| !u.trim().is_empty())
//!         .ok_or_else(|| AppError::missing_parameter("url"))
//! }
//! ```

pub mod types;

pub use types::*;

/// Convenience type alias for Results using AppError
pub type AppResult<T> = Result<T, AppError>;

/// Convenience type alias for origin-facing Results
pub type UpstreamResult<T> = Result<T, UpstreamError>;
