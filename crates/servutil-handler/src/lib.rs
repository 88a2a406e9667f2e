//! Async handler adapters
//!
//! Routes failures of async handlers into an error continuation as
//! [`ServerError`] values instead of letting them go unreported. With the
//! `http` feature (on by default) `ServerError` also renders itself as an
//! axum response, so axum handlers can return [`HandlerResult`].

#![allow(clippy::must_use_candidate)]

mod forward;

pub use forward::{HandlerPanic, forward_errors, wrap_async};
pub use servutil_error::ServerError;

/// Result type for handlers that fail with a [`ServerError`]
pub type HandlerResult<T> = std::result::Result<T, ServerError>;
