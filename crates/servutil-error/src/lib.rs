//! Normalized server errors
//!
//! [`ServerError`] folds the many ways call sites report failures (a bare
//! error, a status code, a status with text, an options object, a message
//! with positional fields) into one structured value with a status, a status
//! label, a message and a stack.

#![allow(clippy::must_use_candidate)]

mod args;
mod cause;
mod error;
#[cfg(feature = "axum")]
mod response;
mod shape;
mod status_text;

pub use args::{Arg, ErrorOptions, is_status_code};
pub use cause::{Cause, Stack};
pub use error::ServerError;
pub use shape::Shape;
pub use status_text::{StatusTextTable, UNDEFINED_ERROR, status_text};

/// Build a [`ServerError`] from positional arguments of mixed types
///
/// Each argument is converted with [`Arg::from`], so errors wrapped in
/// [`Cause`], status codes, strings, [`ErrorOptions`] and JSON values can be
/// passed directly.
///
/// ```
/// use servutil_error::server_error;
///
/// let err = server_error!(404);
/// assert_eq!(err.text(), "Not Found");
///
/// let err = server_error!("lookup failed", 404, "Missing");
/// assert_eq!(err.message(), "lookup failed");
/// assert_eq!(err.text(), "Missing");
/// ```
#[macro_export]
macro_rules! server_error {
    ($($arg:expr),* $(,)?) => {
        $crate::ServerError::new([$($crate::Arg::from($arg)),*])
    };
}
