//! Helpers for HTTP servers
//!
//! - [`ServerError`]: one structured error for every way a call site reports
//!   a failure
//! - [`logging`]: console verbosity from settings and `VERBOSITY*` variables
//! - [`case`]: `snake_case` / `camelCase` key conversion for JSON payloads
//! - [`handler`]: async handler adapters that forward failures
//!
//! ```
//! use servutil::{server_error, case};
//! use serde_json::json;
//!
//! let err = server_error!(404);
//! assert_eq!(err.message(), "Not Found");
//!
//! let body = case::snake_to_camel_case(json!({ "user_id": 1 }));
//! assert_eq!(body, json!({ "userId": 1 }));
//! ```

pub use servutil_error::{
    Arg, Cause, ErrorOptions, ServerError, Shape, Stack, StatusTextTable, UNDEFINED_ERROR, server_error, status_text,
};

pub mod case {
    pub use servutil_case::{Direction, camel_to_snake_case, change_case, convert_key, snake_to_camel_case};
}

pub mod handler {
    pub use servutil_handler::{HandlerPanic, HandlerResult, forward_errors, wrap_async};
}

pub mod logging {
    pub use servutil_logging::{Category, Console, LogSettings, LogSettingsError, Verbosity, Visibility, init};
}
