use std::error::Error;
use std::fmt;

use http::StatusCode;
use serde::ser::{Serialize, SerializeStruct, Serializer};

use crate::args::{Arg, ErrorOptions};
use crate::cause::{Cause, Stack};
use crate::shape::{Parts, Shape};
use crate::status_text::StatusTextTable;

/// Structured error carrying an HTTP status, a status label, a message and
/// the trace of where the failure started
///
/// Built by normalizing whatever a call site hands over (see [`Shape`] for
/// the accepted argument patterns). Once built the value never changes.
///
/// Every error has a status (500 when none could be resolved), a non-empty
/// text (the reason phrase for the status unless one was given) and a
/// non-empty message (the text unless one was given).
///
/// # Cause message wins
///
/// When a genuine error is wrapped, its message replaces any message passed
/// alongside it. `server_error!("Oops", cause)` reports the cause's message,
/// not `"Oops"`. Existing call sites rely on this, so it is kept.
#[derive(Clone)]
pub struct ServerError {
    status: StatusCode,
    text: String,
    message: String,
    stack: Stack,
    cause: Option<Cause>,
}

impl ServerError {
    /// Fixed name of this error kind
    pub const NAME: &'static str = "ServerError";

    /// Normalize a positional argument list
    ///
    /// Never fails: arguments that match no known pattern end up as the
    /// message, with status and text defaulted.
    pub fn new<I>(args: I) -> Self
    where
        I: IntoIterator<Item = Arg>,
    {
        Shape::detect(args).resolve()
    }

    /// Wrap an error with a 500 status
    pub fn from_cause(cause: impl Into<Cause>) -> Self {
        Shape::Cause(cause.into()).resolve()
    }

    /// Error for a status code with its standard text
    pub fn from_status(status: StatusCode) -> Self {
        Self::from_parts(Parts {
            status: Some(status),
            ..Parts::default()
        })
    }

    /// Error for a status code with custom text
    pub fn with_status_text(status: StatusCode, text: impl Into<String>) -> Self {
        Self::from_parts(Parts {
            status: Some(status),
            text: Some(text.into()).filter(|text| !text.is_empty()),
            ..Parts::default()
        })
    }

    pub fn from_options(options: ErrorOptions) -> Self {
        Shape::Options(options).resolve()
    }

    /// Error with a message and a 500 status
    pub fn with_message(message: impl Into<String>) -> Self {
        Self::from_parts(Parts {
            message: Some(message.into()).filter(|message| !message.is_empty()),
            ..Parts::default()
        })
    }

    pub(crate) fn from_parts(parts: Parts) -> Self {
        let status = parts.status.unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let text = parts
            .text
            .unwrap_or_else(|| StatusTextTable.text_for(status).to_owned());
        let message = parts.message.unwrap_or_else(|| text.clone());

        match parts.cause {
            Some(cause) => {
                let message = if cause.message().is_empty() {
                    message
                } else {
                    cause.message().to_owned()
                };
                Self {
                    status,
                    text,
                    message,
                    stack: cause.stack().clone(),
                    cause: Some(cause),
                }
            }
            None => Self {
                status,
                text,
                message,
                stack: Stack::capture(),
                cause: None,
            },
        }
    }

    pub const fn name(&self) -> &'static str {
        Self::NAME
    }

    pub const fn status(&self) -> StatusCode {
        self.status
    }

    /// Short status label, e.g. `Not Found`
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Trace of the wrapped cause, or of the construction site when there is
    /// no cause
    pub const fn stack(&self) -> &Stack {
        &self.stack
    }

    pub const fn cause(&self) -> Option<&Cause> {
        self.cause.as_ref()
    }

    /// Whether the status is in the 5xx range
    pub fn is_server_error(&self) -> bool {
        self.status.is_server_error()
    }
}

impl fmt::Display for ServerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl fmt::Debug for ServerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct(Self::NAME)
            .field("status", &self.status.as_u16())
            .field("text", &self.text)
            .field("message", &self.message)
            .field("cause", &self.cause)
            .finish_non_exhaustive()
    }
}

impl Error for ServerError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.cause.as_ref().map(|cause| cause.error() as &(dyn Error + 'static))
    }
}

impl Serialize for ServerError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct(Self::NAME, 4)?;
        state.serialize_field("name", Self::NAME)?;
        state.serialize_field("status", &self.status.as_u16())?;
        state.serialize_field("text", &self.text)?;
        state.serialize_field("message", &self.message)?;
        state.end()
    }
}

impl From<Cause> for ServerError {
    fn from(cause: Cause) -> Self {
        Self::from_cause(cause)
    }
}

impl From<anyhow::Error> for ServerError {
    fn from(error: anyhow::Error) -> Self {
        // Already normalized errors pass through untouched
        match error.downcast::<Self>() {
            Ok(server_error) => server_error,
            Err(error) => Self::from_cause(error),
        }
    }
}

impl From<std::io::Error> for ServerError {
    fn from(error: std::io::Error) -> Self {
        Self::from_cause(error)
    }
}

impl From<StatusCode> for ServerError {
    fn from(status: StatusCode) -> Self {
        Self::from_status(status)
    }
}

impl From<ErrorOptions> for ServerError {
    fn from(options: ErrorOptions) -> Self {
        Self::from_options(options)
    }
}

impl From<Shape> for ServerError {
    fn from(shape: Shape) -> Self {
        shape.resolve()
    }
}
