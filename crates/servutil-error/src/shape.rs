//! Call-shape detection for the normalizing constructor
//!
//! Every accepted argument pattern is a [`Shape`] variant. Detection runs a
//! fixed, ordered series of predicates over the positional arguments, so the
//! same arguments always land on the same shape.

use http::StatusCode;
use serde_json::Value;

use crate::args::{self, Arg, ErrorOptions};
use crate::{Cause, ServerError};

/// The argument patterns understood by [`ServerError::new`]
#[derive(Debug, Clone)]
pub enum Shape {
    /// `(cause)`
    Cause(Cause),
    /// `(status, cause)`
    StatusCause { status: Value, cause: Cause },
    /// `(status, text)`
    StatusText { status: Value, text: Arg },
    /// `(status, text, cause)`
    StatusTextCause { status: Value, text: Arg, cause: Arg },
    /// `({ status, text, err })`
    Options(ErrorOptions),
    /// `(message, { status, text, err })`, only taken when the object's
    /// `status` is a 3-digit code
    MessageOptions { message: Value, options: ErrorOptions },
    /// `(message, status, text, cause)`, trailing slots may be missing
    Positional {
        message: Value,
        status: Arg,
        text: Arg,
        cause: Arg,
    },
    /// `(message)`
    Message(Value),
}

/// Fields gathered from a shape before defaults are applied
#[derive(Debug, Default)]
pub(crate) struct Parts {
    pub message: Option<String>,
    pub status: Option<StatusCode>,
    pub text: Option<String>,
    pub cause: Option<Cause>,
}

impl Shape {
    /// Classify a positional argument list
    ///
    /// The predicates are checked in order:
    ///
    /// 1. first argument is an error
    /// 2. first argument is a 3-digit status code
    /// 3. first argument is a plain object
    /// 4. anything else is a message; an error right after it is taken as
    ///    the cause
    pub fn detect<I>(args: I) -> Self
    where
        I: IntoIterator<Item = Arg>,
    {
        let mut positional = args.into_iter();
        let Some(first) = positional.next() else {
            return Self::Message(Value::Null);
        };
        let second = positional.next();
        let third = positional.next();
        let fourth = positional.next();

        let message = match first {
            Arg::Error(cause) => return Self::Cause(cause),
            Arg::Options(options) => return Self::Options(options),
            Arg::Value(Value::Object(object)) => return Self::Options(ErrorOptions::from_json(&object)),
            Arg::Value(value) => value,
        };

        if args::is_status_code(&message) {
            let status = message;
            return match (second, third) {
                (Some(Arg::Error(cause)), _) => Self::StatusCause { status, cause },
                (second, None) => Self::StatusText {
                    status,
                    text: second.unwrap_or(Arg::Value(Value::Null)),
                },
                (second, Some(cause)) => Self::StatusTextCause {
                    status,
                    text: second.unwrap_or(Arg::Value(Value::Null)),
                    cause,
                },
            };
        }

        match second {
            Some(second) if second.is_plain_object() && option_status_is_code(&second) => Self::MessageOptions {
                message,
                options: second.into_options().unwrap_or_default(),
            },
            // an error right after the message is the cause, not a status
            Some(second) if second.is_error() => Self::Positional {
                message,
                status: Arg::Value(Value::Null),
                text: third.unwrap_or(Arg::Value(Value::Null)),
                cause: second,
            },
            None => Self::Message(message),
            second => Self::Positional {
                message,
                status: second.unwrap_or(Arg::Value(Value::Null)),
                text: third.unwrap_or(Arg::Value(Value::Null)),
                cause: fourth.unwrap_or(Arg::Value(Value::Null)),
            },
        }
    }

    /// Single-letter name of the shape, `A` through `H`
    pub const fn letter(&self) -> char {
        match self {
            Self::Cause(_) => 'A',
            Self::StatusCause { .. } => 'B',
            Self::StatusText { .. } => 'C',
            Self::StatusTextCause { .. } => 'D',
            Self::Options(_) => 'E',
            Self::MessageOptions { .. } => 'F',
            Self::Positional { .. } => 'G',
            Self::Message(_) => 'H',
        }
    }

    /// Build the normalized error for this shape
    pub fn resolve(self) -> ServerError {
        ServerError::from_parts(self.into_parts())
    }

    pub(crate) fn into_parts(self) -> Parts {
        match self {
            Self::Cause(cause) => Parts {
                cause: Some(cause),
                ..Parts::default()
            },
            Self::StatusCause { status, cause } => Parts {
                status: resolve_status(&Arg::Value(status)),
                cause: Some(cause),
                ..Parts::default()
            },
            Self::StatusText { status, text } => Parts {
                status: resolve_status(&Arg::Value(status)),
                text: arg_text(&text),
                ..Parts::default()
            },
            Self::StatusTextCause { status, text, cause } => Parts {
                status: resolve_status(&Arg::Value(status)),
                text: arg_text(&text),
                cause: cause.into_cause(),
                ..Parts::default()
            },
            Self::Options(options) => options_parts(None, options),
            Self::MessageOptions { message, options } => options_parts(args::display_value(&message), options),
            Self::Positional {
                message,
                status,
                text,
                cause,
            } => Parts {
                message: args::display_value(&message),
                status: resolve_status(&status),
                text: arg_text(&text),
                cause: cause.into_cause(),
            },
            Self::Message(message) => Parts {
                message: args::display_value(&message),
                ..Parts::default()
            },
        }
    }
}

fn option_status_is_code(arg: &Arg) -> bool {
    match arg {
        Arg::Options(options) => options.status.is_some(),
        Arg::Value(Value::Object(object)) => object.get("status").is_some_and(args::is_status_code),
        _ => false,
    }
}

fn options_parts(message: Option<String>, options: ErrorOptions) -> Parts {
    Parts {
        message,
        status: options.status,
        text: options.text.filter(|text| !text.is_empty()),
        cause: options.err,
    }
}

/// Status from an argument slot; unset and unresolvable slots yield `None`
fn resolve_status(arg: &Arg) -> Option<StatusCode> {
    if arg.is_falsy() {
        return None;
    }
    let status = match arg {
        Arg::Value(value) => args::parse_status(value),
        Arg::Error(_) | Arg::Options(_) => None,
    };
    if status.is_none() {
        tracing::debug!(?arg, "unresolvable status, defaulting to 500");
    }
    status
}

/// Text from an argument slot; only plain values can supply text
fn arg_text(arg: &Arg) -> Option<String> {
    match arg {
        Arg::Value(value) => args::display_value(value),
        Arg::Error(_) | Arg::Options(_) => None,
    }
}
