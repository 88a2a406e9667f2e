use std::num::FpCategory;

use http::StatusCode;
use serde_json::{Number, Value};

use crate::{Cause, ServerError};

/// One untyped positional argument of the normalizing constructor
///
/// Call sites mix errors, option objects and loose values (strings, numbers,
/// JSON). The variant is all the resolver looks at when picking a call shape.
#[derive(Debug, Clone)]
pub enum Arg {
    /// A genuine error value
    Error(Cause),
    /// A typed options object (`{ status, text, err }`)
    Options(ErrorOptions),
    /// Anything else: strings, numbers, JSON objects, `null`
    Value(Value),
}

/// Fields accepted from an options object
#[derive(Debug, Clone, Default)]
pub struct ErrorOptions {
    pub status: Option<StatusCode>,
    pub text: Option<String>,
    pub err: Option<Cause>,
}

impl ErrorOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn status(mut self, status: StatusCode) -> Self {
        self.status = Some(status);
        self
    }

    #[must_use]
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    #[must_use]
    pub fn err(mut self, err: impl Into<Cause>) -> Self {
        self.err = Some(err.into());
        self
    }

    /// Read the options out of a JSON object
    ///
    /// `status` must be a 3-digit code (number or string) to be kept, `text`
    /// is stringified when it is not a string, and `err` is ignored since JSON
    /// cannot hold a genuine error.
    pub fn from_json(object: &serde_json::Map<String, Value>) -> Self {
        Self {
            status: object.get("status").and_then(parse_status),
            text: object.get("text").and_then(display_value),
            err: None,
        }
    }
}

impl Arg {
    /// Whether this argument is a genuine error
    pub const fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    /// Whether this argument is a plain object, i.e. not an error, not an
    /// array and not `null`
    pub const fn is_plain_object(&self) -> bool {
        matches!(self, Self::Options(_) | Self::Value(Value::Object(_)))
    }

    pub(crate) fn into_options(self) -> Option<ErrorOptions> {
        match self {
            Self::Options(options) => Some(options),
            Self::Value(Value::Object(object)) => Some(ErrorOptions::from_json(&object)),
            _ => None,
        }
    }

    /// The wrapped error, if this argument is one
    pub(crate) fn into_cause(self) -> Option<Cause> {
        match self {
            Self::Error(cause) => Some(cause),
            _ => None,
        }
    }

    /// Whether the argument counts as "unset" when defaults are applied
    pub fn is_falsy(&self) -> bool {
        match self {
            Self::Error(_) | Self::Options(_) => false,
            Self::Value(value) => is_falsy(value),
        }
    }
}

/// `/^\d{3}$/` applied to the string form of a JSON value
pub fn is_status_code(value: &Value) -> bool {
    match value {
        Value::String(s) => is_three_digits(s),
        Value::Number(n) => three_digit_number(n).is_some(),
        _ => false,
    }
}

/// Number in `100..=999`, accepting whole floats such as `400.0`
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn three_digit_number(n: &Number) -> Option<u16> {
    if let Some(code) = n.as_u64() {
        return u16::try_from(code).ok().filter(|code| (100..=999).contains(code));
    }
    let n = n.as_f64()?;
    (n.fract().classify() == FpCategory::Zero && (100.0..=999.0).contains(&n)).then_some(n as u16)
}

fn is_three_digits(s: &str) -> bool {
    s.len() == 3 && s.bytes().all(|b| b.is_ascii_digit())
}

/// Parse a value into a status code when it is one
///
/// Strings like `"042"` pass the digit pattern but are outside the valid
/// status range, so they do not resolve.
pub(crate) fn parse_status(value: &Value) -> Option<StatusCode> {
    if !is_status_code(value) {
        return None;
    }
    let code = match value {
        Value::String(s) => s.parse::<u16>().ok()?,
        Value::Number(n) => three_digit_number(n)?,
        _ => return None,
    };
    StatusCode::from_u16(code).ok()
}

pub(crate) fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null | Value::Bool(false) => true,
        Value::String(s) => s.is_empty(),
        Value::Number(n) => n.as_f64().is_some_and(|n| n.classify() == FpCategory::Zero),
        Value::Bool(true) | Value::Array(_) | Value::Object(_) => false,
    }
}

/// Text form of a truthy value; strings are taken as-is, anything else is
/// rendered as JSON
pub(crate) fn display_value(value: &Value) -> Option<String> {
    if is_falsy(value) {
        return None;
    }
    match value {
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

impl From<Cause> for Arg {
    fn from(cause: Cause) -> Self {
        Self::Error(cause)
    }
}

impl From<ServerError> for Arg {
    fn from(error: ServerError) -> Self {
        Self::Error(error.into())
    }
}

impl From<anyhow::Error> for Arg {
    fn from(error: anyhow::Error) -> Self {
        Self::Error(error.into())
    }
}

impl From<std::io::Error> for Arg {
    fn from(error: std::io::Error) -> Self {
        Self::Error(error.into())
    }
}

impl From<ErrorOptions> for Arg {
    fn from(options: ErrorOptions) -> Self {
        Self::Options(options)
    }
}

impl From<StatusCode> for Arg {
    fn from(status: StatusCode) -> Self {
        Self::Value(Value::from(status.as_u16()))
    }
}

impl From<Value> for Arg {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

impl From<&str> for Arg {
    fn from(value: &str) -> Self {
        Self::Value(Value::from(value))
    }
}

impl From<String> for Arg {
    fn from(value: String) -> Self {
        Self::Value(Value::from(value))
    }
}

impl From<&String> for Arg {
    fn from(value: &String) -> Self {
        Self::Value(Value::from(value.as_str()))
    }
}

impl From<bool> for Arg {
    fn from(value: bool) -> Self {
        Self::Value(Value::from(value))
    }
}

impl<T: Into<Self>> From<Option<T>> for Arg {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Value(Value::Null), Into::into)
    }
}

macro_rules! impl_from_integer {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Arg {
                fn from(value: $ty) -> Self {
                    Self::Value(Value::from(value))
                }
            }
        )*
    };
}

impl_from_integer!(u8, u16, u32, u64, i8, i16, i32, i64, usize, isize);

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn status_code_pattern() {
        assert!(is_status_code(&json!(400)));
        assert!(is_status_code(&json!("404")));
        assert!(is_status_code(&json!("007")));
        assert!(is_status_code(&json!(999)));
        assert!(is_status_code(&json!(400.0)));

        assert!(!is_status_code(&json!(42)));
        assert!(!is_status_code(&json!(1000)));
        assert!(!is_status_code(&json!(400.5)));
        assert!(!is_status_code(&json!(-400)));
        assert!(!is_status_code(&json!(1000.0)));
        assert!(!is_status_code(&json!("40a")));
        assert!(!is_status_code(&json!(" 400")));
        assert!(!is_status_code(&json!(null)));
    }

    #[test]
    fn digit_strings_outside_status_range_do_not_parse() {
        assert_eq!(parse_status(&json!("007")), None);
        assert_eq!(parse_status(&json!("418")), Some(StatusCode::IM_A_TEAPOT));
        assert_eq!(parse_status(&json!(503.0)), Some(StatusCode::SERVICE_UNAVAILABLE));
    }

    #[test]
    fn only_errors_count_as_errors() {
        assert!(Arg::from(Cause::msg("boom")).is_error());
        assert!(!Arg::from("boom").is_error());
        assert!(!Arg::from(ErrorOptions::new().err(Cause::msg("boom"))).is_error());
    }

    #[test]
    fn falsy_values() {
        for value in [json!(null), json!(false), json!(0), json!(0.0), json!("")] {
            assert!(is_falsy(&value), "{value}");
        }
        for value in [json!(true), json!(1), json!("x"), json!([]), json!({})] {
            assert!(!is_falsy(&value), "{value}");
        }
    }

    #[test]
    fn options_from_json_object() {
        let Value::Object(object) = json!({ "status": "404", "text": 12 }) else {
            unreachable!()
        };
        let options = ErrorOptions::from_json(&object);
        assert_eq!(options.status, Some(StatusCode::NOT_FOUND));
        assert_eq!(options.text.as_deref(), Some("12"));
        assert!(options.err.is_none());
    }

    #[test]
    fn arrays_and_null_are_not_plain_objects() {
        assert!(!Arg::from(json!([1, 2])).is_plain_object());
        assert!(!Arg::from(json!(null)).is_plain_object());
        assert!(Arg::from(json!({})).is_plain_object());
        assert!(Arg::from(ErrorOptions::new()).is_plain_object());
    }
}
