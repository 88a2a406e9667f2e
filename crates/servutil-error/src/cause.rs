use std::backtrace::{Backtrace, BacktraceStatus};
use std::error::Error;
use std::fmt;
use std::sync::Arc;

use crate::ServerError;

/// Opaque trace token recording where an error originated
///
/// Captured with [`Backtrace::capture`], so the frames are only resolved when
/// `RUST_BACKTRACE` or `RUST_LIB_BACKTRACE` enables them. Clones share the same
/// capture; two stacks are equal only when they are the same capture.
#[derive(Clone)]
pub struct Stack(Arc<Backtrace>);

impl Stack {
    /// Capture a trace rooted at the caller
    pub fn capture() -> Self {
        Self(Arc::new(Backtrace::capture()))
    }

    pub fn backtrace(&self) -> &Backtrace {
        &self.0
    }

    /// Whether frames were actually recorded
    pub fn is_captured(&self) -> bool {
        self.0.status() == BacktraceStatus::Captured
    }
}

impl PartialEq for Stack {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for Stack {}

impl fmt::Debug for Stack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.status() {
            BacktraceStatus::Captured => f.write_str("Stack(captured)"),
            BacktraceStatus::Disabled => f.write_str("Stack(disabled)"),
            _ => f.write_str("Stack(unsupported)"),
        }
    }
}

impl fmt::Display for Stack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.backtrace(), f)
    }
}

/// A genuine error value wrapped by a [`ServerError`]
///
/// Holds the original error together with the trace that travels with it.
#[derive(Clone)]
pub struct Cause {
    error: Arc<dyn Error + Send + Sync + 'static>,
    message: String,
    stack: Stack,
}

impl Cause {
    /// Wrap an error, capturing a trace at the wrapping site
    pub fn new<E>(error: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        Self::from_arc(Arc::new(error), Stack::capture())
    }

    /// Wrap an error with a trace captured elsewhere
    pub fn with_stack<E>(error: E, stack: Stack) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        Self::from_arc(Arc::new(error), stack)
    }

    /// Build a cause from a plain message
    pub fn msg(message: impl Into<String>) -> Self {
        Self::new(MessageError(message.into()))
    }

    fn from_arc(error: Arc<dyn Error + Send + Sync + 'static>, stack: Stack) -> Self {
        let message = error.to_string();
        Self { error, message, stack }
    }

    /// The error's own description
    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn stack(&self) -> &Stack {
        &self.stack
    }

    pub fn error(&self) -> &(dyn Error + Send + Sync + 'static) {
        &*self.error
    }

    /// Attempt to view the wrapped error as a concrete type
    pub fn downcast_ref<E: Error + 'static>(&self) -> Option<&E> {
        self.error.downcast_ref::<E>()
    }
}

impl fmt::Debug for Cause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cause")
            .field("message", &self.message)
            .field("error", &self.error)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for Cause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl From<ServerError> for Cause {
    fn from(error: ServerError) -> Self {
        let stack = error.stack().clone();
        Self::with_stack(error, stack)
    }
}

/// Takes a fresh [`Stack`] at the conversion site; a backtrace already held
/// by the `anyhow::Error` stays reachable through [`Cause::error`] only
impl From<anyhow::Error> for Cause {
    fn from(error: anyhow::Error) -> Self {
        let boxed: Box<dyn Error + Send + Sync + 'static> = error.into();
        Self::from_arc(Arc::from(boxed), Stack::capture())
    }
}

impl From<std::io::Error> for Cause {
    fn from(error: std::io::Error) -> Self {
        Self::new(error)
    }
}

impl From<Box<dyn Error + Send + Sync + 'static>> for Cause {
    fn from(error: Box<dyn Error + Send + Sync + 'static>) -> Self {
        Self::from_arc(Arc::from(error), Stack::capture())
    }
}

/// Error carrying nothing but a message
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
struct MessageError(String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_comes_from_display() {
        let cause = Cause::new(std::io::Error::other("disk on fire"));
        assert_eq!(cause.message(), "disk on fire");
        assert!(cause.downcast_ref::<std::io::Error>().is_some());
    }

    #[test]
    fn clones_share_the_stack() {
        let cause = Cause::msg("boom");
        let clone = cause.clone();
        assert_eq!(cause.stack(), clone.stack());
    }

    #[test]
    fn separate_captures_differ() {
        assert_ne!(Stack::capture(), Stack::capture());
    }

    #[test]
    fn explicit_stack_is_kept() {
        let stack = Stack::capture();
        let cause = Cause::with_stack(std::io::Error::other("late"), stack.clone());
        assert_eq!(cause.stack(), &stack);
        assert_eq!(cause.message(), "late");
    }

    #[test]
    fn captured_flag_follows_backtrace_status() {
        let stack = Stack::capture();
        assert_eq!(
            stack.is_captured(),
            stack.backtrace().status() == BacktraceStatus::Captured
        );
    }

    #[test]
    fn anyhow_conversion_takes_a_new_stack() {
        let before = Stack::capture();
        let cause = Cause::from(anyhow::anyhow!("upstream refused"));
        assert_ne!(cause.stack(), &before);
    }

    #[test]
    fn anyhow_errors_keep_their_message() {
        let cause = Cause::from(anyhow::anyhow!("upstream refused"));
        assert_eq!(cause.message(), "upstream refused");
    }
}
