use std::any::Any;
use std::future::Future;
use std::panic::AssertUnwindSafe;

use futures_util::FutureExt;
use servutil_error::{Cause, ServerError};

/// Panic payload turned into an error
#[derive(Debug, thiserror::Error)]
#[error("handler panicked: {0}")]
pub struct HandlerPanic(String);

impl HandlerPanic {
    fn from_payload(payload: &(dyn Any + Send)) -> Self {
        let message = payload
            .downcast_ref::<&str>()
            .map(|s| (*s).to_owned())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "unknown panic payload".to_owned());
        Self(message)
    }
}

/// Await a fallible future and hand any failure to `next`
///
/// Errors are normalized into [`ServerError`] first. A panic while polling
/// the future is caught and forwarded as a 500 error, so nothing escapes
/// unreported. Returns `None` when the failure was forwarded.
pub async fn forward_errors<Fut, T, E, N>(future: Fut, next: N) -> Option<T>
where
    Fut: Future<Output = Result<T, E>>,
    E: Into<ServerError>,
    N: FnOnce(ServerError),
{
    let error = match AssertUnwindSafe(future).catch_unwind().await {
        Ok(Ok(value)) => return Some(value),
        Ok(Err(error)) => error.into(),
        Err(payload) => {
            let panic = HandlerPanic::from_payload(payload.as_ref());
            tracing::error!(error = %panic, "async handler panicked");
            ServerError::from_cause(Cause::new(panic))
        }
    };

    tracing::debug!(status = error.status().as_u16(), message = error.message(), "forwarding handler error");
    next(error);
    None
}

/// Adapt an async handler so its failures go to `next`
///
/// The returned closure calls `handler` and runs the future through
/// [`forward_errors`].
pub fn wrap_async<H, I, Fut, T, E, N>(handler: H, next: N) -> impl Fn(I) -> futures_util::future::BoxFuture<'static, Option<T>>
where
    H: Fn(I) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<T, E>> + Send + 'static,
    T: Send + 'static,
    E: Into<ServerError> + Send + 'static,
    N: Fn(ServerError) + Clone + Send + Sync + 'static,
{
    move |input| {
        let future = handler(input);
        let next = next.clone();
        forward_errors(future, next).boxed()
    }
}
