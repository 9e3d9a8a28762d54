//! Cancellation utilities
//!
//! Provides a cancellation handle for in-flight token requests.

use std::future::Future;
use tokio_util::sync::CancellationToken;

use crate::error::AuthError;

/// A handle that can be used to request cancellation.
#[derive(Clone, Debug, Default)]
pub struct CancelHandle {
    token: CancellationToken,
}

impl CancelHandle {
    fn new() -> Self {
        Self {
            token: CancellationToken::new(),
        }
    }

    /// Request cancellation. A request observing this handle is dropped,
    /// which closes its HTTP connection.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Check if cancellation was requested.
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// A future that resolves when cancellation is requested.
    pub fn cancelled(&self) -> tokio_util::sync::WaitForCancellationFuture<'_> {
        self.token.cancelled()
    }

    /// Run `future` until it completes or this handle is cancelled.
    pub async fn run<F, T>(&self, future: F) -> Result<T, AuthError>
    where
        F: Future<Output = Result<T, AuthError>>,
    {
        tokio::select! {
            biased;
            _ = self.token.cancelled() => Err(AuthError::Cancelled),
            res = future => res,
        }
    }
}

/// Create a standalone cancel handle that can be shared across tasks.
pub fn new_cancel_handle() -> CancelHandle {
    CancelHandle::new()
}
