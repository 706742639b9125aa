use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::Notify;

use crate::error::{Error, Result};

#[derive(Default)]
struct Inner {
    canceled: AtomicBool,
    notify: Notify,
}

/// Advisory cancellation shared between a request's owner and its transaction.
///
/// Setting the token aborts the operation currently awaited through
/// [`CancelToken::guard`] and makes the next [`CancelToken::check`] fail. A
/// completion that has already been produced is still delivered.
#[derive(Clone, Default)]
pub struct CancelToken {
    inner: Arc<Inner>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Safe to call from any thread, any number of times.
    pub fn cancel(&self) {
        self.inner.canceled.store(true, Ordering::SeqCst);
        self.inner.notify.notify_waiters();
    }

    pub fn is_canceled(&self) -> bool {
        self.inner.canceled.load(Ordering::SeqCst)
    }

    /// Gate consulted between steps.
    pub fn check(&self) -> Result<()> {
        if self.is_canceled() {
            Err(Error::Canceled)
        } else {
            Ok(())
        }
    }

    /// Resolves once the token has been set.
    pub async fn cancelled(&self) {
        loop {
            let notified = self.inner.notify.notified();
            tokio::pin!(notified);
            notified.as_mut().enable();

            if self.is_canceled() {
                return;
            }
            notified.await;
        }
    }

    /// Runs `op` unless the token fires first, in which case it is dropped and
    /// the result is [`Error::Canceled`]. A ready `op` wins a tie.
    pub async fn guard<F, T>(&self, op: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        tokio::select! {
            biased;
            res = op => res,
            _ = self.cancelled() => Err(Error::Canceled),
        }
    }
}

impl std::fmt::Debug for CancelToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CancelToken")
            .field("canceled", &self.is_canceled())
            .finish()
    }
}
