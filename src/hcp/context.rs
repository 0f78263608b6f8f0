//! Per-invocation request context
//!
//! Carries an optional deadline and a cancellation signal. Every outbound
//! call is raced against both, so Ctrl-C or an expired `--timeout` aborts the
//! in-flight request.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::Instant;

use crate::error::{Result, TfeError};

#[derive(Clone, Debug)]
pub struct RequestContext {
    deadline: Option<Instant>,
    cancel_tx: Arc<watch::Sender<bool>>,
    cancel_rx: watch::Receiver<bool>,
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::new()
    }
}

impl RequestContext {
    /// Context without a deadline
    pub fn new() -> Self {
        let (tx, rx) = watch::channel(false);
        Self {
            deadline: None,
            cancel_tx: Arc::new(tx),
            cancel_rx: rx,
        }
    }

    /// Context that expires `timeout` from now
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            deadline: Some(Instant::now() + timeout),
            ..Self::new()
        }
    }

    /// Fresh context that ignores this one's cancellation and deadline
    ///
    /// Used to release a lock after the main operation was aborted; `grace`
    /// bounds how long the release may take.
    pub fn detached(&self, grace: Duration) -> Self {
        Self::with_timeout(grace)
    }

    /// Signal cancellation to every holder of this context
    pub fn cancel(&self) {
        self.cancel_tx.send_replace(true);
    }

    pub fn is_cancelled(&self) -> bool {
        *self.cancel_rx.borrow()
    }

    /// Error if the context is already cancelled or past its deadline
    pub fn check(&self) -> Result<()> {
        if self.is_cancelled() {
            return Err(TfeError::Cancelled);
        }
        if let Some(deadline) = self.deadline {
            if Instant::now() >= deadline {
                return Err(TfeError::DeadlineExceeded);
            }
        }
        Ok(())
    }

    /// Resolves once the context is cancelled
    async fn cancelled(&self) {
        let mut rx = self.cancel_rx.clone();
        if rx.wait_for(|cancelled| *cancelled).await.is_err() {
            // sender lives as long as any clone of this context
            std::future::pending::<()>().await;
        }
    }

    /// Run `fut`, aborting it on cancellation or deadline
    pub async fn run<F, T>(&self, fut: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        self.check()?;

        match self.deadline {
            Some(deadline) => {
                tokio::select! {
                    result = fut => result,
                    _ = self.cancelled() => Err(TfeError::Cancelled),
                    _ = tokio::time::sleep_until(deadline) => Err(TfeError::DeadlineExceeded),
                }
            }
            None => {
                tokio::select! {
                    result = fut => result,
                    _ = self.cancelled() => Err(TfeError::Cancelled),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[tokio::test]
    async fn test_run_passes_result_through() {
        let ctx = RequestContext::new();
        let value = ctx.run(async { Ok::<_, TfeError>(42) }).await.unwrap();
        assert_eq!(value, 42);
    }

    #[tokio::test]
    async fn test_cancelled_before_run() {
        let ctx = RequestContext::new();
        ctx.cancel();
        assert!(ctx.is_cancelled());
        let err = ctx.run(async { Ok::<_, TfeError>(1) }).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Cancelled);
    }

    #[tokio::test]
    async fn test_cancel_aborts_in_flight() {
        let ctx = RequestContext::new();
        let canceller = ctx.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            canceller.cancel();
        });

        let err = ctx
            .run(async {
                tokio::time::sleep(Duration::from_secs(30)).await;
                Ok::<_, TfeError>(())
            })
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Cancelled);
    }

    #[tokio::test]
    async fn test_detached_context_survives_parent_cancel() {
        let ctx = RequestContext::new();
        ctx.cancel();
        let release = ctx.detached(Duration::from_secs(5));
        assert!(!release.is_cancelled());
        let value = release.run(async { Ok::<_, TfeError>(7) }).await.unwrap();
        assert_eq!(value, 7);

        ctx.cancel();
        assert!(release.check().is_ok());
    }

    #[tokio::test]
    async fn test_deadline_exceeded() {
        let ctx = RequestContext::with_timeout(Duration::from_millis(10));
        let err = ctx
            .run(async {
                tokio::time::sleep(Duration::from_secs(30)).await;
                Ok::<_, TfeError>(())
            })
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DeadlineExceeded);
        assert_eq!(ctx.check().unwrap_err().kind(), ErrorKind::DeadlineExceeded);
    }
}
