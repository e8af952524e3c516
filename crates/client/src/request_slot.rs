//! Single in-flight request per slot; a new request aborts the previous one

use crate::error::{ClientError, ClientResult};
use parking_lot::Mutex;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::task::AbortHandle;
use tracing::debug;

/// Holds at most one running request. Starting another aborts the one in
/// flight, which then resolves to [`ClientError::Superseded`] so stale data
/// never overwrites a fresher result.
#[derive(Debug, Clone, Default)]
pub struct RequestSlot {
    inner: Arc<SlotInner>,
}

#[derive(Debug, Default)]
struct SlotInner {
    generation: AtomicU64,
    current: Mutex<Option<AbortHandle>>,
}

impl RequestSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `request` in this slot
    pub async fn run<F, T>(&self, request: F) -> ClientResult<T>
    where
        F: Future<Output = ClientResult<T>> + Send + 'static,
        T: Send + 'static,
    {
        let (ticket, handle) = {
            let mut current = self.inner.current.lock();
            let ticket = self.inner.generation.fetch_add(1, Ordering::SeqCst) + 1;
            let handle = tokio::spawn(request);
            if let Some(previous) = current.replace(handle.abort_handle()) {
                debug!(ticket, "Aborting superseded request");
                previous.abort();
            }
            (ticket, handle)
        };

        let outcome = handle.await;

        if self.inner.generation.load(Ordering::SeqCst) != ticket {
            return Err(ClientError::Superseded);
        }
        {
            let mut current = self.inner.current.lock();
            if self.inner.generation.load(Ordering::SeqCst) == ticket {
                current.take();
            }
        }

        match outcome {
            Ok(result) => result,
            Err(e) if e.is_cancelled() => Err(ClientError::Superseded),
            Err(e) => Err(ClientError::Transport(format!("Request task failed: {e}"))),
        }
    }

    /// Abort whatever is in flight
    pub fn cancel(&self) {
        let mut current = self.inner.current.lock();
        self.inner.generation.fetch_add(1, Ordering::SeqCst);
        if let Some(handle) = current.take() {
            handle.abort();
        }
    }

    /// Number of requests started or cancelled so far
    pub fn generation(&self) -> u64 {
        self.inner.generation.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_single_request_completes() {
        let slot = RequestSlot::new();
        let value = slot.run(async { Ok::<_, ClientError>(7) }).await.unwrap();
        assert_eq!(value, 7);
        assert_eq!(slot.generation(), 1);
    }

    #[tokio::test]
    async fn test_newer_request_supersedes_older() {
        let slot = RequestSlot::new();

        let slow_slot = slot.clone();
        let slow = tokio::spawn(async move {
            slow_slot
                .run(async {
                    tokio::time::sleep(Duration::from_secs(5)).await;
                    Ok::<_, ClientError>("stale")
                })
                .await
        });

        tokio::time::sleep(Duration::from_millis(20)).await;
        let fresh = slot.run(async { Ok::<_, ClientError>("fresh") }).await;

        assert_eq!(fresh.unwrap(), "fresh");
        let stale = slow.await.unwrap();
        assert!(stale.unwrap_err().is_superseded());
    }

    #[tokio::test]
    async fn test_cancel_aborts_in_flight() {
        let slot = RequestSlot::new();
        let running = slot.clone();
        let task = tokio::spawn(async move {
            running
                .run(async {
                    tokio::time::sleep(Duration::from_secs(5)).await;
                    Ok::<_, ClientError>(())
                })
                .await
        });

        tokio::time::sleep(Duration::from_millis(20)).await;
        slot.cancel();
        assert!(task.await.unwrap().unwrap_err().is_superseded());
    }

    #[tokio::test]
    async fn test_errors_pass_through() {
        let slot = RequestSlot::new();
        let err = slot
            .run(async { Err::<(), _>(ClientError::Timeout(30)) })
            .await
            .unwrap_err();
        assert_eq!(err.error_code(), "TIMEOUT");
    }
}
