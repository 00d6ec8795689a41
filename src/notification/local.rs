//! In-process alert backend.
//!
//! Each pending alert is a tokio task sleeping for the request's delay. When
//! it wakes it presents the alert through the [`AlertDelegate`]; the screen
//! prints the banner and plays the sound.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::debug;

use super::delegate::AlertDelegate;
use super::error::NotificationError;
use super::request::AlertRequest;
use super::AlertScheduler;

struct PendingAlert {
    generation: u64,
    handle: JoinHandle<()>,
}

type PendingMap = Arc<Mutex<HashMap<String, PendingAlert>>>;

/// Alert scheduler backed by tokio timers.
///
/// Must be used from inside a tokio runtime.
pub struct LocalAlertScheduler {
    delegate: AlertDelegate,
    pending: PendingMap,
    next_generation: AtomicU64,
}

impl LocalAlertScheduler {
    /// Creates a scheduler presenting through `delegate`.
    #[must_use]
    pub fn new(delegate: AlertDelegate) -> Self {
        Self {
            delegate,
            pending: Arc::new(Mutex::new(HashMap::new())),
            next_generation: AtomicU64::new(0),
        }
    }

    /// Number of alerts armed and not yet fired.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        lock(&self.pending).len()
    }

    /// Returns true if an alert with `identifier` is armed.
    #[must_use]
    pub fn is_pending(&self, identifier: &str) -> bool {
        lock(&self.pending).contains_key(identifier)
    }
}

fn lock(pending: &PendingMap) -> std::sync::MutexGuard<'_, HashMap<String, PendingAlert>> {
    pending.lock().unwrap_or_else(PoisonError::into_inner)
}

impl AlertScheduler for LocalAlertScheduler {
    fn schedule(&self, request: &AlertRequest) -> Result<(), NotificationError> {
        request.validate()?;
        let runtime = Handle::try_current()
            .map_err(|e| NotificationError::NotAvailable(e.to_string()))?;

        let generation = self.next_generation.fetch_add(1, Ordering::Relaxed);
        let pending = Arc::clone(&self.pending);
        let delegate = self.delegate.clone();
        let alert = request.clone();

        let mut map = lock(&self.pending);
        let handle = runtime.spawn(async move {
            tokio::time::sleep(alert.delay).await;

            {
                let mut map = lock(&pending);
                if map
                    .get(&alert.identifier)
                    .is_some_and(|entry| entry.generation == generation)
                {
                    map.remove(&alert.identifier);
                }
            }

            delegate.will_present(&alert.identifier, &alert.content);
        });

        if let Some(previous) = map.insert(
            request.identifier.clone(),
            PendingAlert { generation, handle },
        ) {
            previous.handle.abort();
            debug!("Replaced pending alert '{}'", request.identifier);
        }

        debug!(
            "Alert '{}' armed for {}s",
            request.identifier,
            request.delay.as_secs()
        );
        Ok(())
    }

    fn cancel_all(&self) {
        let drained: Vec<_> = lock(&self.pending).drain().collect();
        for (identifier, alert) in drained {
            alert.handle.abort();
            debug!("Cancelled alert '{}'", identifier);
        }
    }
}

impl Drop for LocalAlertScheduler {
    fn drop(&mut self) {
        self.cancel_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notification::delegate::AlertEvent;
    use crate::notification::request::{countdown_finished_request, COUNTDOWN_ALERT_ID};
    use std::time::Duration;
    use tokio::sync::mpsc;

    fn create_scheduler() -> (LocalAlertScheduler, mpsc::UnboundedReceiver<AlertEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (LocalAlertScheduler::new(AlertDelegate::new(tx)), rx)
    }

    #[tokio::test(start_paused = true)]
    async fn test_alert_fires_after_delay() {
        let (scheduler, mut rx) = create_scheduler();

        scheduler.schedule(&countdown_finished_request(60)).unwrap();
        assert!(scheduler.is_pending(COUNTDOWN_ALERT_ID));

        tokio::time::sleep(Duration::from_secs(59)).await;
        assert!(rx.try_recv().is_err());

        tokio::time::sleep(Duration::from_secs(2)).await;
        match rx.try_recv().unwrap() {
            AlertEvent::Presented {
                identifier,
                content,
                options,
            } => {
                assert_eq!(identifier, COUNTDOWN_ALERT_ID);
                assert_eq!(content.title, "Important Message");
                assert!(options.sound);
            }
            other => panic!("Expected Presented, got {:?}", other),
        }
        assert_eq!(scheduler.pending_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_same_identifier_replaces_pending_alert() {
        let (scheduler, mut rx) = create_scheduler();

        scheduler.schedule(&countdown_finished_request(10)).unwrap();
        scheduler.schedule(&countdown_finished_request(30)).unwrap();
        assert_eq!(scheduler.pending_count(), 1);

        tokio::time::sleep(Duration::from_secs(11)).await;
        assert!(rx.try_recv().is_err(), "replaced alert must not fire");

        tokio::time::sleep(Duration::from_secs(20)).await;
        assert!(matches!(rx.try_recv(), Ok(AlertEvent::Presented { .. })));
        assert!(rx.try_recv().is_err(), "exactly one alert fires");
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_all_removes_pending_alerts() {
        let (scheduler, mut rx) = create_scheduler();

        scheduler.schedule(&countdown_finished_request(5)).unwrap();
        scheduler.cancel_all();
        assert_eq!(scheduler.pending_count(), 0);

        tokio::time::sleep(Duration::from_secs(10)).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_schedule_rejects_invalid_request() {
        let (scheduler, _rx) = create_scheduler();
        let result = scheduler.schedule(&countdown_finished_request(0));
        assert!(matches!(result, Err(NotificationError::InvalidInput(_))));
        assert_eq!(scheduler.pending_count(), 0);
    }

    #[test]
    fn test_schedule_outside_runtime_fails() {
        let (scheduler, _rx) = create_scheduler();
        let result = scheduler.schedule(&countdown_finished_request(60));
        assert!(matches!(result, Err(NotificationError::NotAvailable(_))));
    }

    #[test]
    fn test_cancel_all_with_nothing_pending() {
        let (scheduler, _rx) = create_scheduler();
        scheduler.cancel_all();
        assert_eq!(scheduler.pending_count(), 0);
    }
}
