use chrono::Utc;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tracing::debug;

use super::{ActiveNotice, NoticeKind};
use crate::session::DashboardEvent;

/// Transient alert notifier
///
/// Models the single currently-displayed alert banner with automatic expiry.
/// At most one notice is active at a time: re-triggering replaces the notice
/// and restarts the countdown rather than stacking a second one. Expiry is a
/// one-shot cancellable task; `dismiss` and re-`trigger` abort the pending
/// task, and a generation counter guarantees a stale fire can never clear a
/// newer notice.
pub struct AlertNotifier {
    inner: Arc<Mutex<NotifierInner>>,
    display_duration: Duration,
    child_name: String,
    updates: broadcast::Sender<DashboardEvent>,
}

struct NotifierInner {
    active: Option<ActiveNotice>,
    expiry_task: Option<JoinHandle<()>>,
    /// Bumped on every trigger/dismiss; an expiry task only clears state if
    /// the generation it captured is still current
    generation: u64,
}

impl AlertNotifier {
    pub fn new(
        display_duration: Duration,
        child_name: &str,
        updates: broadcast::Sender<DashboardEvent>,
    ) -> Self {
        Self {
            inner: Arc::new(Mutex::new(NotifierInner {
                active: None,
                expiry_task: None,
                generation: 0,
            })),
            display_duration,
            child_name: child_name.to_string(),
            updates,
        }
    }

    /// Set the active notice and (re)start the expiry countdown
    ///
    /// Must be called from within a tokio runtime (the expiry task is
    /// spawned on it).
    pub fn trigger(&self, kind: NoticeKind) -> ActiveNotice {
        let raised_at = Utc::now();
        let notice = ActiveNotice {
            kind,
            message: kind.message(&self.child_name),
            raised_at,
            expires_at: raised_at
                + chrono::Duration::milliseconds(self.display_duration.as_millis() as i64),
        };

        let mut inner = self.inner.lock().unwrap();
        inner.generation += 1;
        let generation = inner.generation;

        // Cancel any pending countdown before replacing the notice
        if let Some(task) = inner.expiry_task.take() {
            task.abort();
        }
        inner.active = Some(notice.clone());

        let shared = Arc::clone(&self.inner);
        let updates = self.updates.clone();
        let duration = self.display_duration;
        inner.expiry_task = Some(tokio::spawn(async move {
            tokio::time::sleep(duration).await;

            let mut inner = shared.lock().unwrap();
            if inner.generation != generation {
                // A newer trigger or dismiss owns the state now
                return;
            }
            inner.active = None;
            inner.expiry_task = None;
            debug!("Active alert expired");
            let _ = updates.send(DashboardEvent::NoticeCleared { expired: true });
        }));
        drop(inner);

        let _ = self.updates.send(DashboardEvent::NoticeRaised {
            notice: notice.clone(),
        });
        notice
    }

    /// Clear the active notice immediately and cancel the pending countdown
    ///
    /// Idempotent: dismissing with no active notice is a no-op and returns
    /// `false`.
    pub fn dismiss(&self) -> bool {
        let dismissed = {
            let mut inner = self.inner.lock().unwrap();
            inner.generation += 1;
            if let Some(task) = inner.expiry_task.take() {
                task.abort();
            }
            inner.active.take().is_some()
        };

        if dismissed {
            let _ = self.updates.send(DashboardEvent::NoticeCleared { expired: false });
        }
        dismissed
    }

    /// Return the active notice, or `None` when idle
    pub fn current(&self) -> Option<ActiveNotice> {
        self.inner.lock().unwrap().active.clone()
    }
}
