//! The task that owns the view-model.
//!
//! Intents from any number of [`RuntimeHandle`]s are applied strictly in
//! arrival order. Actions returned by the view-model are executed here: a
//! toast expiry becomes a sleeping task that posts
//! [`Intent::ToastExpired`] back into the same queue, so the expiry is applied
//! on the owning task like every other mutation.
//!
//! Timer tasks hold only a weak sender. Once every handle is dropped the loop
//! ends and the view-model is returned from the join handle.

use super::messages::Envelope;
use crate::app::{handle_intent, Action, EventListViewModel, Intent, ViewSnapshot};
use crate::domain::error::{FutureJoyError, Result};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

/// Cloneable entry point into a running view-model task.
#[derive(Debug, Clone)]
pub struct RuntimeHandle {
    tx: mpsc::UnboundedSender<Envelope>,
    snapshots: watch::Receiver<ViewSnapshot>,
}

impl RuntimeHandle {
    /// Queues `intent` without waiting for it to be applied.
    ///
    /// # Errors
    ///
    /// Returns [`FutureJoyError::Runtime`] if the task has stopped.
    pub fn send(&self, intent: Intent) -> Result<()> {
        self.tx
            .send(Envelope::fire_and_forget(intent))
            .map_err(|_| FutureJoyError::Runtime("view-model task has stopped".to_string()))
    }

    /// Queues `intent` and waits until it has been applied.
    ///
    /// Returns the actions it produced; they have already been scheduled.
    ///
    /// # Errors
    ///
    /// Returns [`FutureJoyError::Runtime`] if the task has stopped.
    pub async fn dispatch(&self, intent: Intent) -> Result<Vec<Action>> {
        let (envelope, reply) = Envelope::with_reply(intent);
        self.tx
            .send(envelope)
            .map_err(|_| FutureJoyError::Runtime("view-model task has stopped".to_string()))?;
        reply
            .await
            .map_err(|_| FutureJoyError::Runtime("view-model task dropped the reply".to_string()))
    }

    /// A fresh receiver of published snapshots.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<ViewSnapshot> {
        self.snapshots.clone()
    }

    /// The most recently published snapshot.
    #[must_use]
    pub fn snapshot(&self) -> ViewSnapshot {
        self.snapshots.borrow().clone()
    }
}

/// Moves `vm` onto its own task and returns a handle to it.
///
/// Must be called from within a tokio runtime.
pub fn spawn(vm: EventListViewModel) -> (RuntimeHandle, JoinHandle<EventListViewModel>) {
    let (tx, rx) = mpsc::unbounded_channel();
    let snapshots = vm.subscribe();
    let timers = tx.downgrade();

    let task = tokio::spawn(run(vm, rx, timers));
    (RuntimeHandle { tx, snapshots }, task)
}

async fn run(
    mut vm: EventListViewModel,
    mut rx: mpsc::UnboundedReceiver<Envelope>,
    timers: mpsc::WeakUnboundedSender<Envelope>,
) -> EventListViewModel {
    tracing::debug!("view-model task started");

    while let Some(envelope) = rx.recv().await {
        let actions = handle_intent(&mut vm, &envelope.intent);
        for action in &actions {
            execute(action, &timers);
        }
        if let Some(reply) = envelope.reply {
            // The caller may have stopped waiting.
            let _ = reply.send(actions);
        }
    }

    tracing::debug!("all handles dropped, view-model task stopping");
    vm
}

fn execute(action: &Action, timers: &mpsc::WeakUnboundedSender<Envelope>) {
    match action {
        Action::ScheduleToastExpiry { toast_id, after } => {
            let (toast_id, after) = (*toast_id, *after);
            let timers = timers.clone();
            tokio::spawn(async move {
                tokio::time::sleep(after).await;
                if let Some(tx) = timers.upgrade() {
                    let _ = tx.send(Envelope::fire_and_forget(Intent::ToastExpired(toast_id)));
                }
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::ToastStyle;
    use crate::infrastructure::SystemClock;
    use crate::storage::JsonEventStore;
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::time::sleep;

    fn running() -> (RuntimeHandle, JoinHandle<EventListViewModel>) {
        let vm = EventListViewModel::initialize(
            Box::new(JsonEventStore::in_memory()),
            Arc::new(SystemClock),
            Duration::from_millis(2500),
        );
        spawn(vm)
    }

    fn toast(message: &str) -> Intent {
        Intent::PresentToast {
            message: message.to_string(),
            style: ToastStyle::Success,
            duration: None,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn toast_expires_after_its_duration() {
        let (handle, _task) = running();

        handle.dispatch(toast("Saved")).await.unwrap();
        sleep(Duration::from_millis(2400)).await;
        handle.dispatch(Intent::Refresh).await.unwrap();
        assert!(handle.snapshot().toast.is_some());

        sleep(Duration::from_millis(200)).await;
        handle.dispatch(Intent::Refresh).await.unwrap();
        assert!(handle.snapshot().toast.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn stale_timer_does_not_dismiss_newer_toast() {
        let (handle, _task) = running();

        handle.dispatch(toast("First")).await.unwrap();
        sleep(Duration::from_millis(1000)).await;
        handle.dispatch(toast("Second")).await.unwrap();
        let second = handle.snapshot().toast.unwrap();

        // First timer fires at 2.5s.
        sleep(Duration::from_millis(1600)).await;
        handle.dispatch(Intent::Refresh).await.unwrap();
        assert_eq!(handle.snapshot().toast.map(|t| t.id), Some(second.id));

        // Second timer fires at 3.5s.
        sleep(Duration::from_millis(1000)).await;
        handle.dispatch(Intent::Refresh).await.unwrap();
        assert!(handle.snapshot().toast.is_none());
    }

    #[tokio::test]
    async fn intents_from_clones_are_applied_in_order() {
        let (handle, _task) = running();
        let other = handle.clone();

        handle.send(Intent::EnterSelectionMode).unwrap();
        other.send(Intent::ExitSelectionMode).unwrap();
        handle.dispatch(Intent::EnterSelectionMode).await.unwrap();

        assert!(handle.snapshot().selection_mode);
    }

    #[tokio::test(start_paused = true)]
    async fn task_stops_when_handles_drop_even_with_pending_timer() {
        let (handle, task) = running();
        handle.dispatch(toast("Bye")).await.unwrap();
        drop(handle);

        let vm = task.await.unwrap();
        assert!(vm.toast().is_some());
    }
}
