//! Message types carried over the runtime's intent channel.

use crate::app::{Action, Intent};
use tokio::sync::oneshot;

/// One intent on its way to the owning task.
///
/// `reply` receives the actions the intent produced once it has been applied.
/// Timer-originated intents and fire-and-forget sends carry no reply.
#[derive(Debug)]
pub struct Envelope {
    pub intent: Intent,
    pub reply: Option<oneshot::Sender<Vec<Action>>>,
}

impl Envelope {
    #[must_use]
    pub const fn fire_and_forget(intent: Intent) -> Self {
        Self { intent, reply: None }
    }

    #[must_use]
    pub fn with_reply(intent: Intent) -> (Self, oneshot::Receiver<Vec<Action>>) {
        let (tx, rx) = oneshot::channel();
        (
            Self {
                intent,
                reply: Some(tx),
            },
            rx,
        )
    }
}
