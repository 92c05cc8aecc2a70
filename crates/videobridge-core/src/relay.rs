//! The page-side relay
//!
//! Bridges the player's ended notification to the page's visible URL and
//! to a rerun signal posted upward to the parent execution context.

use serde_json::Value;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::navigation::{set_query_param, Navigation, VIDEO_ENDED_PARAM};
use crate::port::{MessagePort, ANY_ORIGIN};
use crate::protocol::{RerunSignal, VideoEnded};

/// Relays ended notifications from the embedded player.
///
/// Stateless across invocations; each message is processed on its own.
/// On a match the URL mutation lands first, then the rerun signal.
pub struct Relay<N, P> {
    navigation: N,
    port: P,
    target_origin: String,
}

impl<N: Navigation, P: MessagePort> Relay<N, P> {
    /// Create a relay posting with the wildcard target origin.
    pub fn new(navigation: N, port: P) -> Self {
        Self {
            navigation,
            port,
            target_origin: ANY_ORIGIN.to_string(),
        }
    }

    /// Restrict the target origin for parent posts.
    pub fn with_target_origin(mut self, origin: impl Into<String>) -> Self {
        self.target_origin = origin.into();
        self
    }

    /// Handle one incoming message.
    ///
    /// Non-matching messages produce zero observable side effects. A
    /// failed post is logged and swallowed so later messages still flow.
    pub async fn handle_message(&self, message: &Value) {
        let Some(ended) = VideoEnded::from_message(message) else {
            return;
        };

        let current = self.navigation.current_url();
        let updated = set_query_param(&current, VIDEO_ENDED_PARAM, &ended.video_id);
        tracing::debug!(video_id = %ended.video_id, url = %updated, "video ended, updating page URL");
        self.navigation.push_url(updated);

        let signal = RerunSignal::new().to_message();
        if let Err(e) = self.port.post_message(&signal, &self.target_origin).await {
            tracing::warn!("failed to post rerun signal to parent: {e}");
        }
    }
}

impl<N, P> Relay<N, P>
where
    N: Navigation + 'static,
    P: MessagePort + 'static,
{
    /// Install the relay on a message channel.
    ///
    /// Messages are handled one at a time in arrival order. Dropping the
    /// returned handle detaches the task, leaving the handler installed
    /// for as long as the channel lives; [`Subscription::unsubscribe`]
    /// tears it down explicitly.
    pub fn subscribe(self, mut messages: mpsc::UnboundedReceiver<Value>) -> Subscription {
        let id = Uuid::new_v4();
        let task = tokio::spawn(async move {
            while let Some(message) = messages.recv().await {
                self.handle_message(&message).await;
            }
            tracing::debug!(subscription = %id, "message channel closed");
        });
        tracing::debug!(subscription = %id, "relay subscribed");
        Subscription { id, task }
    }
}

/// Handle for an installed relay.
#[derive(Debug)]
pub struct Subscription {
    id: Uuid,
    task: JoinHandle<()>,
}

impl Subscription {
    /// Unique id of this subscription.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Whether the handler is still installed.
    pub fn is_active(&self) -> bool {
        !self.task.is_finished()
    }

    /// Tear the handler down. Messages still queued on the channel are
    /// dropped unhandled.
    pub fn unsubscribe(self) {
        self.task.abort();
        tracing::debug!(subscription = %self.id, "relay unsubscribed");
    }

    /// Wait for the handler to wind down after its channel closes.
    pub async fn join(self) {
        let _ = self.task.await;
    }
}
