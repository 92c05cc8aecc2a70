//! Player-side bridge
//!
//! The embedded player's half of the boundary: watches state changes
//! and announces the ended video to the hosting page.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::Result;
use crate::port::{MessagePort, ANY_ORIGIN};
use crate::protocol::VideoEnded;

/// Query parameter the host places on the embed URL to select a video.
pub const VIDEO_ID_PARAM: &str = "videoId";

/// Embedded player states, by wire code.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PlayerState {
    Unstarted,
    Ended,
    Playing,
    Paused,
    Buffering,
    Cued,
}

impl PlayerState {
    /// Map a raw state-change code to a state. Unknown codes yield `None`.
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            -1 => Some(Self::Unstarted),
            0 => Some(Self::Ended),
            1 => Some(Self::Playing),
            2 => Some(Self::Paused),
            3 => Some(Self::Buffering),
            5 => Some(Self::Cued),
            _ => None,
        }
    }
}

/// Read the selected video id from the embed URL.
pub fn video_id_from_embed_url(url: &Url) -> Option<String> {
    url.query_pairs()
        .find(|(k, _)| k == VIDEO_ID_PARAM)
        .map(|(_, v)| v.into_owned())
}

/// Announces player state changes to the hosting page.
pub struct PlayerBridge<P> {
    video_id: String,
    port: P,
}

impl<P: MessagePort> PlayerBridge<P> {
    pub fn new(video_id: impl Into<String>, port: P) -> Self {
        Self {
            video_id: video_id.into(),
            port,
        }
    }

    /// React to a state change: only the ended state is announced.
    pub async fn on_state_change(&self, state: PlayerState) -> Result<()> {
        if state != PlayerState::Ended {
            return Ok(());
        }
        let message = VideoEnded {
            video_id: self.video_id.clone(),
        }
        .to_message();
        tracing::debug!(video_id = %self.video_id, "announcing ended video to host");
        self.port.post_message(&message, ANY_ORIGIN).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::port::BufferedMessagePort;
    use crate::protocol::VIDEO_ENDED;
    use serde_json::json;

    #[test]
    fn test_from_code() {
        assert_eq!(PlayerState::from_code(0), Some(PlayerState::Ended));
        assert_eq!(PlayerState::from_code(-1), Some(PlayerState::Unstarted));
        assert_eq!(PlayerState::from_code(5), Some(PlayerState::Cued));
        assert_eq!(PlayerState::from_code(4), None);
        assert_eq!(PlayerState::from_code(99), None);
    }

    #[test]
    fn test_video_id_from_embed_url() {
        let url = Url::parse("https://host.example/player.html?videoId=abc123").unwrap();
        assert_eq!(video_id_from_embed_url(&url).as_deref(), Some("abc123"));

        let bare = Url::parse("https://host.example/player.html").unwrap();
        assert!(video_id_from_embed_url(&bare).is_none());
    }

    #[tokio::test]
    async fn test_only_ended_is_announced() {
        let port = BufferedMessagePort::new();
        let bridge = PlayerBridge::new("abc123", port.clone());

        bridge.on_state_change(PlayerState::Playing).await.unwrap();
        bridge.on_state_change(PlayerState::Paused).await.unwrap();
        bridge.on_state_change(PlayerState::Buffering).await.unwrap();
        assert!(port.sent().is_empty());

        bridge.on_state_change(PlayerState::Ended).await.unwrap();
        let sent = port.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, json!({"type": VIDEO_ENDED, "videoId": "abc123"}));
        assert_eq!(sent[0].1, ANY_ORIGIN);
    }
}
