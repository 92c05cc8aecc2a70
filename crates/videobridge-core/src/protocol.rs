//! Relay Message Types
//!
//! Core types for the two messages that cross the embedding boundary:
//! the player's ended notification and the rerun signal forwarded to
//! the parent context.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Type tag carried by the player's ended notification.
pub const VIDEO_ENDED: &str = "streamlit:videoEnded";

/// Type tag carried by the rerun signal posted to the parent context.
pub const COMPONENT_RERUN: &str = "streamlit:componentRerun";

/// A player-ended notification extracted from an incoming message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoEnded {
    /// Opaque video identifier, coerced to a string
    pub video_id: String,
}

impl VideoEnded {
    /// Extract a notification from an arbitrary incoming message.
    ///
    /// Messages can arrive from any sender with any shape. Returns
    /// `None` for anything that does not carry the exact
    /// `streamlit:videoEnded` type tag: wrong tag, missing tag,
    /// primitives, null. Extraction never fails loudly.
    pub fn from_message(message: &Value) -> Option<Self> {
        if extract_type(message)? != VIDEO_ENDED {
            return None;
        }
        Some(Self {
            video_id: coerce_to_string(message.get("videoId")),
        })
    }

    /// Build the wire message the player side posts to its host.
    pub fn to_message(&self) -> Value {
        serde_json::json!({ "type": VIDEO_ENDED, "videoId": self.video_id })
    }
}

/// The rerun signal posted upward after a matched notification.
///
/// Serializes to exactly `{"type":"streamlit:componentRerun"}`; carries
/// no payload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RerunSignal {
    #[serde(rename = "type")]
    pub tag: String,
}

impl RerunSignal {
    pub fn new() -> Self {
        Self {
            tag: COMPONENT_RERUN.to_string(),
        }
    }

    /// Wire form of the signal.
    pub fn to_message(&self) -> Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

impl Default for RerunSignal {
    fn default() -> Self {
        Self::new()
    }
}

/// Extract the type tag from a message if present.
pub fn extract_type(message: &Value) -> Option<&str> {
    message.get("type").and_then(|t| t.as_str())
}

/// Coerce an optional JSON value to a string the way the page's own
/// scripting would: strings verbatim, scalars via their canonical text,
/// null and absent members as "null", composites as their JSON text.
pub fn coerce_to_string(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => "null".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_message_match() {
        let message = json!({ "type": VIDEO_ENDED, "videoId": "abc123" });
        let ended = VideoEnded::from_message(&message).unwrap();
        assert_eq!(ended.video_id, "abc123");
    }

    #[test]
    fn test_from_message_rejects_other_shapes() {
        assert!(VideoEnded::from_message(&json!({ "type": "streamlit:otherEvent", "videoId": "xyz" })).is_none());
        assert!(VideoEnded::from_message(&json!({ "videoId": "xyz" })).is_none());
        assert!(VideoEnded::from_message(&json!({ "type": 42 })).is_none());
        assert!(VideoEnded::from_message(&json!("just a string")).is_none());
        assert!(VideoEnded::from_message(&json!(null)).is_none());
        assert!(VideoEnded::from_message(&json!([1, 2, 3])).is_none());
    }

    #[test]
    fn test_type_tag_is_case_sensitive() {
        let message = json!({ "type": "streamlit:VideoEnded", "videoId": "abc" });
        assert!(VideoEnded::from_message(&message).is_none());
    }

    #[test]
    fn test_video_id_coercion() {
        assert_eq!(coerce_to_string(Some(&json!("abc"))), "abc");
        assert_eq!(coerce_to_string(Some(&json!(42))), "42");
        assert_eq!(coerce_to_string(Some(&json!(true))), "true");
        assert_eq!(coerce_to_string(Some(&json!(null))), "null");
        assert_eq!(coerce_to_string(None), "null");
        assert_eq!(coerce_to_string(Some(&json!([1, 2]))), "[1,2]");
        assert_eq!(coerce_to_string(Some(&json!({"a": 1}))), r#"{"a":1}"#);
    }

    #[test]
    fn test_rerun_signal_wire_form() {
        let signal = RerunSignal::new().to_message();
        assert_eq!(signal, json!({ "type": COMPONENT_RERUN }));
    }

    #[test]
    fn test_ended_message_round_trip() {
        let ended = VideoEnded {
            video_id: "abc123".to_string(),
        };
        let parsed = VideoEnded::from_message(&ended.to_message()).unwrap();
        assert_eq!(parsed, ended);
    }

    #[test]
    fn test_extract_type() {
        assert_eq!(extract_type(&json!({ "type": "x" })), Some("x"));
        assert_eq!(extract_type(&json!({ "other": "x" })), None);
        assert_eq!(extract_type(&json!(7)), None);
    }
}
