//! Control socket wire protocol
//!
//! JSON frames exchanged over the control WebSocket, tagged by a `type`
//! field. Unknown or malformed frames are ignored by the transport rather
//! than failing the connection.

use serde::{Deserialize, Serialize};

/// Frames a client may send
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientFrame {
    /// Command text to relay to every participant
    Message { data: String },
    /// Stop the feed and confirm back to this client only
    DisconnectRequest,
}

/// Frames the server sends
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerFrame {
    /// Relayed command text
    Message { data: String },
    /// Answer to a disconnect request, sent to the requester alone
    DisconnectConfirmed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_message_json() {
        let frame: ClientFrame = serde_json::from_str(r#"{"type":"message","data":"f"}"#).unwrap();
        assert_eq!(
            frame,
            ClientFrame::Message {
                data: "f".to_string()
            }
        );
    }

    #[test]
    fn test_client_disconnect_request_json() {
        let frame: ClientFrame = serde_json::from_str(r#"{"type":"disconnect_request"}"#).unwrap();
        assert_eq!(frame, ClientFrame::DisconnectRequest);
    }

    #[test]
    fn test_server_frames_serialize() {
        let relayed = ServerFrame::Message {
            data: "l".to_string(),
        };
        assert_eq!(
            serde_json::to_string(&relayed).unwrap(),
            r#"{"type":"message","data":"l"}"#
        );
        assert_eq!(
            serde_json::to_string(&ServerFrame::DisconnectConfirmed).unwrap(),
            r#"{"type":"disconnect_confirmed"}"#
        );
    }

    #[test]
    fn test_malformed_frames_rejected() {
        assert!(serde_json::from_str::<ClientFrame>(r#"{"type":"reboot"}"#).is_err());
        assert!(serde_json::from_str::<ClientFrame>(r#"{"type":"message"}"#).is_err());
        assert!(serde_json::from_str::<ClientFrame>("not json").is_err());
    }
}
