//! Wire events exchanged between clients and the relay.
//!
//! Every frame is a JSON text message tagged by its `"type"` field:
//!
//! ```text
//! {"type":"JOIN","roomId":"r1","username":"alice"}
//! {"type":"JOINED","clients":[{"socketId":"…","username":"alice"}],"username":"alice","socketId":"…"}
//! ```
//!
//! Frames are decoded into [`ClientEvent`] / [`ServerEvent`] at the transport
//! boundary, so a malformed payload fails with a decoding error instead of
//! reaching the room logic.

use serde::{Deserialize, Serialize};

/// Events emitted by a client towards the relay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    tag = "type",
    rename_all = "SCREAMING_SNAKE_CASE",
    rename_all_fields = "camelCase"
)]
pub enum ClientEvent {
    /// Enter a room under a display name.
    Join { room_id: String, username: String },
    /// Hand a full buffer to one specific participant.
    SyncCode { code: String, socket_id: String },
    /// Full buffer after a local edit.
    CodeChange { room_id: String, code: String },
}

/// Events pushed by the relay to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    tag = "type",
    rename_all = "SCREAMING_SNAKE_CASE",
    rename_all_fields = "camelCase"
)]
pub enum ServerEvent {
    /// Identity assigned to this connection.
    Connected { socket_id: String },
    /// Someone entered the room; carries the full member list.
    Joined {
        clients: Vec<ClientInfo>,
        username: String,
        socket_id: String,
    },
    /// Snapshot addressed to `socket_id`.
    SyncCode { code: String, socket_id: String },
    /// Another member edited the buffer.
    CodeChange { room_id: String, code: String },
    /// A member's connection closed.
    Disconnected { socket_id: String, username: String },
    /// The relay rejected the last event from this connection.
    Error { message: String },
}

/// One room member as seen on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientInfo {
    pub socket_id: String,
    pub username: String,
}

impl ClientEvent {
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl ServerEvent {
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_event_uses_wire_field_names() {
        // テスト項目: JOIN イベントがワイヤ形式のフィールド名でシリアライズされる
        // given (前提条件):
        let event = ClientEvent::Join {
            room_id: "r1".to_string(),
            username: "alice".to_string(),
        };

        // when (操作):
        let json: serde_json::Value = serde_json::from_str(&event.to_json().unwrap()).unwrap();

        // then (期待する結果):
        assert_eq!(
            json,
            serde_json::json!({"type": "JOIN", "roomId": "r1", "username": "alice"})
        );
    }

    #[test]
    fn test_joined_event_decodes_member_list() {
        // テスト項目: JOINED イベントが参加者リスト付きでデコードされる
        // given (前提条件):
        let text = r#"{"type":"JOINED","clients":[{"socketId":"a","username":"alice"},{"socketId":"b","username":"bob"}],"username":"bob","socketId":"b"}"#;

        // when (操作):
        let event = ServerEvent::from_json(text).unwrap();

        // then (期待する結果):
        match event {
            ServerEvent::Joined {
                clients,
                username,
                socket_id,
            } => {
                assert_eq!(clients.len(), 2);
                assert_eq!(clients[1].username, "bob");
                assert_eq!(username, "bob");
                assert_eq!(socket_id, "b");
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn test_sync_code_tag_name() {
        // テスト項目: SYNC_CODE のタグ名がスネークケース大文字になる
        // given (前提条件):
        let event = ServerEvent::SyncCode {
            code: "print(1)".to_string(),
            socket_id: "b".to_string(),
        };

        // when (操作):
        let json = event.to_json().unwrap();

        // then (期待する結果):
        assert!(json.contains(r#""type":"SYNC_CODE""#));
        assert!(json.contains(r#""socketId":"b""#));
    }

    #[test]
    fn test_missing_field_is_a_decoding_error() {
        // テスト項目: 必須フィールドが欠けたペイロードはデコードエラーになる
        // given (前提条件):
        let text = r#"{"type":"CODE_CHANGE","code":"x"}"#;

        // when (操作):
        let result = ClientEvent::from_json(text);

        // then (期待する結果):
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_event_type_is_a_decoding_error() {
        // テスト項目: 未知のイベント種別はデコードエラーになる
        // given (前提条件):
        let text = r#"{"type":"LEAVE","roomId":"r1"}"#;

        // when (操作):
        let result = ClientEvent::from_json(text);

        // then (期待する結果):
        assert!(result.is_err());
    }
}
