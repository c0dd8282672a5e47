use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    Calls,
    Units,
    General,
}

/// Value of the envelope's `type` field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    CallCreated,
    CallUpdated,
    CallClosed,
    UnitCreated,
    UnitUpdated,
    Announcement,
    Subscribed,
    Unsubscribed,
    Pong,
    Error,
}

impl EventKind {
    /// Channel a broadcast of this event is delivered on
    pub fn channel(self) -> Channel {
        match self {
            EventKind::CallCreated | EventKind::CallUpdated | EventKind::CallClosed => {
                Channel::Calls
            }
            EventKind::UnitCreated | EventKind::UnitUpdated => Channel::Units,
            _ => Channel::General,
        }
    }
}

/// Envelope of every message sent to a client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerMessage {
    #[serde(rename = "type")]
    pub kind: EventKind,
    pub data: serde_json::Value,
    pub timestamp: DateTime<Utc>,
}

impl ServerMessage {
    pub fn new(kind: EventKind, data: serde_json::Value) -> Self {
        Self {
            kind,
            data,
            timestamp: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    Subscribe { channel: Channel },
    Unsubscribe { channel: Channel },
    Ping,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn events_map_to_channels() {
        assert_eq!(EventKind::CallCreated.channel(), Channel::Calls);
        assert_eq!(EventKind::CallClosed.channel(), Channel::Calls);
        assert_eq!(EventKind::UnitUpdated.channel(), Channel::Units);
        assert_eq!(EventKind::Announcement.channel(), Channel::General);
    }

    #[test]
    fn parses_client_messages() {
        let subscribe: ClientMessage =
            serde_json::from_str(r#"{"type":"subscribe","channel":"calls"}"#).unwrap();
        let ping: ClientMessage = serde_json::from_str(r#"{"type":"ping"}"#).unwrap();

        assert_eq!(
            subscribe,
            ClientMessage::Subscribe {
                channel: Channel::Calls
            }
        );
        assert_eq!(ping, ClientMessage::Ping);
        assert!(serde_json::from_str::<ClientMessage>(r#"{"type":"shout"}"#).is_err());
    }

    #[test]
    fn envelope_uses_type_field() {
        let message = ServerMessage::new(EventKind::UnitCreated, json!({"id": 1}));
        let value = serde_json::to_value(&message).unwrap();

        assert_eq!(value["type"], "unit_created");
        assert_eq!(value["data"]["id"], 1);
        assert!(value["timestamp"].is_string());
    }
}
