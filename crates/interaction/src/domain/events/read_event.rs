// crates/interaction/src/domain/events/read_event.rs

use serde::{Deserialize, Serialize};

/// Un message du topic de lecture. Le domaine n'est pas porté par l'événement :
/// il est fixé par topic (configuration du consumer).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadEvent {
    #[serde(alias = "Uid")]
    pub user_id: i64,
    #[serde(alias = "Aid")]
    pub item_id: i64,
}

impl ReadEvent {
    pub fn new(user_id: i64, item_id: i64) -> Self {
        Self { user_id, item_id }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decodes_current_field_names() {
        let event: ReadEvent = serde_json::from_str(r#"{"userId": 321, "itemId": 20001}"#).unwrap();
        assert_eq!(event, ReadEvent::new(321, 20001));
    }

    #[test]
    fn test_decodes_legacy_field_names() {
        let event: ReadEvent = serde_json::from_str(r#"{"Uid": 321, "Aid": 20001}"#).unwrap();
        assert_eq!(event, ReadEvent::new(321, 20001));
    }

    #[test]
    fn test_encodes_camel_case() {
        let json = serde_json::to_string(&ReadEvent::new(1, 2)).unwrap();
        assert_eq!(json, r#"{"userId":1,"itemId":2}"#);
    }

    #[test]
    fn test_missing_item_is_rejected() {
        assert!(serde_json::from_str::<ReadEvent>(r#"{"userId": 1}"#).is_err());
    }
}
