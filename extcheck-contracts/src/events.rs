use serde::{Deserialize, Serialize};

use crate::extensions::ExtensionListResponse;

/// Frame published on the extension topic after a committed change.
///
/// Single-item mutations publish a [`ExtensionBroadcast::Full`] snapshot; the
/// fixed batch endpoint publishes one [`ExtensionBroadcast::Delta`] carrying
/// the request lists as sent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ExtensionBroadcast {
    Full(ExtensionListResponse),
    #[serde(rename_all = "camelCase")]
    Delta {
        fixed_added: Vec<String>,
        fixed_removed: Vec<String>,
    },
}

impl ExtensionBroadcast {
    pub fn kind(&self) -> &'static str {
        match self {
            ExtensionBroadcast::Full(_) => "full",
            ExtensionBroadcast::Delta { .. } => "delta",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn full_frame_is_flattened_snapshot() {
        let frame = ExtensionBroadcast::Full(ExtensionListResponse::new(
            vec!["exe".into()],
            vec!["pdf".into()],
        ));
        assert_eq!(
            serde_json::to_value(&frame).unwrap(),
            json!({"type": "full", "fixed": ["exe"], "custom": ["pdf"], "count": 1})
        );
    }

    #[test]
    fn delta_frame_uses_camel_case_lists() {
        let frame = ExtensionBroadcast::Delta {
            fixed_added: vec!["exe".into(), "bat".into()],
            fixed_removed: vec!["cmd".into()],
        };
        let value = serde_json::to_value(&frame).unwrap();
        assert_eq!(
            value,
            json!({"type": "delta", "fixedAdded": ["exe", "bat"], "fixedRemoved": ["cmd"]})
        );
        let back: ExtensionBroadcast = serde_json::from_value(value).unwrap();
        assert_eq!(back.kind(), "delta");
    }
}
