use extcheck_model::{ExtensionId, ExtensionRecord, ExtensionType};
use serde::{Deserialize, Serialize};

/// Public view of a single extension record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ExtensionResponse {
    pub id: ExtensionId,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ExtensionType,
    pub is_active: bool,
}

impl From<&ExtensionRecord> for ExtensionResponse {
    fn from(record: &ExtensionRecord) -> Self {
        Self {
            id: record.id,
            name: record.name.clone(),
            kind: record.kind,
            is_active: record.active,
        }
    }
}

impl From<ExtensionRecord> for ExtensionResponse {
    fn from(record: ExtensionRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            kind: record.kind,
            is_active: record.active,
        }
    }
}

/// Active names of both partitions, each in insertion order.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExtensionListResponse {
    pub fixed: Vec<String>,
    pub custom: Vec<String>,
    /// Number of active custom extensions.
    pub count: usize,
}

impl ExtensionListResponse {
    pub fn new(fixed: Vec<String>, custom: Vec<String>) -> Self {
        let count = custom.len();
        Self {
            fixed,
            custom,
            count,
        }
    }
}

/// Body of the fixed-extension batch endpoint. Either list may be omitted
/// or `null`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct FixedBatchRequest {
    #[serde(default)]
    pub checked: Option<Vec<String>>,
    #[serde(default)]
    pub unchecked: Option<Vec<String>>,
}

/// Query string of the add-custom endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AddCustomExtensionQuery {
    #[serde(rename = "customExtension", default)]
    pub custom_extension: Option<String>,
}
