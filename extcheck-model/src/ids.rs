/// Store-assigned identifier of an extension record.
///
/// Identifiers grow monotonically, so ordering by id is insertion order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ExtensionId(pub i64);

impl ExtensionId {
    pub fn get(&self) -> i64 {
        self.0
    }
}

impl From<i64> for ExtensionId {
    fn from(value: i64) -> Self {
        ExtensionId(value)
    }
}

impl std::fmt::Display for ExtensionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
