use std::fmt::{Display, Formatter};
use std::str::FromStr;

use crate::error::ModelError;

/// Partition an extension record belongs to. Never changes after creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "UPPERCASE"))]
pub enum ExtensionType {
    /// Reserved extension toggled on and off by an operator.
    Fixed,
    /// User-added extension, subject to the custom capacity.
    Custom,
}

impl ExtensionType {
    pub const fn as_str(self) -> &'static str {
        match self {
            ExtensionType::Fixed => "FIXED",
            ExtensionType::Custom => "CUSTOM",
        }
    }
}

impl Display for ExtensionType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExtensionType {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "FIXED" => Ok(ExtensionType::Fixed),
            "CUSTOM" => Ok(ExtensionType::Custom),
            other => Err(ModelError::UnknownExtensionType(other.to_string())),
        }
    }
}
