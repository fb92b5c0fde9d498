use crate::{ExtensionId, ExtensionType};

/// Persisted extension entry.
///
/// Records are plain values. A state change produces a new record through
/// [`ExtensionRecord::activated`] or [`ExtensionRecord::deactivated`], which
/// the caller then writes back through its store in a single update. Records
/// are never removed; "deleting" one only clears `active`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionRecord {
    pub id: ExtensionId,
    /// Lowercase name, unique across both partitions.
    pub name: String,
    pub kind: ExtensionType,
    pub active: bool,
}

impl ExtensionRecord {
    pub fn is_fixed(&self) -> bool {
        self.kind == ExtensionType::Fixed
    }

    pub fn is_custom(&self) -> bool {
        self.kind == ExtensionType::Custom
    }

    /// Same record with `active` set. Identity and type are preserved.
    #[must_use]
    pub fn activated(&self) -> Self {
        Self {
            active: true,
            ..self.clone()
        }
    }

    /// Same record with `active` cleared. Identity and type are preserved.
    #[must_use]
    pub fn deactivated(&self) -> Self {
        Self {
            active: false,
            ..self.clone()
        }
    }
}

/// Insert payload; the store assigns the id. New records always start active.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewExtension {
    pub name: String,
    pub kind: ExtensionType,
}

impl NewExtension {
    pub fn fixed(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ExtensionType::Fixed,
        }
    }

    pub fn custom(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ExtensionType::Custom,
        }
    }

    /// Materialise the record a store would return for this payload.
    pub fn into_record(self, id: ExtensionId) -> ExtensionRecord {
        ExtensionRecord {
            id,
            name: self.name,
            kind: self.kind,
            active: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ExtensionRecord {
        NewExtension::custom("doc").into_record(ExtensionId(7))
    }

    #[test]
    fn new_records_start_active() {
        let record = sample();
        assert!(record.active);
        assert!(record.is_custom());
        assert!(!record.is_fixed());
    }

    #[test]
    fn transitions_keep_identity_and_type() {
        let original = sample();
        let off = original.deactivated();
        assert!(!off.active);
        assert_eq!(off.id, original.id);
        assert_eq!(off.kind, original.kind);
        assert_eq!(off.name, original.name);

        let on = off.activated();
        assert_eq!(on, original);
        // the source value is untouched
        assert!(!off.active);
    }
}
