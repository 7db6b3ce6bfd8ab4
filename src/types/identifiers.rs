//! Identifier types for the room inventory
//!
//! Container identifiers are composed from the floor, room type and room number
//! a container currently represents, followed by a UUID-based uniqueness token.
//! They are re-derived every time one of those three components changes.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use uuid::Uuid;

/// Prefix carried by every generated container identifier
pub const CONTAINER_ID_PREFIX: &str = "CTR";

/// Placeholder used in an identifier when a component is empty
const EMPTY_COMPONENT: &str = "none";

/// Unique identifier for a room container on a floor grid
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContainerId(String);

impl ContainerId {
    /// Generate a fresh identifier for the given (floor, room type, room number) triple
    pub fn generate(floor_num: u32, room_info: &str, room_number: &str) -> Self {
        Self(format!(
            "{}_{}_{}_{}_{}",
            CONTAINER_ID_PREFIX,
            floor_num,
            id_component(room_info),
            id_component(room_number),
            Uuid::new_v4().simple()
        ))
    }

    /// Wrap an identifier that was produced elsewhere (e.g. loaded from a saved layout)
    pub fn from_raw(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Borrow the identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check whether this identifier was produced by [`ContainerId::generate`]
    pub fn is_generated(&self) -> bool {
        self.0.starts_with(CONTAINER_ID_PREFIX) && self.0.split('_').count() >= 5
    }
}

/// Room type names may contain whitespace or underscores; keep the id splittable
fn id_component(value: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return EMPTY_COMPONENT.to_string();
    }
    trimmed
        .chars()
        .map(|c| if c.is_whitespace() || c == '_' { '-' } else { c })
        .collect()
}

impl fmt::Display for ContainerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ContainerId {
    fn from(raw: &str) -> Self {
        Self::from_raw(raw)
    }
}

impl Serialize for ContainerId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for ContainerId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // Saved layouts may carry ids minted by older front-ends; accept any string
        let s = String::deserialize(deserializer)?;
        Ok(ContainerId(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_id_components() {
        let id = ContainerId::generate(3, "standard", "301");
        let parts: Vec<&str> = id.as_str().split('_').collect();

        assert_eq!(parts[0], "CTR");
        assert_eq!(parts[1], "3");
        assert_eq!(parts[2], "standard");
        assert_eq!(parts[3], "301");
        assert_eq!(parts[4].len(), 32);
        assert!(id.is_generated());
    }

    #[test]
    fn test_generated_ids_are_unique() {
        let a = ContainerId::generate(3, "standard", "301");
        let b = ContainerId::generate(3, "standard", "301");
        assert_ne!(a, b);
    }

    #[test]
    fn test_empty_components_use_placeholder() {
        let id = ContainerId::generate(2, "", "");
        assert!(id.as_str().starts_with("CTR_2_none_none_"));
    }

    #[test]
    fn test_room_type_with_separators_stays_splittable() {
        let id = ContainerId::generate(4, "Ocean View_Suite", "401");
        assert!(id.as_str().starts_with("CTR_4_Ocean-View-Suite_401_"));
        assert_eq!(id.as_str().split('_').count(), 5);
    }

    #[test]
    fn test_id_serialization() {
        let id = ContainerId::generate(5, "deluxe", "502");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", id.as_str()));

        let deserialized: ContainerId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, deserialized);
    }

    #[test]
    fn test_foreign_ids_deserialize() {
        let id: ContainerId = serde_json::from_str("\"3-standard-301-1699999999\"").unwrap();
        assert_eq!(id.as_str(), "3-standard-301-1699999999");
        assert!(!id.is_generated());
    }
}
