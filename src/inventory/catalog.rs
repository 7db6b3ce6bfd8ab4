//! Normalized room type lookup
//!
//! Room types are matched by name after trimming and lowercasing. The rule lives
//! here and nowhere else; every lookup in the engine goes through the catalog.

use crate::inventory::room_type::RoomType;
use std::collections::HashMap;

/// Normalize a room type name for lookup (trim, lowercase)
pub fn normalize_room_info(room_info: &str) -> String {
    room_info.trim().to_lowercase()
}

/// Index from normalized room type name to its position in a collection
#[derive(Debug, Clone, Default)]
pub struct RoomTypeCatalog {
    index: HashMap<String, usize>,
}

impl RoomTypeCatalog {
    /// Build the index; on duplicate names the first occurrence wins
    pub fn build(room_types: &[RoomType]) -> Self {
        let mut index = HashMap::with_capacity(room_types.len());
        for (idx, room_type) in room_types.iter().enumerate() {
            let key = room_type.key();
            if key.is_empty() {
                continue;
            }
            index.entry(key).or_insert(idx);
        }
        Self { index }
    }

    /// Position of the room type named `room_info`
    pub fn position(&self, room_info: &str) -> Option<usize> {
        let key = normalize_room_info(room_info);
        if key.is_empty() {
            return None;
        }
        self.index.get(&key).copied()
    }

    /// Borrow the room type named `room_info`
    pub fn get<'a>(&self, room_types: &'a [RoomType], room_info: &str) -> Option<&'a RoomType> {
        self.position(room_info).and_then(|idx| room_types.get(idx))
    }

    /// Borrow the room type named `room_info`, mutably
    pub fn get_mut<'a>(
        &self,
        room_types: &'a mut [RoomType],
        room_info: &str,
    ) -> Option<&'a mut RoomType> {
        self.position(room_info).and_then(move |idx| room_types.get_mut(idx))
    }

    /// Whether `room_info` names a known room type
    pub fn contains(&self, room_info: &str) -> bool {
        self.position(room_info).is_some()
    }

    /// Number of distinct names indexed
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Whether the catalog is empty
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn room_types() -> Vec<RoomType> {
        vec![
            RoomType::new("Standard", 100.0),
            RoomType::new("deluxe", 180.0),
            RoomType::new(" standard ", 90.0),
        ]
    }

    #[test]
    fn test_normalize_room_info() {
        assert_eq!(normalize_room_info("  Deluxe King "), "deluxe king");
        assert_eq!(normalize_room_info(""), "");
    }

    #[test]
    fn test_lookup_is_normalized() {
        let types = room_types();
        let catalog = RoomTypeCatalog::build(&types);

        assert_eq!(catalog.position("STANDARD"), Some(0));
        assert_eq!(catalog.position(" deluxe"), Some(1));
        assert_eq!(catalog.get(&types, "deluxe").map(|t| t.price), Some(180.0));
        assert!(!catalog.contains("suite"));
        assert!(!catalog.contains(""));
    }

    #[test]
    fn test_duplicate_names_keep_first() {
        let types = room_types();
        let catalog = RoomTypeCatalog::build(&types);
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get(&types, "standard").map(|t| t.price), Some(100.0));
    }

    #[test]
    fn test_get_mut() {
        let mut types = room_types();
        let catalog = RoomTypeCatalog::build(&types);
        if let Some(room_type) = catalog.get_mut(&mut types, "deluxe") {
            room_type.insert_room_number("301");
        }
        assert_eq!(types[1].stock, 1);
    }
}
