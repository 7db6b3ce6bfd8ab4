//! Room type inventory records
//!
//! A room type is an abstract category ("standard", "deluxe") with a default
//! nightly price and the list of physical room numbers currently assigned to it.
//! `stock` is derived from that list and is recomputed on every change.

use crate::inventory::catalog::normalize_room_info;
use crate::inventory::room_number::{floor_of, normalize_room_numbers, same_room_number};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// An abstract room category with its assigned room numbers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomType {
    /// Canonical identifier of the room category
    pub room_info: String,
    /// Default nightly price for the category
    pub price: f64,
    /// Planned number of rooms of this type per floor
    #[serde(default)]
    pub floor_settings: BTreeMap<u32, u32>,
    /// First room number on a floor for this type, used to seed allocation
    #[serde(default)]
    pub start_room_numbers: BTreeMap<u32, String>,
    /// Every room number assigned to this type, numerically sorted and unique
    #[serde(default)]
    pub room_numbers: Vec<String>,
    /// Number of assigned rooms; always `room_numbers.len()`
    #[serde(default)]
    pub stock: usize,
    /// Alternate display names
    #[serde(default)]
    pub aliases: BTreeSet<String>,
}

impl RoomType {
    /// Create a room type with no rooms assigned
    pub fn new(room_info: impl Into<String>, price: f64) -> Self {
        Self {
            room_info: room_info.into(),
            price,
            floor_settings: BTreeMap::new(),
            start_room_numbers: BTreeMap::new(),
            room_numbers: Vec::new(),
            stock: 0,
            aliases: BTreeSet::new(),
        }
    }

    /// Plan `count` rooms of this type on `floor_num`
    pub fn with_floor_setting(mut self, floor_num: u32, count: u32) -> Self {
        self.floor_settings.insert(floor_num, count);
        self
    }

    /// Seed allocation on `floor_num` from `room_number`
    pub fn with_start_room_number(mut self, floor_num: u32, room_number: impl Into<String>) -> Self {
        self.start_room_numbers.insert(floor_num, room_number.into());
        self
    }

    /// Assign an explicit list of room numbers
    pub fn with_room_numbers<I, S>(mut self, numbers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.room_numbers = numbers.into_iter().map(Into::into).collect();
        self.normalize();
        self
    }

    /// Add an alternate display name
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.insert(alias.into());
        self
    }

    /// Lookup key for this type (trimmed, lowercase)
    pub fn key(&self) -> String {
        normalize_room_info(&self.room_info)
    }

    /// Check whether `room_info` names this type
    pub fn matches(&self, room_info: &str) -> bool {
        self.key() == normalize_room_info(room_info)
    }

    /// Sort and deduplicate `room_numbers`, then recompute `stock`
    pub fn normalize(&mut self) {
        normalize_room_numbers(&mut self.room_numbers);
        self.refresh_stock();
    }

    /// Recompute `stock` from `room_numbers`
    pub fn refresh_stock(&mut self) {
        self.stock = self.room_numbers.len();
    }

    /// Whether `room_number` is assigned to this type
    pub fn contains_room_number(&self, room_number: &str) -> bool {
        self.room_numbers.iter().any(|n| same_room_number(n, room_number))
    }

    /// Assign a room number; returns false when it was already present
    pub fn insert_room_number(&mut self, room_number: &str) -> bool {
        if room_number.trim().is_empty() || self.contains_room_number(room_number) {
            self.normalize();
            return false;
        }
        self.room_numbers.push(room_number.trim().to_string());
        self.normalize();
        true
    }

    /// Unassign a room number; returns false when it was not present
    pub fn remove_room_number(&mut self, room_number: &str) -> bool {
        let before = self.room_numbers.len();
        self.room_numbers.retain(|n| !same_room_number(n, room_number));
        self.normalize();
        self.room_numbers.len() != before
    }

    /// Drop every room number whose prefix is `floor_num`; returns how many were dropped
    pub fn remove_floor(&mut self, floor_num: u32) -> usize {
        let before = self.room_numbers.len();
        self.room_numbers.retain(|n| floor_of(n) != Some(floor_num));
        self.normalize();
        before - self.room_numbers.len()
    }

    /// Room numbers of this type on `floor_num`
    pub fn room_numbers_on_floor(&self, floor_num: u32) -> Vec<&str> {
        self.room_numbers
            .iter()
            .filter(|n| floor_of(n) == Some(floor_num))
            .map(String::as_str)
            .collect()
    }

    /// Total rooms planned across every floor in `floor_settings`
    pub fn planned_rooms(&self) -> u32 {
        self.floor_settings.values().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_room_type_creation() {
        let room_type = RoomType::new("standard", 120.0);
        assert_eq!(room_type.room_info, "standard");
        assert_eq!(room_type.price, 120.0);
        assert!(room_type.room_numbers.is_empty());
        assert_eq!(room_type.stock, 0);
    }

    #[test]
    fn test_insert_keeps_sorted_and_unique() {
        let mut room_type = RoomType::new("standard", 120.0);
        assert!(room_type.insert_room_number("303"));
        assert!(room_type.insert_room_number("301"));
        assert!(room_type.insert_room_number("1001"));
        assert!(!room_type.insert_room_number("301"));
        assert!(!room_type.insert_room_number(""));

        assert_eq!(room_type.room_numbers, vec!["301", "303", "1001"]);
        assert_eq!(room_type.stock, 3);
    }

    #[test]
    fn test_remove_room_number() {
        let mut room_type = RoomType::new("deluxe", 180.0).with_room_numbers(["301", "302"]);
        assert!(room_type.remove_room_number("301"));
        assert!(!room_type.remove_room_number("301"));
        assert_eq!(room_type.room_numbers, vec!["302"]);
        assert_eq!(room_type.stock, 1);
    }

    #[test]
    fn test_remove_floor_strips_prefix_matches() {
        let mut room_type =
            RoomType::new("standard", 100.0).with_room_numbers(["201", "301", "302", "1301"]);
        assert_eq!(room_type.remove_floor(3), 2);
        assert_eq!(room_type.room_numbers, vec!["201", "1301"]);
        assert_eq!(room_type.stock, 2);
    }

    #[test]
    fn test_matches_is_case_and_whitespace_insensitive() {
        let room_type = RoomType::new("Standard", 100.0);
        assert!(room_type.matches(" standard "));
        assert!(room_type.matches("STANDARD"));
        assert!(!room_type.matches("deluxe"));
    }

    #[test]
    fn test_loaded_stock_is_recomputed_on_normalize() {
        let json = r#"{"roomInfo":"standard","price":99.5,"roomNumbers":["302","301","301"],"stock":7}"#;
        let mut room_type: RoomType = serde_json::from_str(json).unwrap();
        assert_eq!(room_type.stock, 7);

        room_type.normalize();
        assert_eq!(room_type.room_numbers, vec!["301", "302"]);
        assert_eq!(room_type.stock, 2);
    }

    #[test]
    fn test_floor_queries() {
        let room_type = RoomType::new("suite", 300.0)
            .with_room_numbers(["301", "401", "402"])
            .with_floor_setting(3, 1)
            .with_floor_setting(4, 2);

        assert_eq!(room_type.room_numbers_on_floor(4), vec!["401", "402"]);
        assert_eq!(room_type.planned_rooms(), 3);
    }
}
