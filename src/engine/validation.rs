//! Save checks and consistency reporting
//!
//! [`validate_for_save`] is the refusal check a caller runs before persisting a
//! layout. [`check_consistency`] lists every place a snapshot breaks the
//! room type/floor invariant.

use crate::inventory::room_number::{compare_room_numbers, number_key};
use crate::inventory::{normalize_room_info, Inventory};
use std::collections::{HashMap, HashSet};
use std::fmt;
use thiserror::Error;

/// Reasons a layout may not be saved
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A room type has no room numbers
    #[error("Room type {0:?} has no rooms assigned")]
    EmptyRoomType(String),

    /// A room type has an empty name
    #[error("Room type names must not be empty")]
    UnnamedRoomType,

    /// Two room types share a name after normalization
    #[error("Duplicate room type {0:?}")]
    DuplicateRoomType(String),

    /// Two floors share a number
    #[error("Duplicate floor {0}")]
    DuplicateFloor(u32),
}

/// Check whether a layout may be saved
///
/// Returns the first refusal; the caller shows it and keeps the current state.
pub fn validate_for_save(inventory: &Inventory) -> Result<(), ValidationError> {
    let mut names = HashSet::new();
    for room_type in &inventory.room_types {
        let key = normalize_room_info(&room_type.room_info);
        if key.is_empty() {
            return Err(ValidationError::UnnamedRoomType);
        }
        if !names.insert(key) {
            return Err(ValidationError::DuplicateRoomType(room_type.room_info.clone()));
        }
    }

    let mut floors = HashSet::new();
    for floor in &inventory.floors {
        if !floors.insert(floor.floor_num) {
            return Err(ValidationError::DuplicateFloor(floor.floor_num));
        }
    }

    if let Some(empty) = inventory.room_types.iter().find(|t| t.room_numbers.is_empty()) {
        return Err(ValidationError::EmptyRoomType(empty.room_info.clone()));
    }

    Ok(())
}

/// A single break in the room type/floor invariant
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsistencyViolation {
    /// `stock` differs from the room number count
    StockMismatch {
        /// Room type name
        room_info: String,
        /// Recorded stock
        stock: usize,
        /// Actual room number count
        actual: usize,
    },
    /// Room number list is not numerically ascending
    UnsortedRoomNumbers(String),
    /// Room number listed twice by one room type
    DuplicateInRoomType {
        /// Room type name
        room_info: String,
        /// Repeated number
        room_number: String,
    },
    /// Room number listed by more than one room type
    SharedBetweenRoomTypes(String),
    /// Floor containers are not ascending by room number
    UnsortedFloor(u32),
    /// Room number held by more than one container
    DuplicateOnGrid(String),
    /// Active numbered container missing from its room type's list
    MissingFromRoomType {
        /// Room type name
        room_info: String,
        /// Container's number
        room_number: String,
    },
    /// Listed room number with no active container behind it
    Untraceable {
        /// Room type name
        room_info: String,
        /// Listed number
        room_number: String,
    },
}

impl fmt::Display for ConsistencyViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConsistencyViolation::StockMismatch { room_info, stock, actual } => {
                write!(f, "{}: stock {} but {} room numbers", room_info, stock, actual)
            }
            ConsistencyViolation::UnsortedRoomNumbers(room_info) => {
                write!(f, "{}: room numbers out of order", room_info)
            }
            ConsistencyViolation::DuplicateInRoomType { room_info, room_number } => {
                write!(f, "{}: room {} listed twice", room_info, room_number)
            }
            ConsistencyViolation::SharedBetweenRoomTypes(room_number) => {
                write!(f, "room {} listed by several room types", room_number)
            }
            ConsistencyViolation::UnsortedFloor(floor_num) => {
                write!(f, "floor {}: containers out of order", floor_num)
            }
            ConsistencyViolation::DuplicateOnGrid(room_number) => {
                write!(f, "room {} appears on the grid more than once", room_number)
            }
            ConsistencyViolation::MissingFromRoomType { room_info, room_number } => {
                write!(f, "room {} is on the grid but not listed by {}", room_number, room_info)
            }
            ConsistencyViolation::Untraceable { room_info, room_number } => {
                write!(f, "{}: room {} has no active container", room_info, room_number)
            }
        }
    }
}

/// List every invariant violation in a snapshot; empty means consistent
pub fn check_consistency(inventory: &Inventory) -> Vec<ConsistencyViolation> {
    let mut violations = Vec::new();
    let catalog = inventory.catalog();

    // room type side
    let mut listed_by: HashMap<String, usize> = HashMap::new();
    for room_type in &inventory.room_types {
        if room_type.stock != room_type.room_numbers.len() {
            violations.push(ConsistencyViolation::StockMismatch {
                room_info: room_type.room_info.clone(),
                stock: room_type.stock,
                actual: room_type.room_numbers.len(),
            });
        }
        if room_type.room_numbers.windows(2).any(|w| compare_room_numbers(&w[0], &w[1]).is_gt()) {
            violations.push(ConsistencyViolation::UnsortedRoomNumbers(room_type.room_info.clone()));
        }
        let mut own = HashSet::new();
        for number in &room_type.room_numbers {
            let key = number_key(number);
            if !own.insert(key.clone()) {
                violations.push(ConsistencyViolation::DuplicateInRoomType {
                    room_info: room_type.room_info.clone(),
                    room_number: number.clone(),
                });
                continue;
            }
            let count = listed_by.entry(key).or_insert(0);
            *count += 1;
            if *count == 2 {
                violations.push(ConsistencyViolation::SharedBetweenRoomTypes(number.clone()));
            }
        }
    }

    // floor side
    let mut on_grid: HashSet<String> = HashSet::new();
    let mut active_claims: HashSet<(usize, String)> = HashSet::new();
    for floor in &inventory.floors {
        if !floor.is_sorted() {
            violations.push(ConsistencyViolation::UnsortedFloor(floor.floor_num));
        }
        for container in floor.containers.iter().filter(|c| c.has_room_number()) {
            let key = number_key(&container.room_number);
            if !on_grid.insert(key.clone()) {
                violations.push(ConsistencyViolation::DuplicateOnGrid(container.room_number.clone()));
            }
            if !container.counts_toward_inventory() {
                continue;
            }
            if let Some(idx) = catalog.position(&container.room_info) {
                active_claims.insert((idx, key));
                if !inventory.room_types[idx].contains_room_number(&container.room_number) {
                    violations.push(ConsistencyViolation::MissingFromRoomType {
                        room_info: inventory.room_types[idx].room_info.clone(),
                        room_number: container.room_number.clone(),
                    });
                }
            }
        }
    }

    // containers never resolve to an unnamed or shadowed type, so none of its numbers are traceable
    for (idx, room_type) in inventory.room_types.iter().enumerate() {
        let resolvable = catalog.position(&room_type.room_info) == Some(idx);
        for number in &room_type.room_numbers {
            if !resolvable || !active_claims.contains(&(idx, number_key(number))) {
                violations.push(ConsistencyViolation::Untraceable {
                    room_info: room_type.room_info.clone(),
                    room_number: number.clone(),
                });
            }
        }
    }

    violations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::{Container, Floor, RoomType};

    fn consistent() -> Inventory {
        Inventory::new(
            vec![
                RoomType::new("standard", 100.0).with_room_numbers(["301"]),
                RoomType::new("deluxe", 180.0).with_room_numbers(["302"]),
            ],
            vec![Floor::with_containers(
                3,
                vec![
                    Container::new(3, "standard", "301", 100.0),
                    Container::new(3, "deluxe", "302", 180.0),
                ],
            )],
        )
    }

    #[test]
    fn test_consistent_layout_passes() {
        let inventory = consistent();
        assert!(validate_for_save(&inventory).is_ok());
        assert!(check_consistency(&inventory).is_empty());
    }

    #[test]
    fn test_empty_room_type_refused() {
        let mut inventory = consistent();
        inventory.room_types.push(RoomType::new("suite", 300.0));
        assert_eq!(
            validate_for_save(&inventory),
            Err(ValidationError::EmptyRoomType("suite".to_string()))
        );
    }

    #[test]
    fn test_duplicate_names_refused() {
        let mut inventory = consistent();
        inventory.room_types.push(RoomType::new(" Standard", 90.0).with_room_numbers(["999"]));
        assert_eq!(
            validate_for_save(&inventory),
            Err(ValidationError::DuplicateRoomType(" Standard".to_string()))
        );

        let mut inventory = consistent();
        inventory.room_types.push(RoomType::new("  ", 90.0));
        assert_eq!(validate_for_save(&inventory), Err(ValidationError::UnnamedRoomType));
    }

    #[test]
    fn test_duplicate_floor_refused() {
        let mut inventory = consistent();
        inventory.floors.push(Floor::new(3));
        assert_eq!(validate_for_save(&inventory), Err(ValidationError::DuplicateFloor(3)));
    }

    #[test]
    fn test_detects_stock_and_membership_breaks() {
        let mut inventory = consistent();
        inventory.room_types[0].stock = 4;
        inventory.room_types[1].room_numbers.clear();
        inventory.room_types[1].stock = 0;

        let violations = check_consistency(&inventory);
        assert!(violations.contains(&ConsistencyViolation::StockMismatch {
            room_info: "standard".to_string(),
            stock: 4,
            actual: 1,
        }));
        assert!(violations.contains(&ConsistencyViolation::MissingFromRoomType {
            room_info: "deluxe".to_string(),
            room_number: "302".to_string(),
        }));
    }

    #[test]
    fn test_detects_shared_and_untraceable_numbers() {
        let mut inventory = consistent();
        inventory.room_types[1].room_numbers = vec!["301".to_string(), "302".to_string()];
        inventory.room_types[1].refresh_stock();

        let violations = check_consistency(&inventory);
        assert!(violations.contains(&ConsistencyViolation::SharedBetweenRoomTypes("301".to_string())));
        assert!(violations.contains(&ConsistencyViolation::Untraceable {
            room_info: "deluxe".to_string(),
            room_number: "301".to_string(),
        }));
    }

    #[test]
    fn test_detects_numbers_held_by_unnamed_type() {
        let mut inventory = consistent();
        inventory.room_types.insert(0, RoomType::new("", 0.0).with_room_numbers(["303"]));

        let violations = check_consistency(&inventory);
        assert!(violations.contains(&ConsistencyViolation::Untraceable {
            room_info: String::new(),
            room_number: "303".to_string(),
        }));
    }

    #[test]
    fn test_detects_numbers_held_by_duplicate_name() {
        let mut inventory = consistent();
        inventory
            .room_types
            .push(RoomType::new("Standard", 100.0).with_room_numbers(["301", "302"]));

        let violations = check_consistency(&inventory);
        assert!(violations.contains(&ConsistencyViolation::SharedBetweenRoomTypes("301".to_string())));
        for number in ["301", "302"] {
            assert!(violations.contains(&ConsistencyViolation::Untraceable {
                room_info: "Standard".to_string(),
                room_number: number.to_string(),
            }));
        }
    }

    #[test]
    fn test_detects_grid_breaks() {
        let mut inventory = consistent();
        inventory.floors[0].containers.reverse();
        inventory.floors[0].containers.push(Container::new(3, "standard", "301", 100.0));

        let violations = check_consistency(&inventory);
        assert!(violations.contains(&ConsistencyViolation::UnsortedFloor(3)));
        assert!(violations.contains(&ConsistencyViolation::DuplicateOnGrid("301".to_string())));
    }

    #[test]
    fn test_violation_display() {
        let violation = ConsistencyViolation::UnsortedFloor(4);
        assert_eq!(violation.to_string(), "floor 4: containers out of order");
    }
}
