//! Structural mutations
//!
//! Adding and removing rooms and floors, and bulk layout generation. Like the
//! synchronizer, every function here returns a new snapshot and leaves its
//! input untouched.

use crate::engine::allocator::RoomNumberAllocator;
use crate::engine::error::InventoryResult;
use crate::engine::synchronizer::rebuild_room_types_from_containers;
use crate::engine::undo::FloorSnapshot;
use crate::inventory::room_number::{floor_base, floor_of, room_number_value, FLOOR_MULTIPLIER};
use crate::inventory::{Container, Floor, Inventory, RoomType, RoomTypeCatalog};
use crate::types::ContainerId;
use std::collections::{BTreeSet, HashSet};
use tracing::{debug, info};

/// Result of a floor removal
#[derive(Debug, Clone, PartialEq)]
pub struct FloorRemoval {
    /// Snapshot without the floor
    pub inventory: Inventory,
    /// The removed floor, for the caller's undo buffer; `None` when the floor did not exist
    pub snapshot: Option<FloorSnapshot>,
}

/// Sum of `stock` across room types
pub fn total_rooms(room_types: &[RoomType]) -> usize {
    room_types.iter().map(|t| t.stock).sum()
}

/// Add an empty floor; an existing floor number is left as is
pub fn add_floor(inventory: &Inventory, floor_num: u32) -> Inventory {
    if inventory.get_floor(floor_num).is_some() {
        debug!(floor = floor_num, "Floor already exists");
        return inventory.clone();
    }
    let mut next = inventory.clone();
    next.floors.push(Floor::new(floor_num));
    next.sort_floors();
    info!(floor = floor_num, "Floor added");
    next
}

/// Add one room to a floor, bound to the first named room type
///
/// The number comes from the allocator, scoped to the floor and checked against
/// every number in use. A missing floor is a no-op.
pub fn add_room_to_floor(
    inventory: &Inventory,
    allocator: &RoomNumberAllocator,
    floor_num: u32,
) -> InventoryResult<Inventory> {
    if inventory.get_floor(floor_num).is_none() {
        debug!(floor = floor_num, "Floor not found; room not added");
        return Ok(inventory.clone());
    }

    let mut next = inventory.normalized();
    let used = next.used_room_numbers();
    let Some(floor_idx) = next.floor_index(floor_num) else {
        return Ok(inventory.clone());
    };
    let highest = next.floors[floor_idx].highest_active_room_number();
    let room_number = allocator.next_room_number(floor_num, &used, highest)?;

    if next.floors[floor_idx].contains_room_number(&room_number) {
        debug!(floor = floor_num, room_number = %room_number, "Room number already on floor");
        return Ok(inventory.clone());
    }

    // the first non-empty name is the catalog's pick for that name
    let container = match next.room_types.iter_mut().find(|t| !t.key().is_empty()) {
        Some(room_type) => {
            room_type.insert_room_number(&room_number);
            Container::new(floor_num, room_type.room_info.clone(), room_number.clone(), room_type.price)
        }
        None => Container::new(floor_num, "", room_number.clone(), 0.0),
    };

    info!(floor = floor_num, room_number = %room_number, room_type = %container.room_info, "Room added");

    let floor = &mut next.floors[floor_idx];
    floor.containers.push(container);
    floor.sort_containers();
    Ok(next)
}

/// Delete a container and release its room number from its room type
///
/// An unknown floor or container id returns the input unchanged.
pub fn remove_container(inventory: &Inventory, floor_num: u32, container_id: &ContainerId) -> Inventory {
    let found = inventory
        .get_floor(floor_num)
        .and_then(|f| f.get_container(container_id))
        .is_some();
    if !found {
        debug!(floor = floor_num, container = %container_id, "Container not found; nothing removed");
        return inventory.clone();
    }

    let mut next = inventory.normalized();
    let catalog = next.catalog();
    let Some(removed) = next
        .get_floor_mut(floor_num)
        .and_then(|f| f.remove_container(container_id))
    else {
        return inventory.clone();
    };

    if removed.has_room_number() {
        if let Some(room_type) = catalog.get_mut(&mut next.room_types, &removed.room_info) {
            room_type.remove_room_number(&removed.room_number);
        }
    }
    if let Some(floor) = next.get_floor_mut(floor_num) {
        floor.sort_containers();
    }

    info!(floor = floor_num, room_number = %removed.room_number, "Container removed");
    next
}

/// Remove a floor and strip its room numbers from every room type
///
/// The removed floor is returned for the caller's undo buffer.
pub fn remove_floor(inventory: &Inventory, floor_num: u32) -> FloorRemoval {
    let Some(floor_idx) = inventory.floor_index(floor_num) else {
        debug!(floor = floor_num, "Floor not found; nothing removed");
        return FloorRemoval { inventory: inventory.clone(), snapshot: None };
    };

    let mut next = inventory.clone();
    let removed = next.floors.remove(floor_idx);
    let mut stripped = 0;
    for room_type in &mut next.room_types {
        stripped += room_type.remove_floor(floor_num);
        // Legacy layouts may hold numbers that do not carry the floor prefix
        for container in removed.containers.iter().filter(|c| c.has_room_number()) {
            if room_type.matches(&container.room_info) && room_type.remove_room_number(&container.room_number) {
                stripped += 1;
            }
        }
    }

    info!(floor = floor_num, containers = removed.containers.len(), stripped, "Floor removed");
    FloorRemoval { inventory: next, snapshot: Some(FloorSnapshot::capture(removed)) }
}

/// Build the floor grid from the room types' room number lists
///
/// For each floor, one container is created per room number whose prefix is
/// that floor, in room type order; a number listed by two types goes to the
/// first. Room type lists are then rebuilt from scratch so they hold exactly
/// what was generated.
pub fn generate_initial_layout(floor_numbers: &[u32], room_types: &[RoomType]) -> Inventory {
    let floor_set: BTreeSet<u32> = floor_numbers.iter().copied().collect();
    let mut seen: HashSet<u64> = HashSet::new();
    let mut floors: Vec<Floor> = Vec::with_capacity(floor_set.len());

    for &floor_num in &floor_set {
        let mut containers = Vec::new();
        for room_type in room_types {
            for number in &room_type.room_numbers {
                if floor_of(number) != Some(floor_num) {
                    continue;
                }
                let Some(value) = room_number_value(number) else {
                    continue;
                };
                if !seen.insert(value) {
                    continue;
                }
                containers.push(Container::new(
                    floor_num,
                    room_type.room_info.clone(),
                    number.trim(),
                    room_type.price,
                ));
            }
        }
        floors.push(Floor::with_containers(floor_num, containers));
    }

    let cleared: Vec<RoomType> = room_types
        .iter()
        .map(|t| {
            let mut t = t.clone();
            t.room_numbers.clear();
            t.refresh_stock();
            t
        })
        .collect();
    let rebuilt =
        rebuild_room_types_from_containers(&cleared, floors.iter().flat_map(|f| f.containers.iter()));

    let inventory = Inventory::new(rebuilt, floors);
    info!(
        floors = inventory.floors.len(),
        total_rooms = inventory.total_rooms(),
        "Initial layout generated"
    );
    inventory
}

/// Regenerate the floor grid from the room type side for the current floors
///
/// Existing containers, including inactive ones and price overrides, are replaced.
pub fn rebuild_floors_from_room_types(inventory: &Inventory) -> Inventory {
    let normalized = inventory.normalized();
    generate_initial_layout(&normalized.floor_numbers(), &normalized.room_types)
}

/// Fill empty room number lists from `floor_settings`
///
/// For each room type with no room numbers, each planned floor gets `count`
/// numbers: probing from the type's start room number for that floor when one
/// is set, otherwise from one past the highest number already planned there.
pub fn plan_room_numbers(
    room_types: &[RoomType],
    allocator: &RoomNumberAllocator,
) -> InventoryResult<Vec<RoomType>> {
    let mut used: BTreeSet<u64> = room_types
        .iter()
        .flat_map(|t| t.room_numbers.iter())
        .filter_map(|n| room_number_value(n))
        .collect();
    let mut planned = room_types.to_vec();
    let catalog = RoomTypeCatalog::build(room_types);

    for (idx, room_type) in planned.iter_mut().enumerate() {
        if !room_type.room_numbers.is_empty() || catalog.position(&room_type.room_info) != Some(idx) {
            continue;
        }
        let mut numbers = Vec::new();
        for (&floor_num, &count) in &room_type.floor_settings {
            if count == 0 {
                continue;
            }
            let highest = match room_type.start_room_numbers.get(&floor_num) {
                Some(seed) => {
                    let first = allocator.next_from_seed(floor_num, seed, &used)?;
                    let value = room_number_value(&first);
                    if let Some(value) = value {
                        used.insert(value);
                    }
                    numbers.push(first);
                    value
                }
                None => highest_used_on_floor(&used, floor_num),
            };
            let remaining = if room_type.start_room_numbers.contains_key(&floor_num) {
                count as usize - 1
            } else {
                count as usize
            };
            numbers.extend(allocator.allocate_many(floor_num, remaining, &mut used, highest)?);
        }
        debug!(room_type = %room_type.room_info, rooms = numbers.len(), "Planned room numbers");
        room_type.room_numbers = numbers;
        room_type.normalize();
    }

    Ok(planned)
}

fn highest_used_on_floor(used: &BTreeSet<u64>, floor_num: u32) -> Option<u64> {
    let low = floor_base(floor_num);
    let high = u64::from(floor_num) * FLOOR_MULTIPLIER + (FLOOR_MULTIPLIER - 1);
    used.range(low..=high).next_back().copied()
}
