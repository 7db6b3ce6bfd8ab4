//! Container/room type synchronization
//!
//! Every edit to a container's room type, number, price or activity goes through
//! here. Each operation takes the current snapshot and returns a new one in
//! which every active numbered container's room number appears exactly once, in
//! the room number list of the room type it names.
//!
//! A container id or floor number that no longer exists is not an error: the
//! input snapshot comes back unchanged.

use crate::engine::allocator::RoomNumberAllocator;
use crate::engine::error::{InventoryError, InventoryResult};
use crate::inventory::room_number::{format_room_number, number_key, room_number_value, FLOOR_MULTIPLIER};
use crate::inventory::{Container, Inventory, RoomType, RoomTypeCatalog};
use crate::types::ContainerId;
use std::collections::{HashMap, HashSet};
use tracing::{debug, info};

/// Locate `(floor index, container index)` for an edit, or `None` on a lookup miss
fn locate(inventory: &Inventory, floor_num: u32, container_id: &ContainerId) -> Option<(usize, usize)> {
    let floor_idx = inventory.floor_index(floor_num)?;
    let container_idx = inventory.floors[floor_idx]
        .containers
        .iter()
        .position(|c| &c.container_id == container_id)?;
    Some((floor_idx, container_idx))
}

fn lookup_miss(inventory: &Inventory, floor_num: u32, container_id: &ContainerId) -> Inventory {
    debug!(floor = floor_num, container = %container_id, "Container not found; edit ignored");
    inventory.clone()
}

/// Remove `room_number` from every room type except `keep`
fn release_room_number(room_types: &mut [RoomType], room_number: &str, keep: Option<usize>) {
    for (idx, room_type) in room_types.iter_mut().enumerate() {
        if Some(idx) != keep {
            room_type.remove_room_number(room_number);
        }
    }
}

/// Put `container`'s number into the list of the room type it names
fn claim_room_number(room_types: &mut [RoomType], catalog: &RoomTypeCatalog, container: &Container) {
    if !container.counts_toward_inventory() {
        return;
    }
    let owner = catalog.position(&container.room_info);
    release_room_number(room_types, &container.room_number, owner);
    if let Some(room_type) = owner.and_then(|idx| room_types.get_mut(idx)) {
        room_type.insert_room_number(&container.room_number);
    }
}

/// Write an edited container back, regenerating its id and re-sorting the floor
fn store_container(next: &mut Inventory, floor_idx: usize, container_idx: usize, mut container: Container) {
    let floor = &mut next.floors[floor_idx];
    container.regenerate_id(floor.floor_num);
    floor.containers[container_idx] = container;
    floor.sort_containers();
}

/// Bind a container to a room type, allocating a room number if it has none
///
/// The number moves out of the previous room type's list and into the new one's;
/// the container takes the new type's default price, or 0 for an unknown type.
/// An empty `new_room_info` unassigns the container and releases its number
/// from every room type.
pub fn set_container_room_type(
    inventory: &Inventory,
    allocator: &RoomNumberAllocator,
    floor_num: u32,
    container_id: &ContainerId,
    new_room_info: &str,
) -> InventoryResult<Inventory> {
    if locate(inventory, floor_num, container_id).is_none() {
        return Ok(lookup_miss(inventory, floor_num, container_id));
    }

    // normalized() may reorder floors and containers; resolve again
    let mut next = inventory.normalized();
    let Some((floor_idx, container_idx)) = locate(&next, floor_num, container_id) else {
        return Ok(lookup_miss(inventory, floor_num, container_id));
    };

    let catalog = next.catalog();
    let mut container = next.floors[floor_idx].containers[container_idx].clone();
    let previous_room_info = container.room_info.clone();
    let target = new_room_info.trim();

    if !target.is_empty() && !container.has_room_number() {
        let used = next.used_room_numbers();
        let highest = next.floors[floor_idx].highest_active_room_number();
        container.room_number = allocator.next_room_number(floor_num, &used, highest)?;
    }

    if container.has_room_number() {
        release_room_number(&mut next.room_types, &container.room_number, None);
    }

    match catalog.get(&next.room_types, target) {
        Some(room_type) => {
            container.room_info = room_type.room_info.clone();
            container.price = room_type.price;
        }
        None => {
            if !target.is_empty() {
                debug!(room_type = target, "Unknown room type; price defaults to 0");
            }
            container.room_info = target.to_string();
            container.price = 0.0;
        }
    }

    claim_room_number(&mut next.room_types, &catalog, &container);

    info!(
        floor = floor_num,
        room_number = %container.room_number,
        from = %previous_room_info,
        to = %container.room_info,
        "Container room type changed"
    );

    store_container(&mut next, floor_idx, container_idx, container);
    Ok(next)
}

/// Renumber a container
///
/// The new number must parse, lie in the floor's range and not be used by any
/// other container or room type. An empty number clears the container's number.
pub fn set_container_room_number(
    inventory: &Inventory,
    allocator: &RoomNumberAllocator,
    floor_num: u32,
    container_id: &ContainerId,
    new_room_number: &str,
) -> InventoryResult<Inventory> {
    if locate(inventory, floor_num, container_id).is_none() {
        return Ok(lookup_miss(inventory, floor_num, container_id));
    }

    let mut next = inventory.normalized();
    let Some((floor_idx, container_idx)) = locate(&next, floor_num, container_id) else {
        return Ok(lookup_miss(inventory, floor_num, container_id));
    };
    let catalog = next.catalog();
    let mut container = next.floors[floor_idx].containers[container_idx].clone();
    let requested = new_room_number.trim();

    let canonical = if requested.is_empty() {
        String::new()
    } else {
        let value = room_number_value(requested)
            .filter(|value| allocator.in_floor_range(floor_num, *value))
            .ok_or_else(|| InventoryError::InvalidRoomNumber(requested.to_string()))?;

        if container.room_number_value() == Some(value) {
            return Ok(inventory.clone());
        }
        if next.used_room_numbers().contains(&value) {
            return Err(InventoryError::RoomNumberInUse(requested.to_string()));
        }
        let prefix = u64::from(floor_num) * FLOOR_MULTIPLIER;
        format_room_number(floor_num, (value - prefix) as u32)
    };

    if container.has_room_number() {
        release_room_number(&mut next.room_types, &container.room_number, None);
    }

    info!(
        floor = floor_num,
        from = %container.room_number,
        to = %canonical,
        "Container renumbered"
    );

    container.room_number = canonical;
    claim_room_number(&mut next.room_types, &catalog, &container);
    store_container(&mut next, floor_idx, container_idx, container);
    Ok(next)
}

/// Override a container's effective price
pub fn set_container_price(
    inventory: &Inventory,
    floor_num: u32,
    container_id: &ContainerId,
    price: f64,
) -> InventoryResult<Inventory> {
    if !price.is_finite() || price < 0.0 {
        return Err(InventoryError::InvalidPrice(price));
    }
    let Some((floor_idx, container_idx)) = locate(inventory, floor_num, container_id) else {
        return Ok(lookup_miss(inventory, floor_num, container_id));
    };

    let mut next = inventory.clone();
    let container = &mut next.floors[floor_idx].containers[container_idx];
    debug!(floor = floor_num, room_number = %container.room_number, price, "Container price set");
    container.price = price;
    Ok(next)
}

/// Activate or deactivate a container
///
/// Deactivation releases the number from its room type; activation claims it
/// again, allocating a number first when an assigned container has none.
pub fn set_container_active(
    inventory: &Inventory,
    allocator: &RoomNumberAllocator,
    floor_num: u32,
    container_id: &ContainerId,
    active: bool,
) -> InventoryResult<Inventory> {
    let Some((floor_idx, container_idx)) = locate(inventory, floor_num, container_id) else {
        return Ok(lookup_miss(inventory, floor_num, container_id));
    };
    if inventory.floors[floor_idx].containers[container_idx].is_active == active {
        return Ok(inventory.clone());
    }

    let mut next = inventory.normalized();
    let Some((floor_idx, container_idx)) = locate(&next, floor_num, container_id) else {
        return Ok(lookup_miss(inventory, floor_num, container_id));
    };
    let catalog = next.catalog();
    let mut container = next.floors[floor_idx].containers[container_idx].clone();
    let mut renumbered = false;

    if active {
        if !container.room_info.trim().is_empty() && !container.has_room_number() {
            let used = next.used_room_numbers();
            let highest = next.floors[floor_idx].highest_active_room_number();
            container.room_number = allocator.next_room_number(floor_num, &used, highest)?;
            renumbered = true;
        }
        container.is_active = true;
        claim_room_number(&mut next.room_types, &catalog, &container);
    } else {
        container.is_active = false;
        if container.has_room_number() {
            release_room_number(&mut next.room_types, &container.room_number, None);
        }
    }

    info!(floor = floor_num, room_number = %container.room_number, active, "Container activity changed");

    if renumbered {
        store_container(&mut next, floor_idx, container_idx, container);
    } else {
        let floor = &mut next.floors[floor_idx];
        floor.containers[container_idx] = container;
        floor.sort_containers();
    }
    Ok(next)
}

/// Recompute every room type's room numbers from the containers pointing at it
///
/// Each type keeps the union of its previous list and the numbers of the active
/// containers naming it, sorted and deduplicated. A previous entry claimed by a
/// container of another type is dropped, as is an unclaimed entry already kept
/// by an earlier type, so no number ends up in two lists. Applying the rebuild
/// twice to the same containers gives the same result.
pub fn rebuild_room_types_from_containers<'a, I>(room_types: &[RoomType], containers: I) -> Vec<RoomType>
where
    I: IntoIterator<Item = &'a Container>,
{
    let catalog = RoomTypeCatalog::build(room_types);
    let mut claimed: Vec<Vec<String>> = vec![Vec::new(); room_types.len()];
    let mut owner: HashMap<String, usize> = HashMap::new();

    for container in containers.into_iter().filter(|c| c.counts_toward_inventory()) {
        let Some(idx) = catalog.position(&container.room_info) else {
            continue;
        };
        let key = number_key(&container.room_number);
        if owner.contains_key(&key) {
            continue;
        }
        owner.insert(key, idx);
        claimed[idx].push(container.room_number.trim().to_string());
    }

    let mut kept: HashSet<String> = HashSet::new();
    room_types
        .iter()
        .enumerate()
        .map(|(idx, room_type)| {
            let mut next = room_type.clone();
            let mut numbers: Vec<String> = room_type
                .room_numbers
                .iter()
                .filter(|n| !n.trim().is_empty())
                .filter(|n| {
                    let key = number_key(n);
                    match owner.get(&key) {
                        Some(&owner_idx) => owner_idx == idx,
                        None => kept.insert(key),
                    }
                })
                .cloned()
                .collect();
            numbers.extend(claimed[idx].iter().cloned());
            next.room_numbers = numbers;
            next.normalize();
            next
        })
        .collect()
}

/// Rebuild the room type side of a snapshot from its floors
pub fn resynchronize(inventory: &Inventory) -> Inventory {
    let mut next = inventory.normalized();
    let containers = next.floors.iter().flat_map(|f| f.containers.iter());
    next.room_types = rebuild_room_types_from_containers(&next.room_types, containers);
    next
}
