//! Room number allocation
//!
//! The allocator produces the next unused room number for a floor. Candidates
//! start at the floor base (`floor * 100 + 1`) or one past the floor's highest
//! active number, then probe upward past every number already in use anywhere
//! in the building. Past the floor's last suffix the probe wraps to the floor
//! base and covers the numbers below the start; it never spills into the next
//! floor's range. A floor is exhausted only when every number in its range is used.

use crate::engine::error::{InventoryError, InventoryResult};
use crate::inventory::room_number::{
    floor_base, format_room_number, room_number_value, FLOOR_MULTIPLIER, MAX_ROOMS_PER_FLOOR,
};
use std::collections::BTreeSet;
use tracing::{debug, warn};

/// Deterministic, collision-free room number generator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoomNumberAllocator {
    max_rooms_per_floor: u32,
}

impl Default for RoomNumberAllocator {
    fn default() -> Self {
        Self { max_rooms_per_floor: MAX_ROOMS_PER_FLOOR }
    }
}

impl RoomNumberAllocator {
    /// Create an allocator using the full two-digit suffix range
    pub fn new() -> Self {
        Self::default()
    }

    /// Limit the suffix range; values are clamped to `1..=99`
    pub fn with_max_rooms_per_floor(max_rooms_per_floor: u32) -> Self {
        Self { max_rooms_per_floor: max_rooms_per_floor.clamp(1, MAX_ROOMS_PER_FLOOR) }
    }

    /// Highest suffix this allocator hands out
    pub fn max_rooms_per_floor(&self) -> u32 {
        self.max_rooms_per_floor
    }

    /// Next free room number on `floor_num`
    ///
    /// # Arguments
    /// * `floor_num` - Floor to allocate on
    /// * `used` - Numeric values of every room number in use across all floors
    /// * `floor_highest` - Highest active room number currently on the floor
    pub fn next_room_number(
        &self,
        floor_num: u32,
        used: &BTreeSet<u64>,
        floor_highest: Option<u64>,
    ) -> InventoryResult<String> {
        let start = floor_highest.map_or(floor_base(floor_num), |highest| highest + 1);
        self.probe_from(floor_num, start, used)
    }

    /// Next free room number on `floor_num`, probing from an explicit seed number
    ///
    /// A seed that does not parse or lies outside the floor's range is replaced by the floor base.
    pub fn next_from_seed(
        &self,
        floor_num: u32,
        seed: &str,
        used: &BTreeSet<u64>,
    ) -> InventoryResult<String> {
        let start = room_number_value(seed)
            .filter(|value| self.in_floor_range(floor_num, *value))
            .unwrap_or_else(|| floor_base(floor_num));
        self.probe_from(floor_num, start, used)
    }

    /// Allocate `count` distinct numbers, recording each in `used`
    pub fn allocate_many(
        &self,
        floor_num: u32,
        count: usize,
        used: &mut BTreeSet<u64>,
        floor_highest: Option<u64>,
    ) -> InventoryResult<Vec<String>> {
        let mut allocated = Vec::with_capacity(count);
        let mut highest = floor_highest;

        for _ in 0..count {
            let number = self.next_room_number(floor_num, used, highest)?;
            if let Some(value) = room_number_value(&number) {
                used.insert(value);
                highest = Some(value);
            }
            allocated.push(number);
        }

        Ok(allocated)
    }

    /// Whether `value` is a valid room number on `floor_num` under this allocator's limit
    pub fn in_floor_range(&self, floor_num: u32, value: u64) -> bool {
        (floor_base(floor_num)..=self.floor_limit(floor_num)).contains(&value)
    }

    fn floor_limit(&self, floor_num: u32) -> u64 {
        u64::from(floor_num) * FLOOR_MULTIPLIER + u64::from(self.max_rooms_per_floor)
    }

    fn probe_from(&self, floor_num: u32, start: u64, used: &BTreeSet<u64>) -> InventoryResult<String> {
        let prefix = u64::from(floor_num) * FLOOR_MULTIPLIER;
        let base = floor_base(floor_num);
        let limit = self.floor_limit(floor_num);
        let start = start.max(base);

        let candidate = (start..=limit)
            .chain(base..start.min(limit + 1))
            .find(|candidate| !used.contains(candidate));

        match candidate {
            Some(candidate) => {
                // candidate - prefix is at most 99 here
                let number = format_room_number(floor_num, (candidate - prefix) as u32);
                debug!(floor = floor_num, room_number = %number, "Allocated room number");
                Ok(number)
            }
            None => {
                warn!(floor = floor_num, limit = self.max_rooms_per_floor, "Room numbering exhausted");
                Err(InventoryError::NumberingExhausted {
                    floor_num,
                    max_rooms_per_floor: self.max_rooms_per_floor,
                })
            }
        }
    }
}
