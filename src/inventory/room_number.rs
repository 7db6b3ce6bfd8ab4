//! Room number conventions
//!
//! Room numbers are strings whose numeric value encodes the floor as a prefix and
//! a two-digit suffix: floor 3, suffix 1 is `"301"`. All ordering in the engine is
//! numeric; numbers that fail to parse sort after every numeric one.

use std::cmp::Ordering;

/// Multiplier separating the floor prefix from the two-digit suffix
pub const FLOOR_MULTIPLIER: u64 = 100;

/// Highest suffix the two-digit convention can express
pub const MAX_ROOMS_PER_FLOOR: u32 = 99;

/// Parse the numeric value of a room number
pub fn room_number_value(room_number: &str) -> Option<u64> {
    let trimmed = room_number.trim();
    if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    trimmed.parse().ok()
}

/// Floor encoded in a room number's numeric prefix
pub fn floor_of(room_number: &str) -> Option<u32> {
    room_number_value(room_number).and_then(|value| u32::try_from(value / FLOOR_MULTIPLIER).ok())
}

/// Format a room number from its floor and suffix (`3, 1 -> "301"`)
pub fn format_room_number(floor_num: u32, suffix: u32) -> String {
    format!("{}{:02}", floor_num, suffix)
}

/// First numeric value of a floor's range (`3 -> 301`)
pub fn floor_base(floor_num: u32) -> u64 {
    u64::from(floor_num) * FLOOR_MULTIPLIER + 1
}

/// Numeric ordering; non-numeric numbers go last, compared as strings
pub fn compare_room_numbers(a: &str, b: &str) -> Ordering {
    match (room_number_value(a), room_number_value(b)) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.trim().cmp(b.trim()),
    }
}

/// Whether two room numbers denote the same room (`"0301"` and `"301"` do)
pub fn same_room_number(a: &str, b: &str) -> bool {
    compare_room_numbers(a, b) == Ordering::Equal
}

/// Key under which two spellings of the same room number collide (`"0301"` and `"301"` give `"301"`)
pub fn number_key(room_number: &str) -> String {
    room_number_value(room_number).map_or_else(|| room_number.trim().to_string(), |v| v.to_string())
}

/// Trim, drop empties, sort numerically and remove duplicates in place
pub fn normalize_room_numbers(numbers: &mut Vec<String>) {
    for number in numbers.iter_mut() {
        let trimmed = number.trim();
        if trimmed.len() != number.len() {
            *number = trimmed.to_string();
        }
    }
    numbers.retain(|n| !n.is_empty());
    numbers.sort_by(|a, b| compare_room_numbers(a, b));
    numbers.dedup_by(|a, b| same_room_number(a, b));
}
