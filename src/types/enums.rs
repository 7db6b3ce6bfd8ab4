//! Enumeration types for the room inventory
//!
//! This module contains the container lifecycle states and the output formats
//! supported by the layout tool.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle state of a container on the floor grid
///
/// Containers move `Unassigned -> Assigned -> Numbered`; only numbered
/// containers take part in the room-type consistency invariant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContainerState {
    /// No room type bound to the container
    Unassigned,
    /// Room type bound, no room number allocated yet
    Assigned,
    /// Room type and room number both present
    Numbered,
}

impl ContainerState {
    /// Derive the state from a container's room type and room number fields
    pub fn from_fields(room_info: &str, room_number: &str) -> Self {
        match (room_info.trim().is_empty(), room_number.trim().is_empty()) {
            (true, _) => ContainerState::Unassigned,
            (false, true) => ContainerState::Assigned,
            (false, false) => ContainerState::Numbered,
        }
    }
}

impl fmt::Display for ContainerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContainerState::Unassigned => write!(f, "Unassigned"),
            ContainerState::Assigned => write!(f, "Assigned"),
            ContainerState::Numbered => write!(f, "Numbered"),
        }
    }
}

/// Output formats for the layout summary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OutputFormat {
    /// Human-readable text summary
    Text,
    /// Full inventory as JSON
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown output format: {}", s)),
        }
    }
}
