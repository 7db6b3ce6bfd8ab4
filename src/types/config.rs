//! Configuration for the room layout tool
//!
//! This module contains the layout configuration, its validation rules and the
//! command line interface that feeds it.

use super::OutputFormat;
use crate::engine::RoomNumberAllocator;
use crate::inventory::room_number::MAX_ROOMS_PER_FLOOR;
use crate::inventory::{normalize_room_info, RoomType};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::Path;

/// Command line arguments structure
#[derive(Debug, Clone, Default, Parser)]
#[command(
    name = "room-inventory",
    version,
    about = "Room Inventory - builds and checks hotel floor layouts",
    long_about = "Generates a floor/room layout from a room type template, or loads a saved layout, keeps room type stock and the floor grid consistent, and reports the result.

EXAMPLES:
    # Generate the default three-floor layout
    room-inventory

    # Use a configuration file
    room-inventory --config hotel.json

    # Override floors and write the layout
    room-inventory --floors 2,3,5 --output layout.json

    # Check a saved layout without writing anything
    room-inventory --layout layout.json --dry-run

    # Generate configuration template
    room-inventory --print-config > hotel.json

CONFIGURATION:
    Configuration can be provided via:
    1. Command line arguments (highest priority)
    2. Configuration file (--config flag)
    3. Default values (lowest priority)

    Supported configuration file formats: JSON (.json)"
)]
pub struct CliArgs {
    /// Configuration file path (JSON format)
    #[arg(
        short,
        long,
        help = "Configuration file path (JSON format)",
        long_help = "Path to a JSON configuration file. CLI arguments override file settings."
    )]
    pub config: Option<String>,

    /// Saved inventory to load instead of generating one
    #[arg(
        short,
        long,
        help = "Load a saved inventory JSON file",
        long_help = "Load a saved inventory, normalize it and resynchronize room type stock from the floor grid. Floors and room types from the configuration are ignored."
    )]
    pub layout: Option<String>,

    /// Floor numbers to generate
    #[arg(long, value_delimiter = ',', help = "Comma-separated floor numbers, e.g. 2,3,4")]
    pub floors: Option<Vec<u32>>,

    /// Hotel name shown in the summary
    #[arg(long, help = "Hotel name")]
    pub hotel_name: Option<String>,

    /// Room number limit per floor
    #[arg(
        long,
        help = "Maximum rooms per floor (1-99)",
        long_help = "Highest two-digit suffix handed out on a floor. Allocation past it is refused. Range: 1-99. Default: 99"
    )]
    pub max_rooms_per_floor: Option<u32>,

    /// Summary format
    #[arg(long, help = "Summary format (text or json)")]
    pub output_format: Option<String>,

    /// Where to write the resulting inventory
    #[arg(short, long, help = "Write the inventory JSON to this path")]
    pub output: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, help = "Enable verbose logging")]
    pub verbose: bool,

    /// Enable debug logging
    #[arg(short, long, help = "Enable debug logging")]
    pub debug: bool,

    /// Validate without writing output
    #[arg(long, help = "Validate configuration and layout without writing output")]
    pub dry_run: bool,

    /// Print default configuration and exit
    #[arg(long, help = "Print default configuration in JSON format and exit")]
    pub print_config: bool,
}

/// Configuration file structure (allows partial configuration)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ConfigFile {
    /// Hotel name
    pub hotel_name: Option<String>,
    /// Floor numbers to generate
    pub floors: Option<Vec<u32>>,
    /// Room type template
    pub room_types: Option<Vec<RoomType>>,
    /// Room number limit per floor
    pub max_rooms_per_floor: Option<u32>,
    /// Summary format
    pub output_format: Option<String>,
}

/// Layout configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryConfig {
    /// Hotel name
    pub hotel_name: String,
    /// Floor numbers to generate
    pub floors: Vec<u32>,
    /// Room type template; `floorSettings` and `startRoomNumbers` drive planning
    pub room_types: Vec<RoomType>,
    /// Highest suffix handed out per floor
    pub max_rooms_per_floor: u32,
    /// Summary format
    pub output_format: String,
}

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Configuration file not found
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    /// Configuration file read error
    #[error("Failed to read configuration file: {0}")]
    ReadError(#[from] std::io::Error),

    /// JSON parsing error
    #[error("Failed to parse JSON configuration: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Unsupported configuration file format
    #[error("Unsupported configuration file format: {0} (supported: .json)")]
    UnsupportedFormat(String),
}

/// Validation errors for the layout configuration
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum ConfigValidationError {
    /// No floors configured
    #[error("At least one floor is required")]
    NoFloors,

    /// Floor 0 cannot carry floor-prefixed room numbers
    #[error("Invalid floor number {0}: floors start at 1")]
    InvalidFloor(u32),

    /// Floor listed twice
    #[error("Duplicate floor {0}")]
    DuplicateFloor(u32),

    /// Room limit outside the two-digit suffix range
    #[error("Max rooms per floor must be between 1 and 99, got {0}")]
    InvalidMaxRoomsPerFloor(u32),

    /// Room type without a name
    #[error("Room type names must not be empty")]
    EmptyRoomTypeName,

    /// Two room types share a normalized name
    #[error("Duplicate room type {0:?}")]
    DuplicateRoomType(String),

    /// Negative or non-finite price
    #[error("Invalid price for {room_info:?}: {price}")]
    InvalidPrice {
        /// Room type name
        room_info: String,
        /// The invalid price
        price: f64,
    },

    /// Planned rooms on a floor exceed the per-floor limit
    #[error("Floor {floor_num} plans {planned} rooms but allows at most {max}")]
    FloorOverCapacity {
        /// Floor number
        floor_num: u32,
        /// Sum of floor settings across room types
        planned: u32,
        /// Configured limit
        max: u32,
    },

    /// Summary format not recognised
    #[error("{0}")]
    UnknownOutputFormat(String),
}

/// The standard/deluxe/suite template used when no room types are configured
pub fn default_room_types() -> Vec<RoomType> {
    vec![
        RoomType::new("standard", 120.0)
            .with_floor_setting(2, 4)
            .with_floor_setting(3, 3),
        RoomType::new("deluxe", 180.0)
            .with_floor_setting(3, 2)
            .with_floor_setting(4, 3),
        RoomType::new("suite", 320.0)
            .with_floor_setting(4, 2)
            .with_start_room_number(4, "410"),
    ]
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self {
            hotel_name: "Hotel".to_string(),
            floors: vec![2, 3, 4],
            room_types: default_room_types(),
            max_rooms_per_floor: MAX_ROOMS_PER_FLOOR,
            output_format: "text".to_string(),
        }
    }
}

impl InventoryConfig {
    /// Create configuration from the process arguments
    pub fn from_args() -> Result<Self, ConfigError> {
        Self::from_cli_args(CliArgs::parse())
    }

    /// Create configuration from parsed CLI arguments
    pub fn from_cli_args(args: CliArgs) -> Result<Self, ConfigError> {
        let mut config = match &args.config {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_cli_overrides(args);
        Ok(config)
    }

    /// Load configuration from a JSON file, merged over defaults
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.display().to_string()));
        }

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => {
                let content = fs::read_to_string(path)?;
                let config_file: ConfigFile = serde_json::from_str(&content)?;
                Ok(Self::from_config_file(config_file))
            }
            Some(ext) => Err(ConfigError::UnsupportedFormat(ext.to_string())),
            None => Err(ConfigError::UnsupportedFormat("no extension".to_string())),
        }
    }

    fn from_config_file(config_file: ConfigFile) -> Self {
        let defaults = Self::default();

        Self {
            hotel_name: config_file.hotel_name.unwrap_or(defaults.hotel_name),
            floors: config_file.floors.unwrap_or(defaults.floors),
            room_types: config_file.room_types.unwrap_or(defaults.room_types),
            max_rooms_per_floor: config_file
                .max_rooms_per_floor
                .unwrap_or(defaults.max_rooms_per_floor),
            output_format: config_file.output_format.unwrap_or(defaults.output_format),
        }
    }

    fn apply_cli_overrides(&mut self, args: CliArgs) {
        if let Some(value) = args.hotel_name {
            self.hotel_name = value;
        }
        if let Some(value) = args.floors {
            self.floors = value;
        }
        if let Some(value) = args.max_rooms_per_floor {
            self.max_rooms_per_floor = value;
        }
        if let Some(value) = args.output_format {
            self.output_format = value;
        }
    }

    /// Save configuration to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        fs::write(path, self.print_json()?)?;
        Ok(())
    }

    /// Configuration as pretty-printed JSON
    pub fn print_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Validate the configuration parameters
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.floors.is_empty() {
            return Err(ConfigValidationError::NoFloors);
        }
        let mut floors = HashSet::new();
        for &floor_num in &self.floors {
            if floor_num == 0 {
                return Err(ConfigValidationError::InvalidFloor(floor_num));
            }
            if !floors.insert(floor_num) {
                return Err(ConfigValidationError::DuplicateFloor(floor_num));
            }
        }

        if !(1..=MAX_ROOMS_PER_FLOOR).contains(&self.max_rooms_per_floor) {
            return Err(ConfigValidationError::InvalidMaxRoomsPerFloor(self.max_rooms_per_floor));
        }

        let mut names = HashSet::new();
        for room_type in &self.room_types {
            let key = normalize_room_info(&room_type.room_info);
            if key.is_empty() {
                return Err(ConfigValidationError::EmptyRoomTypeName);
            }
            if !names.insert(key) {
                return Err(ConfigValidationError::DuplicateRoomType(room_type.room_info.clone()));
            }
            if !room_type.price.is_finite() || room_type.price < 0.0 {
                return Err(ConfigValidationError::InvalidPrice {
                    room_info: room_type.room_info.clone(),
                    price: room_type.price,
                });
            }
        }

        let mut planned: BTreeMap<u32, u32> = BTreeMap::new();
        for room_type in &self.room_types {
            for (&floor_num, &count) in &room_type.floor_settings {
                *planned.entry(floor_num).or_insert(0) += count;
            }
        }
        for (&floor_num, &count) in &planned {
            if count > self.max_rooms_per_floor {
                return Err(ConfigValidationError::FloorOverCapacity {
                    floor_num,
                    planned: count,
                    max: self.max_rooms_per_floor,
                });
            }
        }

        self.output_format()?;
        Ok(())
    }

    /// Parsed summary format
    pub fn output_format(&self) -> Result<OutputFormat, ConfigValidationError> {
        self.output_format.parse().map_err(ConfigValidationError::UnknownOutputFormat)
    }

    /// Allocator honouring `max_rooms_per_floor`
    pub fn allocator(&self) -> RoomNumberAllocator {
        RoomNumberAllocator::with_max_rooms_per_floor(self.max_rooms_per_floor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inventory_config_default() {
        let config = InventoryConfig::default();

        assert_eq!(config.floors, vec![2, 3, 4]);
        assert_eq!(config.max_rooms_per_floor, 99);
        assert_eq!(config.output_format, "text");
        let names: Vec<&str> = config.room_types.iter().map(|t| t.room_info.as_str()).collect();
        assert_eq!(names, vec!["standard", "deluxe", "suite"]);
        config.validate().unwrap();
    }

    #[test]
    fn test_floor_list_cli_parsing() {
        let args = CliArgs::try_parse_from(["room-inventory", "--floors", "5,6,7", "--max-rooms-per-floor", "12"])
            .unwrap();
        assert_eq!(args.floors, Some(vec![5, 6, 7]));

        let config = InventoryConfig::from_cli_args(args).unwrap();
        assert_eq!(config.floors, vec![5, 6, 7]);
        assert_eq!(config.max_rooms_per_floor, 12);
        assert_eq!(config.allocator().max_rooms_per_floor(), 12);
    }

    #[test]
    fn test_config_file_loading() {
        use std::io::Write;
        use tempfile::Builder;

        let mut temp_file = Builder::new().suffix(".json").tempfile().unwrap();
        let config_json = r#"{
            "hotelName": "Harbour View",
            "floors": [1, 2],
            "roomTypes": [
                { "roomInfo": "twin", "price": 95.0, "floorSettings": { "1": 2 } }
            ]
        }"#;
        temp_file.write_all(config_json.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let config = InventoryConfig::from_file(temp_file.path()).unwrap();

        assert_eq!(config.hotel_name, "Harbour View");
        assert_eq!(config.floors, vec![1, 2]);
        assert_eq!(config.room_types.len(), 1);
        assert_eq!(config.room_types[0].floor_settings.get(&1), Some(&2));
        // not in the file, so the default stays
        assert_eq!(config.max_rooms_per_floor, 99);
    }

    #[test]
    fn test_cli_overrides_file() {
        use std::io::Write;
        use tempfile::Builder;

        let mut temp_file = Builder::new().suffix(".json").tempfile().unwrap();
        temp_file.write_all(br#"{ "floors": [8], "outputFormat": "json" }"#).unwrap();
        temp_file.flush().unwrap();

        let args = CliArgs {
            config: Some(temp_file.path().display().to_string()),
            floors: Some(vec![9, 10]),
            ..Default::default()
        };
        let config = InventoryConfig::from_cli_args(args).unwrap();

        assert_eq!(config.floors, vec![9, 10]);
        assert_eq!(config.output_format, "json");
        assert_eq!(config.output_format(), Ok(OutputFormat::Json));
    }

    #[test]
    fn test_config_file_errors() {
        assert!(matches!(
            InventoryConfig::from_file("/definitely/not/here.json"),
            Err(ConfigError::FileNotFound(_))
        ));

        let temp_file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        assert!(matches!(
            InventoryConfig::from_file(temp_file.path()),
            Err(ConfigError::UnsupportedFormat(ext)) if ext == "toml"
        ));
    }

    #[test]
    fn test_validation_floors() {
        let mut config = InventoryConfig { floors: vec![], ..Default::default() };
        assert_eq!(config.validate(), Err(ConfigValidationError::NoFloors));

        config.floors = vec![0, 1];
        assert_eq!(config.validate(), Err(ConfigValidationError::InvalidFloor(0)));

        config.floors = vec![2, 3, 2];
        assert_eq!(config.validate(), Err(ConfigValidationError::DuplicateFloor(2)));
    }

    #[test]
    fn test_validation_max_rooms() {
        let config = InventoryConfig { max_rooms_per_floor: 100, ..Default::default() };
        assert_eq!(config.validate(), Err(ConfigValidationError::InvalidMaxRoomsPerFloor(100)));

        let config = InventoryConfig { max_rooms_per_floor: 3, ..Default::default() };
        assert_eq!(
            config.validate(),
            Err(ConfigValidationError::FloorOverCapacity { floor_num: 2, planned: 4, max: 3 })
        );
    }

    #[test]
    fn test_validation_room_types() {
        let mut config = InventoryConfig::default();
        config.room_types.push(RoomType::new("Suite ", 400.0));
        assert_eq!(
            config.validate(),
            Err(ConfigValidationError::DuplicateRoomType("Suite ".to_string()))
        );

        let config = InventoryConfig {
            room_types: vec![RoomType::new("standard", -5.0)],
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigValidationError::InvalidPrice { room_info: "standard".to_string(), price: -5.0 })
        );

        let config = InventoryConfig { room_types: vec![RoomType::new("", 10.0)], ..Default::default() };
        assert_eq!(config.validate(), Err(ConfigValidationError::EmptyRoomTypeName));
    }

    #[test]
    fn test_validation_output_format() {
        let config = InventoryConfig { output_format: "csv".to_string(), ..Default::default() };
        assert!(matches!(config.validate(), Err(ConfigValidationError::UnknownOutputFormat(_))));
    }

    #[test]
    fn test_config_serialization_round_trip() {
        let config = InventoryConfig::default();
        let json = config.print_json().unwrap();
        assert!(json.contains("\"maxRoomsPerFloor\": 99"));

        let parsed: InventoryConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);
    }
}
