//! Editing session, logging and statistics
//!
//! This module holds the state a caller keeps around the pure engine:
//!
//! - **EditorSession**: current snapshot, undo slot and allocator
//! - **LoggingConfig**: tracing subscriber setup
//! - **InventorySummary**: room and container counts for reporting

pub mod editor;
pub mod logging;
pub mod statistics;

// Re-export all public types for convenience
pub use editor::EditorSession;
pub use logging::{LoggingConfig, LoggingGuard};
pub use statistics::{InventorySummary, RoomTypeStock};
