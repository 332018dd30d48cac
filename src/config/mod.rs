//! Configuration module for the hourvest engine.

mod debug; // Private: files go through crate::config::DEBUG_FLAGS
pub use debug::DEBUG_FLAGS;

pub mod scan;
pub mod settings;

// Re-export commonly used items
pub use scan::{
    DEFAULT_TOLERANCE_PX, MAX_NODES_PER_SCAN, QUICK_SCAN_SAMPLE_CHARS, SCAN, STRIKE_OUT_DEPTH,
    ScanConfig,
};
pub use settings::{Settings, SettingsStore};
