pub mod core;
pub mod messages;
pub mod state;
pub mod stats;

// Re-export key components
pub use core::HoverEngine;
pub use messages::{MoveOutcome, PointerMove, RecordingRenderer, RenderCommand, Renderer};
pub use state::{Hit, ScanState};
pub use stats::ScanStats;
