#![allow(clippy::collapsible_if)]
#![allow(clippy::collapsible_else_if)]

// Core modules
pub mod analysis;
pub mod config;
pub mod domain;
pub mod page;
pub mod utils;

// The hover scheduler
pub mod engine;

#[cfg(not(target_arch = "wasm32"))]
pub mod cli;

// Browser binding: DOM page, pointer listener, JS renderer
#[cfg(target_arch = "wasm32")]
pub mod wasm;

// Re-export commonly used types
pub use config::{Settings, SettingsStore};
pub use domain::{DurationDescription, NormalizedAmount, PriceCandidate, Rect, WageType, describe};
pub use engine::{HoverEngine, MoveOutcome, PointerMove, Renderer};
pub use page::Page;
pub use utils::app_time;

#[cfg(not(target_arch = "wasm32"))]
pub use cli::Cli;
