// Domain types and value objects
pub mod duration;
pub mod price;
pub mod rect;
pub mod wage;

// Re-export commonly used types
pub use duration::{DurationDescription, describe};
pub use price::{NormalizedAmount, PriceCandidate};
pub use rect::Rect;
pub use wage::{WageConfig, WageSummary, WageType};
