// Price detection pipeline: text -> candidates -> values -> geometry
pub mod filter;
pub mod hit_test;
pub mod matcher;
pub mod normalizer;

// Re-export commonly used items
pub use filter::{is_rendered_text_node, is_struck_through};
pub use hit_test::rect_for;
pub use matcher::{find_candidates, looks_like_price, sample_prefix};
pub use normalizer::{ParseFailure, normalize, suffix_multiplier};
