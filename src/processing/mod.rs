//! Address selection logic.
//!
//! - [`randomizer`] - uniform random pick from a subnet's usable range

mod randomizer;

// Re-export public functions
pub use randomizer::{pick_in_range, random_usable_address};
