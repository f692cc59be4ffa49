pub mod drill;
pub mod stats;
