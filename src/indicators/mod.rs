pub mod calculator;
pub mod trend;

pub use calculator::{augment, augment_in_place, compute_column};
