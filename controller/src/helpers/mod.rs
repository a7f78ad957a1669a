pub mod math;
pub mod swaps;
