pub mod cost;
pub mod penalty;
