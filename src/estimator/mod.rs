pub mod engine;
pub mod mix;
pub mod types;

pub use engine::{compute_cost, recommend, supports_mix};
pub use mix::normalise_mix;
