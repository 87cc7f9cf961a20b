pub mod steps;
pub mod world;

pub use world::{PlanWorld, WiringWorld};
