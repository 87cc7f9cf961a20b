pub mod pairing_steps;
pub mod wiring_steps;
