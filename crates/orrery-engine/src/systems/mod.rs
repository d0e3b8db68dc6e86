pub mod lighting;
pub mod raycast;
pub mod rng;
