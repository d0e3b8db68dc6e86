use wasm_bindgen::prelude::*;

pub mod bodies;
pub mod builder;
pub mod game;
pub mod interaction;
pub mod orbit;
pub mod stepper;
use game::SolarSystem;

orrery_web::export_app!(SolarSystem, "solar-system");
