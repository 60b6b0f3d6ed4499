//! Database access layer
//!
//! One module per table. Functions take the pool explicitly and return
//! `Option` for lookups by id so handlers decide what "missing" means.

pub mod invasive_plants;
pub mod locations;
pub mod measurements;
pub mod plants;
pub mod soil_properties;
