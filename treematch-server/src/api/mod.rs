//! HTTP API handlers

pub mod health;
pub mod invasive_plants;
pub mod locations;
pub mod measurements;
pub mod plants;
pub mod recommendations;
pub mod soil_properties;

pub use health::health_routes;
pub use invasive_plants::invasive_plant_routes;
pub use locations::location_routes;
pub use measurements::measurement_routes;
pub use plants::plant_routes;
pub use recommendations::recommendation_routes;
pub use soil_properties::soil_property_routes;

use serde::Serialize;

/// `{"message": "..."}` body used for welcome and delete confirmations
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
