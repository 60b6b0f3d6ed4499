//! External integrations and report building

pub mod recommendation_engine;
pub mod soil_property_client;

pub use recommendation_engine::{
    RecommendationEngine, RecommendationResult, Report, SoilObservation, DEFAULT_REPORT_PROPERTIES,
};
pub use soil_property_client::{SoilApiError, SoilPropertyClient, SoilPropertySource};
