//! Database row models
//!
//! Each record maps one table row; the same struct is the JSON body returned
//! by the HTTP layer.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Plant {
    pub id: i64,
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct InvasivePlant {
    pub id: i64,
    pub common_name: String,
    pub scientific_name: String,
    pub category: String,
}

/// Soil property catalog entry (name, unit, provider metadata)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct SoilProperty {
    pub id: i64,
    pub property_name: String,
    pub description: String,
    pub theme: String,
    pub unit: String,
    pub uncertainty: bool,
    pub value_type: String,
}

/// Named coordinate where measurements were taken
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct SoilLocation {
    pub id: i64,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct SoilMeasurement {
    pub id: i64,
    pub property_id: Option<i64>,
    pub location_id: Option<i64>,
    pub value: f64,
    pub depth: String,
    pub uncertainty_50: Option<String>,
    pub uncertainty_68: Option<String>,
    pub uncertainty_90: Option<String>,
}
