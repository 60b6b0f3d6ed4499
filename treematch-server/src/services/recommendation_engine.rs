//! Soil recommendation reports
//!
//! For each requested property: look up the value at the coordinate, then
//! classify it against the threshold table. Properties are processed one at a
//! time in input order. A failed lookup only nulls its own entry; the report
//! is always returned.

use serde::ser::{Serialize, SerializeMap, Serializer};
use std::sync::Arc;
use tracing::warn;
use treematch_common::thresholds;

use super::soil_property_client::SoilPropertySource;

/// Properties reported when the caller names none
pub const DEFAULT_REPORT_PROPERTIES: [&str; 2] = ["ph", "bulk_density"];

/// One property's value at one coordinate, as seen by the lookup
#[derive(Debug, Clone, PartialEq)]
pub struct SoilObservation {
    pub latitude: f64,
    pub longitude: f64,
    pub property_name: String,
    /// `None` when the lookup failed or the provider had no entry
    pub value: Option<f64>,
}

/// Report entry for one property
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct RecommendationResult {
    pub value: Option<f64>,
    pub recommendation: Option<String>,
}

impl RecommendationResult {
    /// Classify an observation; an absent value yields an all-null entry
    pub fn from_observation(observation: &SoilObservation) -> Self {
        match observation.value {
            Some(value) => Self {
                value: Some(value),
                recommendation: Some(thresholds::get_recommendation(
                    &observation.property_name,
                    value,
                )),
            },
            None => Self {
                value: None,
                recommendation: None,
            },
        }
    }
}

/// Property name → result, keeping first-insertion order
///
/// Inserting an existing key replaces its result in place, so the key keeps
/// its original position. Serializes as a JSON object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Report {
    entries: Vec<(String, RecommendationResult)>,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, property_name: String, result: RecommendationResult) {
        match self.entries.iter_mut().find(|(name, _)| *name == property_name) {
            Some((_, existing)) => *existing = result,
            None => self.entries.push((property_name, result)),
        }
    }

    pub fn get(&self, property_name: &str) -> Option<&RecommendationResult> {
        self.entries
            .iter()
            .find(|(name, _)| name == property_name)
            .map(|(_, result)| result)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RecommendationResult)> {
        self.entries.iter().map(|(name, result)| (name.as_str(), result))
    }
}

impl Serialize for Report {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, result) in &self.entries {
            map.serialize_entry(name, result)?;
        }
        map.end()
    }
}

/// Builds recommendation reports from a soil property source
#[derive(Clone)]
pub struct RecommendationEngine {
    source: Arc<dyn SoilPropertySource>,
}

impl RecommendationEngine {
    pub fn new(source: Arc<dyn SoilPropertySource>) -> Self {
        Self { source }
    }

    /// Look up one property, converting any lookup failure into an absent value
    pub async fn observe(
        &self,
        latitude: f64,
        longitude: f64,
        property_name: &str,
    ) -> SoilObservation {
        let value = match self
            .source
            .fetch_value(latitude, longitude, property_name)
            .await
        {
            Ok(value) => value,
            Err(e) => {
                warn!(property = %property_name, error = %e, "Soil property lookup failed");
                None
            }
        };

        SoilObservation {
            latitude,
            longitude,
            property_name: property_name.to_string(),
            value,
        }
    }

    /// Look up and classify each property in order
    pub async fn build_report<S: AsRef<str>>(
        &self,
        latitude: f64,
        longitude: f64,
        property_names: &[S],
    ) -> Report {
        let mut report = Report::new();

        for property_name in property_names {
            let observation = self
                .observe(latitude, longitude, property_name.as_ref())
                .await;
            report.insert(
                observation.property_name.clone(),
                RecommendationResult::from_observation(&observation),
            );
        }

        report
    }
}
