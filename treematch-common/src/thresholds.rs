//! Soil property threshold table and classification
//!
//! Each known soil property has three contiguous bands (low, moderate, high)
//! and a fixed recommendation per band. The table is compile-time data shared
//! read-only by every request.
//!
//! Band membership is checked in order low → moderate → high:
//! - low is closed on both ends: `min <= value <= max`
//! - moderate and high are open at the bottom: `min < value <= max`
//!
//! Because `low.max == moderate.min`, a value sitting exactly on that shared
//! boundary classifies as low. Callers rely on this ordering; do not normalize.

use serde::Serialize;
use std::fmt;

/// One of the three named ranges a measurement falls into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Band {
    Low,
    Moderate,
    High,
}

impl Band {
    pub fn all_variants() -> &'static [Band] {
        &[Band::Low, Band::Moderate, Band::High]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Band::Low => "low",
            Band::Moderate => "moderate",
            Band::High => "high",
        }
    }
}

/// Numeric range `(min, max)` of a band
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BandRange {
    pub min: f64,
    pub max: f64,
}

impl BandRange {
    const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// `min <= value <= max`
    pub fn contains_closed(&self, value: f64) -> bool {
        self.min <= value && value <= self.max
    }

    /// `min < value <= max`
    pub fn contains_open_below(&self, value: f64) -> bool {
        self.min < value && value <= self.max
    }
}

/// Recommendation text for each band
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BandMessages {
    pub low: &'static str,
    pub moderate: &'static str,
    pub high: &'static str,
}

/// Threshold definition for one soil property
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PropertyThresholds {
    pub property_name: &'static str,
    pub low: BandRange,
    pub moderate: BandRange,
    pub high: BandRange,
    pub messages: BandMessages,
}

impl PropertyThresholds {
    pub fn range(&self, band: Band) -> BandRange {
        match band {
            Band::Low => self.low,
            Band::Moderate => self.moderate,
            Band::High => self.high,
        }
    }

    pub fn message(&self, band: Band) -> &'static str {
        match band {
            Band::Low => self.messages.low,
            Band::Moderate => self.messages.moderate,
            Band::High => self.messages.high,
        }
    }

    /// Band containing `value`, or `None` when it is outside every band
    ///
    /// NaN compares false against every bound and therefore yields `None`.
    pub fn band_for(&self, value: f64) -> Option<Band> {
        if self.low.contains_closed(value) {
            Some(Band::Low)
        } else if self.moderate.contains_open_below(value) {
            Some(Band::Moderate)
        } else if self.high.contains_open_below(value) {
            Some(Band::High)
        } else {
            None
        }
    }
}

/// Every soil property with defined thresholds
///
/// New properties are added here; nothing else needs to change.
pub static THRESHOLD_TABLE: &[PropertyThresholds] = &[
    PropertyThresholds {
        property_name: "ph",
        low: BandRange::new(0.0, 5.5),
        moderate: BandRange::new(5.5, 7.5),
        high: BandRange::new(7.5, 14.0),
        messages: BandMessages {
            low: "Low pH (acidic soil). Apply lime to raise pH.",
            moderate: "Ideal pH range for most crops.",
            high: "High pH (alkaline soil). Apply sulfur to lower pH.",
        },
    },
    PropertyThresholds {
        property_name: "nitrogen_total",
        low: BandRange::new(0.0, 0.5),
        moderate: BandRange::new(0.5, 1.5),
        high: BandRange::new(1.5, 10.0),
        messages: BandMessages {
            low: "Low nitrogen. Apply nitrogen-based fertilizers.",
            moderate: "Adequate nitrogen for crops.",
            high: "High nitrogen. Monitor for nutrient leaching and avoid over-fertilizing.",
        },
    },
    PropertyThresholds {
        property_name: "phosphorous_extractable",
        low: BandRange::new(0.0, 10.0),
        moderate: BandRange::new(10.0, 50.0),
        high: BandRange::new(50.0, 100.0),
        messages: BandMessages {
            low: "Low phosphorus. Apply phosphate fertilizers or bone meal.",
            moderate: "Adequate phosphorus. No specific action needed.",
            high: "High phosphorus. Avoid over-fertilizing with phosphorus.",
        },
    },
    PropertyThresholds {
        property_name: "aluminium_extractable",
        low: BandRange::new(0.0, 10.0),
        moderate: BandRange::new(10.0, 20.0),
        high: BandRange::new(20.0, 100.0),
        messages: BandMessages {
            low: "Low aluminium. No action needed.",
            moderate: "Moderately high aluminium. Apply lime to reduce toxicity.",
            high: "High aluminium. Apply lime or soil amendments to neutralize excess aluminium.",
        },
    },
    PropertyThresholds {
        property_name: "bulk_density",
        low: BandRange::new(0.0, 1.0),
        moderate: BandRange::new(1.0, 1.5),
        high: BandRange::new(1.5, 3.0),
        messages: BandMessages {
            low: "Low bulk density. Continue with current soil management practices.",
            moderate: "Moderate bulk density. Consider tilling or adding organic matter.",
            high: "High bulk density. Aerate soil and add organic matter to alleviate compaction.",
        },
    },
    PropertyThresholds {
        property_name: "calcium_extractable",
        low: BandRange::new(0.0, 200.0),
        moderate: BandRange::new(200.0, 600.0),
        high: BandRange::new(600.0, 2000.0),
        messages: BandMessages {
            low: "Low calcium. Apply lime or gypsum to raise calcium levels.",
            moderate: "Adequate calcium. No specific action needed.",
            high: "High calcium. Monitor other nutrients for potential imbalances.",
        },
    },
    PropertyThresholds {
        property_name: "carbon_organic",
        low: BandRange::new(0.0, 10.0),
        moderate: BandRange::new(10.0, 30.0),
        high: BandRange::new(30.0, 100.0),
        messages: BandMessages {
            low: "Low organic carbon. Add organic matter (compost, manure).",
            moderate: "Moderate organic carbon. Continue soil conservation practices.",
            high: "High organic carbon. Maintain fertility with organic matter.",
        },
    },
    PropertyThresholds {
        property_name: "carbon_total",
        low: BandRange::new(0.0, 15.0),
        moderate: BandRange::new(15.0, 40.0),
        high: BandRange::new(40.0, 100.0),
        messages: BandMessages {
            low: "Low total carbon. Increase organic amendments and reduce tillage.",
            moderate: "Adequate total carbon for most plants.",
            high: "High total carbon. Monitor nitrogen levels to ensure balanced nutrient availability.",
        },
    },
    PropertyThresholds {
        property_name: "clay_content",
        low: BandRange::new(0.0, 20.0),
        moderate: BandRange::new(20.0, 40.0),
        high: BandRange::new(40.0, 100.0),
        messages: BandMessages {
            low: "Low clay content (sandy soil). Add organic matter to improve water retention.",
            moderate: "Moderate clay content. Good soil structure for most plants.",
            high: "High clay content. Use raised beds or organic matter to improve drainage.",
        },
    },
];

/// Look up the thresholds for a property name (exact, case-sensitive match)
pub fn thresholds_for(property_name: &str) -> Option<&'static PropertyThresholds> {
    THRESHOLD_TABLE
        .iter()
        .find(|t| t.property_name == property_name)
}

/// Outcome of classifying one `(property, value)` pair
///
/// Unknown properties and out-of-range values are ordinary outcomes, not
/// errors; `Display` renders the recommendation text for each case.
#[derive(Debug, Clone, PartialEq)]
pub enum Classification {
    /// Value fell inside a band
    Banded {
        band: Band,
        recommendation: &'static str,
    },
    /// Property has no entry in the threshold table
    UnknownProperty { property_name: String },
    /// Property is known but the value is outside every band
    OutOfRange { property_name: String, value: f64 },
}

impl Classification {
    pub fn band(&self) -> Option<Band> {
        match self {
            Classification::Banded { band, .. } => Some(*band),
            _ => None,
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Classification::Banded { recommendation, .. } => f.write_str(recommendation),
            Classification::UnknownProperty { property_name } => {
                write!(f, "No thresholds defined for {}", property_name)
            }
            Classification::OutOfRange {
                property_name,
                value,
            } => write!(f, "Value {} is out of range for {}", value, property_name),
        }
    }
}

/// Classify a measured value against the threshold table
pub fn classify(property_name: &str, value: f64) -> Classification {
    let Some(thresholds) = thresholds_for(property_name) else {
        return Classification::UnknownProperty {
            property_name: property_name.to_string(),
        };
    };

    match thresholds.band_for(value) {
        Some(band) => Classification::Banded {
            band,
            recommendation: thresholds.message(band),
        },
        None => Classification::OutOfRange {
            property_name: property_name.to_string(),
            value,
        },
    }
}

/// Recommendation text for a measured value
pub fn get_recommendation(property_name: &str, value: f64) -> String {
    classify(property_name, value).to_string()
}
