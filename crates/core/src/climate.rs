//! Temperature classification.
//!
//! The suggestion endpoint is keyed by a coarse climate bucket rather than a
//! raw temperature. Readings are in degrees Fahrenheit.

use serde::{Deserialize, Serialize};

/// A single weather data point. Extra fields from the weather feed are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeatherReading {
    pub temperature: f64,
}

/// Climate bucket used to pick the conditional suggestion pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Climate {
    Hot,
    Moderate,
    Cold,
}

impl Climate {
    /// Above 70 is hot, above 55 is moderate, everything else is cold.
    /// Each bracket excludes its lower bound.
    pub fn from_temperature(temperature: f64) -> Self {
        if temperature > 70.0 {
            Climate::Hot
        } else if temperature > 55.0 {
            Climate::Moderate
        } else {
            Climate::Cold
        }
    }

    /// Classify from a weather series. Only the first reading is consulted;
    /// an empty series means no weather data yet.
    pub fn from_readings(readings: &[WeatherReading]) -> Option<Self> {
        readings.first().map(|r| Self::from_temperature(r.temperature))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Climate::Hot => "hot",
            Climate::Moderate => "moderate",
            Climate::Cold => "cold",
        }
    }
}

impl std::fmt::Display for Climate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
