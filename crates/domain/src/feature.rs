//! Feature records: one environmental snapshot per decision cycle.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Outdoor weather category.
///
/// The set is closed: labels outside it are rejected when parsed, so an
/// unseen category can never reach a classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weather {
    Clear,
    Rain,
    Overcast,
}

impl Weather {
    /// Every category, in one-hot encoding order.
    pub const ALL: [Self; 3] = [Self::Clear, Self::Rain, Self::Overcast];

    /// Position of this category in [`Weather::ALL`].
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Self::Clear => 0,
            Self::Rain => 1,
            Self::Overcast => 2,
        }
    }

    /// Label written to the `Cuaca` column of the durable log.
    #[must_use]
    pub fn log_label(self) -> &'static str {
        match self {
            Self::Clear => "cerah",
            Self::Rain => "hujan",
            Self::Overcast => "mendung",
        }
    }
}

impl fmt::Display for Weather {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Clear => f.write_str("clear"),
            Self::Rain => f.write_str("rain"),
            Self::Overcast => f.write_str("overcast"),
        }
    }
}

impl FromStr for Weather {
    type Err = ValidationError;

    /// Accepts the English names as well as the log labels.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "clear" | "cerah" => Ok(Self::Clear),
            "rain" | "hujan" => Ok(Self::Rain),
            "overcast" | "mendung" => Ok(Self::Overcast),
            _ => Err(ValidationError::UnknownWeather(s.to_string())),
        }
    }
}

/// Environmental and household context for one decision cycle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureRecord {
    /// Indoor temperature in °C.
    pub temperature: f64,
    /// Local hour of day, `0..=23`.
    pub hour: u8,
    /// Whether anybody is home.
    pub occupancy: bool,
    pub weather: Weather,
    pub is_holiday: bool,
    /// Ambient light level, `0..=100`.
    pub illuminance: f64,
}

impl FeatureRecord {
    /// Create a builder for constructing a [`FeatureRecord`].
    #[must_use]
    pub fn builder() -> FeatureRecordBuilder {
        FeatureRecordBuilder::default()
    }

    /// Check the numeric ranges.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] found.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.temperature.is_finite() {
            return Err(ValidationError::NonFiniteTemperature(self.temperature));
        }
        if self.hour > 23 {
            return Err(ValidationError::HourOutOfRange(self.hour));
        }
        if !(0.0..=100.0).contains(&self.illuminance) {
            return Err(ValidationError::IlluminanceOutOfRange(self.illuminance));
        }
        Ok(())
    }
}

/// Step-by-step builder for [`FeatureRecord`].
///
/// Unset fields default to a comfortable, empty, clear-weather working-day noon.
#[derive(Debug)]
pub struct FeatureRecordBuilder {
    temperature: f64,
    hour: u8,
    occupancy: bool,
    weather: Weather,
    is_holiday: bool,
    illuminance: f64,
}

impl Default for FeatureRecordBuilder {
    fn default() -> Self {
        Self {
            temperature: 25.0,
            hour: 12,
            occupancy: false,
            weather: Weather::Clear,
            is_holiday: false,
            illuminance: 50.0,
        }
    }
}

impl FeatureRecordBuilder {
    #[must_use]
    pub fn temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }

    #[must_use]
    pub fn hour(mut self, hour: u8) -> Self {
        self.hour = hour;
        self
    }

    #[must_use]
    pub fn occupancy(mut self, occupancy: bool) -> Self {
        self.occupancy = occupancy;
        self
    }

    #[must_use]
    pub fn weather(mut self, weather: Weather) -> Self {
        self.weather = weather;
        self
    }

    #[must_use]
    pub fn is_holiday(mut self, is_holiday: bool) -> Self {
        self.is_holiday = is_holiday;
        self
    }

    #[must_use]
    pub fn illuminance(mut self, illuminance: f64) -> Self {
        self.illuminance = illuminance;
        self
    }

    /// Validate and return the [`FeatureRecord`].
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] if a numeric field is out of range.
    pub fn build(self) -> Result<FeatureRecord, ValidationError> {
        let record = self.into_record();
        record.validate()?;
        Ok(record)
    }

    pub(crate) fn into_record(self) -> FeatureRecord {
        FeatureRecord {
            temperature: self.temperature,
            hour: self.hour,
            occupancy: self.occupancy,
            weather: self.weather,
            is_holiday: self.is_holiday,
            illuminance: self.illuminance,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_parse_english_and_log_labels() {
        assert_eq!("clear".parse::<Weather>().unwrap(), Weather::Clear);
        assert_eq!("Hujan".parse::<Weather>().unwrap(), Weather::Rain);
        assert_eq!(" mendung ".parse::<Weather>().unwrap(), Weather::Overcast);
    }

    #[test]
    fn should_reject_unknown_weather_label() {
        let err = "snow".parse::<Weather>().unwrap_err();
        assert_eq!(err, ValidationError::UnknownWeather("snow".to_string()));
    }

    #[test]
    fn should_index_weather_in_encoding_order() {
        for (position, weather) in Weather::ALL.iter().enumerate() {
            assert_eq!(weather.index(), position);
        }
    }

    #[test]
    fn should_build_record_with_all_fields() {
        let record = FeatureRecord::builder()
            .temperature(31.0)
            .hour(20)
            .occupancy(true)
            .weather(Weather::Rain)
            .is_holiday(true)
            .illuminance(12.5)
            .build()
            .unwrap();

        assert!((record.temperature - 31.0).abs() < f64::EPSILON);
        assert_eq!(record.hour, 20);
        assert!(record.occupancy);
        assert_eq!(record.weather, Weather::Rain);
        assert!(record.is_holiday);
        assert!((record.illuminance - 12.5).abs() < f64::EPSILON);
    }

    #[test]
    fn should_reject_hour_outside_day() {
        let result = FeatureRecord::builder().hour(24).build();
        assert_eq!(result.unwrap_err(), ValidationError::HourOutOfRange(24));
    }

    #[test]
    fn should_reject_non_finite_temperature() {
        let result = FeatureRecord::builder().temperature(f64::NAN).build();
        assert!(matches!(
            result,
            Err(ValidationError::NonFiniteTemperature(_))
        ));
    }

    #[test]
    fn should_reject_illuminance_above_hundred() {
        let result = FeatureRecord::builder().illuminance(100.5).build();
        assert!(matches!(
            result,
            Err(ValidationError::IlluminanceOutOfRange(_))
        ));
    }

    #[test]
    fn should_serialize_weather_lowercase() {
        let json = serde_json::to_string(&Weather::Overcast).unwrap();
        assert_eq!(json, "\"overcast\"");
    }

    #[test]
    fn should_deserialize_record_from_json() {
        let json = serde_json::json!({
            "temperature": 28.5,
            "hour": 19,
            "occupancy": true,
            "weather": "clear",
            "is_holiday": false,
            "illuminance": 40.0
        });
        let record: FeatureRecord = serde_json::from_value(json).unwrap();
        assert_eq!(record.hour, 19);
        assert_eq!(record.weather, Weather::Clear);
    }
}
