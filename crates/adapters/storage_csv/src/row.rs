//! Row layout of the durable log.
//!
//! | Column | Format |
//! |--------|--------|
//! | `Waktu` | `YYYY-MM-DD HH:MM:SS` |
//! | `Suhu` | temperature, °C |
//! | `Cahaya` | illuminance, 0–100 |
//! | `Penghuni` | `Ya` / `Tidak` |
//! | `Cuaca` | `cerah` / `hujan` / `mendung` |
//! | `Hari Libur` | `Ya` / `Tidak` |
//! | `AC`, `TV`, `Lampu` | `ON` / `OFF` |
//! | `Daya Total (W)` | one decimal |
//! | `Biaya/Jam (Rp)` | integer, truncated |

use serde::Serialize;

use smartenergy_domain::actuator::{Actuator, on_off};
use smartenergy_domain::decision::DecisionRecord;
use smartenergy_domain::time;

/// Header columns, in file order.
pub const HEADER: [&str; 11] = [
    "Waktu",
    "Suhu",
    "Cahaya",
    "Penghuni",
    "Cuaca",
    "Hari Libur",
    Actuator::Climate.log_column(),
    Actuator::Entertainment.log_column(),
    Actuator::Lighting.log_column(),
    "Daya Total (W)",
    "Biaya/Jam (Rp)",
];

/// Wrapper for converting a [`DecisionRecord`] into a log row.
#[derive(Debug, Serialize)]
pub(crate) struct Row {
    #[serde(rename = "Waktu")]
    timestamp: String,
    #[serde(rename = "Suhu")]
    temperature: f64,
    #[serde(rename = "Cahaya")]
    illuminance: f64,
    #[serde(rename = "Penghuni")]
    occupancy: &'static str,
    #[serde(rename = "Cuaca")]
    weather: &'static str,
    #[serde(rename = "Hari Libur")]
    holiday: &'static str,
    #[serde(rename = "AC")]
    climate: &'static str,
    #[serde(rename = "TV")]
    entertainment: &'static str,
    #[serde(rename = "Lampu")]
    lighting: &'static str,
    #[serde(rename = "Daya Total (W)")]
    total_watts: String,
    #[serde(rename = "Biaya/Jam (Rp)")]
    cost_per_hour: i64,
}

impl From<&DecisionRecord> for Row {
    #[allow(clippy::cast_possible_truncation)]
    fn from(record: &DecisionRecord) -> Self {
        let features = record.features();
        let state = record.state();
        Self {
            timestamp: time::format_for_log(&record.timestamp()),
            temperature: features.temperature,
            illuminance: features.illuminance,
            occupancy: yes_no(features.occupancy),
            weather: features.weather.log_label(),
            holiday: yes_no(features.is_holiday),
            climate: on_off(state.climate),
            entertainment: on_off(state.entertainment),
            lighting: on_off(state.lighting),
            total_watts: format!("{:.1}", record.total_watts()),
            cost_per_hour: record.cost_per_hour().trunc() as i64,
        }
    }
}

fn yes_no(value: bool) -> &'static str {
    if value { "Ya" } else { "Tidak" }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use smartenergy_domain::actuator::ActuatorState;
    use smartenergy_domain::energy::PowerReading;
    use smartenergy_domain::feature::{FeatureRecord, Weather};

    #[test]
    fn should_name_actuator_columns_like_the_report_sheet() {
        assert_eq!(
            HEADER.join(","),
            "Waktu,Suhu,Cahaya,Penghuni,Cuaca,Hari Libur,AC,TV,Lampu,Daya Total (W),Biaya/Jam (Rp)"
        );
    }

    #[test]
    fn should_format_every_column() {
        let record = DecisionRecord::builder()
            .timestamp(
                NaiveDate::from_ymd_opt(2024, 3, 9)
                    .unwrap()
                    .and_hms_opt(19, 5, 7)
                    .unwrap(),
            )
            .features(
                FeatureRecord::builder()
                    .temperature(28.5)
                    .illuminance(12.0)
                    .occupancy(true)
                    .weather(Weather::Overcast)
                    .is_holiday(false)
                    .hour(19)
                    .build()
                    .unwrap(),
            )
            .state(ActuatorState {
                climate: true,
                entertainment: false,
                lighting: true,
            })
            .power(PowerReading {
                total_watts: 2000.04,
                cost_per_hour: 3800.99,
            })
            .build();

        let row = Row::from(&record);
        assert_eq!(row.timestamp, "2024-03-09 19:05:07");
        assert_eq!(row.occupancy, "Ya");
        assert_eq!(row.weather, "mendung");
        assert_eq!(row.holiday, "Tidak");
        assert_eq!(row.climate, "ON");
        assert_eq!(row.entertainment, "OFF");
        assert_eq!(row.lighting, "ON");
        assert_eq!(row.total_watts, "2000.0");
        assert_eq!(row.cost_per_hour, 3800);
    }

    #[test]
    fn should_truncate_negative_cost_towards_zero() {
        let record = DecisionRecord::builder()
            .power(PowerReading {
                total_watts: 100.0,
                cost_per_hour: -99.9,
            })
            .build();
        assert_eq!(Row::from(&record).cost_per_hour, -99);
    }
}
