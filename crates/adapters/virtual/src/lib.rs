//! # smartenergy-adapter-virtual
//!
//! Simulated sensors that stand in for real hardware during demos and tests.
//!
//! ## Provided sensors
//!
//! | Sensor | Feature | Reading |
//! |--------|---------|---------|
//! | `dht22` | temperature | uniform 24–33 °C, one decimal |
//! | `ldr` | illuminance | uniform integer 0–100 |
//! | `pir` | occupancy | fair coin |
//! | `weather` | weather | uniform over clear / rain / overcast |
//! | `calendar` | holiday | fair coin |
//! | `clock` | hour | local wall clock, or a fixed hour |
//!
//! ## Dependency rule
//!
//! Depends on `smartenergy-app` (port traits) and `smartenergy-domain` only.

mod sensors;

pub use sensors::{SENSORS, SimulatedSensors};
