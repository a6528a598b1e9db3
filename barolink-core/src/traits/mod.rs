//! Hardware abstraction traits
//!
//! These traits define the interface between the node loops and the
//! sensor implementations in `barolink-drivers`.

pub mod sensor;

pub use sensor::{BarometricSensor, RawSample, Reading, SensorError};
