//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in barolink-core:
//!
//! - BMP280 / BME280 barometric sensor over I2C (discovery, calibration,
//!   configuration, raw reads, floating-point compensation)

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod sensor;
