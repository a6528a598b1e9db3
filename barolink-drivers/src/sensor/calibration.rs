//! BMP280 calibration coefficients and compensation
//!
//! The 24-byte block at 0x88 holds twelve little-endian coefficients: T1 and
//! P1 unsigned, the rest two's-complement signed. Compensation follows the
//! datasheet's double-precision reference formulas.

use barolink_core::config::CALIBRATION_LEN;
use barolink_core::traits::{RawSample, Reading};

/// Decode an unsigned little-endian 16-bit value
pub const fn le_u16(lo: u8, hi: u8) -> u16 {
    u16::from_le_bytes([lo, hi])
}

/// Decode a signed (two's-complement) little-endian 16-bit value
pub const fn le_i16(lo: u8, hi: u8) -> i16 {
    i16::from_le_bytes([lo, hi])
}

/// Factory calibration of one sensor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CalibrationTable {
    pub t1: u16,
    pub t2: i16,
    pub t3: i16,
    pub p1: u16,
    pub p2: i16,
    pub p3: i16,
    pub p4: i16,
    pub p5: i16,
    pub p6: i16,
    pub p7: i16,
    pub p8: i16,
    pub p9: i16,
}

impl CalibrationTable {
    /// Decode the raw calibration block
    pub const fn from_bytes(d: &[u8; CALIBRATION_LEN]) -> Self {
        Self {
            t1: le_u16(d[0], d[1]),
            t2: le_i16(d[2], d[3]),
            t3: le_i16(d[4], d[5]),
            p1: le_u16(d[6], d[7]),
            p2: le_i16(d[8], d[9]),
            p3: le_i16(d[10], d[11]),
            p4: le_i16(d[12], d[13]),
            p5: le_i16(d[14], d[15]),
            p6: le_i16(d[16], d[17]),
            p7: le_i16(d[18], d[19]),
            p8: le_i16(d[20], d[21]),
            p9: le_i16(d[22], d[23]),
        }
    }

    /// Fine temperature value shared by both compensation branches
    fn t_fine(&self, raw_temperature: u32) -> f64 {
        let adc_t = raw_temperature as f64;
        let t1 = self.t1 as f64;

        let var1 = (adc_t / 16384.0 - t1 / 1024.0) * self.t2 as f64;
        let d = adc_t / 131072.0 - t1 / 8192.0;
        let var2 = d * d * self.t3 as f64;
        var1 + var2
    }

    /// Convert a raw sample to degrees Celsius and Pascal
    ///
    /// Pressure is forced to 0.0 when the P1 term makes the divisor zero.
    pub fn compensate(&self, raw: RawSample) -> Reading {
        let t_fine = self.t_fine(raw.raw_temperature);
        let temperature_c = t_fine / 5120.0;

        let mut var1 = t_fine / 2.0 - 64000.0;
        let mut var2 = var1 * var1 * self.p6 as f64 / 32768.0;
        var2 += var1 * self.p5 as f64 * 2.0;
        var2 = var2 / 4.0 + self.p4 as f64 * 65536.0;
        var1 = (self.p3 as f64 * var1 * var1 / 524288.0 + self.p2 as f64 * var1) / 524288.0;
        var1 = (1.0 + var1 / 32768.0) * self.p1 as f64;

        if var1 == 0.0 {
            return Reading {
                temperature_c,
                pressure_pa: 0.0,
            };
        }

        let mut pressure = 1048576.0 - raw.raw_pressure as f64;
        pressure = (pressure - var2 / 4096.0) * 6250.0 / var1;
        let var1 = self.p9 as f64 * pressure * pressure / 2147483648.0;
        let var2 = pressure * self.p8 as f64 / 32768.0;
        pressure += (var1 + var2 + self.p7 as f64) / 16.0;

        Reading {
            temperature_c,
            pressure_pa: pressure,
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use proptest::prelude::*;

    /// Datasheet reference calibration as it sits in the register block
    pub(crate) const REFERENCE_BLOCK: [u8; 24] = [
        112, 107, 67, 103, 24, 252, 125, 142, 67, 214, 208, 11, 39, 11, 140, 0, 249, 255, 140, 60,
        248, 198, 112, 23,
    ];

    pub(crate) const REFERENCE_RAW: RawSample = RawSample {
        raw_temperature: 519888,
        raw_pressure: 415148,
    };

    #[test]
    fn test_twos_complement_decode() {
        assert_eq!(le_i16(0xFF, 0x7F), 32767);
        assert_eq!(le_i16(0x00, 0x80), -32768);
        assert_eq!(le_i16(0x00, 0x00), 0);
        assert_eq!(le_i16(0xFF, 0xFF), -1);
        assert_eq!(le_u16(0x00, 0x80), 32768);
    }

    #[test]
    fn test_decode_reference_block() {
        let cal = CalibrationTable::from_bytes(&REFERENCE_BLOCK);
        assert_eq!(cal.t1, 27504);
        assert_eq!(cal.t2, 26435);
        assert_eq!(cal.t3, -1000);
        assert_eq!(cal.p1, 36477);
        assert_eq!(cal.p2, -10685);
        assert_eq!(cal.p3, 3024);
        assert_eq!(cal.p4, 2855);
        assert_eq!(cal.p5, 140);
        assert_eq!(cal.p6, -7);
        assert_eq!(cal.p7, 15500);
        assert_eq!(cal.p8, -14600);
        assert_eq!(cal.p9, 6000);
    }

    #[test]
    fn test_reference_conversion() {
        let cal = CalibrationTable::from_bytes(&REFERENCE_BLOCK);
        let reading = cal.compensate(REFERENCE_RAW);

        assert!((reading.temperature_c - 25.082478).abs() < 1e-2);
        assert!((reading.pressure_pa - 100653.27).abs() < 1e-2);
    }

    #[test]
    fn test_zero_p1_forces_zero_pressure() {
        let mut cal = CalibrationTable::from_bytes(&REFERENCE_BLOCK);
        cal.p1 = 0;
        let reading = cal.compensate(REFERENCE_RAW);

        assert_eq!(reading.pressure_pa, 0.0);
        assert!((reading.temperature_c - 25.08).abs() < 1e-2);
    }

    proptest! {
        #[test]
        fn prop_le_i16_matches_sign_extension(lo in any::<u8>(), hi in any::<u8>()) {
            let unsigned = ((hi as u32) << 8) | lo as u32;
            let expected = if unsigned & 0x8000 != 0 {
                unsigned as i32 - 65536
            } else {
                unsigned as i32
            };
            prop_assert_eq!(le_i16(lo, hi) as i32, expected);
        }

        #[test]
        fn prop_compensate_never_panics(t in 0u32..0x10_0000, p in 0u32..0x10_0000) {
            let cal = CalibrationTable::from_bytes(&REFERENCE_BLOCK);
            let reading = cal.compensate(RawSample { raw_temperature: t, raw_pressure: p });
            prop_assert!(reading.temperature_c.is_finite());
        }
    }
}
