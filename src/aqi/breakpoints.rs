//! Breakpoint tables of the national AQI standard (CPCB India values).
//!
//! Each table is ascending, contiguous and non-overlapping. Concentrations are in µg/m³
//! except CO, whose table is in mg/m³. Anything above the last row clamps to [`MAX_INDEX`].

use crate::models::Pollutant;

/// Highest index value of the standard.
pub const MAX_INDEX: f64 = 500.0;

/// One row of a breakpoint table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Breakpoint {
    pub concentration_low: f64,
    pub concentration_high: f64,
    pub index_low: f64,
    pub index_high: f64,
}

const fn bp(concentration_low: f64, concentration_high: f64, index_low: f64, index_high: f64) -> Breakpoint {
    Breakpoint {
        concentration_low,
        concentration_high,
        index_low,
        index_high,
    }
}

pub const PM25_TABLE: [Breakpoint; 6] = [
    bp(0.0, 30.0, 0.0, 50.0),
    bp(30.0, 60.0, 51.0, 100.0),
    bp(60.0, 90.0, 101.0, 200.0),
    bp(90.0, 120.0, 201.0, 300.0),
    bp(120.0, 250.0, 301.0, 400.0),
    bp(250.0, 500.0, 401.0, 500.0),
];

pub const PM10_TABLE: [Breakpoint; 6] = [
    bp(0.0, 50.0, 0.0, 50.0),
    bp(50.0, 100.0, 51.0, 100.0),
    bp(100.0, 250.0, 101.0, 200.0),
    bp(250.0, 350.0, 201.0, 300.0),
    bp(350.0, 430.0, 301.0, 400.0),
    bp(430.0, 600.0, 401.0, 500.0),
];

pub const NO2_TABLE: [Breakpoint; 6] = [
    bp(0.0, 40.0, 0.0, 50.0),
    bp(40.0, 80.0, 51.0, 100.0),
    bp(80.0, 180.0, 101.0, 200.0),
    bp(180.0, 280.0, 201.0, 300.0),
    bp(280.0, 400.0, 301.0, 400.0),
    bp(400.0, 800.0, 401.0, 500.0),
];

pub const O3_TABLE: [Breakpoint; 6] = [
    bp(0.0, 50.0, 0.0, 50.0),
    bp(50.0, 100.0, 51.0, 100.0),
    bp(100.0, 168.0, 101.0, 200.0),
    bp(168.0, 208.0, 201.0, 300.0),
    bp(208.0, 748.0, 301.0, 400.0),
    bp(748.0, 1000.0, 401.0, 500.0),
];

/// mg/m³
pub const CO_TABLE: [Breakpoint; 6] = [
    bp(0.0, 1.0, 0.0, 50.0),
    bp(1.0, 2.0, 51.0, 100.0),
    bp(2.0, 10.0, 101.0, 200.0),
    bp(10.0, 17.0, 201.0, 300.0),
    bp(17.0, 34.0, 301.0, 400.0),
    bp(34.0, 50.0, 401.0, 500.0),
];

pub const SO2_TABLE: [Breakpoint; 6] = [
    bp(0.0, 40.0, 0.0, 50.0),
    bp(40.0, 80.0, 51.0, 100.0),
    bp(80.0, 380.0, 101.0, 200.0),
    bp(380.0, 800.0, 201.0, 300.0),
    bp(800.0, 1600.0, 301.0, 400.0),
    bp(1600.0, 2100.0, 401.0, 500.0),
];

/// Returns the breakpoint table for a pollutant.
pub fn table_for(pollutant: Pollutant) -> &'static [Breakpoint] {
    match pollutant {
        Pollutant::Pm25 => &PM25_TABLE,
        Pollutant::Pm10 => &PM10_TABLE,
        Pollutant::No2 => &NO2_TABLE,
        Pollutant::O3 => &O3_TABLE,
        Pollutant::Co => &CO_TABLE,
        Pollutant::So2 => &SO2_TABLE,
    }
}
