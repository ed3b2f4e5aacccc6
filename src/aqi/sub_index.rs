//! Converts raw concentrations into pollutant sub-indices.

use super::{table_for, Breakpoint, MAX_INDEX};
use crate::models::{Pollutant, PollutantReading, SubIndex};
use std::collections::BTreeMap;
use tracing::debug;

/// Linear interpolation inside the first row whose upper bound contains `concentration`.
///
/// Returns [`MAX_INDEX`] when the concentration exceeds every row.
pub fn interpolate(concentration: f64, table: &[Breakpoint]) -> f64 {
    let c = concentration.max(0.0);
    table
        .iter()
        .find(|row| c <= row.concentration_high)
        .map(|row| {
            row.index_low
                + (row.index_high - row.index_low) / (row.concentration_high - row.concentration_low)
                    * (c - row.concentration_low)
        })
        .unwrap_or(MAX_INDEX)
}

/// Sub-index of a pollutant for a concentration in µg/m³.
///
/// Total over non-negative input. CO is converted to mg/m³ before the lookup.
pub fn sub_index(pollutant: Pollutant, concentration_ugm3: f64) -> f64 {
    interpolate(pollutant.to_table_unit(concentration_ugm3), table_for(pollutant))
}

/// Scores every reading with a concentration strictly above zero.
///
/// Zero and non-finite readings are "not measured" and yield no entry.
pub fn score(readings: &[PollutantReading]) -> BTreeMap<Pollutant, SubIndex> {
    let mut scored = BTreeMap::new();
    for reading in readings {
        if !reading.is_scorable() {
            debug!(
                "Skipping {} reading {} (not measured)",
                reading.pollutant, reading.concentration
            );
            continue;
        }
        let value = sub_index(reading.pollutant, reading.concentration);
        debug!(
            "{} at {} µg/m³ -> sub-index {:.2}",
            reading.pollutant, reading.concentration, value
        );
        scored.entry(reading.pollutant).or_insert(SubIndex {
            pollutant: reading.pollutant,
            value,
        });
    }
    scored
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_pm25_worked_example() {
        assert!(approx(sub_index(Pollutant::Pm25, 65.0), 117.5));
    }

    #[test]
    fn test_co_worked_example_uses_milligrams() {
        assert!(approx(sub_index(Pollutant::Co, 1500.0), 75.5));
    }

    #[rstest]
    #[case(Pollutant::Pm25, 30.0, 50.0)]
    #[case(Pollutant::Pm25, 0.0, 0.0)]
    #[case(Pollutant::Pm10, 100.0, 100.0)]
    #[case(Pollutant::No2, 180.0, 200.0)]
    #[case(Pollutant::O3, 748.0, 400.0)]
    #[case(Pollutant::So2, 2100.0, 500.0)]
    fn test_row_upper_bounds_map_to_index_high(
        #[case] pollutant: Pollutant,
        #[case] concentration: f64,
        #[case] expected: f64,
    ) {
        assert!(approx(sub_index(pollutant, concentration), expected));
    }

    #[test]
    fn test_above_last_row_clamps_to_max() {
        for pollutant in Pollutant::ALL {
            let last = table_for(pollutant).last().unwrap();
            let above = last.concentration_high + 1e-6;
            // Back to µg/m³ for CO, whose table is in mg/m³.
            let input = if pollutant == Pollutant::Co { above * 1000.0 } else { above };
            assert_eq!(sub_index(pollutant, input), MAX_INDEX, "{}", pollutant);
            assert_eq!(sub_index(pollutant, input * 10.0), MAX_INDEX);
        }
    }

    #[test]
    fn test_sub_index_is_monotonic() {
        for pollutant in Pollutant::ALL {
            let mut previous = 0.0;
            let mut c = 0.0;
            while c < 60_000.0 {
                let value = sub_index(pollutant, c);
                assert!(
                    value >= previous,
                    "{} not monotonic at {}: {} < {}",
                    pollutant,
                    c,
                    value,
                    previous
                );
                previous = value;
                c += 0.5;
            }
        }
    }

    #[test]
    fn test_score_skips_zero_readings() {
        let readings = vec![
            PollutantReading::new(Pollutant::Pm25, 65.0),
            PollutantReading::new(Pollutant::So2, 0.0),
            PollutantReading::new(Pollutant::No2, 20.0),
        ];
        let scored = score(&readings);
        assert_eq!(scored.len(), 2);
        assert!(!scored.contains_key(&Pollutant::So2));
        assert!(approx(scored[&Pollutant::No2].value, 25.0));
    }
}
