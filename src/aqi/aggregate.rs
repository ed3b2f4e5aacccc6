//! Worst-pollutant aggregation of sub-indices.

use crate::models::{Pollutant, SubIndex};
use serde::Serialize;
use std::collections::BTreeMap;

/// Outcome of aggregation.
///
/// `dominant_pollutant == None` means no pollutant could be scored; the index is then 0
/// but must not be read as clean air.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Aggregate {
    pub final_index: u32,
    pub dominant_pollutant: Option<Pollutant>,
}

impl Aggregate {
    pub const INSUFFICIENT_DATA: Aggregate = Aggregate {
        final_index: 0,
        dominant_pollutant: None,
    };
}

/// Takes the maximum sub-index, rounded half away from zero.
///
/// Ties go to the pollutant that sorts first.
pub fn aggregate(sub_indices: &BTreeMap<Pollutant, f64>) -> Aggregate {
    let mut worst: Option<(Pollutant, f64)> = None;
    for (&pollutant, &value) in sub_indices {
        match worst {
            Some((_, max)) if value <= max => {},
            _ => worst = Some((pollutant, value)),
        }
    }

    match worst {
        Some((pollutant, value)) => Aggregate {
            final_index: value.max(0.0).round() as u32,
            dominant_pollutant: Some(pollutant),
        },
        None => Aggregate::INSUFFICIENT_DATA,
    }
}

/// Convenience over [`aggregate`] for scored sub-indices.
pub fn aggregate_sub_indices(sub_indices: &BTreeMap<Pollutant, SubIndex>) -> Aggregate {
    let values: BTreeMap<Pollutant, f64> = sub_indices
        .iter()
        .map(|(&pollutant, sub)| (pollutant, sub.value))
        .collect();
    aggregate(&values)
}
