//! The numeric heart of the engine.
//!
//! - `breakpoints`: the static concentration → index tables.
//! - `sub_index`: piecewise-linear interpolation against those tables.
//! - `aggregate`: worst-pollutant aggregation into a single index.
//! - `risk`: mapping of the final index onto health-risk bands.

mod aggregate;
mod breakpoints;
mod risk;
mod sub_index;

pub use aggregate::*;
pub use breakpoints::*;
pub use risk::*;
pub use sub_index::*;
