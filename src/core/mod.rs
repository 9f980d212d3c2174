//! Input parameters, their field table, and the derived metric types.

pub mod fields;
pub mod metrics;
pub mod params;
