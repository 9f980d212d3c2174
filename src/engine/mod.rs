//! The five-stage calculation engine and its guarded ratios.

pub mod calculation;
pub mod ratios;
