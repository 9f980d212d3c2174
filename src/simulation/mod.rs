//! Stress testing and sensitivity analysis on top of the engine.

pub mod sensitivity;
