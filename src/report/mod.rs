//! Human-readable rendering of a calculation run.

pub mod format;
pub mod statement;
