//! # trade-digitisation-engine
//!
//! Projected financial impact of digitising an international trade-payables
//! workflow.
//!
//! Given a single annualised set of inputs, the engine computes early-payment
//! discount economics, working capital released, headcount and customs
//! savings, and restates the company's P&L, balance sheet, cash flow and key
//! ratios before and after digitisation.
//!
//! ## Architecture
//!
//! - **core**: Input parameters, their field table, derived metric types
//! - **engine**: The five-stage calculation and guarded ratios
//! - **snapshot**: Flat key-value encoding, persistence stores, editing session
//! - **report**: Currency/percent formatting and the before/after report
//! - **simulation**: Random parameter generation and sensitivity sweeps

pub mod core;
pub mod engine;
pub mod report;
pub mod simulation;
pub mod snapshot;

use crate::core::metrics::DerivedMetrics;
use crate::core::params::InputParameters;
use crate::engine::calculation::CalculationEngine;
use crate::snapshot::codec::{SnapshotCodec, SnapshotRecord};

/// Compute every derived metric for `input`.
pub fn compute_metrics(input: &InputParameters) -> DerivedMetrics {
    CalculationEngine::compute(input)
}

/// Encode `input` as a flat snapshot record.
pub fn encode_snapshot(input: &InputParameters) -> SnapshotRecord {
    SnapshotCodec::encode(input)
}

/// Decode a snapshot record, defaulting every missing or ill-typed field.
pub fn decode_snapshot(record: &SnapshotRecord, defaults: &InputParameters) -> InputParameters {
    SnapshotCodec::decode(record, defaults)
}

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::core::metrics::{DerivedMetrics, Restated};
    pub use crate::core::params::{parse_or_default, InputParameters, ParamError};
    pub use crate::engine::calculation::CalculationEngine;
    pub use crate::report::statement::ImpactReport;
    pub use crate::snapshot::codec::{SnapshotCodec, SnapshotRecord};
    pub use crate::snapshot::session::SimulatorSession;
    pub use crate::snapshot::store::{
        JsonFileStore, MemoryStore, SnapshotError, SnapshotStore, DEFAULT_SNAPSHOT_KEY,
    };
    pub use crate::{compute_metrics, decode_snapshot, encode_snapshot};
}
