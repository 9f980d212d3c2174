//! Snapshot encoding, persistence stores and the editing session.

pub mod codec;
pub mod session;
pub mod store;
