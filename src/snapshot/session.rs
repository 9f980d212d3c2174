//! Persisted editing session over one parameter set.
//!
//! The session loads the snapshot once when it opens, saves after every edit
//! and recomputes the metrics on every read. The store is injected, so the
//! same session runs against a file directory, an in-memory map or any other
//! [`SnapshotStore`].

use crate::core::metrics::DerivedMetrics;
use crate::core::params::{InputParameters, ParamError};
use crate::engine::calculation::CalculationEngine;
use crate::snapshot::codec::SnapshotCodec;
use crate::snapshot::store::{SnapshotError, SnapshotStore};
use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors from editing a session.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Param(#[from] ParamError),
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
}

pub struct SimulatorSession<S: SnapshotStore> {
    store: S,
    key: String,
    defaults: InputParameters,
    params: InputParameters,
    last_saved: Option<DateTime<Utc>>,
}

impl<S: SnapshotStore> SimulatorSession<S> {
    /// Open a session, restoring whatever is stored under `key`.
    ///
    /// A missing, unreadable or corrupt snapshot opens with `defaults`.
    pub fn open(store: S, key: impl Into<String>, defaults: InputParameters) -> Self {
        let key = key.into();
        let params = match store.load(&key) {
            Ok(Some(contents)) => SnapshotCodec::decode_str(&contents, &defaults),
            Ok(None) => defaults.clone(),
            Err(e) => {
                log::warn!("Could not load snapshot '{}': {}; using defaults", key, e);
                defaults.clone()
            }
        };
        Self {
            store,
            key,
            defaults,
            params,
            last_saved: None,
        }
    }

    pub fn params(&self) -> &InputParameters {
        &self.params
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Freshly computed metrics for the current parameters.
    pub fn metrics(&self) -> DerivedMetrics {
        CalculationEngine::compute(&self.params)
    }

    /// When the last successful save happened in this session.
    pub fn last_saved(&self) -> Option<DateTime<Utc>> {
        self.last_saved
    }

    /// Set one numeric field and save.
    ///
    /// An unknown key changes nothing. A save failure is returned, but the
    /// edit is kept in memory.
    pub fn set(&mut self, key: &str, value: f64) -> Result<DerivedMetrics, SessionError> {
        let next = self.params.with_value(key, value)?;
        self.replace(next)?;
        Ok(self.metrics())
    }

    /// Set one numeric field from raw text (unparsable text becomes 0) and save.
    pub fn set_text(&mut self, key: &str, text: &str) -> Result<DerivedMetrics, SessionError> {
        let next = self.params.with_text(key, text)?;
        self.replace(next)?;
        Ok(self.metrics())
    }

    /// Replace the whole parameter set and save.
    pub fn replace(&mut self, params: InputParameters) -> Result<(), SnapshotError> {
        self.params = params;
        self.save()
    }

    /// Restore the session defaults and save.
    pub fn reset(&mut self) -> Result<(), SnapshotError> {
        self.replace(self.defaults.clone())
    }

    /// Write the current parameters to the store.
    pub fn save(&mut self) -> Result<(), SnapshotError> {
        let contents = SnapshotCodec::encode_to_string(&self.params);
        self.store.save(&self.key, &contents)?;
        self.last_saved = Some(Utc::now());
        log::debug!("Saved snapshot '{}'", self.key);
        Ok(())
    }

    /// Give the store back, e.g. to reopen it.
    pub fn into_store(self) -> S {
        self.store
    }
}
