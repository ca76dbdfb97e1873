// SPDX-FileCopyrightText: 2026 SmartPay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Sale-wizard snapshot persistence.
//!
//! The multi-step sale flow (enroll hardware, create plan, register the
//! down payment) survives interruption by snapshotting the current step
//! number and the accumulated form data. The snapshot is cleared on sale
//! completion and on logout.

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use smartpay_core::SmartPayError;
use tracing::debug;

const FLOW_FILE: &str = "sale_flow.json";

/// Snapshot of an in-progress sale wizard.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SaleFlowState {
    /// Current wizard step, counted from 1.
    pub step: u32,
    /// Form data accumulated so far, keyed by field name.
    pub data: serde_json::Map<String, serde_json::Value>,
}

impl SaleFlowState {
    /// Records one accumulated field, replacing any earlier value.
    pub fn record(&mut self, key: impl Into<String>, value: serde_json::Value) {
        self.data.insert(key.into(), value);
    }
}

/// On-disk store for the sale-wizard snapshot.
#[derive(Debug, Clone)]
pub struct FlowStore {
    dir: PathBuf,
}

impl FlowStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path(&self) -> PathBuf {
        self.dir.join(FLOW_FILE)
    }

    /// Loads the snapshot, if a sale is in progress.
    ///
    /// A corrupt snapshot is discarded: losing wizard progress beats
    /// blocking every future sale on an unreadable file.
    pub fn load(&self) -> Result<Option<SaleFlowState>, SmartPayError> {
        let path = self.path();
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&path)
            .map_err(|e| SmartPayError::Session(format!("failed to read sale flow: {e}")))?;
        match serde_json::from_str(&content) {
            Ok(state) => Ok(Some(state)),
            Err(e) => {
                debug!(error = %e, "discarding corrupt sale flow snapshot");
                self.clear()?;
                Ok(None)
            }
        }
    }

    /// Persists the snapshot.
    pub fn save(&self, state: &SaleFlowState) -> Result<(), SmartPayError> {
        fs::create_dir_all(&self.dir)
            .map_err(|e| SmartPayError::Session(format!("failed to create flow dir: {e}")))?;
        let content = serde_json::to_string_pretty(state)
            .map_err(|e| SmartPayError::Session(format!("failed to encode sale flow: {e}")))?;
        fs::write(self.path(), content)
            .map_err(|e| SmartPayError::Session(format!("failed to write sale flow: {e}")))?;
        Ok(())
    }

    /// Removes the snapshot (sale completed or abandoned).
    pub fn clear(&self) -> Result<(), SmartPayError> {
        let path = self.path();
        if path.exists() {
            fs::remove_file(&path)
                .map_err(|e| SmartPayError::Session(format!("failed to remove sale flow: {e}")))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = FlowStore::new(dir.path());

        assert!(store.load().unwrap().is_none());

        let mut state = SaleFlowState {
            step: 2,
            ..Default::default()
        };
        state.record("customer_id", serde_json::json!("u-7"));
        state.record("device_serial", serde_json::json!("SN-123"));
        store.save(&state).unwrap();

        let loaded = store.load().unwrap().expect("flow should persist");
        assert_eq!(loaded.step, 2);
        assert_eq!(loaded.data["customer_id"], "u-7");

        store.clear().unwrap();
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn corrupt_snapshot_is_discarded() {
        let dir = tempfile::tempdir().unwrap();
        let store = FlowStore::new(dir.path());
        std::fs::write(dir.path().join("sale_flow.json"), "][").unwrap();
        assert!(store.load().unwrap().is_none());
        // The corrupt file is gone afterwards.
        assert!(!dir.path().join("sale_flow.json").exists());
    }
}
