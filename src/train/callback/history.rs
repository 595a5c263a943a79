//! Per-epoch record of a training run

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::handle::ModelHandle;
use super::traits::{RunParams, TrainerCallback};
use crate::train::Logs;
use crate::{Error, Result};

/// Records every epoch-end snapshot of a training run
///
/// The callback manager always carries one; `Trainer::fit` returns a copy.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct History {
    epochs: Vec<usize>,
    history: BTreeMap<String, Vec<f64>>,
    params: RunParams,
}

impl History {
    /// Create an empty history
    pub fn new() -> Self {
        Self::default()
    }

    /// Epoch indices that completed
    pub fn epochs(&self) -> &[usize] {
        &self.epochs
    }

    /// Values recorded for one key, in epoch order
    pub fn get(&self, key: &str) -> Option<&[f64]> {
        self.history.get(key).map(Vec::as_slice)
    }

    /// Last value recorded for one key
    pub fn last(&self, key: &str) -> Option<f64> {
        self.history.get(key).and_then(|v| v.last().copied())
    }

    /// Recorded keys
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.history.keys().map(String::as_str)
    }

    /// Parameters of the recorded run
    pub fn params(&self) -> &RunParams {
        &self.params
    }

    /// Serialize as pretty JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write as pretty JSON, creating parent directories
    pub fn save_json(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
        }
        std::fs::write(path, self.to_json()?).map_err(|e| Error::io(path, e))
    }
}

impl TrainerCallback for History {
    fn set_params(&mut self, params: &RunParams) {
        if params.mode == super::RunMode::Train {
            self.params = params.clone();
        }
    }

    fn on_train_begin(&mut self, _logs: &Logs, _model: &mut ModelHandle) -> Result<()> {
        self.epochs.clear();
        self.history.clear();
        Ok(())
    }

    fn on_epoch_end(&mut self, epoch: usize, logs: &Logs, _model: &mut ModelHandle) -> Result<()> {
        self.epochs.push(epoch);
        for (key, value) in logs {
            self.history.entry(key.clone()).or_default().push(*value);
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "History"
    }
}
