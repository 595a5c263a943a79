//! Checkpoint callback for saving model weights

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::handle::ModelHandle;
use super::monitor::MonitorMode;
use super::traits::TrainerCallback;
use crate::train::Logs;
use crate::{Error, Result};

/// Saved model state
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Checkpoint {
    /// Epoch the weights were taken at
    pub epoch: usize,
    /// Whether this was the best monitored value so far
    pub is_best: bool,
    /// Flat model weights
    pub weights: Vec<f64>,
    /// Epoch-end logs at save time
    pub logs: Logs,
}

impl Checkpoint {
    /// Read a checkpoint written by [`CheckpointCallback`]
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Ok(serde_json::from_str(&text)?)
    }
}

/// Checkpoint callback to save model weights periodically
///
/// Saves every N epochs, whenever the monitored value improves, and once
/// more when training ends.
///
/// Without an explicit monitor the key is `val_loss`, or `loss` until the
/// first epoch that reports `val_loss`; switching to `val_loss` forgets the
/// training-loss best. Epochs without the resolved key are never "best".
#[derive(Clone, Debug)]
pub struct CheckpointCallback {
    checkpoint_dir: PathBuf,
    /// Save every N epochs (None = only save best)
    save_every: Option<usize>,
    save_best: bool,
    monitor: Option<String>,
    mode: MonitorMode,
    resolved: Option<String>,
    best: Option<f64>,
    last_epoch: Option<usize>,
    last_logs: Logs,
    /// Last saved epoch
    pub(crate) last_saved_epoch: Option<usize>,
}

impl CheckpointCallback {
    /// Create checkpoint callback saving to directory
    pub fn new(checkpoint_dir: impl Into<PathBuf>) -> Self {
        Self {
            checkpoint_dir: checkpoint_dir.into(),
            save_every: None,
            save_best: true,
            monitor: None,
            mode: MonitorMode::Auto,
            resolved: None,
            best: None,
            last_epoch: None,
            last_logs: Logs::new(),
            last_saved_epoch: None,
        }
    }

    /// Configure to save every N epochs
    pub fn save_every(mut self, epochs: usize) -> Self {
        self.save_every = Some(epochs).filter(|&n| n > 0);
        self
    }

    /// Configure to save on best monitored value
    pub fn save_best(mut self, save: bool) -> Self {
        self.save_best = save;
        self
    }

    /// Monitor an explicit key instead of `val_loss` falling back to `loss`
    pub fn monitor(mut self, key: impl Into<String>) -> Self {
        self.monitor = Some(key.into());
        self
    }

    /// Set the improvement direction of the monitored key
    pub fn mode(mut self, mode: MonitorMode) -> Self {
        self.mode = mode;
        self
    }

    /// Get checkpoint path for epoch
    pub fn checkpoint_path(&self, epoch: usize) -> PathBuf {
        self.checkpoint_dir.join(format!("checkpoint_epoch_{epoch}.json"))
    }

    /// Get best checkpoint path
    pub fn best_checkpoint_path(&self) -> PathBuf {
        self.checkpoint_dir.join("checkpoint_best.json")
    }

    /// Get final checkpoint path
    pub fn final_checkpoint_path(&self) -> PathBuf {
        self.checkpoint_dir.join("checkpoint_final.json")
    }

    fn monitored(&mut self, logs: &Logs) -> Option<(String, f64)> {
        if let Some(key) = &self.monitor {
            let value = logs.get(key);
            if value.is_none() {
                tracing::warn!(
                    monitor = %key,
                    available = ?logs.keys().collect::<Vec<_>>(),
                    "checkpoint conditioned on a missing metric"
                );
            }
            return value.map(|v| (key.clone(), v));
        }

        if self.resolved.as_deref() != Some("val_loss") {
            if let Some(value) = logs.get("val_loss") {
                // bests recorded under `loss` do not carry over
                self.resolved = Some("val_loss".to_string());
                self.best = None;
                return Some(("val_loss".to_string(), value));
            }
        }
        let key = self.resolved.get_or_insert_with(|| "loss".to_string());
        logs.get(key).map(|v| (key.clone(), v))
    }

    fn save(&mut self, path: &Path, checkpoint: &Checkpoint) -> Result<()> {
        std::fs::create_dir_all(&self.checkpoint_dir)
            .map_err(|e| Error::io(&self.checkpoint_dir, e))?;
        let json = serde_json::to_string_pretty(checkpoint)?;
        std::fs::write(path, json).map_err(|e| Error::io(path, e))?;
        tracing::debug!(path = %path.display(), epoch = checkpoint.epoch, "checkpoint saved");
        self.last_saved_epoch = Some(checkpoint.epoch);
        Ok(())
    }
}

impl TrainerCallback for CheckpointCallback {
    fn on_train_begin(&mut self, _logs: &Logs, _model: &mut ModelHandle) -> Result<()> {
        self.resolved = None;
        self.best = None;
        self.last_epoch = None;
        self.last_logs = Logs::new();
        self.last_saved_epoch = None;
        Ok(())
    }

    fn on_epoch_end(&mut self, epoch: usize, logs: &Logs, model: &mut ModelHandle) -> Result<()> {
        self.last_epoch = Some(epoch);
        self.last_logs = logs.clone();

        let mut is_best = false;
        if self.save_best {
            if let Some((key, current)) = self.monitored(logs) {
                let mode = self.mode.resolve(&key);
                let reference = self.best.unwrap_or_else(|| mode.worst());
                if mode.improves(current, reference, 0.0) {
                    self.best = Some(current);
                    is_best = true;
                }
            }
        }

        let periodic = self.save_every.is_some_and(|n| (epoch + 1) % n == 0);
        if !(is_best || periodic) {
            return Ok(());
        }

        let checkpoint = Checkpoint {
            epoch,
            is_best,
            weights: model.weights(),
            logs: logs.clone(),
        };
        if periodic {
            let path = self.checkpoint_path(epoch);
            self.save(&path, &checkpoint)?;
        }
        if is_best {
            let path = self.best_checkpoint_path();
            self.save(&path, &checkpoint)?;
        }
        Ok(())
    }

    fn on_train_end(&mut self, _logs: &Logs, model: &mut ModelHandle) -> Result<()> {
        let Some(epoch) = self.last_epoch else {
            return Ok(());
        };
        let checkpoint = Checkpoint {
            epoch,
            is_best: false,
            weights: model.weights(),
            logs: self.last_logs.clone(),
        };
        let path = self.final_checkpoint_path();
        self.save(&path, &checkpoint)
    }

    fn name(&self) -> &'static str {
        "CheckpointCallback"
    }
}
