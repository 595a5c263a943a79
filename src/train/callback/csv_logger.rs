//! Stream epoch results to a CSV file

use std::fs::{File, OpenOptions};
use std::path::PathBuf;

use super::handle::ModelHandle;
use super::traits::TrainerCallback;
use crate::train::Logs;
use crate::{Error, Result};

/// Appends one CSV row per epoch: `epoch` followed by the log keys in order
///
/// The columns are fixed by the first epoch of a run. When that epoch has no
/// `val_` keys, a `val_<key>` column is added for every key so epochs that
/// validate later still fit the header. Missing values are written as `NA`.
/// A header is written only when the file is new or empty.
pub struct CsvLogger {
    path: PathBuf,
    separator: u8,
    append: bool,
    keys: Option<Vec<String>>,
    writer: Option<csv::Writer<File>>,
    write_header: bool,
}

impl CsvLogger {
    /// Log to `path`, truncating it at train begin
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            separator: b',',
            append: false,
            keys: None,
            writer: None,
            write_header: true,
        }
    }

    /// Keep existing rows and add new ones after them
    pub fn append(mut self, append: bool) -> Self {
        self.append = append;
        self
    }

    /// Use a different field separator
    pub fn separator(mut self, separator: u8) -> Self {
        self.separator = separator;
        self
    }

    /// Output path
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    fn open(&self) -> Result<File> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
        }
        let mut options = OpenOptions::new();
        options.create(true);
        if self.append {
            options.append(true);
        } else {
            options.write(true).truncate(true);
        }
        options.open(&self.path).map_err(|e| Error::io(&self.path, e))
    }
}

impl TrainerCallback for CsvLogger {
    fn on_train_begin(&mut self, _logs: &Logs, _model: &mut ModelHandle) -> Result<()> {
        let file = self.open()?;
        let len = file
            .metadata()
            .map_err(|e| Error::io(&self.path, e))?
            .len();
        self.write_header = !self.append || len == 0;
        self.keys = None;
        self.writer = Some(
            csv::WriterBuilder::new()
                .has_headers(false)
                .delimiter(self.separator)
                .from_writer(file),
        );
        Ok(())
    }

    fn on_epoch_end(&mut self, epoch: usize, logs: &Logs, _model: &mut ModelHandle) -> Result<()> {
        let Some(writer) = self.writer.as_mut() else {
            return Ok(());
        };
        let keys = self.keys.get_or_insert_with(|| {
            let mut keys: Vec<String> = logs.keys().map(str::to_string).collect();
            if !keys.iter().any(|k| k.starts_with("val_")) {
                let val_keys: Vec<String> = keys.iter().map(|k| format!("val_{k}")).collect();
                keys.extend(val_keys);
            }
            keys
        });

        if self.write_header {
            let mut header = vec!["epoch".to_string()];
            header.extend(keys.iter().cloned());
            writer.write_record(&header)?;
            self.write_header = false;
        }

        let mut row = vec![epoch.to_string()];
        row.extend(
            keys.iter()
                .map(|k| logs.get(k).map_or_else(|| "NA".to_string(), |v| v.to_string())),
        );
        writer.write_record(&row)?;
        writer.flush().map_err(|e| Error::io(&self.path, e))
    }

    fn on_train_end(&mut self, _logs: &Logs, _model: &mut ModelHandle) -> Result<()> {
        if let Some(mut writer) = self.writer.take() {
            writer.flush().map_err(|e| Error::io(&self.path, e))?;
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "CsvLogger"
    }
}
