//! Ad hoc callbacks built from closures

use super::handle::ModelHandle;
use super::traits::TrainerCallback;
use crate::train::Logs;
use crate::Result;

type RunHook = Box<dyn FnMut(&Logs, &mut ModelHandle) -> Result<()> + Send>;
type IndexedHook = Box<dyn FnMut(usize, &Logs, &mut ModelHandle) -> Result<()> + Send>;

/// Callback assembled from closures for the common training events
///
/// # Example
///
/// ```rust
/// use fitloop::train::callback::LambdaCallback;
///
/// let stop_at_three = LambdaCallback::new().with_epoch_end(|epoch, _logs, model| {
///     if epoch == 2 {
///         model.set_stop_training(true);
///     }
///     Ok(())
/// });
/// ```
#[derive(Default)]
pub struct LambdaCallback {
    train_begin: Option<RunHook>,
    train_end: Option<RunHook>,
    epoch_begin: Option<IndexedHook>,
    epoch_end: Option<IndexedHook>,
    batch_begin: Option<IndexedHook>,
    batch_end: Option<IndexedHook>,
}

impl LambdaCallback {
    /// Callback with no hooks
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `f` at train begin
    pub fn with_train_begin<F>(mut self, f: F) -> Self
    where
        F: FnMut(&Logs, &mut ModelHandle) -> Result<()> + Send + 'static,
    {
        self.train_begin = Some(Box::new(f));
        self
    }

    /// Run `f` at train end
    pub fn with_train_end<F>(mut self, f: F) -> Self
    where
        F: FnMut(&Logs, &mut ModelHandle) -> Result<()> + Send + 'static,
    {
        self.train_end = Some(Box::new(f));
        self
    }

    /// Run `f` at each epoch begin
    pub fn with_epoch_begin<F>(mut self, f: F) -> Self
    where
        F: FnMut(usize, &Logs, &mut ModelHandle) -> Result<()> + Send + 'static,
    {
        self.epoch_begin = Some(Box::new(f));
        self
    }

    /// Run `f` at each epoch end
    pub fn with_epoch_end<F>(mut self, f: F) -> Self
    where
        F: FnMut(usize, &Logs, &mut ModelHandle) -> Result<()> + Send + 'static,
    {
        self.epoch_end = Some(Box::new(f));
        self
    }

    /// Run `f` at each train batch begin
    pub fn with_batch_begin<F>(mut self, f: F) -> Self
    where
        F: FnMut(usize, &Logs, &mut ModelHandle) -> Result<()> + Send + 'static,
    {
        self.batch_begin = Some(Box::new(f));
        self
    }

    /// Run `f` at each train batch end
    pub fn with_batch_end<F>(mut self, f: F) -> Self
    where
        F: FnMut(usize, &Logs, &mut ModelHandle) -> Result<()> + Send + 'static,
    {
        self.batch_end = Some(Box::new(f));
        self
    }
}

fn call_run(hook: &mut Option<RunHook>, logs: &Logs, model: &mut ModelHandle) -> Result<()> {
    match hook {
        Some(f) => f(logs, model),
        None => Ok(()),
    }
}

fn call_indexed(
    hook: &mut Option<IndexedHook>,
    index: usize,
    logs: &Logs,
    model: &mut ModelHandle,
) -> Result<()> {
    match hook {
        Some(f) => f(index, logs, model),
        None => Ok(()),
    }
}

impl TrainerCallback for LambdaCallback {
    fn on_train_begin(&mut self, logs: &Logs, model: &mut ModelHandle) -> Result<()> {
        call_run(&mut self.train_begin, logs, model)
    }

    fn on_train_end(&mut self, logs: &Logs, model: &mut ModelHandle) -> Result<()> {
        call_run(&mut self.train_end, logs, model)
    }

    fn on_epoch_begin(&mut self, epoch: usize, logs: &Logs, model: &mut ModelHandle) -> Result<()> {
        call_indexed(&mut self.epoch_begin, epoch, logs, model)
    }

    fn on_epoch_end(&mut self, epoch: usize, logs: &Logs, model: &mut ModelHandle) -> Result<()> {
        call_indexed(&mut self.epoch_end, epoch, logs, model)
    }

    fn on_train_batch_begin(
        &mut self,
        batch: usize,
        logs: &Logs,
        model: &mut ModelHandle,
    ) -> Result<()> {
        call_indexed(&mut self.batch_begin, batch, logs, model)
    }

    fn on_train_batch_end(
        &mut self,
        batch: usize,
        logs: &Logs,
        model: &mut ModelHandle,
    ) -> Result<()> {
        call_indexed(&mut self.batch_end, batch, logs, model)
    }

    fn name(&self) -> &'static str {
        "LambdaCallback"
    }
}
