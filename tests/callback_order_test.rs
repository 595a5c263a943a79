//! Lifecycle ordering of observer invocations across fit, evaluate and predict

use std::sync::{Arc, Mutex};

use fitloop::model::LinearRegression;
use fitloop::optim::Sgd;
use fitloop::train::{Dataset, Logs, ModelHandle, TrainConfig, Trainer, TrainerCallback};
use fitloop::Result;
use proptest::prelude::*;

/// One observed call: hook name and whether its logs were empty
type Event = (&'static str, bool);
type Trace = Arc<Mutex<Vec<Event>>>;

struct Recorder(Trace);

impl Recorder {
    fn record(&self, hook: &'static str, logs: &Logs) -> Result<()> {
        self.0.lock().expect("trace lock").push((hook, logs.is_empty()));
        Ok(())
    }
}

impl TrainerCallback for Recorder {
    fn on_train_begin(&mut self, logs: &Logs, _: &mut ModelHandle) -> Result<()> {
        self.record("train_begin", logs)
    }
    fn on_train_end(&mut self, logs: &Logs, _: &mut ModelHandle) -> Result<()> {
        self.record("train_end", logs)
    }
    fn on_epoch_begin(&mut self, _: usize, logs: &Logs, _: &mut ModelHandle) -> Result<()> {
        self.record("epoch_begin", logs)
    }
    fn on_epoch_end(&mut self, _: usize, logs: &Logs, _: &mut ModelHandle) -> Result<()> {
        self.record("epoch_end", logs)
    }
    fn on_train_batch_begin(&mut self, _: usize, logs: &Logs, _: &mut ModelHandle) -> Result<()> {
        self.record("batch_begin", logs)
    }
    fn on_train_batch_end(&mut self, _: usize, logs: &Logs, _: &mut ModelHandle) -> Result<()> {
        self.record("batch_end", logs)
    }
    fn on_test_begin(&mut self, logs: &Logs, _: &mut ModelHandle) -> Result<()> {
        self.record("test_begin", logs)
    }
    fn on_test_end(&mut self, logs: &Logs, _: &mut ModelHandle) -> Result<()> {
        self.record("test_end", logs)
    }
    fn on_test_batch_begin(&mut self, _: usize, logs: &Logs, _: &mut ModelHandle) -> Result<()> {
        self.record("test_batch_begin", logs)
    }
    fn on_test_batch_end(&mut self, _: usize, logs: &Logs, _: &mut ModelHandle) -> Result<()> {
        self.record("test_batch_end", logs)
    }
    fn on_predict_begin(&mut self, logs: &Logs, _: &mut ModelHandle) -> Result<()> {
        self.record("predict_begin", logs)
    }
    fn on_predict_end(&mut self, logs: &Logs, _: &mut ModelHandle) -> Result<()> {
        self.record("predict_end", logs)
    }
    fn on_predict_batch_begin(&mut self, _: usize, logs: &Logs, _: &mut ModelHandle) -> Result<()> {
        self.record("predict_batch_begin", logs)
    }
    fn on_predict_batch_end(&mut self, _: usize, logs: &Logs, _: &mut ModelHandle) -> Result<()> {
        self.record("predict_batch_end", logs)
    }
}

fn recorded_trainer(features: usize, config: TrainConfig) -> (Trainer, Trace) {
    let trace = Trace::default();
    let mut trainer = Trainer::new(LinearRegression::new(features)).with_config(config);
    trainer.compile(Sgd::new(0.05, 0.0));
    trainer.add_callback(Recorder(Arc::clone(&trace)));
    (trainer, trace)
}

fn take(trace: &Trace) -> Vec<Event> {
    std::mem::take(&mut *trace.lock().expect("trace lock"))
}

/// Check `run_begin (outer_begin (batch_begin batch_end)* outer_end)* run_end`
///
/// Returns the number of outer groups and of inner pairs. Begin logs must be
/// empty; end logs must be non-empty.
fn check_grammar(
    events: &[Event],
    run: (&str, &str),
    outer: Option<(&str, &str)>,
    batch: (&str, &str),
) -> (usize, usize) {
    let mut it = events.iter().peekable();
    let mut groups = 0;
    let mut batches = 0;

    let first = it.next().expect("run begin");
    assert_eq!(first.0, run.0);
    assert!(first.1, "{} logs must be empty", run.0);

    loop {
        let &&(hook, empty) = it.peek().expect("run end");
        if hook == run.1 {
            break;
        }
        if let Some((begin, end)) = outer {
            assert_eq!(hook, begin);
            assert!(empty, "{begin} logs must be empty");
            it.next();
            groups += 1;
            batches += check_batches(&mut it, batch, end);
            let (hook, empty) = it.next().expect("outer end");
            assert_eq!(*hook, end);
            assert!(!empty, "{end} logs must not be empty");
        } else {
            batches += check_batches(&mut it, batch, run.1);
        }
    }

    let (hook, empty) = it.next().expect("run end");
    assert_eq!(*hook, run.1);
    assert!(!empty, "{} logs must not be empty", run.1);
    assert!(it.next().is_none(), "events after {}", run.1);
    (groups, batches)
}

fn check_batches<'a>(
    it: &mut std::iter::Peekable<impl Iterator<Item = &'a Event>>,
    (begin, end): (&str, &str),
    stop: &str,
) -> usize {
    let mut count = 0;
    while let Some(&&(hook, empty)) = it.peek() {
        if hook == stop {
            break;
        }
        assert_eq!(hook, begin);
        assert!(empty, "{begin} logs must be empty");
        it.next();
        let (hook, empty) = it.next().expect("batch end");
        assert_eq!(*hook, end);
        assert!(!empty, "{end} logs must not be empty");
        count += 1;
    }
    count
}

#[test]
fn test_fit_with_validation_nests_test_run_before_epoch_end() {
    let (mut trainer, trace) =
        recorded_trainer(1, TrainConfig::new().with_epochs(1).with_batch_size(4));
    let train = Dataset::synthetic_linear(&[1.0], 0.0, 8, 0.0, 1);
    let val = Dataset::synthetic_linear(&[1.0], 0.0, 4, 0.0, 2);
    trainer.fit(&train, Some(&val)).expect("fit should succeed");

    let hooks: Vec<&str> = take(&trace).into_iter().map(|(h, _)| h).collect();
    assert_eq!(
        hooks,
        vec![
            "train_begin",
            "epoch_begin",
            "batch_begin",
            "batch_end",
            "batch_begin",
            "batch_end",
            "test_begin",
            "test_batch_begin",
            "test_batch_end",
            "test_end",
            "epoch_end",
            "train_end",
        ]
    );
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn fit_trace_follows_lifecycle(
        samples in 1usize..40,
        batch_size in 1usize..16,
        epochs in 1usize..5,
    ) {
        let (mut trainer, trace) = recorded_trainer(
            1,
            TrainConfig::new().with_epochs(epochs).with_batch_size(batch_size),
        );
        let data = Dataset::synthetic_linear(&[0.5], 0.1, samples, 0.0, 3);
        trainer.fit(&data, None).expect("fit should succeed");

        let (groups, batches) = check_grammar(
            &take(&trace),
            ("train_begin", "train_end"),
            Some(("epoch_begin", "epoch_end")),
            ("batch_begin", "batch_end"),
        );
        prop_assert_eq!(groups, epochs);
        prop_assert_eq!(batches, epochs * samples.div_ceil(batch_size));
    }

    #[test]
    fn evaluate_and_predict_traces_follow_lifecycle(
        samples in 1usize..40,
        batch_size in 1usize..16,
    ) {
        let (mut trainer, trace) =
            recorded_trainer(2, TrainConfig::new().with_batch_size(batch_size));
        let data = Dataset::synthetic_linear(&[0.5, 2.0], 0.1, samples, 0.0, 5);

        trainer.evaluate(&data).expect("evaluate should succeed");
        let (_, batches) = check_grammar(
            &take(&trace),
            ("test_begin", "test_end"),
            None,
            ("test_batch_begin", "test_batch_end"),
        );
        prop_assert_eq!(batches, samples.div_ceil(batch_size));

        let predictions = trainer.predict(data.features()).expect("predict should succeed");
        prop_assert_eq!(predictions.len(), samples);
        let (_, batches) = check_grammar(
            &take(&trace),
            ("predict_begin", "predict_end"),
            None,
            ("predict_batch_begin", "predict_batch_end"),
        );
        prop_assert_eq!(batches, samples.div_ceil(batch_size));
    }
}
