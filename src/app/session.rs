//! Session state for the converter screen
//!
//! Holds the entered digits, the selected base and the last result. Every
//! change schedules a recomputation on the background worker; finished
//! results are applied back on the thread that owns the session, in the
//! order they complete. The previous result stays visible until a newer
//! one arrives.

use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::app::worker::{Completion, ConversionJob, ConversionWorker, WorkerError};
use crate::config::format::FormatConfig;
use crate::domain::base::TargetBase;
use crate::domain::converter::{ConversionResult, Converter};
use crate::domain::input::{InputError, NumericInput};

/// Handle returned by `subscribe`, used to unsubscribe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Callback invoked with every newly applied result
pub type ResultObserver = Box<dyn FnMut(&ConversionResult)>;

/// Owned copy of the session state, for building views
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SessionSnapshot {
    pub input: NumericInput,
    pub base: TargetBase,
    pub result: ConversionResult,
}

/// State holder for one converter screen
///
/// Owned by the interactive thread. Only the conversion itself runs
/// elsewhere.
pub struct SessionState {
    input: NumericInput,
    base: TargetBase,
    result: ConversionResult,
    /// Generation of the last scheduled job
    scheduled: u64,
    /// Generation of the last applied completion
    applied: u64,
    // Declared before `worker` so it drops first and the worker stops early
    completions: Receiver<Completion>,
    worker: ConversionWorker,
    observers: Vec<(SubscriptionId, ResultObserver)>,
    next_subscription: u64,
}

impl SessionState {
    /// Creates a session with the default format policy
    ///
    /// Starts with empty input, decimal base and an empty result.
    pub fn new() -> Result<Self, WorkerError> {
        Self::with_config(FormatConfig::default())
    }

    /// Creates a session whose results follow `config`
    pub fn with_config(config: FormatConfig) -> Result<Self, WorkerError> {
        let (completions_tx, completions_rx) = mpsc::channel();
        let mut worker = ConversionWorker::new(Converter::new(config));
        worker.start(completions_tx)?;

        Ok(Self {
            input: NumericInput::default(),
            base: TargetBase::default(),
            result: ConversionResult::default(),
            scheduled: 0,
            applied: 0,
            completions: completions_rx,
            worker,
            observers: Vec::new(),
            next_subscription: 1,
        })
    }

    /// Replaces the input text, if it passes the entry rules
    ///
    /// # Returns
    /// The rejection reason when `text` has a non-digit or more than nine
    /// characters; the previous input is kept and nothing is scheduled.
    pub fn set_input(&mut self, text: &str) -> Result<(), InputError> {
        let input = NumericInput::parse(text).inspect_err(|err| {
            warn!(%err, "input rejected");
        })?;

        self.input = input;
        self.schedule();
        Ok(())
    }

    /// Selects a new target base and schedules a recomputation
    pub fn set_base(&mut self, base: TargetBase) {
        self.base = base;
        self.schedule();
    }

    /// Most recently applied result
    pub fn current_result(&self) -> &ConversionResult {
        &self.result
    }

    pub fn input(&self) -> &NumericInput {
        &self.input
    }

    pub fn base(&self) -> TargetBase {
        self.base
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            input: self.input.clone(),
            base: self.base,
            result: self.result.clone(),
        }
    }

    /// Number of scheduled recomputations not applied yet
    pub fn pending(&self) -> u64 {
        self.scheduled - self.applied
    }

    /// True once every scheduled recomputation has been applied
    pub fn is_settled(&self) -> bool {
        self.pending() == 0
    }

    /// Registers an observer for newly applied results
    ///
    /// Observers run on the thread calling `pump`/`wait_settled`, after the
    /// result has been stored.
    pub fn subscribe<F>(&mut self, observer: F) -> SubscriptionId
    where
        F: FnMut(&ConversionResult) + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Removes an observer; false if it was not registered
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(existing, _)| *existing != id);
        self.observers.len() != before
    }

    /// Applies every completion delivered so far without blocking
    ///
    /// # Returns
    /// Number of completions applied
    pub fn pump(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(completion) = self.completions.try_recv() {
            self.apply(completion);
            applied += 1;
        }
        applied
    }

    /// Blocks until the session is settled or `timeout` elapses
    ///
    /// A timeout too large to add to the current instant (`Duration::MAX`)
    /// waits without a deadline.
    ///
    /// # Returns
    /// true if settled
    pub fn wait_settled(&mut self, timeout: Duration) -> bool {
        let deadline = Instant::now().checked_add(timeout);

        while !self.is_settled() {
            let received = match deadline {
                Some(deadline) => self
                    .completions
                    .recv_timeout(deadline.saturating_duration_since(Instant::now())),
                None => self
                    .completions
                    .recv()
                    .map_err(|_| RecvTimeoutError::Disconnected),
            };

            match received {
                Ok(completion) => self.apply(completion),
                Err(RecvTimeoutError::Timeout) => return false,
                Err(RecvTimeoutError::Disconnected) => {
                    warn!(pending = self.pending(), "conversion worker disconnected");
                    return false;
                }
            }
        }

        true
    }

    /// Stops the worker as if it had died, leaving the session alive
    #[cfg(test)]
    fn stop_worker(&mut self) -> Result<(), WorkerError> {
        self.worker.stop()
    }

    fn schedule(&mut self) {
        self.scheduled += 1;
        let job = ConversionJob {
            generation: self.scheduled,
            input: self.input.clone(),
            base: self.base,
        };
        debug!(generation = job.generation, input = %job.input, base = %job.base, "recomputation scheduled");

        if let Err(err) = self.worker.submit(job) {
            // Count it as applied so the session does not wait forever
            warn!(%err, "recomputation dropped");
            self.applied = self.scheduled;
        }
    }

    fn apply(&mut self, completion: Completion) {
        self.applied = self.applied.max(completion.generation);
        debug!(
            generation = completion.generation,
            pending = self.pending(),
            "recomputation applied"
        );

        self.result = completion.result;
        for (_, observer) in self.observers.iter_mut() {
            observer(&self.result);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::converter::convert;
    use std::cell::RefCell;
    use std::rc::Rc;

    const TIMEOUT: Duration = Duration::from_secs(5);

    fn session() -> SessionState {
        SessionState::new().expect("Failed to create session")
    }

    #[test]
    fn new_session_has_defaults() {
        let session = session();
        assert!(session.input().is_empty());
        assert_eq!(session.base(), TargetBase::Decimal);
        assert_eq!(session.current_result(), &ConversionResult::success(""));
        assert!(session.is_settled());
    }

    #[test]
    fn input_change_recomputes() {
        let mut session = session();
        session.set_input("255").unwrap();
        assert!(session.wait_settled(TIMEOUT));
        assert_eq!(session.current_result(), &ConversionResult::success("255"));
    }

    #[test]
    fn base_change_recomputes() {
        let mut session = session();
        session.set_input("255").unwrap();
        session.set_base(TargetBase::Hexadecimal);
        assert!(session.wait_settled(TIMEOUT));
        assert_eq!(session.current_result(), &ConversionResult::success("ff"));

        session.set_base(TargetBase::Binary);
        assert!(session.wait_settled(TIMEOUT));
        assert_eq!(session.current_result(), &ConversionResult::success("11111111"));
    }

    #[test]
    fn rejected_input_keeps_previous_value() {
        let mut session = session();
        session.set_input("42").unwrap();
        assert!(session.wait_settled(TIMEOUT));

        assert!(matches!(session.set_input("12a"), Err(InputError::NonDigit { .. })));
        assert!(matches!(session.set_input("1234567890"), Err(InputError::TooLong { .. })));

        assert_eq!(session.input().as_str(), "42");
        assert!(session.is_settled(), "rejections must not schedule work");
        assert_eq!(session.current_result(), &ConversionResult::success("42"));
    }

    #[test]
    fn rapid_changes_settle_on_latest_state() {
        let mut session = session();
        for text in ["1", "12", "123", "1234", "12345"] {
            session.set_input(text).unwrap();
        }
        session.set_base(TargetBase::Octal);
        session.set_base(TargetBase::Hexadecimal);

        assert!(session.wait_settled(TIMEOUT));
        assert_eq!(session.current_result(), &convert("12345", TargetBase::Hexadecimal));
    }

    #[test]
    fn previous_result_stays_until_new_one_applied() {
        let mut session = session();
        session.set_input("8").unwrap();
        session.set_base(TargetBase::Octal);
        assert!(session.wait_settled(TIMEOUT));
        assert_eq!(session.current_result().text(), "10");

        // No pumping yet, so the old result is still shown
        session.set_input("9").unwrap();
        assert_eq!(session.current_result().text(), "10");

        assert!(session.wait_settled(TIMEOUT));
        assert_eq!(session.current_result().text(), "11");
    }

    #[test]
    fn clearing_input_shows_nothing() {
        let mut session = session();
        session.set_input("77").unwrap();
        session.set_input("").unwrap();
        assert!(session.wait_settled(TIMEOUT));
        assert_eq!(session.current_result(), &ConversionResult::success(""));
    }

    #[test]
    fn observers_see_every_applied_result() {
        let mut session = session();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let seen_ref = Rc::clone(&seen);
        session.subscribe(move |result| seen_ref.borrow_mut().push(result.text()));

        session.set_input("10").unwrap();
        session.set_base(TargetBase::Binary);
        assert!(session.wait_settled(TIMEOUT));

        assert_eq!(*seen.borrow(), vec!["10".to_string(), "1010".to_string()]);
    }

    #[test]
    fn unsubscribed_observer_is_not_called() {
        let mut session = session();
        let calls = Rc::new(RefCell::new(0));
        let calls_ref = Rc::clone(&calls);
        let id = session.subscribe(move |_| *calls_ref.borrow_mut() += 1);

        assert!(session.unsubscribe(id));
        assert!(!session.unsubscribe(id));

        session.set_input("1").unwrap();
        assert!(session.wait_settled(TIMEOUT));
        assert_eq!(*calls.borrow(), 0);
    }

    #[test]
    fn pump_applies_delivered_completions() {
        let mut session = session();
        session.set_input("3").unwrap();

        // Poll like a UI frame loop would
        let deadline = Instant::now() + TIMEOUT;
        while !session.is_settled() && Instant::now() < deadline {
            session.pump();
            std::thread::sleep(Duration::from_millis(1));
        }

        assert!(session.is_settled());
        assert_eq!(session.pending(), 0);
        assert_eq!(session.current_result().text(), "3");
    }

    #[test]
    fn configured_session_uses_prefixes() {
        let mut session = SessionState::with_config(FormatConfig::prefixed()).unwrap();
        session.set_input("255").unwrap();
        session.set_base(TargetBase::Hexadecimal);
        assert!(session.wait_settled(TIMEOUT));
        assert_eq!(session.current_result().text(), "0xff");
    }

    #[test]
    fn snapshot_copies_current_state() {
        let mut session = session();
        session.set_input("5").unwrap();
        session.set_base(TargetBase::Binary);
        assert!(session.wait_settled(TIMEOUT));

        let snapshot = session.snapshot();
        assert_eq!(snapshot.input.as_str(), "5");
        assert_eq!(snapshot.base, TargetBase::Binary);
        assert_eq!(snapshot.result, ConversionResult::success("101"));
    }

    #[test]
    fn wait_without_deadline() {
        let mut session = session();
        session.set_input("5").unwrap();
        session.set_base(TargetBase::Binary);

        assert!(session.wait_settled(Duration::MAX));
        assert_eq!(session.current_result().text(), "101");

        // Already settled: returns at once
        assert!(session.wait_settled(Duration::MAX));
    }

    #[test]
    fn scheduling_after_worker_died_is_dropped() {
        let mut session = session();
        session.set_input("7").unwrap();
        assert!(session.wait_settled(TIMEOUT));

        session.stop_worker().expect("Failed to stop worker");

        session.set_input("8").unwrap();
        session.set_base(TargetBase::Hexadecimal);
        assert!(session.is_settled());
        assert_eq!(session.pending(), 0);

        let started = Instant::now();
        assert!(session.wait_settled(Duration::MAX));
        assert!(started.elapsed() < TIMEOUT);

        // Input and base still change; the last applied result stays shown
        assert_eq!(session.input().as_str(), "8");
        assert_eq!(session.base(), TargetBase::Hexadecimal);
        assert_eq!(session.current_result().text(), "7");
        assert_eq!(session.pump(), 0);
    }

    #[test]
    fn dropping_session_with_work_in_flight_is_clean() {
        let mut session = session();
        for i in 0..100 {
            session.set_input(&i.to_string()).unwrap();
        }
        drop(session);
    }
}
