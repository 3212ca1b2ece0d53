//! Background conversion worker
//!
//! Runs the converter on a dedicated thread so the interactive thread never
//! formats numbers itself. Jobs arrive over one channel, completions leave
//! over another; the two threads share nothing else. Follows RAII patterns
//! for automatic shutdown.

use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::{self, JoinHandle};

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::domain::base::TargetBase;
use crate::domain::converter::{ConversionResult, Converter};
use crate::domain::input::NumericInput;

/// Name given to the worker thread
pub const WORKER_THREAD_NAME: &str = "radix-worker";

/// Worker lifecycle errors
#[derive(Debug, Error)]
pub enum WorkerError {
    #[error("Failed to spawn conversion worker: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("Conversion worker already running")]
    AlreadyRunning,

    #[error("Conversion worker not running")]
    NotRunning,

    #[error("Conversion worker is gone, job {generation} was dropped")]
    Disconnected { generation: u64 },

    #[error("Conversion worker thread panicked")]
    ThreadJoinFailed,
}

/// One scheduled recomputation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionJob {
    /// Monotonic number assigned by the session when scheduling
    pub generation: u64,
    pub input: NumericInput,
    pub base: TargetBase,
}

/// A finished recomputation on its way back to the session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub generation: u64,
    pub input: NumericInput,
    pub base: TargetBase,
    pub result: ConversionResult,
}

/// Channel-fed worker thread running the converter
///
/// Jobs are processed strictly in submission order, so completions come
/// back in the order they were scheduled.
pub struct ConversionWorker {
    converter: Converter,
    thread_handle: Option<JoinHandle<()>>,
    jobs: Option<Sender<ConversionJob>>,
}

impl ConversionWorker {
    /// Creates a worker (not yet started)
    pub fn new(converter: Converter) -> Self {
        Self {
            converter,
            thread_handle: None,
            jobs: None,
        }
    }

    /// Starts the worker thread
    ///
    /// # Arguments
    /// * `completions` - Where finished jobs are delivered
    pub fn start(&mut self, completions: Sender<Completion>) -> Result<(), WorkerError> {
        if self.thread_handle.is_some() {
            return Err(WorkerError::AlreadyRunning);
        }

        let (jobs_tx, jobs_rx) = mpsc::channel();
        let converter = self.converter;

        let handle = thread::Builder::new()
            .name(WORKER_THREAD_NAME.to_string())
            .spawn(move || Self::job_loop(converter, jobs_rx, completions))?;

        info!("conversion worker started");
        self.thread_handle = Some(handle);
        self.jobs = Some(jobs_tx);
        Ok(())
    }

    /// Stops the worker and waits for it to exit
    ///
    /// Jobs already queued are still processed; their completions are
    /// dropped if nobody listens any more.
    pub fn stop(&mut self) -> Result<(), WorkerError> {
        let handle = self.thread_handle.take().ok_or(WorkerError::NotRunning)?;

        // Closing the job channel ends the loop
        self.jobs = None;
        handle.join().map_err(|_| WorkerError::ThreadJoinFailed)?;

        info!("conversion worker stopped");
        Ok(())
    }

    /// Queues a job for the worker
    pub fn submit(&self, job: ConversionJob) -> Result<(), WorkerError> {
        let generation = job.generation;
        let jobs = self.jobs.as_ref().ok_or(WorkerError::NotRunning)?;
        jobs.send(job)
            .map_err(|_| WorkerError::Disconnected { generation })
    }

    pub fn is_running(&self) -> bool {
        self.thread_handle.as_ref().is_some_and(|handle| !handle.is_finished())
    }

    fn job_loop(converter: Converter, jobs: Receiver<ConversionJob>, completions: Sender<Completion>) {
        for job in jobs {
            let result = converter.convert(job.input.as_str(), job.base);
            debug!(
                generation = job.generation,
                base = %job.base,
                failed = result.is_failure(),
                "conversion finished"
            );

            let completion = Completion {
                generation: job.generation,
                input: job.input,
                base: job.base,
                result,
            };

            if completions.send(completion).is_err() {
                // Session torn down mid-flight, nothing left to deliver to
                warn!("completion receiver dropped, worker exiting");
                return;
            }
        }
    }
}

impl Drop for ConversionWorker {
    fn drop(&mut self) {
        if self.thread_handle.is_some() {
            let _ = self.stop();
        }
    }
}
