//! Bounded worker pool for per-file analysis.
//!
//! A [`WorkerPool`] runs a fixed number of workers. Submitted files wait in a FIFO
//! queue and are handed to the first idle worker; at most `pool_size` files are in
//! flight at any time. Each worker reports a [`ProgressEvent`] when it starts a file
//! and a [`CompletionEvent`] when it is done, after which the next queued file is
//! dispatched.
//!
//! Workers are started lazily by the first submission (or an explicit
//! [`WorkerPool::initialize`]) and stopped with [`WorkerPool::terminate`]. A
//! terminated pool can be initialized again.
//!
//! # Example
//!
//! ```rust,no_run
//! use organizatext::core::config::PoolConfig;
//! use organizatext::pool::WorkerPool;
//! use organizatext::processor::{FileProcessor, InputFile};
//!
//! # async fn example() -> organizatext::Result<()> {
//! let pool = WorkerPool::new(PoolConfig::default(), FileProcessor::default());
//!
//! let file = InputFile::from_path("notas.txt").await?;
//! let record = pool.process_file(file, "file-1", None).await?;
//! println!("{:?}", record.keywords);
//!
//! pool.terminate();
//! # Ok(())
//! # }
//! ```

mod batch;
mod handle;
mod messages;
mod registry;
mod worker;

pub use batch::BatchReport;
pub use handle::JobHandle;
pub use messages::{CompletionEvent, JobStatus, ProgressEvent};
pub use registry::PoolRegistry;

use crate::core::config::PoolConfig;
use crate::processor::{FileProcessor, FileRecord, InputFile};
use crate::{OrganizatextError, Result};
use ahash::AHashMap;
use messages::{WorkerCommand, WorkerEvent};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Weak};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

/// Callback invoked with every progress event of a job.
pub type ProgressCallback = Arc<dyn Fn(&ProgressEvent) + Send + Sync>;

type Reply = oneshot::Sender<Result<FileRecord>>;

/// Point-in-time snapshot of a pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolStats {
    pub pool_size: usize,
    pub active_jobs: usize,
    pub queued_jobs: usize,
    pub available_workers: usize,
}

struct QueuedJob {
    job_id: u64,
    file_id: String,
    file: InputFile,
    on_progress: Option<ProgressCallback>,
    reply: Reply,
}

struct InFlightJob {
    file_id: String,
    on_progress: Option<ProgressCallback>,
    reply: Reply,
}

struct WorkerSlot {
    commands: mpsc::UnboundedSender<WorkerCommand>,
    task: JoinHandle<()>,
}

#[derive(Default)]
struct PoolState {
    running: bool,
    queue: VecDeque<QueuedJob>,
    in_flight: AHashMap<u64, InFlightJob>,
    idle: VecDeque<usize>,
    workers: Vec<WorkerSlot>,
    dispatcher: Option<JoinHandle<()>>,
    next_job_id: u64,
}

impl PoolState {
    /// Hand queued jobs to idle workers, oldest first.
    fn dispatch_pending(&mut self) {
        while !self.queue.is_empty() {
            let Some(worker_id) = self.idle.pop_front() else {
                break;
            };
            let Some(job) = self.queue.pop_front() else {
                self.idle.push_front(worker_id);
                break;
            };

            let command = WorkerCommand::Process {
                job_id: job.job_id,
                file_id: job.file_id.clone(),
                file: job.file,
            };

            match self.workers.get(worker_id).map(|w| w.commands.send(command)) {
                Some(Ok(())) => {
                    tracing::debug!(worker_id, file_id = %job.file_id, "Dispatched job");
                    self.in_flight.insert(
                        job.job_id,
                        InFlightJob {
                            file_id: job.file_id,
                            on_progress: job.on_progress,
                            reply: job.reply,
                        },
                    );
                }
                _ => {
                    tracing::warn!(worker_id, file_id = %job.file_id, "Worker is gone, abandoning job");
                    let _ = job.reply.send(Err(OrganizatextError::JobAbandoned { file_id: job.file_id }));
                }
            }
        }
    }
}

struct Shared {
    config: PoolConfig,
    processor: FileProcessor,
    state: Mutex<PoolState>,
    init_lock: tokio::sync::Mutex<()>,
}

impl Shared {
    fn handle_event(&self, event: WorkerEvent) {
        match event {
            WorkerEvent::Ready { worker_id } => {
                tracing::warn!(worker_id, "Unexpected ready signal after startup");
            }
            WorkerEvent::Progress { job_id, event, .. } => {
                let callback = self
                    .state
                    .lock()
                    .in_flight
                    .get(&job_id)
                    .and_then(|job| job.on_progress.clone());
                if let Some(callback) = callback {
                    if panic::catch_unwind(AssertUnwindSafe(|| callback(&event))).is_err() {
                        tracing::warn!(job_id, file_id = %event.file_id, "Progress callback panicked");
                    }
                }
            }
            WorkerEvent::Complete { worker_id, job_id, event } => {
                let finished = {
                    let mut state = self.state.lock();
                    let finished = state.in_flight.remove(&job_id);
                    state.idle.push_back(worker_id);
                    state.dispatch_pending();
                    finished
                };

                let Some(job) = finished else {
                    return;
                };
                tracing::debug!(
                    worker_id,
                    file_id = %job.file_id,
                    success = event.result.is_success(),
                    "Job completed"
                );
                let _ = job.reply.send(event.result.into_result());
            }
        }
    }
}

/// Consume worker events until every worker has stopped or the pool is dropped.
async fn dispatch_events(shared: Weak<Shared>, mut events: mpsc::UnboundedReceiver<WorkerEvent>) {
    while let Some(event) = events.recv().await {
        let Some(shared) = shared.upgrade() else {
            break;
        };
        shared.handle_event(event);
    }
}

/// Handle to a worker pool. Cloning is cheap and every clone drives the same pool.
#[derive(Clone)]
pub struct WorkerPool {
    shared: Arc<Shared>,
}

impl WorkerPool {
    /// Create a pool. No worker is started until [`initialize`](Self::initialize) or
    /// the first submission.
    pub fn new(config: PoolConfig, processor: FileProcessor) -> Self {
        Self {
            shared: Arc::new(Shared {
                config,
                processor,
                state: Mutex::new(PoolState::default()),
                init_lock: tokio::sync::Mutex::new(()),
            }),
        }
    }

    pub fn pool_size(&self) -> usize {
        self.shared.config.pool_size
    }

    pub fn is_initialized(&self) -> bool {
        self.shared.state.lock().running
    }

    /// Start the workers and wait until each one has reported ready.
    ///
    /// Does nothing when the pool is already running.
    pub async fn initialize(&self) -> Result<()> {
        if self.is_initialized() {
            return Ok(());
        }

        let _guard = self.shared.init_lock.lock().await;
        if self.is_initialized() {
            return Ok(());
        }

        let pool_size = self.shared.config.pool_size;
        if pool_size == 0 {
            return Err(OrganizatextError::validation("Worker pool size must be at least 1"));
        }

        let (events_tx, mut events_rx) = mpsc::unbounded_channel();
        let mut workers = Vec::with_capacity(pool_size);
        for worker_id in 0..pool_size {
            let (commands_tx, commands_rx) = mpsc::unbounded_channel();
            let processor = Arc::new(self.shared.processor.for_worker());
            let task = tokio::spawn(worker::run_worker(worker_id, processor, commands_rx, events_tx.clone()));
            workers.push(WorkerSlot {
                commands: commands_tx,
                task,
            });
        }
        drop(events_tx);

        let mut idle = VecDeque::with_capacity(pool_size);
        while idle.len() < pool_size {
            match events_rx.recv().await {
                Some(WorkerEvent::Ready { worker_id }) => idle.push_back(worker_id),
                Some(other) => tracing::warn!("Unexpected worker event during startup: {:?}", other),
                None => {
                    for worker in &workers {
                        worker.task.abort();
                    }
                    return Err(OrganizatextError::processing("Worker pool failed to start"));
                }
            }
        }

        let dispatcher = tokio::spawn(dispatch_events(Arc::downgrade(&self.shared), events_rx));

        {
            let mut state = self.shared.state.lock();
            state.workers = workers;
            state.idle = idle;
            state.dispatcher = Some(dispatcher);
            state.running = true;
            state.dispatch_pending();
        }

        tracing::info!(workers = pool_size, "Worker pool initialized");
        Ok(())
    }

    /// Queue `file` for processing.
    ///
    /// Starts the pool if needed. The file is dispatched immediately when a worker
    /// is idle; otherwise it waits behind earlier submissions.
    pub async fn submit(
        &self,
        file: InputFile,
        file_id: impl Into<String>,
        on_progress: Option<ProgressCallback>,
    ) -> Result<JobHandle> {
        self.initialize().await?;

        let file_id = file_id.into();
        let (reply, receiver) = oneshot::channel();

        {
            let mut state = self.shared.state.lock();
            if !state.running {
                // Terminated between initialization and enqueue.
                let _ = reply.send(Err(OrganizatextError::JobAbandoned {
                    file_id: file_id.clone(),
                }));
            } else {
                let job_id = state.next_job_id;
                state.next_job_id += 1;
                state.queue.push_back(QueuedJob {
                    job_id,
                    file_id: file_id.clone(),
                    file,
                    on_progress,
                    reply,
                });
                state.dispatch_pending();
            }
        }

        Ok(JobHandle::new(file_id, receiver))
    }

    /// Submit `file` and wait for its result.
    pub async fn process_file(
        &self,
        file: InputFile,
        file_id: impl Into<String>,
        on_progress: Option<ProgressCallback>,
    ) -> Result<FileRecord> {
        self.submit(file, file_id, on_progress).await?.await
    }

    pub fn stats(&self) -> PoolStats {
        let state = self.shared.state.lock();
        PoolStats {
            pool_size: self.shared.config.pool_size,
            active_jobs: state.in_flight.len(),
            queued_jobs: state.queue.len(),
            available_workers: state.idle.len(),
        }
    }

    /// Stop every worker and drop all queued and in-flight jobs.
    ///
    /// Their handles resolve with [`OrganizatextError::JobAbandoned`]. Files already
    /// being analysed run to completion in the background but their results are
    /// discarded.
    pub fn terminate(&self) {
        let (workers, dispatcher, queue, in_flight) = {
            let mut state = self.shared.state.lock();
            state.running = false;
            state.idle.clear();
            (
                std::mem::take(&mut state.workers),
                state.dispatcher.take(),
                std::mem::take(&mut state.queue),
                std::mem::take(&mut state.in_flight),
            )
        };

        for worker in &workers {
            worker.task.abort();
        }
        if let Some(dispatcher) = dispatcher {
            dispatcher.abort();
        }

        let abandoned = queue.len() + in_flight.len();
        drop(queue);
        drop(in_flight);

        tracing::info!(workers = workers.len(), abandoned, "Worker pool terminated");
    }
}

impl std::fmt::Debug for WorkerPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkerPool")
            .field("config", &self.shared.config)
            .field("stats", &self.stats())
            .finish()
    }
}
