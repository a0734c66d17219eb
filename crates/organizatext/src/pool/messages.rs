//! Messages exchanged between the pool and its workers.

use crate::processor::{InputFile, ProcessOutcome};
use serde::{Deserialize, Serialize};

/// Command sent from the pool to one worker.
#[derive(Debug)]
pub(crate) enum WorkerCommand {
    Process {
        job_id: u64,
        file_id: String,
        file: InputFile,
    },
}

/// Event sent from a worker to the pool's dispatcher.
#[derive(Debug)]
pub(crate) enum WorkerEvent {
    /// Sent once, when the worker has started.
    Ready { worker_id: usize },
    Progress {
        worker_id: usize,
        job_id: u64,
        event: ProgressEvent,
    },
    Complete {
        worker_id: usize,
        job_id: u64,
        event: CompletionEvent,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Processing,
}

/// Emitted when a worker starts on a file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressEvent {
    pub file_id: String,
    pub status: JobStatus,
    /// Always 0; the processor does not report partial progress.
    pub progress: u8,
}

impl ProgressEvent {
    pub(crate) fn processing(file_id: impl Into<String>) -> Self {
        Self {
            file_id: file_id.into(),
            status: JobStatus::Processing,
            progress: 0,
        }
    }
}

/// Terminal result of one file.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionEvent {
    pub file_id: String,
    pub result: ProcessOutcome,
}
