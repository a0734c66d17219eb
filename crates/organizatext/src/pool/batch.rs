use super::{CompletionEvent, ProgressCallback, WorkerPool};
use crate::OrganizatextError;
use crate::processor::{InputFile, ProcessOutcome};
use serde::Serialize;

/// Outcome of [`WorkerPool::process_batch`].
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    /// One entry per submitted file, in submission order.
    pub results: Vec<CompletionEvent>,
    pub processed: usize,
    pub failed: usize,
}

impl BatchReport {
    fn from_results(results: Vec<CompletionEvent>) -> Self {
        let processed = results.iter().filter(|r| r.result.is_success()).count();
        let failed = results.len() - processed;
        Self {
            results,
            processed,
            failed,
        }
    }
}

fn failed_outcome(error: OrganizatextError, file_name: String) -> ProcessOutcome {
    match error {
        OrganizatextError::JobFailed { file_name, message } => ProcessOutcome::Failed {
            error: message,
            file_name,
        },
        other => ProcessOutcome::Failed {
            error: other.to_string(),
            file_name,
        },
    }
}

impl WorkerPool {
    /// Process many files, collecting every outcome.
    ///
    /// All files are queued up front; individual failures are reported in the
    /// result list and never abort the batch. Each file gets a random id.
    pub async fn process_batch(&self, files: Vec<InputFile>, on_progress: Option<ProgressCallback>) -> BatchReport {
        let mut pending = Vec::with_capacity(files.len());

        for file in files {
            let file_id = uuid::Uuid::new_v4().to_string();
            let file_name = file.name.clone();
            let handle = self.submit(file, file_id.clone(), on_progress.clone()).await;
            pending.push((file_id, file_name, handle));
        }

        let mut results = Vec::with_capacity(pending.len());
        for (file_id, file_name, handle) in pending {
            let outcome = match handle {
                Ok(handle) => match handle.await {
                    Ok(record) => ProcessOutcome::Processed(Box::new(record)),
                    Err(e) => failed_outcome(e, file_name),
                },
                Err(e) => failed_outcome(e, file_name),
            };
            results.push(CompletionEvent { file_id, result: outcome });
        }

        let report = BatchReport::from_results(results);
        tracing::info!(
            processed = report.processed,
            failed = report.failed,
            "Batch processing complete"
        );
        report
    }
}
