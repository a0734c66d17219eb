use super::messages::{CompletionEvent, ProgressEvent, WorkerCommand, WorkerEvent};
use crate::processor::{FileProcessor, ProcessOutcome};
use std::sync::Arc;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};

/// Worker loop: announce readiness, then run one file at a time until the command
/// channel closes.
pub(super) async fn run_worker(
    worker_id: usize,
    processor: Arc<FileProcessor>,
    mut commands: UnboundedReceiver<WorkerCommand>,
    events: UnboundedSender<WorkerEvent>,
) {
    if events.send(WorkerEvent::Ready { worker_id }).is_err() {
        return;
    }

    while let Some(command) = commands.recv().await {
        match command {
            WorkerCommand::Process { job_id, file_id, file } => {
                let progress = WorkerEvent::Progress {
                    worker_id,
                    job_id,
                    event: ProgressEvent::processing(file_id.clone()),
                };
                if events.send(progress).is_err() {
                    break;
                }

                let file_name = file.name.clone();
                let processor = Arc::clone(&processor);
                let result = match tokio::task::spawn_blocking(move || processor.process(&file)).await {
                    Ok(outcome) => outcome,
                    Err(e) => {
                        tracing::warn!(worker_id, file = %file_name, "Worker task failed: {}", e);
                        ProcessOutcome::Failed {
                            error: format!("Worker task failed: {}", e),
                            file_name,
                        }
                    }
                };

                let complete = WorkerEvent::Complete {
                    worker_id,
                    job_id,
                    event: CompletionEvent { file_id, result },
                };
                if events.send(complete).is_err() {
                    break;
                }
            }
        }
    }

    tracing::debug!(worker_id, "Worker stopped");
}
