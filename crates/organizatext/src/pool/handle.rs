use crate::processor::FileRecord;
use crate::{OrganizatextError, Result};
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::sync::oneshot;

/// Pending result of a submitted file.
///
/// Resolves with the [`FileRecord`] on success, [`OrganizatextError::JobFailed`]
/// when processing failed, or [`OrganizatextError::JobAbandoned`] when the pool was
/// terminated first.
#[derive(Debug)]
#[must_use = "a JobHandle does nothing unless awaited"]
pub struct JobHandle {
    file_id: String,
    receiver: oneshot::Receiver<Result<FileRecord>>,
}

impl JobHandle {
    pub(super) fn new(file_id: String, receiver: oneshot::Receiver<Result<FileRecord>>) -> Self {
        Self { file_id, receiver }
    }

    pub fn file_id(&self) -> &str {
        &self.file_id
    }
}

impl Future for JobHandle {
    type Output = Result<FileRecord>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = &mut *self;
        match Pin::new(&mut this.receiver).poll(cx) {
            Poll::Ready(Ok(result)) => Poll::Ready(result),
            Poll::Ready(Err(_)) => Poll::Ready(Err(OrganizatextError::JobAbandoned {
                file_id: this.file_id.clone(),
            })),
            Poll::Pending => Poll::Pending,
        }
    }
}
