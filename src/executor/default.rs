use std::{
    borrow::Cow,
    future::Future,
    panic::AssertUnwindSafe,
    pin::Pin,
    task::{Context, Poll},
};

use futures::FutureExt;
use tokio::task::JoinHandle;

use crate::{
    executor::{CaseCx, Executor, WrappedBody, report_outcome},
    outcome::CaseStatus,
};

/// Runs every case as its own task on the ambient tokio runtime.
///
/// Requires a running runtime at submission time.
#[derive(Debug, Default)]
pub struct DefaultExecutor;

impl DefaultExecutor {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Executor for DefaultExecutor {
    type CaseHandle = SpawnedCase;

    fn submit(&self, name: Cow<'static, str>, body: WrappedBody) -> SpawnedCase {
        let fut = body(CaseCx::new(name.clone()));
        SpawnedCase::from(tokio::spawn(async move {
            let status = CaseStatus::from_unwind(AssertUnwindSafe(fut).catch_unwind().await);
            report_outcome(&name, &status);
        }))
    }
}

/// Completion handle for a case running as a spawned task.
///
/// Resolves when the task finished. Dropping it detaches the task.
#[derive(Debug)]
pub struct SpawnedCase {
    task: JoinHandle<()>,
}

impl From<JoinHandle<()>> for SpawnedCase {
    fn from(task: JoinHandle<()>) -> Self {
        Self { task }
    }
}

impl Future for SpawnedCase {
    type Output = ();

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        // Panics are caught before the task boundary, a join error can only
        // mean the runtime is shutting down.
        match Pin::new(&mut self.get_mut().task).poll(cx) {
            Poll::Ready(_) => Poll::Ready(()),
            Poll::Pending => Poll::Pending,
        }
    }
}
