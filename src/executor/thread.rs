use std::{
    borrow::Cow,
    future::Future,
    num::NonZeroUsize,
    panic::{AssertUnwindSafe, catch_unwind},
    pin::Pin,
    task::{Context, Poll},
    thread,
};

use futures::{channel::oneshot, executor::block_on, future::BoxFuture};

use crate::{
    executor::{CaseCx, Executor, WrappedBody, report_outcome},
    outcome::{CaseFailure, CaseStatus},
};

/// Runs cases on a fixed set of worker threads, no async runtime required.
///
/// Each worker drives one case future at a time to completion, so a single
/// worker serializes everything submitted to it. Submission itself never
/// blocks; queued cases wait for a free worker.
#[derive(Debug)]
pub struct ThreadExecutor {
    submit_job: crossbeam_channel::Sender<CaseJob>,
    _workers: Vec<thread::JoinHandle<()>>,
}

struct CaseJob {
    name: Cow<'static, str>,
    fut: BoxFuture<'static, Result<(), CaseFailure>>,
    done: oneshot::Sender<()>,
}

impl Default for ThreadExecutor {
    fn default() -> Self {
        Self::build(thread::available_parallelism().unwrap_or(NonZeroUsize::MIN))
    }
}

impl ThreadExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_thread_count(self, count: NonZeroUsize) -> Self {
        Self::build(count)
    }

    fn build(count: NonZeroUsize) -> Self {
        let (itx, irx) = crossbeam_channel::unbounded::<CaseJob>();
        let workers = (0..count.get())
            .map(|_| {
                let irx = irx.clone();
                thread::spawn(move || {
                    while let Ok(CaseJob { name, fut, done }) = irx.recv() {
                        let status =
                            CaseStatus::from_unwind(catch_unwind(AssertUnwindSafe(|| {
                                block_on(fut)
                            })));
                        report_outcome(&name, &status);
                        // Nobody waiting on the case is fine.
                        let _ = done.send(());
                    }
                })
            })
            .collect();

        Self {
            submit_job: itx,
            _workers: workers,
        }
    }
}

impl Executor for ThreadExecutor {
    type CaseHandle = PooledCase;

    fn submit(&self, name: Cow<'static, str>, body: WrappedBody) -> PooledCase {
        let fut = body(CaseCx::new(name.clone()));
        let (done, waiter) = oneshot::channel();
        let send_res = self.submit_job.send(CaseJob { name, fut, done });
        if let Err(crossbeam_channel::SendError(job)) = send_res {
            // Workers only exit once every sender is gone, so this cannot
            // happen while the executor is alive; complete the handle anyway.
            let _ = job.done.send(());
        }
        PooledCase { done: waiter }
    }
}

/// Completion handle for a case queued on a [`ThreadExecutor`].
///
/// Resolves when the case finished. Dropping it detaches the case.
#[derive(Debug)]
pub struct PooledCase {
    done: oneshot::Receiver<()>,
}

impl Future for PooledCase {
    type Output = ();

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        match Pin::new(&mut self.get_mut().done).poll(cx) {
            Poll::Ready(_) => Poll::Ready(()),
            Poll::Pending => Poll::Pending,
        }
    }
}
