use std::{
    future::Future,
    pin::Pin,
    sync::Arc,
    task::{Context, Poll},
};

use futures::future::{JoinAll, join_all};

use crate::{
    executor::{Executor, WrappedBody},
    outcome::CaseFailure,
    registry::{GroupNotFound, Registry},
};

/// Drives one group against an executor.
pub struct GroupRunner<'r, E> {
    registry: &'r Registry,
    executor: &'r E,
}

impl<'r, E: Executor> GroupRunner<'r, E> {
    pub fn new(registry: &'r Registry, executor: &'r E) -> Self {
        Self { registry, executor }
    }

    /// Submit every case of `group` to the executor.
    ///
    /// Each case is wrapped as global-before, group-before, body, group-after,
    /// global-after, with unregistered hooks resolving to the no-op. The chain
    /// short-circuits at the first failure, which becomes the case's outcome:
    /// a failing before-hook suppresses the body, a failing body skips both
    /// after-hooks.
    ///
    /// Cases are submitted eagerly and run concurrently; group hooks run once
    /// per case. The returned handle joins all case completions, dropping it
    /// detaches the group.
    pub fn run(&self, group: &str) -> Result<GroupHandle<E::CaseHandle>, GroupNotFound> {
        let cases = self.registry.cases(group)?;
        let before_global = self.registry.global_before_each();
        let before_group = self.registry.before_each(group);
        let after_group = self.registry.after_each(group);
        let after_global = self.registry.global_after_each();

        tracing::debug!(target: "aviary", group, cases = cases.len(), "starting group");

        let handles: Vec<_> = cases
            .iter()
            .map(|case| {
                let case = Arc::clone(case);
                let before_global = before_global.clone();
                let before_group = before_group.clone();
                let after_group = after_group.clone();
                let after_global = after_global.clone();
                let name = case.name.clone();

                let body: WrappedBody = Box::new(move |cx| {
                    Box::pin(async move {
                        before_global.call().await.0.map_err(CaseFailure::Setup)?;
                        before_group.call().await.0.map_err(CaseFailure::Setup)?;
                        case.call(cx).await.0.map_err(CaseFailure::Error)?;
                        after_group.call().await.0.map_err(CaseFailure::Teardown)?;
                        after_global.call().await.0.map_err(CaseFailure::Teardown)?;
                        Ok(())
                    })
                });

                self.executor.submit(name, body)
            })
            .collect();

        Ok(GroupHandle {
            submitted: handles.len(),
            join: join_all(handles),
        })
    }
}

/// Completion handle for a started group.
///
/// Resolves once every case of the group has finished. Dropping it leaves the
/// cases running on the executor.
#[derive(Debug)]
pub struct GroupHandle<H: Future<Output = ()>> {
    submitted: usize,
    join: JoinAll<H>,
}

impl<H: Future<Output = ()>> GroupHandle<H> {
    /// The number of cases handed to the executor for this run.
    pub fn submitted(&self) -> usize {
        self.submitted
    }
}

impl<H: Future<Output = ()>> Future for GroupHandle<H> {
    type Output = ();

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        match Pin::new(&mut self.get_mut().join).poll(cx) {
            Poll::Ready(_) => Poll::Ready(()),
            Poll::Pending => Poll::Pending,
        }
    }
}
