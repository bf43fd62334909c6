use std::{borrow::Cow, future::Future};

use crate::{
    case::{Case, CaseFnHandle, CaseResult},
    executor::{CaseCx, DefaultExecutor, Executor},
    hook::{Hook, HookResult},
    registry::{GLOBAL_GROUP, GroupNotFound, Registry},
    runner::{GroupHandle, GroupRunner},
};

/// Build a suite running on the [`DefaultExecutor`].
pub fn suite() -> Suite<DefaultExecutor> {
    Suite {
        registry: Registry::new(),
        executor: DefaultExecutor::new(),
    }
}

/// The declarative entry point: groups, cases, and hooks.
///
/// Declaration is synchronous; [`describe`](Suite::describe) runs the group's
/// definition closure to completion and only then starts the group on the
/// executor. The returned [`GroupHandle`] may be awaited for completion or
/// dropped to leave the group running.
#[derive(Debug)]
pub struct Suite<E> {
    registry: Registry,
    executor: E,
}

impl<E> Suite<E> {
    pub fn with_executor<WithExecutor: Executor>(
        self,
        executor: WithExecutor,
    ) -> Suite<WithExecutor> {
        Suite {
            registry: self.registry,
            executor,
        }
    }

    /// Register a hook running before every case of every group.
    pub fn before_each<F, T>(&mut self, hook: F)
    where
        F: Fn() -> T + Send + Sync + 'static,
        T: Into<HookResult>,
    {
        self.registry
            .set_before_each(GLOBAL_GROUP, Hook::from_sync(hook));
    }

    pub fn before_each_async<F, Fut, T>(&mut self, hook: F)
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = T> + Send + 'static,
        T: Into<HookResult> + 'static,
    {
        self.registry
            .set_before_each(GLOBAL_GROUP, Hook::from_async(hook));
    }

    /// Register a hook running after every case of every group.
    pub fn after_each<F, T>(&mut self, hook: F)
    where
        F: Fn() -> T + Send + Sync + 'static,
        T: Into<HookResult>,
    {
        self.registry
            .set_after_each(GLOBAL_GROUP, Hook::from_sync(hook));
    }

    pub fn after_each_async<F, Fut, T>(&mut self, hook: F)
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = T> + Send + 'static,
        T: Into<HookResult> + 'static,
    {
        self.registry
            .set_after_each(GLOBAL_GROUP, Hook::from_async(hook));
    }
}

impl<E: Executor> Suite<E> {
    /// Declare a group and start it.
    ///
    /// The definition closure registers cases and hooks through the passed
    /// [`GroupCtx`]; once it returns, every case of the group is submitted to
    /// the executor. A definition registering no case fails with
    /// [`GroupNotFound`].
    pub fn describe<F>(
        &mut self,
        name: impl Into<Cow<'static, str>>,
        def: F,
    ) -> Result<GroupHandle<E::CaseHandle>, GroupNotFound>
    where
        F: FnOnce(&mut GroupCtx<'_>),
    {
        let name = name.into();
        let mut ctx = GroupCtx {
            group: name.clone(),
            registry: &mut self.registry,
        };
        def(&mut ctx);
        self.run(&name)
    }

    /// Start a previously declared group by name.
    pub fn run(&self, group: &str) -> Result<GroupHandle<E::CaseHandle>, GroupNotFound> {
        GroupRunner::new(&self.registry, &self.executor).run(group)
    }
}

/// The scope of one group declaration.
///
/// Handed to the definition closure of [`Suite::describe`]; everything
/// registered through it belongs to that group.
pub struct GroupCtx<'r> {
    group: Cow<'static, str>,
    registry: &'r mut Registry,
}

impl GroupCtx<'_> {
    /// Register a case.
    pub fn it<F, T>(&mut self, name: impl Into<Cow<'static, str>>, body: F)
    where
        F: Fn(CaseCx) -> T + Send + Sync + 'static,
        T: Into<CaseResult>,
    {
        self.case(Case::new(CaseFnHandle::from_sync(body), name));
    }

    /// Register a case with an asynchronous body.
    pub fn it_async<F, Fut, T>(&mut self, name: impl Into<Cow<'static, str>>, body: F)
    where
        F: Fn(CaseCx) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = T> + Send + 'static,
        T: Into<CaseResult> + 'static,
    {
        self.case(Case::new(CaseFnHandle::from_async(body), name));
    }

    /// Register a pre-built case.
    pub fn case(&mut self, case: Case) {
        self.registry.add_case(self.group.clone(), case);
    }

    /// Register the group's setup hook, replacing any previous one.
    pub fn before_each<F, T>(&mut self, hook: F)
    where
        F: Fn() -> T + Send + Sync + 'static,
        T: Into<HookResult>,
    {
        self.registry
            .set_before_each(self.group.clone(), Hook::from_sync(hook));
    }

    pub fn before_each_async<F, Fut, T>(&mut self, hook: F)
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = T> + Send + 'static,
        T: Into<HookResult> + 'static,
    {
        self.registry
            .set_before_each(self.group.clone(), Hook::from_async(hook));
    }

    /// Register the group's teardown hook, replacing any previous one.
    pub fn after_each<F, T>(&mut self, hook: F)
    where
        F: Fn() -> T + Send + Sync + 'static,
        T: Into<HookResult>,
    {
        self.registry
            .set_after_each(self.group.clone(), Hook::from_sync(hook));
    }

    pub fn after_each_async<F, Fut, T>(&mut self, hook: F)
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = T> + Send + 'static,
        T: Into<HookResult> + 'static,
    {
        self.registry
            .set_after_each(self.group.clone(), Hook::from_async(hook));
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::test_support::{EventLog, RecordingExecutor, record};

    use super::*;

    #[tokio::test]
    async fn describe_registers_and_starts_the_group() {
        let events = EventLog::default();
        let body_events = events.clone();

        let executor = RecordingExecutor::new();
        let mut suite = suite().with_executor(executor.clone());
        let handle = suite
            .describe("math", |g| {
                let events = body_events.clone();
                g.it("adds", move |_cx| record(&events, "adds"));
            })
            .expect("group has cases");
        handle.await;

        assert_eq!(events.snapshot(), ["adds"]);
        assert_eq!(executor.outcomes().len(), 1);
    }

    #[tokio::test]
    async fn describe_without_cases_reports_the_group_as_missing() {
        let mut suite = suite().with_executor(RecordingExecutor::new());
        let err = suite.describe("empty", |_g| {}).unwrap_err();
        assert_eq!(err.group, "empty");
    }

    #[tokio::test]
    async fn hooks_outside_any_group_are_global() {
        let events = EventLog::default();
        let before = events.clone();
        let after = events.clone();
        let body = events.clone();

        let executor = RecordingExecutor::new();
        let mut suite = suite().with_executor(executor);
        suite.before_each(move || record(&before, "global-before"));
        suite.after_each(move || record(&after, "global-after"));

        suite
            .describe("math", |g| {
                let events = body.clone();
                g.it("adds", move |_cx| record(&events, "adds"));
            })
            .expect("group has cases")
            .await;

        assert_eq!(
            events.snapshot(),
            ["global-before", "adds", "global-after"],
        );
    }

    #[tokio::test]
    async fn redeclaring_a_group_appends_and_resubmits() {
        let executor = RecordingExecutor::new();
        let mut suite = suite().with_executor(executor.clone());

        suite
            .describe("math", |g| g.it("adds", |_cx| {}))
            .expect("group has cases")
            .await;
        let handle = suite
            .describe("math", |g| g.it("subtracts", |_cx| {}))
            .expect("group has cases");
        assert_eq!(handle.submitted(), 2);
        handle.await;

        assert_eq!(executor.outcomes().len(), 3);
    }

    #[tokio::test]
    async fn run_restarts_a_declared_group() {
        let executor = RecordingExecutor::new();
        let mut suite = suite().with_executor(executor.clone());

        suite
            .describe("math", |g| g.it("adds", |_cx| {}))
            .expect("group has cases")
            .await;
        suite.run("math").expect("group still declared").await;

        assert_eq!(executor.outcomes().len(), 2);
    }

    #[tokio::test]
    async fn async_declarations_round_trip() {
        let events = EventLog::default();
        let hook_events = events.clone();
        let body_events = events.clone();

        let executor = RecordingExecutor::new();
        let mut suite = suite().with_executor(executor);
        suite
            .describe("io", |g| {
                let hook_events = hook_events.clone();
                g.before_each_async(move || {
                    let events = hook_events.clone();
                    async move { record(&events, "connect") }
                });
                let body_events = body_events.clone();
                g.it_async("reads", move |_cx| {
                    let events = body_events.clone();
                    async move { record(&events, "reads") }
                });
            })
            .expect("group has cases")
            .await;

        assert_eq!(events.snapshot(), ["connect", "reads"]);
    }
}
