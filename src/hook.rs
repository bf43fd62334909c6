//! Hook normalization.
//!
//! User hooks come in two shapes: plain functions and functions returning a
//! future. Both are stored as a [`Hook`], whose [`call`](Hook::call) always
//! yields a future that is awaitable exactly once per invocation. A failing
//! hook surfaces through that future; calling a hook never fails
//! synchronously, whichever shape it started as.

use std::{
    fmt::{self, Debug},
    future::Future,
    sync::Arc,
};

use futures::{
    FutureExt,
    future::{self, BoxFuture},
};

pub type HookFuture = BoxFuture<'static, HookResult>;

#[derive(Debug)]
pub struct HookResult(pub Result<(), String>);

impl From<()> for HookResult {
    fn from(_: ()) -> Self {
        Self(Ok(()))
    }
}

impl<E: Debug> From<Result<(), E>> for HookResult {
    fn from(v: Result<(), E>) -> Self {
        HookResult(v.map_err(|e| format!("{e:#?}")))
    }
}

pub trait HookFn {
    fn call_hook(&self) -> HookResult;
}

impl<F, T> HookFn for F
where
    F: Fn() -> T,
    T: Into<HookResult>,
{
    fn call_hook(&self) -> HookResult {
        (self)().into()
    }
}

pub trait AsyncHookFn {
    fn call_hook(&self) -> HookFuture;
}

impl<F, Fut, T> AsyncHookFn for F
where
    F: Fn() -> Fut,
    Fut: Future<Output = T> + Send + 'static,
    T: Into<HookResult> + 'static,
{
    fn call_hook(&self) -> HookFuture {
        Box::pin((self)().map(Into::into))
    }
}

/// A normalized setup or teardown hook.
///
/// The [`Noop`](Hook::Noop) variant is the pre-normalized default used when no
/// hook was registered. It does no work and never fails.
#[derive(Clone, Default)]
pub enum Hook {
    #[default]
    Noop,
    Sync(Arc<dyn HookFn + Send + Sync>),
    Async(Arc<dyn AsyncHookFn + Send + Sync>),
}

impl Debug for Hook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Noop => f.write_str("Noop"),
            Self::Sync(_) => write!(f, "Sync(...)"),
            Self::Async(_) => write!(f, "Async(...)"),
        }
    }
}

impl Hook {
    pub fn noop() -> Self {
        Self::Noop
    }

    pub fn from_sync<F, T>(f: F) -> Self
    where
        F: Fn() -> T + Send + Sync + 'static,
        T: Into<HookResult>,
    {
        Self::Sync(Arc::new(f))
    }

    pub fn from_async<F, Fut, T>(f: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = T> + Send + 'static,
        T: Into<HookResult> + 'static,
    {
        Self::Async(Arc::new(f))
    }

    /// Invoke the hook, producing a fresh future per call.
    ///
    /// A synchronous hook runs when the future is first polled, not when it is
    /// created, so its effect and its failure both travel through the future.
    pub fn call(&self) -> HookFuture {
        match self {
            Hook::Noop => Box::pin(future::ready(HookResult(Ok(())))),
            Hook::Sync(f) => {
                let f = Arc::clone(f);
                Box::pin(future::lazy(move |_| f.call_hook()))
            }
            Hook::Async(f) => f.call_hook(),
        }
    }
}
