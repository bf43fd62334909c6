use std::{
    borrow::Cow,
    fmt::{self, Debug},
    future::Future,
    sync::Arc,
};

use futures::{
    FutureExt,
    future::{self, BoxFuture},
};

use crate::executor::CaseCx;

pub type CaseFuture = BoxFuture<'static, CaseResult>;

#[derive(Debug)]
pub struct CaseResult(pub Result<(), String>);

impl From<()> for CaseResult {
    fn from(_: ()) -> Self {
        Self(Ok(()))
    }
}

impl<E: Debug> From<Result<(), E>> for CaseResult {
    fn from(v: Result<(), E>) -> Self {
        CaseResult(v.map_err(|e| format!("{e:#?}")))
    }
}

pub trait CaseFn {
    fn call_case(&self, cx: CaseCx) -> CaseResult;
}

impl<F, T> CaseFn for F
where
    F: Fn(CaseCx) -> T,
    T: Into<CaseResult>,
{
    fn call_case(&self, cx: CaseCx) -> CaseResult {
        (self)(cx).into()
    }
}

pub trait AsyncCaseFn {
    fn call_case(&self, cx: CaseCx) -> CaseFuture;
}

impl<F, Fut, T> AsyncCaseFn for F
where
    F: Fn(CaseCx) -> Fut,
    Fut: Future<Output = T> + Send + 'static,
    T: Into<CaseResult> + 'static,
{
    fn call_case(&self, cx: CaseCx) -> CaseFuture {
        Box::pin((self)(cx).map(Into::into))
    }
}

#[derive(Clone)]
pub enum CaseFnHandle {
    Sync(Arc<dyn CaseFn + Send + Sync>),
    Async(Arc<dyn AsyncCaseFn + Send + Sync>),
}

impl Debug for CaseFnHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sync(_) => write!(f, "Sync(...)"),
            Self::Async(_) => write!(f, "Async(...)"),
        }
    }
}

impl CaseFnHandle {
    pub fn from_sync<F, T>(f: F) -> Self
    where
        F: Fn(CaseCx) -> T + Send + Sync + 'static,
        T: Into<CaseResult>,
    {
        Self::Sync(Arc::new(f))
    }

    pub fn from_async<F, Fut, T>(f: F) -> Self
    where
        F: Fn(CaseCx) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = T> + Send + 'static,
        T: Into<CaseResult> + 'static,
    {
        Self::Async(Arc::new(f))
    }

    pub fn call(&self, cx: CaseCx) -> CaseFuture {
        match self {
            Self::Sync(f) => {
                let f = Arc::clone(f);
                Box::pin(future::lazy(move |_| f.call_case(cx)))
            }
            Self::Async(f) => f.call_case(cx),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Case {
    function: CaseFnHandle,
    pub name: Cow<'static, str>,
}

impl Case {
    pub fn new(function: CaseFnHandle, name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            function,
            name: name.into(),
        }
    }

    pub(crate) fn call(&self, cx: CaseCx) -> CaseFuture {
        self.function.call(cx)
    }
}
