//! Case execution for aviary.
//!
//! An executor is the facility that actually runs a named case. This crate
//! only hands it fully wrapped case bodies; the executor owns scheduling,
//! isolation, panic handling at the case boundary, and outcome reporting.
//!
//! The executor supplies every case with a [`CaseCx`] handle and reports
//! pass/fail through its own channel (the implementations in this crate emit
//! `tracing` events). Submission is eager: once [`submit`](Executor::submit)
//! returns, the case runs to completion whether or not the returned handle is
//! ever awaited.
//!
//! Implement [`Executor`] to plug in a different execution backend.

use std::{borrow::Cow, future::Future};

use futures::future::BoxFuture;

use crate::outcome::{CaseFailure, CaseStatus};

mod default;
pub use default::*;

mod thread;
pub use thread::*;

/// A case body after hook wrapping, ready for submission.
///
/// The executor calls it with the [`CaseCx`] it created for the case and
/// drives the returned future. An `Err` resolution is the case's failure.
pub type WrappedBody =
    Box<dyn FnOnce(CaseCx) -> BoxFuture<'static, Result<(), CaseFailure>> + Send + 'static>;

/// The per-case execution context handle.
///
/// Created by the executor and passed into the case body.
#[derive(Debug, Clone)]
pub struct CaseCx {
    name: Cow<'static, str>,
}

impl CaseCx {
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// A strategy for running submitted cases.
///
/// Each submitted case must run in its own logical unit of the executor, so
/// that a suspension or failure in one case never blocks another. The
/// returned handle resolves once the case has finished; dropping it must
/// detach rather than cancel.
pub trait Executor {
    type CaseHandle: Future<Output = ()> + Send + 'static;

    fn submit(&self, name: Cow<'static, str>, body: WrappedBody) -> Self::CaseHandle;
}

pub(crate) fn report_outcome(name: &str, status: &CaseStatus) {
    match status {
        CaseStatus::Passed => tracing::info!(target: "aviary", case = name, "passed"),
        CaseStatus::Failed(failure) => {
            tracing::error!(target: "aviary", case = name, error = %failure, "failed")
        }
    }
}
