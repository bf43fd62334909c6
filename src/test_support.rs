use std::{
    borrow::Cow,
    num::NonZeroUsize,
    panic::AssertUnwindSafe,
    sync::{Arc, Mutex},
};

use futures::FutureExt;

use crate::{
    executor::{CaseCx, Executor, SpawnedCase, WrappedBody},
    outcome::CaseStatus,
};

#[derive(Debug, Default, Clone)]
pub struct EventLog(Arc<Mutex<Vec<String>>>);

impl EventLog {
    pub fn snapshot(&self) -> Vec<String> {
        self.0.lock().expect("not poisoned").clone()
    }
}

pub fn record(log: &EventLog, event: impl Into<String>) {
    log.0.lock().expect("not poisoned").push(event.into());
}

pub fn nonzero(value: usize) -> NonZeroUsize {
    NonZeroUsize::new(value).expect("nonzero")
}

/// Like the default executor, but keeps the outcomes around for assertions.
#[derive(Debug, Default, Clone)]
pub struct RecordingExecutor {
    outcomes: Arc<Mutex<Vec<(String, CaseStatus)>>>,
}

impl RecordingExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn outcomes(&self) -> Vec<(String, CaseStatus)> {
        self.outcomes.lock().expect("not poisoned").clone()
    }
}

impl Executor for RecordingExecutor {
    type CaseHandle = SpawnedCase;

    fn submit(&self, name: Cow<'static, str>, body: WrappedBody) -> SpawnedCase {
        let fut = body(CaseCx::new(name.clone()));
        let outcomes = Arc::clone(&self.outcomes);
        SpawnedCase::from(tokio::spawn(async move {
            let status = CaseStatus::from_unwind(AssertUnwindSafe(fut).catch_unwind().await);
            outcomes
                .lock()
                .expect("not poisoned")
                .push((name.into_owned(), status));
        }))
    }
}
