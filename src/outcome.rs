use std::any::Any;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CaseStatus {
    Passed,
    Failed(CaseFailure),
}

impl CaseStatus {
    pub fn passed(&self) -> bool {
        matches!(self, CaseStatus::Passed)
    }

    pub fn failed(&self) -> bool {
        matches!(self, CaseStatus::Failed(_))
    }

    pub fn from_unwind(
        result: Result<Result<(), CaseFailure>, Box<dyn Any + Send + 'static>>,
    ) -> Self {
        match result {
            Ok(Ok(())) => CaseStatus::Passed,
            Ok(Err(failure)) => CaseStatus::Failed(failure),
            Err(payload) => {
                CaseStatus::Failed(CaseFailure::Panicked(downcast_panic_payload(payload)))
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum CaseFailure {
    #[error("setup hook failed: {0}")]
    Setup(String),

    #[error("{0}")]
    Error(String),

    #[error("teardown hook failed: {0}")]
    Teardown(String),

    #[error("case panicked: {0}")]
    Panicked(String),
}

pub fn downcast_panic_payload(err: Box<dyn Any + Send + 'static>) -> String {
    err.downcast::<&'static str>()
        .map(|s| s.to_string())
        .or_else(|err| err.downcast::<String>().map(|s| *s))
        .unwrap_or_else(|_| String::from("non-string panic payload"))
}
