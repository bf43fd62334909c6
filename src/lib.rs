//! Grouped test declaration with lifecycle hooks on top of pluggable test
//! executors.
//!
//! Declare groups of named cases with [`suite`] and [`Suite::describe`],
//! attach per-group and global setup/teardown hooks, and let an
//! [`Executor`](executor::Executor) run every case concurrently with its
//! hooks wrapped around it.

pub mod case;
pub mod executor;
pub mod hook;
pub mod outcome;

mod registry;
pub use registry::*;

mod runner;
pub use runner::*;

mod suite;
pub use suite::*;

#[cfg(test)]
mod test_support;
