use std::num::NonZeroUsize;

use aviary::{executor::ThreadExecutor, suite};

fn main() {
    tracing_subscriber::fmt::init();

    let executor =
        ThreadExecutor::new().with_thread_count(NonZeroUsize::new(2).expect("nonzero"));
    let mut suite = suite().with_executor(executor);
    suite.after_each(|| tracing::debug!("global teardown"));

    let handle = suite
        .describe("io", |g| {
            g.before_each_async(|| async { tracing::debug!("open connection") });
            g.it_async("reads", |_cx| async { Ok::<(), std::io::Error>(()) });
            g.it("writes", |cx| tracing::info!(case = cx.name(), "writing"));
        })
        .expect("io declares cases");

    futures::executor::block_on(handle);
}
