use std::sync::{Arc, Mutex};

use aviary::suite;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let mut suite = suite();
    suite.before_each(|| tracing::debug!("global setup"));

    let counter = Arc::new(Mutex::new(0_i32));
    let hook_counter = Arc::clone(&counter);
    let adds_counter = Arc::clone(&counter);

    let handle = suite
        .describe("math", move |g| {
            let hook_counter = Arc::clone(&hook_counter);
            g.before_each(move || *hook_counter.lock().expect("not poisoned") = 0);

            let adds_counter = Arc::clone(&adds_counter);
            g.it("adds", move |_cx| {
                assert_eq!(1 + 1, 2);
                *adds_counter.lock().expect("not poisoned") += 1;
            });
            g.it("subtracts", |_cx| assert_eq!(2 - 1, 1));
        })
        .expect("math declares cases");

    handle.await;
}
