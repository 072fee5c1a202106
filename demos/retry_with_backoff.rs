//! # Example: retry_with_backoff
//!
//! Demonstrates how [`retryit`] retries a flaky operation according to a
//! [`BackoffPolicy`], and how the last error comes back once attempts run out.
//!
//! ## Flow
//! ```text
//! retry(&policy, op)
//!   ├─► attempt 1 → Err("boom #1")
//!   ├─► sleep(100ms)
//!   ├─► attempt 2 → Err("boom #2")
//!   ├─► sleep(≈200ms, jittered)
//!   └─► attempt 3 → Ok(9)
//! ```
//!
//! ## Run
//! ```bash
//! cargo run --example retry_with_backoff
//! ```

use std::{
    sync::atomic::{AtomicU32, Ordering},
    time::Duration,
};

use retryit::{BackoffConfig, BackoffPolicy, CONSTANT_DELAY, RetryMe};

static FAIL_COUNT: AtomicU32 = AtomicU32::new(0);

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Define backoff (exponential + jitter)
    let policy = BackoffPolicy::new(BackoffConfig {
        attempts: 5,
        initial_delay: Duration::from_millis(100),
        max_delay: Duration::from_secs(2),
        factor: 2.0,
        jitter: 0.1,
    });

    // 2. An operation that fails 2 times before succeeding
    let square = policy
        .retry(|| async {
            let attempt = FAIL_COUNT.fetch_add(1, Ordering::Relaxed) + 1;
            println!("[flaky] attempt {attempt}");

            if attempt <= 2 {
                println!("[flaky] simulated failure #{attempt}");
                Err(format!("boom #{attempt}"))
            } else {
                println!("[flaky] success on attempt {attempt}");
                Ok(attempt * attempt)
            }
        })
        .await?;
    println!("[main] result = {square}");

    // 3. An operation that never succeeds: the last error is returned as-is
    let mut attempt = 0;
    let err = retryit::retry(&CONSTANT_DELAY, || {
        attempt += 1;
        let n = attempt;
        async move { Err::<(), _>(format!("I failed {n} times")) }
    })
    .await
    .unwrap_err();
    println!("[main] gave up: {err}");

    // 4. The sentinel error for "retry me, nothing to add"
    let res: Result<(), RetryMe> =
        retryit::retry(&CONSTANT_DELAY, || async { Err(RetryMe) }).await;
    println!("[main] sentinel: {res:?}");

    println!("[main] done.");
    Ok(())
}
