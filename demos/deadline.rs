//! # Example: deadline
//!
//! Bounds a retry loop with a [`Context`] deadline and prints every lifecycle
//! event through the built-in [`LogWriter`].
//!
//! The context is also handed to the operation, so its own work can stop early.
//!
//! ## Run
//! ```bash
//! cargo run --example deadline --features logging
//! ```

use std::{sync::Arc, time::Duration};

use retryit::{
    CONSTANT_DELAY, Config, Context, Executor, LogWriter, RetryError, RetryMe, forward,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Executor with an event bus and a stdout subscriber
    let executor = Executor::new(Config {
        bus_capacity: 128,
        ..Config::default()
    });
    let listener = executor
        .bus()
        .map(|bus| tokio::spawn(forward(bus.subscribe(), Arc::new(LogWriter::new()))));

    // 2. At most 1.2s in total, whatever the policy says (5 × 500ms would need 2s)
    let ctx = Context::new().with_timeout(Duration::from_millis(1200));

    let res: Result<(), RetryError<RetryMe>> = executor
        .retry_with_context(&ctx, &CONSTANT_DELAY, |ctx| async move {
            // context-aware work: give up early if the caller is already done
            if ctx.is_done() {
                return Ok(());
            }
            Err(RetryMe)
        })
        .await;

    match res {
        Err(RetryError::Cancelled(reason)) => println!("[main] stopped: {reason}"),
        other => println!("[main] finished: {other:?}"),
    }

    // 3. Let the listener drain, then shut it down
    drop(executor);
    if let Some(listener) = listener {
        let skipped = listener.await?;
        println!("[main] listener done, skipped={skipped}");
    }
    Ok(())
}
