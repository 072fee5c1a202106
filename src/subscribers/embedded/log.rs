//! # LogWriter: simple event printer
//!
//! A minimal subscriber that prints incoming [`Event`]s to stdout.
//! Use it for tests or demos.
//!
//! ## Example output
//! ```text
//! [starting] attempt=1
//! [failed] attempt=1 err="connection refused"
//! [backoff] delay=500ms after_attempt=1 err="connection refused"
//! [succeeded] attempt=2
//! [exhausted] attempts=5 err="connection refused"
//! [cancelled] after_attempt=1 reason=deadline_exceeded
//! ```

use async_trait::async_trait;

use crate::events::{Event, EventKind};
use crate::subscribers::Subscribe;

/// Event writer subscriber.
#[derive(Default)]
pub struct LogWriter;

impl LogWriter {
    /// Construct a new [`LogWriter`].
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Renders one event as a log line.
    pub fn format(e: &Event) -> String {
        let attempt = e.attempt.unwrap_or_default();
        let err = e.error.as_deref().unwrap_or("");
        match e.kind {
            EventKind::AttemptStarting => format!("[starting] attempt={attempt}"),
            EventKind::AttemptFailed => format!("[failed] attempt={attempt} err={err:?}"),
            EventKind::AttemptSucceeded => format!("[succeeded] attempt={attempt}"),
            EventKind::BackoffScheduled => format!(
                "[backoff] delay={:?} after_attempt={attempt} err={err:?}",
                e.delay.unwrap_or_default()
            ),
            EventKind::AttemptsExhausted => {
                format!("[exhausted] attempts={attempt} err={err:?}")
            }
            EventKind::Cancelled => format!(
                "[cancelled] after_attempt={attempt} reason={}",
                e.reason.map(|r| r.as_label()).unwrap_or("unknown")
            ),
        }
    }
}

#[async_trait]
impl Subscribe for LogWriter {
    async fn on_event(&self, e: &Event) {
        println!("{}", Self::format(e));
    }

    fn name(&self) -> &'static str {
        "LogWriter"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CancelReason;
    use std::time::Duration;

    #[test]
    fn test_format_backoff() {
        let ev = Event::new(EventKind::BackoffScheduled)
            .with_attempt(1)
            .with_delay(Duration::from_millis(500))
            .with_error("connection refused");
        assert_eq!(
            LogWriter::format(&ev),
            r#"[backoff] delay=500ms after_attempt=1 err="connection refused""#
        );
    }

    #[test]
    fn test_format_cancelled() {
        let ev = Event::new(EventKind::Cancelled)
            .with_attempt(1)
            .with_reason(CancelReason::DeadlineExceeded);
        assert_eq!(
            LogWriter::format(&ev),
            "[cancelled] after_attempt=1 reason=deadline_exceeded"
        );
    }
}
