//! Per-request trace id carried in Tokio task-local storage.
//!
//! `RequestTrace` opens the scope; error rendering and security logging read
//! it. Code running outside a request sees `"unknown"`.

use tokio::task_local;

const UNKNOWN: &str = "unknown";

task_local! {
    static TRACE_ID: String;
}

/// Trace id of the request being served on this task.
pub fn trace_id() -> String {
    TRACE_ID
        .try_with(Clone::clone)
        .unwrap_or_else(|_| UNKNOWN.to_string())
}

/// Run `future` with `trace_id` visible to everything it awaits.
pub async fn with_trace_id<F, R>(trace_id: String, future: F) -> R
where
    F: std::future::Future<Output = R>,
{
    TRACE_ID.scope(trace_id, future).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unknown_outside_request() {
        assert_eq!(trace_id(), "unknown");
    }

    #[tokio::test]
    async fn scoped_and_restored() {
        let seen = with_trace_id("req-1".into(), async {
            let outer = trace_id();
            let inner = with_trace_id("req-2".into(), async { trace_id() }).await;
            (outer, inner, trace_id())
        })
        .await;

        assert_eq!(seen, ("req-1".into(), "req-2".into(), "req-1".into()));
        assert_eq!(trace_id(), "unknown");
    }
}
