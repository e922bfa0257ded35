//! Async runtime helpers
//!
//! Background work (the coordinate poller) runs on the tokio runtime created by
//! [`crate::run_native`], while the UI thread only ever does non-blocking
//! `try_read` on shared state.

// Re-export sync primitives shared between the UI thread and background tasks
pub use tokio::sync::RwLock;

/// Spawn an async task on the current tokio runtime.
///
/// With the `profiling` feature the task body is wrapped in a profiling scope so
/// spawned work is easy to find in traces.
pub fn spawn<F>(future: F) -> tokio::task::JoinHandle<F::Output>
where
    F: std::future::Future + Send + 'static,
    F::Output: Send + 'static,
{
    #[cfg(feature = "profiling")]
    {
        tokio::spawn(async move {
            ::profiling::scope!(
                "async_runtime::spawn",
                format!("task_type={}", std::any::type_name::<F>()).as_str()
            );
            future.await
        })
    }
    #[cfg(not(feature = "profiling"))]
    {
        tokio::spawn(future)
    }
}
