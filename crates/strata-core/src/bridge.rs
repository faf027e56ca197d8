//! Request/response bridge between callers and downstream work.
//!
//! [`dispatch`] runs a future as an independent task and hands its single
//! result back over a one-shot channel. [`fan_out`] runs several such
//! tasks concurrently and collects every result, failing on the first
//! error and cancelling whatever is still in flight.

use std::future::Future;

use tokio::sync::oneshot;
use tokio::task::JoinSet;
use tracing::Instrument;

use crate::error::AppError;
use crate::result::AppResult;

/// Run `work` on its own task and await its single result.
///
/// The task owns the sending half and sends exactly once. If it terminates
/// without sending (for example because it panicked), the caller receives
/// an `Internal` error instead of waiting forever. The task runs inside
/// the caller's current span.
pub async fn dispatch<F, T>(work: F) -> AppResult<T>
where
    F: Future<Output = AppResult<T>> + Send + 'static,
    T: Send + 'static,
{
    let (tx, rx) = oneshot::channel();

    tokio::spawn(
        async move {
            let result = work.await;
            // The caller may have gone away; nothing to deliver then.
            let _ = tx.send(result);
        }
        .in_current_span(),
    );

    match rx.await {
        Ok(result) => result,
        Err(_) => Err(AppError::internal(
            "worker terminated before producing a result",
        )),
    }
}

/// Launch `count` tasks built by `make_task` and collect their results.
///
/// Results are returned in completion order. The first error (or panic)
/// aborts collection; the remaining tasks are cancelled when the set is
/// dropped.
pub async fn fan_out<F, Fut, T>(count: usize, mut make_task: F) -> AppResult<Vec<T>>
where
    F: FnMut(usize) -> Fut,
    Fut: Future<Output = AppResult<T>> + Send + 'static,
    T: Send + 'static,
{
    let mut set = JoinSet::new();
    for index in 0..count {
        set.spawn(make_task(index).in_current_span());
    }

    let mut results = Vec::with_capacity(count);
    while let Some(joined) = set.join_next().await {
        match joined {
            Ok(Ok(value)) => results.push(value),
            Ok(Err(e)) => return Err(e),
            Err(join_err) => {
                return Err(AppError::internal(format!(
                    "worker terminated before producing a result: {join_err}"
                )));
            }
        }
    }

    Ok(results)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use super::*;
    use crate::error::ErrorKind;

    #[tokio::test]
    async fn test_dispatch_returns_value() {
        let value = dispatch(async { Ok::<_, AppError>(42) }).await.unwrap();
        assert_eq!(value, 42);
    }

    #[tokio::test]
    async fn test_dispatch_passes_error_through() {
        let err = dispatch(async { Err::<(), _>(AppError::not_found("user is not found")) })
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
        assert_eq!(err.message, "user is not found");
    }

    #[tokio::test]
    async fn test_dispatch_reports_panicking_worker() {
        let err = dispatch(async {
            if true {
                panic!("worker blew up");
            }
            Ok::<u8, AppError>(0)
        })
        .await
        .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Internal);
        assert!(err.message.contains("terminated"));
    }

    #[tokio::test]
    async fn test_dispatched_work_runs_in_callers_span() {
        use tracing::Span;

        let _guard = tracing::subscriber::set_default(tracing_subscriber::registry());

        let name = dispatch(async {
            Ok::<_, AppError>(Span::current().metadata().map(|m| m.name()))
        })
        .instrument(tracing::info_span!("app"))
        .await
        .unwrap();
        assert_eq!(name, Some("app"));

        let names = fan_out(2, |_| async {
            Ok::<_, AppError>(Span::current().metadata().map(|m| m.name()))
        })
        .instrument(tracing::info_span!("app"))
        .await
        .unwrap();
        assert_eq!(names, vec![Some("app"), Some("app")]);
    }

    #[tokio::test]
    async fn test_fan_out_collects_every_result() {
        let mut ids = fan_out(5, |i| async move { Ok::<_, AppError>(format!("id-{i}")) })
            .await
            .unwrap();
        ids.sort();
        assert_eq!(ids, vec!["id-0", "id-1", "id-2", "id-3", "id-4"]);
    }

    #[tokio::test]
    async fn test_fan_out_zero_tasks() {
        let out: Vec<u8> = fan_out(0, |_| async { Ok(0u8) }).await.unwrap();
        assert!(out.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_fan_out_cancels_remaining_on_first_error() {
        let finished = Arc::new(AtomicUsize::new(0));
        let counter = finished.clone();

        let err = fan_out(4, move |i| {
            let counter = counter.clone();
            async move {
                if i == 0 {
                    return Err(AppError::external_service("publish failed"));
                }
                tokio::time::sleep(Duration::from_secs(60)).await;
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(i)
            }
        })
        .await
        .unwrap_err();

        assert_eq!(err.kind, ErrorKind::ExternalService);

        tokio::time::sleep(Duration::from_secs(120)).await;
        assert_eq!(finished.load(Ordering::SeqCst), 0);
    }
}
