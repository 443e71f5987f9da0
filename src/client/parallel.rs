//! Fan-out helper for independent reads.
//!
//! Every task runs to completion; one failure never cancels the others.

use std::future::Future;
use std::pin::Pin;

use futures::stream::{FuturesUnordered, StreamExt};
use log::debug;

use crate::error::Result;

/// Boxed task tagged with its position in the input
type SettleFuture<'a, T> = Pin<Box<dyn Future<Output = (usize, Result<T>)> + Send + 'a>>;

/// Run named tasks with at most `max_concurrent` in flight and return every
/// outcome, success or failure, in input order.
///
/// # Example
///
/// ```ignore
/// let settled = settle_all(
///     vec![("stats", fetch("/dashboard/stats")), ("trends", fetch("/dashboard/case-trends"))],
///     4,
/// )
/// .await;
/// for (name, result) in settled { ... }
/// ```
pub async fn settle_all<'a, T, Fut>(
    tasks: Vec<(&'static str, Fut)>,
    max_concurrent: usize,
) -> Vec<(&'static str, Result<T>)>
where
    T: Send + 'a,
    Fut: Future<Output = Result<T>> + Send + 'a,
{
    let names: Vec<&'static str> = tasks.iter().map(|(name, _)| *name).collect();
    let mut slots: Vec<Option<Result<T>>> = (0..tasks.len()).map(|_| None).collect();

    let mut futures: FuturesUnordered<SettleFuture<'a, T>> = FuturesUnordered::new();
    let mut pending = tasks
        .into_iter()
        .enumerate()
        .map(|(idx, (_, fut))| -> SettleFuture<'a, T> {
            Box::pin(async move { (idx, fut.await) })
        });

    // Seed initial batch up to max_concurrent
    for fut in pending.by_ref().take(max_concurrent.max(1)) {
        futures.push(fut);
    }

    while let Some((idx, result)) = futures.next().await {
        if let Err(ref e) = result {
            debug!("Task '{}' failed: {}", names[idx], e);
        }
        slots[idx] = Some(result);

        if let Some(next) = pending.next() {
            futures.push(next);
        }
    }

    names
        .into_iter()
        .zip(slots)
        .filter_map(|(name, slot)| slot.map(|result| (name, result)))
        .collect()
}
