use futures::stream::{self, StreamExt};
use std::future::Future;

/// Run `f` over every item with at most `limit` futures in flight and
/// collect the outputs in input order, whatever order they finish in.
///
/// All futures are driven on the calling task. Nothing is cancelled when
/// another item finishes first; the call returns once every item has settled.
pub async fn join_ordered<I, F, Fut, T>(items: I, limit: usize, f: F) -> Vec<T>
where
    I: IntoIterator,
    F: FnMut(I::Item) -> Fut,
    Fut: Future<Output = T>,
{
    stream::iter(items)
        .map(f)
        .buffered(limit.max(1))
        .collect()
        .await
}
