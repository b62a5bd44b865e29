//! Upload progress reporting.
//!
//! The request body is sent as a chunked stream; each chunk pulled by the
//! HTTP layer advances a byte counter and notifies the observer. Percentages
//! are integer, monotonically non-decreasing, and reach 100 exactly when the
//! final chunk is handed off.

use bytes::Bytes;
use futures::stream::Stream;
use std::sync::Arc;

/// Chunk size for progress-reporting uploads.
pub const PROGRESS_CHUNK_BYTES: usize = 64 * 1024;

/// Receives upload progress notifications.
pub trait ProgressObserver: Send + Sync {
    /// Called after each chunk is handed to the transport.
    ///
    /// `percent` is in 0..=100 and never decreases across calls for one
    /// upload; the final call always reports 100.
    fn on_progress(&self, sent_bytes: u64, total_bytes: u64, percent: u8);
}

/// Observer that invokes a closure. Convenient for callers that just want a
/// callback.
pub struct ProgressFn<F>(pub F);

impl<F> ProgressObserver for ProgressFn<F>
where
    F: Fn(u64, u64, u8) + Send + Sync,
{
    fn on_progress(&self, sent_bytes: u64, total_bytes: u64, percent: u8) {
        (self.0)(sent_bytes, total_bytes, percent)
    }
}

fn percent_of(sent: u64, total: u64) -> u8 {
    if total == 0 {
        return 100;
    }
    let rounded = ((sent as f64 / total as f64) * 100.0).round() as u64;
    rounded.min(100) as u8
}

/// Split `data` into chunks and notify `observer` as each chunk is yielded.
pub(crate) fn progress_stream(
    data: Bytes,
    observer: Arc<dyn ProgressObserver>,
) -> impl Stream<Item = Result<Bytes, std::io::Error>> {
    let total = data.len() as u64;

    let mut chunks = Vec::new();
    let mut offset = 0usize;
    while offset < data.len() {
        let end = (offset + PROGRESS_CHUNK_BYTES).min(data.len());
        chunks.push((data.slice(offset..end), end as u64));
        offset = end;
    }

    futures::stream::iter(chunks.into_iter().map(move |(chunk, sent)| {
        observer.on_progress(sent, total, percent_of(sent, total));
        Ok(chunk)
    }))
}
