// Bounded, kill-safe capture of child process pipes
#![allow(dead_code)]

use std::sync::Arc;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::sync::Mutex;

/// Bytes read from one pipe so far.
///
/// Shared between the reader task and the invoker so that whatever was
/// captured before a kill survives even if the reader never sees EOF.
#[derive(Debug, Default)]
pub struct CapturedStream {
    pub bytes: Vec<u8>,
    /// Bytes drained past the limit and dropped
    pub discarded: usize,
}

pub type SharedCapture = Arc<Mutex<CapturedStream>>;

/// Drain `reader` into `sink`, keeping at most `limit` bytes.
pub async fn drain_into<R>(mut reader: R, sink: SharedCapture, limit: usize) -> std::io::Result<()>
where
    R: AsyncRead + Unpin,
{
    let mut chunk = [0u8; 8192];
    loop {
        let n = reader.read(&mut chunk).await?;
        if n == 0 {
            return Ok(());
        }

        let mut captured = sink.lock().await;
        let room = limit.saturating_sub(captured.bytes.len());
        let keep = room.min(n);
        captured.bytes.extend_from_slice(&chunk[..keep]);
        captured.discarded += n - keep;
    }
}

/// Snapshot a capture as lossy UTF-8 plus the discarded byte count
pub async fn snapshot(sink: &SharedCapture) -> (String, usize) {
    let captured = sink.lock().await;
    (
        String::from_utf8_lossy(&captured.bytes).into_owned(),
        captured.discarded,
    )
}
