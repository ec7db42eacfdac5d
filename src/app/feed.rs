//! Streaming stdin — a background task feeding piped input to the pager.
//!
//! Lines arrive over an unbounded channel; the main loop batch-drains them
//! so a fast producer costs one redraw per batch, not one per line.

use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::sync::mpsc;

/// Messages from the stdin reader task.
#[derive(Debug)]
pub enum FeedUpdate {
    Line(String),
    /// The producer closed its end; no further lines will arrive.
    Eof,
}

/// Spawns the stdin reader task and returns its channel.
pub fn spawn_stdin_feed() -> mpsc::UnboundedReceiver<FeedUpdate> {
    let (tx, rx) = mpsc::unbounded_channel();
    tokio::spawn(forward_lines(tokio::io::stdin(), tx));
    rx
}

async fn forward_lines<R>(reader: R, tx: mpsc::UnboundedSender<FeedUpdate>)
where
    R: AsyncRead + Unpin,
{
    let mut lines = BufReader::new(reader).lines();
    loop {
        match lines.next_line().await {
            Ok(Some(line)) => {
                if tx.send(FeedUpdate::Line(line)).is_err() {
                    return; // receiver dropped
                }
            }
            Ok(None) => break,
            Err(err) => {
                tracing::debug!("stdin feed error: {err}");
                break;
            }
        }
    }
    let _ = tx.send(FeedUpdate::Eof);
}
