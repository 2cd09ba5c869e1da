//! Stop-control events for an in-progress recording

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

/// How the user asked the recording to end
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopEvent {
    /// Stop and submit (Enter)
    Submit,
    /// Discard without submitting (Ctrl+C)
    Cancel,
}

/// Listens for the stop controls of an in-progress recording.
///
/// Enter on stdin requests stop-and-submit; Ctrl+C requests discard.
/// Both are delivered through one channel so the runner has a single
/// place to wait.
pub struct StopListener {
    receiver: mpsc::Receiver<StopEvent>,
}

impl StopListener {
    /// Spawn the background listeners and return the handle
    pub fn spawn() -> Self {
        let (tx, rx) = mpsc::channel(4);

        let tx_stdin = tx.clone();
        tokio::spawn(async move {
            let mut line = String::new();
            let mut reader = BufReader::new(tokio::io::stdin());
            if reader.read_line(&mut line).await.is_ok() {
                let _ = tx_stdin.send(StopEvent::Submit).await;
            }
        });

        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                let _ = tx.send(StopEvent::Cancel).await;
            }
        });

        Self { receiver: rx }
    }

    /// Wait for the next stop event
    pub async fn recv(&mut self) -> Option<StopEvent> {
        self.receiver.recv().await
    }
}
