//! Background execution of scans and applies.
//!
//! The pipeline is synchronous and blocking, so it runs on tokio's blocking
//! pool. Log lines and progress are streamed back over an unbounded channel
//! while the join handle carries the result.

use spinless_common::{Error, Result};
use spinless_db::models::PendingUpdate;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::applier::Applier;
use crate::config::SelectionPolicy;
use crate::scanner::{ScanObserver, ScanProgress, ScanResult, Scanner};

/// Something a running task reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanEvent {
    Log(String),
    Progress(ScanProgress),
}

/// Forwards observer calls onto a channel.
///
/// Sends to a dropped receiver are ignored; the task keeps running.
pub struct ChannelObserver {
    tx: mpsc::UnboundedSender<ScanEvent>,
}

impl ChannelObserver {
    pub fn new(tx: mpsc::UnboundedSender<ScanEvent>) -> Self {
        Self { tx }
    }
}

impl ScanObserver for ChannelObserver {
    fn log(&mut self, line: &str) {
        let _ = self.tx.send(ScanEvent::Log(line.to_string()));
    }

    fn progress(&mut self, progress: ScanProgress) {
        let _ = self.tx.send(ScanEvent::Progress(progress));
    }
}

/// A running background task.
pub struct ScanTask<T> {
    events: mpsc::UnboundedReceiver<ScanEvent>,
    handle: JoinHandle<Result<T>>,
}

impl<T> ScanTask<T> {
    /// Next event, or `None` once the task has finished sending.
    pub async fn next_event(&mut self) -> Option<ScanEvent> {
        self.events.recv().await
    }

    /// Wait for the task's result, discarding any events not yet read.
    pub async fn wait(self) -> Result<T> {
        self.handle
            .await
            .map_err(|e| Error::internal(format!("Background task failed: {}", e)))?
    }
}

/// Run `scanner` with `policy` on the blocking pool.
pub fn spawn_scan(scanner: Scanner, policy: SelectionPolicy) -> ScanTask<ScanResult> {
    let (tx, events) = mpsc::unbounded_channel();

    let handle = tokio::task::spawn_blocking(move || {
        let mut observer = ChannelObserver::new(tx);
        scanner.scan(&policy, &mut observer)
    });

    ScanTask { events, handle }
}

/// Apply `updates` on the blocking pool.
pub fn spawn_apply(applier: Applier, updates: Vec<PendingUpdate>) -> ScanTask<usize> {
    let (tx, events) = mpsc::unbounded_channel();

    let handle = tokio::task::spawn_blocking(move || {
        let mut observer = ChannelObserver::new(tx);
        observer.log("Applying updates...");
        let count = applier.apply(&updates)?;
        observer.log(&format!("  Updated {} textures", count));
        debug!("Apply task finished");
        Ok(count)
    });

    ScanTask { events, handle }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_observer_forwards_in_order() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut observer = ChannelObserver::new(tx);

        observer.log("Scanning movies...");
        observer.progress(ScanProgress {
            processed: 1,
            total: 1,
            message: "Scanning movies for NFOs... (1/1)".to_string(),
        });
        drop(observer);

        assert_eq!(
            rx.try_recv().unwrap(),
            ScanEvent::Log("Scanning movies...".to_string())
        );
        assert!(matches!(rx.try_recv().unwrap(), ScanEvent::Progress(p) if p.processed == 1));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_channel_observer_survives_dropped_receiver() {
        let (tx, rx) = mpsc::unbounded_channel();
        drop(rx);
        let mut observer = ChannelObserver::new(tx);
        observer.log("nobody listening");
    }
}
