//! Upload progress observation port.

use tokio::sync::watch;

/// Observer notified as an upload's bytes leave the client.
///
/// Percentages are monotone within one upload and end at 100 on success.
/// Implementations must be cheap: `report` is called from the body stream.
pub trait UploadProgress: Send + Sync {
    /// Record that `percent` (0–100) of the body has been produced.
    fn report(&self, percent: u8);
}

/// Observer that discards progress reports.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpUploadProgress;

impl UploadProgress for NoOpUploadProgress {
    fn report(&self, _percent: u8) {}
}

/// Observer backed by a tokio watch channel.
///
/// The receiver half always reflects the most recent percentage, which suits
/// progress bars that only care about the latest value.
#[derive(Debug)]
pub struct WatchUploadProgress {
    sender: watch::Sender<u8>,
}

impl WatchUploadProgress {
    /// Build an observer and the receiver that tracks it.
    #[must_use]
    pub fn channel() -> (Self, watch::Receiver<u8>) {
        let (sender, receiver) = watch::channel(0);
        (Self { sender }, receiver)
    }
}

impl UploadProgress for WatchUploadProgress {
    fn report(&self, percent: u8) {
        // Receivers may have been dropped; progress is best-effort.
        let _ = self.sender.send(percent.min(100));
    }
}

#[cfg(test)]
mod tests {
    //! Covers watch-channel progress propagation.
    use rstest::rstest;

    use super::{UploadProgress, WatchUploadProgress};

    #[rstest]
    fn watch_observer_publishes_latest_percent() {
        let (observer, receiver) = WatchUploadProgress::channel();
        observer.report(40);
        observer.report(90);
        assert_eq!(*receiver.borrow(), 90);
    }

    #[rstest]
    fn watch_observer_caps_at_one_hundred() {
        let (observer, receiver) = WatchUploadProgress::channel();
        observer.report(250);
        assert_eq!(*receiver.borrow(), 100);
    }
}
