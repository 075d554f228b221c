use crossbeam_channel::Sender;
use std::thread::JoinHandle;

/// Handle to a running reporting thread.
pub(crate) struct Controller {
    shutdown_tx: Sender<()>,
    handle: JoinHandle<()>,
}

impl Controller {
    pub(crate) fn new(shutdown_tx: Sender<()>, handle: JoinHandle<()>) -> Controller {
        Controller { shutdown_tx, handle }
    }

    /// Signals the thread to exit and waits for it, including any cycle it is in the middle of.
    pub(crate) fn shutdown(self, name: &str) {
        // Disconnecting the channel wakes the thread even if it is between ticks.
        drop(self.shutdown_tx);

        if self.handle.join().is_err() {
            error!("{} reporting thread exited abnormally", name);
        }
    }
}
