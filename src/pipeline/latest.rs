//! Keep-only-latest frame hand-off between a camera thread and the worker.
//!
//! The channel holds at most one pending frame. Pushing while a frame is
//! pending replaces it; the replaced frame is released without processing and
//! counted as dropped. A slow pipeline therefore always works on the freshest
//! frame and never accumulates a backlog.
use super::controller::PipelineController;
use crate::frame::RawFrame;
use crossbeam_channel::{bounded, Receiver, Sender, TryRecvError, TrySendError};
use log::trace;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

#[derive(Debug, Default)]
struct Shared {
    dropped: AtomicU64,
    receiver_gone: AtomicBool,
}

/// Producer half. Cloneable; all clones share one slot.
#[derive(Clone)]
pub struct LatestFrameSender {
    tx: Sender<RawFrame>,
    // Lets the producer evict a stale frame from the slot.
    evict: Receiver<RawFrame>,
    shared: Arc<Shared>,
}

pub struct LatestFrameReceiver {
    rx: Receiver<RawFrame>,
    shared: Arc<Shared>,
}

pub fn latest_frame_channel() -> (LatestFrameSender, LatestFrameReceiver) {
    let (tx, rx) = bounded(1);
    let shared = Arc::new(Shared::default());
    (
        LatestFrameSender {
            tx,
            evict: rx.clone(),
            shared: shared.clone(),
        },
        LatestFrameReceiver { rx, shared },
    )
}

impl LatestFrameSender {
    /// Offer a frame, replacing whatever is still pending.
    ///
    /// Returns `false` when the receiver is gone; the frame is released then.
    pub fn push(&self, frame: RawFrame) -> bool {
        if self.shared.receiver_gone.load(Ordering::Acquire) {
            frame.close();
            return false;
        }
        let mut frame = frame;
        loop {
            match self.tx.try_send(frame) {
                Ok(()) => return true,
                Err(TrySendError::Full(back)) => {
                    frame = back;
                    // The worker may take the pending frame first; then just retry.
                    if let Ok(stale) = self.evict.try_recv() {
                        let total = self.shared.dropped.fetch_add(1, Ordering::Relaxed) + 1;
                        trace!(
                            "frame {} replaced by {} before processing (dropped total: {total})",
                            stale.id(),
                            frame.id()
                        );
                        stale.close();
                    }
                }
                Err(TrySendError::Disconnected(back)) => {
                    back.close();
                    return false;
                }
            }
        }
    }

    /// Frames replaced before the receiver got to them.
    pub fn dropped(&self) -> u64 {
        self.shared.dropped.load(Ordering::Relaxed)
    }

    pub fn has_pending(&self) -> bool {
        !self.tx.is_empty()
    }
}

impl LatestFrameReceiver {
    /// Block until a frame is available. `None` once every sender is gone and
    /// the slot is empty.
    pub fn recv(&self) -> Option<RawFrame> {
        self.rx.recv().ok()
    }

    pub fn try_recv(&self) -> Option<RawFrame> {
        match self.rx.try_recv() {
            Ok(frame) => Some(frame),
            Err(TryRecvError::Empty | TryRecvError::Disconnected) => None,
        }
    }

    pub fn dropped(&self) -> u64 {
        self.shared.dropped.load(Ordering::Relaxed)
    }
}

impl Drop for LatestFrameReceiver {
    fn drop(&mut self) {
        self.shared.receiver_gone.store(true, Ordering::Release);
        while let Ok(frame) = self.rx.try_recv() {
            frame.close();
        }
    }
}

/// Pipeline controller running on its own thread.
pub struct PipelineWorker {
    handle: JoinHandle<PipelineController>,
}

/// Move `controller` onto a worker thread that processes frames from
/// `receiver` until every sender is dropped.
pub fn spawn_pipeline_worker(
    mut controller: PipelineController,
    receiver: LatestFrameReceiver,
) -> PipelineWorker {
    let handle = thread::spawn(move || {
        while let Some(frame) = receiver.recv() {
            controller.on_frame(frame);
        }
        controller
    });
    PipelineWorker { handle }
}

impl PipelineWorker {
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Wait for the worker to drain and hand the controller back.
    pub fn join(self) -> thread::Result<PipelineController> {
        self.handle.join()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    fn frame(id: u64, released: &Arc<Mutex<Vec<u64>>>) -> RawFrame {
        let released = released.clone();
        RawFrame::from_luma(id, 4, 4, vec![0; 16]).with_release(move |id| {
            released.lock().expect("lock").push(id);
        })
    }

    #[test]
    fn newer_frame_replaces_pending_one() {
        let released = Arc::new(Mutex::new(Vec::new()));
        let (tx, rx) = latest_frame_channel();
        assert!(tx.push(frame(1, &released)));
        assert!(tx.push(frame(2, &released)));
        assert!(tx.push(frame(3, &released)));

        assert!(tx.has_pending());
        assert_eq!(tx.dropped(), 2);
        assert_eq!(*released.lock().expect("lock"), vec![1, 2]);
        let next = rx.try_recv().expect("pending frame");
        assert_eq!(next.id(), 3);
        assert!(rx.try_recv().is_none());
        assert!(!tx.has_pending());
    }

    #[test]
    fn recv_ends_after_senders_are_gone() {
        let released = Arc::new(Mutex::new(Vec::new()));
        let (tx, rx) = latest_frame_channel();
        tx.push(frame(7, &released));
        drop(tx);
        assert_eq!(rx.recv().map(|f| f.id()), Some(7));
        assert!(rx.recv().is_none());
    }

    #[test]
    fn push_after_receiver_drop_releases_frame() {
        let released = Arc::new(Mutex::new(Vec::new()));
        let (tx, rx) = latest_frame_channel();
        tx.push(frame(1, &released));
        drop(rx);
        assert!(!tx.push(frame(2, &released)));
        assert_eq!(*released.lock().expect("lock"), vec![1, 2]);
    }
}
