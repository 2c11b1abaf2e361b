//! Streaming HTTP implementation of the transfer handle capability
//!
//! One `HttpTransfer` per accepted download. Nothing is fetched until the
//! manager binds a destination; from there a single task owns the socket
//! and the file, reacting to pause/resume/cancel over a watch channel.
//! Resume re-requests with a `Range` header from the current offset and
//! starts over when the server ignores it.

use futures_util::StreamExt;
use parking_lot::Mutex;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::sync::{mpsc, watch};
use tokio::time::Instant;

use lagoon_core::{ProgressUpdate, TransferEvent, TransferHandle, TransferOutcome};

/// Progress emission throttle; the manager resamples speed on every event.
const PROGRESS_EVERY: Duration = Duration::from_millis(200);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum FetchControl {
    Run,
    Pause,
    Cancel,
}

struct Counters {
    received: AtomicU64,
    total: AtomicU64,
}

pub struct HttpTransfer {
    url: String,
    client: reqwest::Client,
    counters: Arc<Counters>,
    paused: AtomicBool,
    cancelled: AtomicBool,
    control: watch::Sender<FetchControl>,
    control_rx: Mutex<Option<watch::Receiver<FetchControl>>>,
    events_tx: mpsc::UnboundedSender<TransferEvent>,
    events_rx: Mutex<Option<mpsc::UnboundedReceiver<TransferEvent>>>,
}

impl HttpTransfer {
    pub fn new(client: reqwest::Client, url: String) -> Arc<Self> {
        let (control, control_rx) = watch::channel(FetchControl::Run);
        let (events_tx, events_rx) = mpsc::unbounded_channel();

        Arc::new(Self {
            url,
            client,
            counters: Arc::new(Counters {
                received: AtomicU64::new(0),
                total: AtomicU64::new(0),
            }),
            paused: AtomicBool::new(false),
            cancelled: AtomicBool::new(false),
            control,
            control_rx: Mutex::new(Some(control_rx)),
            events_tx,
            events_rx: Mutex::new(Some(events_rx)),
        })
    }
}

impl TransferHandle for HttpTransfer {
    fn pause(&self) {
        if self.cancelled.load(Ordering::SeqCst) {
            return;
        }
        self.paused.store(true, Ordering::SeqCst);
        let _ = self.control.send(FetchControl::Pause);
    }

    fn resume(&self) {
        if self.cancelled.load(Ordering::SeqCst) {
            return;
        }
        self.paused.store(false, Ordering::SeqCst);
        let _ = self.control.send(FetchControl::Run);
    }

    fn is_paused(&self) -> bool {
        self.paused.load(Ordering::SeqCst)
    }

    fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
        let _ = self.control.send(FetchControl::Cancel);
    }

    fn set_destination(&self, path: &Path) {
        if self.cancelled.load(Ordering::SeqCst) {
            return;
        }

        let Some(control_rx) = self.control_rx.lock().take() else {
            tracing::warn!(url = %self.url, "Destination bound twice, ignoring");
            return;
        };

        let task = FetchTask {
            client: self.client.clone(),
            url: self.url.clone(),
            path: path.to_path_buf(),
            counters: Arc::clone(&self.counters),
            control: control_rx,
            events: self.events_tx.clone(),
        };

        tokio::spawn(task.run());
    }

    fn received_bytes(&self) -> u64 {
        self.counters.received.load(Ordering::SeqCst)
    }

    fn total_bytes(&self) -> u64 {
        self.counters.total.load(Ordering::SeqCst)
    }

    fn subscribe(&self) -> mpsc::UnboundedReceiver<TransferEvent> {
        self.events_rx.lock().take().unwrap_or_else(|| {
            let (_tx, rx) = mpsc::unbounded_channel();
            rx
        })
    }
}

struct FetchTask {
    client: reqwest::Client,
    url: String,
    path: PathBuf,
    counters: Arc<Counters>,
    control: watch::Receiver<FetchControl>,
    events: mpsc::UnboundedSender<TransferEvent>,
}

impl FetchTask {
    async fn run(mut self) {
        if let Some(parent) = self.path.parent() {
            let _ = tokio::fs::create_dir_all(parent).await;
        }

        let mut offset: u64 = 0;

        'connect: loop {
            // Sit out a pause (and honor a cancel) before holding a socket.
            loop {
                let action = *self.control.borrow();
                match action {
                    FetchControl::Run => break,
                    FetchControl::Pause => {
                        self.emit_progress();
                        if self.control.changed().await.is_err() {
                            return;
                        }
                    }
                    FetchControl::Cancel => {
                        self.finish_cancelled().await;
                        return;
                    }
                }
            }

            let mut request = self.client.get(self.url.clone());
            if offset > 0 {
                request = request.header(reqwest::header::RANGE, format!("bytes={offset}-"));
            }

            let response = match request.send().await {
                Ok(r) => r,
                Err(e) => {
                    tracing::warn!(url = %self.url, error = %e, "Transfer request failed");
                    self.finish_interrupted();
                    return;
                }
            };

            if !response.status().is_success() {
                tracing::warn!(url = %self.url, status = %response.status(), "Transfer refused");
                self.finish_interrupted();
                return;
            }

            if offset > 0 && response.status() != reqwest::StatusCode::PARTIAL_CONTENT {
                // Server ignored the range; start the file over.
                offset = 0;
                self.counters.received.store(0, Ordering::SeqCst);
            }

            if let Some(len) = response.content_length() {
                self.counters
                    .total
                    .store(len.saturating_add(offset), Ordering::SeqCst);
            }

            let mut opts = tokio::fs::OpenOptions::new();
            opts.create(true).write(true);
            if offset > 0 {
                opts.append(true);
            } else {
                opts.truncate(true);
            }

            let mut file = match opts.open(&self.path).await {
                Ok(f) => f,
                Err(e) => {
                    tracing::warn!(path = %self.path.display(), error = %e, "Cannot open destination");
                    self.finish_interrupted();
                    return;
                }
            };

            let mut stream = response.bytes_stream();
            let mut last_emit = Instant::now();

            loop {
                tokio::select! {
                    changed = self.control.changed() => {
                        if changed.is_err() {
                            return;
                        }
                        let action = *self.control.borrow();
                        match action {
                            FetchControl::Pause => {
                                let _ = file.flush().await;
                                self.emit_progress();
                                // Drop the socket; resume re-requests with Range.
                                continue 'connect;
                            }
                            FetchControl::Cancel => {
                                let _ = file.flush().await;
                                drop(file);
                                self.finish_cancelled().await;
                                return;
                            }
                            FetchControl::Run => {}
                        }
                    }
                    chunk = stream.next() => {
                        match chunk {
                            Some(Ok(bytes)) => {
                                if file.write_all(&bytes).await.is_err() {
                                    tracing::warn!(path = %self.path.display(), "Write failed");
                                    self.finish_interrupted();
                                    return;
                                }

                                offset = offset.saturating_add(bytes.len() as u64);
                                self.counters.received.store(offset, Ordering::SeqCst);

                                if last_emit.elapsed() >= PROGRESS_EVERY {
                                    last_emit = Instant::now();
                                    self.emit_progress();
                                }
                            }
                            Some(Err(e)) => {
                                tracing::warn!(url = %self.url, error = %e, "Stream failed");
                                self.finish_interrupted();
                                return;
                            }
                            None => {
                                let _ = file.flush().await;
                                self.emit_progress();
                                let _ = self.events.send(TransferEvent::Done(TransferOutcome::Completed));
                                return;
                            }
                        }
                    }
                }
            }
        }
    }

    fn emit_progress(&self) {
        let _ = self
            .events
            .send(TransferEvent::Updated(ProgressUpdate::Progressing));
    }

    fn finish_interrupted(&self) {
        let _ = self
            .events
            .send(TransferEvent::Done(TransferOutcome::Interrupted));
    }

    async fn finish_cancelled(&self) {
        // Partial files are not worth keeping.
        let _ = tokio::fs::remove_file(&self.path).await;
        let _ = self
            .events
            .send(TransferEvent::Done(TransferOutcome::Cancelled));
    }
}
