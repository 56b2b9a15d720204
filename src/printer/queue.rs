//! # Print Queue
//!
//! Decouples dithering (fast, on the caller's thread) from row transmission
//! (slow, paced to the print head).
//!
//! ## Worker Lifecycle
//!
//! ```text
//!            enqueue (queue was Idle)
//!   ┌──────┐ ───────────────────────► ┌─────────┐
//!   │ Idle │                          │ Running │ ── pop row, write, pace
//!   └──────┘ ◄─────────────────────── └─────────┘
//!            queue observed empty
//! ```
//!
//! Both transitions happen under the queue mutex, together with the push or
//! the emptiness check that triggers them. A row enqueued while the worker is
//! deciding to stop is either seen by that worker or starts a new one; it is
//! never stranded.
//!
//! At most one worker thread exists at a time. It exits when the queue runs
//! dry and the next enqueue starts a fresh one.

use std::collections::VecDeque;
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};

use log::{debug, warn};

use super::link::Link;
use crate::protocol::graphics;
use crate::render::BitmapRow;

/// Whether a worker thread is draining the queue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerState {
    Idle,
    Running,
}

struct Inner {
    rows: VecDeque<BitmapRow>,
    state: WorkerState,
    worker: Option<JoinHandle<()>>,
}

/// FIFO of bitmap rows with a lazily started worker
pub struct PrintQueue {
    inner: Mutex<Inner>,
    idle: Condvar,
    link: Arc<Link>,
}

impl PrintQueue {
    pub fn new(link: Arc<Link>) -> Arc<Self> {
        Arc::new(Self {
            inner: Mutex::new(Inner {
                rows: VecDeque::new(),
                state: WorkerState::Idle,
                worker: None,
            }),
            idle: Condvar::new(),
            link,
        })
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn enqueue(self: &Arc<Self>, row: BitmapRow) {
        self.enqueue_all(std::iter::once(row));
    }

    /// Append rows to the tail, starting a worker if none is running.
    pub fn enqueue_all<I>(self: &Arc<Self>, rows: I)
    where
        I: IntoIterator<Item = BitmapRow>,
    {
        let finished = {
            let mut inner = self.lock();
            inner.rows.extend(rows);
            if inner.state == WorkerState::Idle && !inner.rows.is_empty() {
                self.start_worker(&mut inner)
            } else {
                None
            }
        };

        // The previous worker already went Idle under the lock, so it is
        // only returning from its loop.
        if let Some(handle) = finished {
            let _ = handle.join();
        }
    }

    fn start_worker(self: &Arc<Self>, inner: &mut Inner) -> Option<JoinHandle<()>> {
        let queue = Arc::clone(self);
        let spawned = thread::Builder::new()
            .name("termica-rows".to_string())
            .spawn(move || queue.run());

        match spawned {
            Ok(handle) => {
                inner.state = WorkerState::Running;
                inner.worker.replace(handle)
            }
            Err(e) => {
                warn!("could not start print worker, {} rows dropped: {}", inner.rows.len(), e);
                inner.rows.clear();
                None
            }
        }
    }

    fn run(&self) {
        let mut printed = 0usize;
        debug!("print worker started");

        loop {
            let row = {
                let mut inner = self.lock();
                match inner.rows.pop_front() {
                    Some(row) => row,
                    None => {
                        inner.state = WorkerState::Idle;
                        self.idle.notify_all();
                        break;
                    }
                }
            };
            self.link.write(&graphics::row(&row.packed()));
            printed += 1;
        }

        debug!("print worker idle after {} rows", printed);
    }

    /// Block until the queue is empty and no worker is running
    pub fn wait_idle(&self) {
        let mut inner = self.lock();
        while inner.state == WorkerState::Running {
            inner = self
                .idle
                .wait(inner)
                .unwrap_or_else(PoisonError::into_inner);
        }
    }

    /// Discard every row not yet taken by the worker, returning how many
    pub fn clear(&self) -> usize {
        let mut inner = self.lock();
        let dropped = inner.rows.len();
        inner.rows.clear();
        dropped
    }

    pub fn state(&self) -> WorkerState {
        self.lock().state
    }

    /// Rows waiting to be written
    pub fn len(&self) -> usize {
        self.lock().rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().rows.is_empty()
    }
}
