//! Batched file output queue
//!
//! Pending records accumulate in memory and reach disk in one vectored
//! write, triggered by a full queue, an aged batch, or an explicit force.
//! The queue is always reset after a flush attempt, successful or not:
//! dropping records on persistent I/O failure beats unbounded growth.

use std::fs::{File, OpenOptions};
use std::io::{IoSlice, Write};
use std::path::Path;

use crate::format::ItemBuf;

/// Records held before a size-triggered flush.
pub const MAX_QUEUE_LEN: usize = 1024;

/// Seconds a batch may age before the next submission flushes it.
pub const MAX_QUEUE_SECS: i64 = 60;

/// FIFO of rendered records plus the lazily opened output file.
/// All methods are reachable only through the logger's lock.
pub struct BatchQueue {
    items: Vec<ItemBuf>,
    last_flush_secs: i64,
    file: Option<File>,
}

impl BatchQueue {
    pub fn new(now_secs: i64) -> Self {
        Self {
            items: Vec::new(),
            last_flush_secs: now_secs,
            file: None,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Reserve the next slot and let the caller render into it. The logger
    /// flushes before appending, so the queue is never over capacity here.
    pub fn append(&mut self, fill: impl FnOnce(&mut ItemBuf)) {
        self.items.push(ItemBuf::new());
        if let Some(slot) = self.items.last_mut() {
            fill(slot);
        }
    }

    /// Drop the open file handle; the next flush reopens the current target.
    pub fn close_file(&mut self) {
        self.file = None;
    }

    /// Flush when forced, full, or stale. Returns whether records reached
    /// the file, so the caller can refresh the rotation descriptor. Length
    /// and the flush timestamp reset regardless of the write outcome.
    pub fn maybe_flush(&mut self, path: &Path, force: bool, now_secs: i64) -> bool {
        if self.items.is_empty() {
            return false;
        }
        if !force
            && self.items.len() < MAX_QUEUE_LEN
            && now_secs - self.last_flush_secs < MAX_QUEUE_SECS
        {
            return false;
        }

        if self.file.is_none() {
            self.file = open_append(path).ok();
        }
        let mut wrote = false;
        if let Some(file) = self.file.as_mut() {
            let slices: Vec<IoSlice<'_>> =
                self.items.iter().map(|i| IoSlice::new(i.as_bytes())).collect();
            wrote = file.write_vectored(&slices).is_ok();
        }

        self.items.clear();
        self.last_flush_secs = now_secs;
        wrote
    }
}

fn open_append(path: &Path) -> std::io::Result<File> {
    let mut opts = OpenOptions::new();
    opts.append(true).create(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        opts.mode(0o644);
    }
    opts.open(path)
}
