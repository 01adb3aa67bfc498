//! Typewriter-style presentation of a finished reply.
//!
//! `Reveal` yields increasingly complete prefixes of a text and always ends
//! with the full text unless cancelled. Once it returns `None` it stays
//! exhausted, so a cancelled reveal cannot be resumed.

use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    thread,
    time::Duration,
};

use tracing::trace;

/// How a reply is split into frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealMode {
    /// One frame per word; each frame ends just before a space.
    Words,
    /// Fixed-size chunks of this many characters.
    Chars(usize),
}

impl Default for RevealMode {
    fn default() -> Self {
        RevealMode::Chars(20)
    }
}

/// Cancels the `Reveal`s sharing it, from any thread.
#[derive(Debug, Clone, Default)]
pub struct RevealHandle {
    cancelled: Arc<AtomicBool>,
}

impl RevealHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Re-arm the handle so later reveals run again.
    pub fn reset(&self) {
        self.cancelled.store(false, Ordering::SeqCst);
    }
}

#[derive(Debug)]
pub struct Reveal {
    text: String,
    /// Byte offsets of frame ends, strictly increasing, last == text.len().
    ends: Vec<usize>,
    next: usize,
    cancelled: Arc<AtomicBool>,
}

impl Reveal {
    pub fn new(text: impl Into<String>, mode: RevealMode) -> Self {
        Self::with_handle(text, mode, &RevealHandle::new())
    }

    /// Build a reveal that `handle` can cancel.
    pub fn with_handle(text: impl Into<String>, mode: RevealMode, handle: &RevealHandle) -> Self {
        let text = text.into();
        let ends = frame_ends(&text, mode);
        Self { text, ends, next: 0, cancelled: Arc::clone(&handle.cancelled) }
    }

    pub fn handle(&self) -> RevealHandle {
        RevealHandle { cancelled: Arc::clone(&self.cancelled) }
    }

    /// Number of frames still to come, ignoring cancellation.
    pub fn remaining(&self) -> usize {
        self.ends.len() - self.next
    }

    /// Drive the reveal to completion, sleeping `delay` between frames.
    ///
    /// Returns `true` if the full text was delivered and `false` if the
    /// reveal was cancelled first.
    pub fn play(mut self, delay: Duration, mut sink: impl FnMut(&str)) -> bool {
        let total = self.ends.len();
        let mut delivered = 0;
        while let Some(frame) = self.next() {
            sink(&frame);
            delivered += 1;
            if delivered < total && !delay.is_zero() {
                thread::sleep(delay);
            }
        }
        let completed = delivered == total;
        trace!(delivered, total, completed, "reveal finished");
        completed
    }
}

impl Iterator for Reveal {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        if self.cancelled.load(Ordering::SeqCst) {
            self.next = self.ends.len();
            return None;
        }
        let end = *self.ends.get(self.next)?;
        self.next += 1;
        Some(self.text[..end].to_string())
    }
}

impl std::iter::FusedIterator for Reveal {}

fn frame_ends(text: &str, mode: RevealMode) -> Vec<usize> {
    let mut ends: Vec<usize> = match mode {
        RevealMode::Words => text
            .char_indices()
            .filter(|&(i, c)| c == ' ' && i > 0)
            .map(|(i, _)| i)
            .collect(),
        RevealMode::Chars(n) => {
            let n = n.max(1);
            text.char_indices()
                .map(|(i, _)| i)
                .skip(n)
                .step_by(n)
                .collect()
        }
    };
    ends.dedup();
    if ends.last() != Some(&text.len()) || text.is_empty() {
        ends.push(text.len());
    }
    ends
}
