//! Pool misuse diagnostics.
//!
//! Misuse never fails an operation: the offending array is dropped or
//! re-cleared and the pool carries on. Each event is logged and, if a
//! subscriber exists, sent over a bounded channel so tests and tooling
//! can observe it without scraping logs.

use std::fmt;

use crossbeam_channel::{Receiver, Sender, TrySendError};

/// Capacity of a diagnostic subscription. Events beyond it are dropped.
pub const DIAGNOSTIC_CHANNEL_CAPACITY: usize = 256;

/// A non-fatal event reported by an array cache.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PoolDiagnostic {
    /// A released array's length does not match its size class.
    BadLength {
        /// Length of the size class the array was routed to.
        expected: usize,
        /// Actual array length.
        actual: usize,
    },
    /// A bucket was full, so the released array was dropped.
    CapacityExceeded {
        /// Size class of the full bucket.
        array_size: usize,
    },
    /// A cleared array still held a non-zero element.
    NotCleared {
        /// First offending index.
        index: usize,
        /// Start of the range that was cleared.
        from: usize,
        /// End (exclusive) of the range that was cleared.
        to: usize,
    },
    /// A request exceeded the largest size class and bypassed the pool.
    Oversize {
        /// Requested length.
        length: usize,
    },
}

impl PoolDiagnostic {
    /// Log level this event is reported at.
    pub fn level(&self) -> log::Level {
        match self {
            Self::BadLength { .. } | Self::NotCleared { .. } => log::Level::Warn,
            Self::CapacityExceeded { .. } => log::Level::Debug,
            Self::Oversize { .. } => log::Level::Info,
        }
    }
}

impl fmt::Display for PoolDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BadLength { expected, actual } => {
                write!(f, "bad length = {actual} (size class {expected})")
            }
            Self::CapacityExceeded { array_size } => {
                write!(f, "array capacity exceeded for size class {array_size}")
            }
            Self::NotCleared { index, from, to } => {
                write!(f, "invalid value at {index} after clearing [{from}, {to})")
            }
            Self::Oversize { length } => write!(f, "acquire[oversize]: length={length}"),
        }
    }
}

/// Logs diagnostics and forwards them to the current subscriber.
#[derive(Debug, Default)]
pub(crate) struct DiagnosticSink {
    sender: Option<Sender<PoolDiagnostic>>,
}

impl DiagnosticSink {
    /// Replace any previous subscriber with a fresh bounded channel.
    pub(crate) fn subscribe(&mut self) -> Receiver<PoolDiagnostic> {
        let (tx, rx) = crossbeam_channel::bounded(DIAGNOSTIC_CHANNEL_CAPACITY);
        self.sender = Some(tx);
        rx
    }

    pub(crate) fn emit(&mut self, source: &str, diagnostic: PoolDiagnostic) {
        log::log!(diagnostic.level(), "{source}: {diagnostic}");
        if let Some(tx) = &self.sender {
            if let Err(TrySendError::Disconnected(_)) = tx.try_send(diagnostic) {
                self.sender = None;
            }
        }
    }
}
