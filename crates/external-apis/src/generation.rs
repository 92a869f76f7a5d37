// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Stale result detection for callers that re-issue resolutions
//!
//! A caller that starts a new resolution for the same input before the previous one has
//! settled takes a fresh [`Ticket`]; results carrying an older ticket are discarded on
//! arrival.

use std::sync::atomic::{AtomicU64, Ordering};

/// Identifies one resolution started through a [`ResolutionGeneration`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

/// Monotonic resolution counter
#[derive(Debug, Default)]
pub struct ResolutionGeneration {
    current: AtomicU64,
}

impl ResolutionGeneration {
    /// Create a new counter
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new resolution, invalidating every earlier ticket
    pub fn begin(&self) -> Ticket {
        Ticket(self.current.fetch_add(1, Ordering::AcqRel) + 1)
    }

    /// Whether `ticket` belongs to the most recent resolution
    pub fn is_current(&self, ticket: &Ticket) -> bool {
        self.current.load(Ordering::Acquire) == ticket.0
    }

    /// Keep `value` only if `ticket` is still current
    pub fn accept<T>(&self, ticket: Ticket, value: T) -> Option<T> {
        self.is_current(&ticket).then_some(value)
    }
}
