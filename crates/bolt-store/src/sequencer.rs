//! # Invoice Sequencer
//!
//! Produces strictly increasing, formatted, collision-free invoice numbers
//! scoped to a billing period.
//!
//! ## Number Format
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                     INV-2024-0042                                   │
//! │                     ─┬─ ──┬─ ──┬─                                   │
//! │                      │    │    └── sequence, zero-padded to 4       │
//! │                      │    │        (grows wider past 9999)          │
//! │                      │    └─────── billing period (calendar year)   │
//! │                      └──────────── prefix (shop setting)            │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Uniqueness Contract
//! `next()` consumes a number permanently. If the surrounding checkout fails
//! after sequencing, the number is burned - a gap in the series is accepted
//! in exchange for a guarantee that no number is ever issued twice.
//!
//! ## Lifecycle
//! The sequencer is explicit state injected into the [`Shop`](crate::shop::Shop)
//! at construction and mutated only under its transaction lock. It is kept
//! separate from the entity store so a collaborator can persist
//! [`SequencerState`] independently and restore it across store resets.

use serde::{Deserialize, Serialize};

/// Default invoice number prefix.
pub const DEFAULT_INVOICE_PREFIX: &str = "INV";

// =============================================================================
// Sequencer State
// =============================================================================

/// Serializable snapshot of the sequencer, for external persistence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SequencerState {
    pub prefix: String,
    pub period: String,
    pub next_seq: u64,
}

// =============================================================================
// Invoice Sequencer
// =============================================================================

/// Issues invoice numbers: `<prefix>-<period>-<zero-padded sequence>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvoiceSequencer {
    prefix: String,
    period: String,
    next_seq: u64,
}

impl InvoiceSequencer {
    /// Creates a sequencer for the given prefix and billing period,
    /// starting at sequence 1.
    pub fn new(prefix: impl Into<String>, period: impl Into<String>) -> Self {
        InvoiceSequencer {
            prefix: prefix.into(),
            period: period.into(),
            next_seq: 1,
        }
    }

    /// Creates a sequencer for a calendar-year billing period.
    pub fn for_year(prefix: impl Into<String>, year: i32) -> Self {
        InvoiceSequencer::new(prefix, year.to_string())
    }

    /// Restores a sequencer from a persisted snapshot.
    pub fn from_state(state: SequencerState) -> Self {
        InvoiceSequencer {
            prefix: state.prefix,
            period: state.period,
            next_seq: state.next_seq,
        }
    }

    /// Returns a snapshot for external persistence.
    pub fn state(&self) -> SequencerState {
        SequencerState {
            prefix: self.prefix.clone(),
            period: self.period.clone(),
            next_seq: self.next_seq,
        }
    }

    /// The current billing period.
    pub fn period(&self) -> &str {
        &self.period
    }

    /// Issues the next invoice number and advances the counter.
    ///
    /// The returned number is consumed permanently, whether or not the
    /// caller commits an invoice with it.
    pub fn next(&mut self) -> String {
        let number = format!("{}-{}-{:04}", self.prefix, self.period, self.next_seq);
        self.next_seq += 1;
        number
    }

    /// Switches to a new billing period, resetting the sequence to 1.
    ///
    /// Numbers stay globally unique because the period component changes.
    /// Rolling to the current period is a no-op.
    pub fn roll_period(&mut self, period: impl Into<String>) {
        let period = period.into();
        if period != self.period {
            self.period = period;
            self.next_seq = 1;
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
