// Copyright (C) 2025 Zhuo Zhang and Wuqi Zhang
// SPDX-License-Identifier: AGPL-3.0
//! Errors a view builder reports instead of leaving a partial display.

use thiserror::Error;

/// Why a view could not be built.
///
/// Front ends render these as a visible "unable to render" message; a view
/// builder never panics on a bad index and never emits a half-built view.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    /// The requested transaction index has no trace on one of the sides.
    #[error("transaction #{index} is out of range ({count} traced)")]
    TransactionOutOfRange {
        /// Requested transaction index.
        index: usize,
        /// Number of traced transactions on the side that came up short.
        count: usize,
    },
    /// The requested step index has no record in the reference trace.
    #[error("step #{step} is out of range for transaction #{index} ({count} steps)")]
    StepOutOfRange {
        /// Transaction the step was requested in.
        index: usize,
        /// Requested step index.
        step: usize,
        /// Number of recorded steps.
        count: usize,
    },
    /// The transaction's trace carries no step records at all.
    #[error("transaction #{index} has no recorded steps")]
    EmptyStepLog {
        /// Transaction index.
        index: usize,
    },
}
