// tracediff - EVM execution trace diff viewer
// Copyright (C) 2025 Zhuo Zhang and Wuqi Zhang
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

//! The diff context and view selection state.
//!
//! The context is constructed once at startup from the loaded payload and
//! treated as immutable thereafter; every view builder takes it explicitly
//! instead of reaching for ambient state.

use crate::error::RenderError;
use tracediff_common::{TracePayload, TxTrace};

/// Everything a view builder needs: the two bundles plus the two column
/// labels shown in table headers.
#[derive(Debug, Clone, PartialEq)]
pub struct DiffContext {
    /// The loaded payload, never mutated.
    pub payload: TracePayload,
    /// Header label for the reference column.
    pub label_a: String,
    /// Header label for the comparison column.
    pub label_b: String,
}

impl DiffContext {
    /// Build a context around a loaded payload.
    pub fn new(payload: TracePayload, label_a: impl Into<String>, label_b: impl Into<String>) -> Self {
        tracing::debug!(
            transactions = payload.comparison.transaction_count(),
            traces = payload.reference.tx_traces.len(),
            "Built diff context"
        );
        Self { payload, label_a: label_a.into(), label_b: label_b.into() }
    }

    /// Number of transactions driving menu construction. Read from the
    /// comparison bundle's block, matching the original page's behavior.
    pub fn transaction_count(&self) -> usize {
        self.payload.comparison.transaction_count()
    }

    /// Both sides' traces for one transaction index, or a fail-closed error
    /// when either side comes up short.
    pub fn trace_pair(&self, index: usize) -> Result<(&TxTrace, &TxTrace), RenderError> {
        let reference = self.payload.reference.tx_traces.get(index).ok_or(
            RenderError::TransactionOutOfRange {
                index,
                count: self.payload.reference.tx_traces.len(),
            },
        )?;
        let comparison = self.payload.comparison.tx_traces.get(index).ok_or(
            RenderError::TransactionOutOfRange {
                index,
                count: self.payload.comparison.tx_traces.len(),
            },
        )?;
        Ok((reference, comparison))
    }
}

/// Which of the three views is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    /// Opcode-level step comparison.
    Opcodes,
    /// Receipt-level transaction comparison.
    Transactions,
    /// Post-execution account state.
    State,
}

impl ViewKind {
    /// All views, in tab order.
    pub const ALL: [Self; 3] = [Self::Opcodes, Self::Transactions, Self::State];

    /// Display title of the view.
    pub fn title(&self) -> &'static str {
        match self {
            ViewKind::Opcodes => "Opcodes",
            ViewKind::Transactions => "Transactions",
            ViewKind::State => "State",
        }
    }
}

/// The whole of the UI's navigation state: which view, which transaction,
/// which step. Owned by the front end and passed to the pure view builders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewState {
    /// Active view.
    pub view: ViewKind,
    /// Selected transaction index.
    pub transaction: usize,
    /// Selected step index within the transaction.
    pub step: usize,
}

impl Default for ViewState {
    fn default() -> Self {
        Self { view: ViewKind::Opcodes, transaction: 0, step: 0 }
    }
}

impl ViewState {
    /// Select a transaction; the step selection resets to the first step.
    pub fn select_transaction(&mut self, index: usize) {
        self.transaction = index;
        self.step = 0;
    }

    /// Select a step within the current transaction.
    pub fn select_step(&mut self, index: usize) {
        self.step = index;
    }

    /// Switch the active view. Selections are kept so tab switches don't
    /// lose the user's place.
    pub fn select_view(&mut self, view: ViewKind) {
        self.view = view;
    }
}
