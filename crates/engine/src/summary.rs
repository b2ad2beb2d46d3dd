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

//! Non-interactive divergence digest.
//!
//! Runs the same comparator over every transaction and counts what the
//! interactive views would highlight, for scripting and CI use.

use crate::context::DiffContext;
use crate::error::RenderError;
use crate::views::{step_entries, transaction_view};

/// Divergence counts for one transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxSummary {
    /// Transaction index.
    pub index: usize,
    /// Steps recorded on the reference side.
    pub total_steps: usize,
    /// Steps whose core fields diverge.
    pub diverged_steps: usize,
    /// Diverged rows in the receipt view.
    pub receipt_divergences: usize,
}

impl TxSummary {
    /// Whether the transaction diverges anywhere the viewer would show.
    pub fn has_divergence(&self) -> bool {
        self.diverged_steps > 0 || self.receipt_divergences > 0
    }
}

/// Summarize every transaction the menu would offer.
pub fn summarize(ctx: &DiffContext) -> Result<Vec<TxSummary>, RenderError> {
    let summaries = (0..ctx.transaction_count())
        .map(|index| {
            let entries = step_entries(ctx, index)?;
            let receipt = transaction_view(ctx, index)?;
            Ok(TxSummary {
                index,
                total_steps: entries.len(),
                diverged_steps: entries.iter().filter(|e| e.diverged).count(),
                receipt_divergences: receipt.divergence_count(),
            })
        })
        .collect::<Result<Vec<_>, RenderError>>()?;

    tracing::debug!(transactions = summaries.len(), "Summarized divergence");

    Ok(summaries)
}

/// Whether any transaction in the digest diverges.
pub fn has_divergence(summaries: &[TxSummary]) -> bool {
    summaries.iter().any(TxSummary::has_divergence)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracediff_common::TracePayload;

    fn context(payload: serde_json::Value) -> DiffContext {
        let payload: TracePayload = serde_json::from_value(payload).unwrap();
        DiffContext::new(payload, "ref", "cmp")
    }

    #[test]
    fn test_identical_sides_summarize_clean() {
        let side = serde_json::json!({
            "block": { "transactions": [{}] },
            "txTraces": [{ "gas": 1, "returnValue": "0x", "structLogs": [{ "op": "STOP", "pc": 0 }] }],
            "receipts": [{ "cumulativeGasUsed": 1, "bloom": "0x00" }]
        });
        let ctx = context(serde_json::json!({ "reference": side, "comparison": side }));
        let summaries = summarize(&ctx).unwrap();
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].diverged_steps, 0);
        assert!(!has_divergence(&summaries));
    }

    #[test]
    fn test_diverging_step_is_counted() {
        let ctx = context(serde_json::json!({
            "reference": {
                "block": { "transactions": [{}] },
                "txTraces": [{ "structLogs": [{ "op": "STOP", "pc": 0 }, { "op": "ADD", "pc": 1 }] }]
            },
            "comparison": {
                "block": { "transactions": [{}] },
                "txTraces": [{ "structLogs": [{ "op": "STOP", "pc": 0 }, { "op": "MUL", "pc": 1 }] }]
            }
        }));
        let summaries = summarize(&ctx).unwrap();
        assert_eq!(summaries[0].total_steps, 2);
        assert_eq!(summaries[0].diverged_steps, 1);
        assert!(has_divergence(&summaries));
    }
}
