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

//! The three views: opcode steps, transaction receipts, account state.
//!
//! Every builder is a pure function from (context, selection) to a view
//! description. Out-of-range selections return [`RenderError`] so front
//! ends can fail closed instead of leaving a half-drawn display.

use crate::compare::{step_diverges, CORE_FIELDS};
use crate::context::DiffContext;
use crate::error::RenderError;
use crate::table::{union_table, CompareRow, CompareTable};
use tracediff_common::{ensure_hex_prefix, NestedData, NestedKind, RawValue};

/// One entry in the opcode view's step list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepEntry {
    /// Step index within the transaction.
    pub index: usize,
    /// Program counter, as the reference side recorded it.
    pub pc: String,
    /// Opcode, as the reference side recorded it.
    pub op: String,
    /// Whether any core field differs between the two sides.
    pub diverged: bool,
}

impl StepEntry {
    /// Sidebar label, `pc op`.
    pub fn label(&self) -> String {
        format!("{} {}", self.pc, self.op)
    }
}

/// The opcode view for one selected step: the core-field table plus one
/// union-key table per non-empty nested structure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepView {
    /// Core fields (`op`, `pc`, `gas`, `gasCost`, `depth`).
    pub fields: CompareTable,
    /// memory/stack/storage sections, empty ones omitted.
    pub extras: Vec<CompareTable>,
}

/// The selectable step list for one transaction, reference-side order.
pub fn step_entries(ctx: &DiffContext, tx: usize) -> Result<Vec<StepEntry>, RenderError> {
    let (reference, comparison) = ctx.trace_pair(tx)?;

    Ok(reference
        .struct_logs
        .iter()
        .enumerate()
        .map(|(index, step)| StepEntry {
            index,
            pc: RawValue::display_or_undefined(step.pc.as_ref()),
            op: RawValue::display_or_undefined(step.op.as_ref()),
            diverged: step_diverges(step, comparison.struct_logs.get(index)),
        })
        .collect())
}

/// Build the opcode view for one step of one transaction.
pub fn step_view(ctx: &DiffContext, tx: usize, step: usize) -> Result<StepView, RenderError> {
    let (reference, comparison) = ctx.trace_pair(tx)?;

    if reference.struct_logs.is_empty() {
        return Err(RenderError::EmptyStepLog { index: tx });
    }
    let step_a = reference.struct_logs.get(step).ok_or(RenderError::StepOutOfRange {
        index: tx,
        step,
        count: reference.struct_logs.len(),
    })?;
    let step_b = comparison.struct_logs.get(step);

    let rows = CORE_FIELDS
        .iter()
        .map(|field| CompareRow::new(field, step_a.scalar(field), step_b.and_then(|s| s.scalar(field))))
        .collect();

    let empty = NestedData::default();
    let extras = NestedKind::ALL
        .iter()
        .filter_map(|&kind| {
            let b = step_b.map(|s| s.nested(kind)).unwrap_or(&empty);
            union_table(kind.name(), step_a.nested(kind), b)
        })
        .collect();

    Ok(StepView { fields: CompareTable { title: None, rows }, extras })
}

/// Build the receipt view for one transaction: per-transaction gas and
/// return value merged with the receipt fields, over a fixed field list.
///
/// The comparison side's return value gets a `0x` prefix when it lacks one;
/// the reference side is taken verbatim. Missing receipts render as
/// `undefined` fields rather than failing.
pub fn transaction_view(ctx: &DiffContext, tx: usize) -> Result<CompareTable, RenderError> {
    let (reference, comparison) = ctx.trace_pair(tx)?;
    let receipt_a = ctx.payload.reference.receipts.get(tx);
    let receipt_b = ctx.payload.comparison.receipts.get(tx);

    let return_b = comparison
        .return_value
        .as_ref()
        .map(|v| ensure_hex_prefix(&v.to_string()))
        .unwrap_or_else(|| "undefined".to_string());

    let rows = vec![
        CompareRow::new("gas", reference.gas.as_ref(), comparison.gas.as_ref()),
        CompareRow::from_text(
            "returnValue",
            &RawValue::display_or_undefined(reference.return_value.as_ref()),
            &return_b,
        ),
        CompareRow::new(
            "cumulativeGasUsed",
            receipt_a.and_then(|r| r.cumulative_gas_used.as_ref()),
            receipt_b.and_then(|r| r.cumulative_gas_used.as_ref()),
        ),
        CompareRow::new(
            "bloom",
            receipt_a.and_then(|r| r.bloom.as_ref()),
            receipt_b.and_then(|r| r.bloom.as_ref()),
        ),
    ];

    Ok(CompareTable { title: None, rows })
}

/// One account in the state view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateEntry {
    /// 0x-prefixed lowercase address.
    pub address: String,
    /// Balance, 0x-prefixed.
    pub balance: String,
    /// Code, 0x-prefixed.
    pub code: String,
    /// Whether the comparison side's post-state knows this address.
    pub in_comparison: bool,
}

/// The post-state view: the reference side's accounts, normalized, each
/// annotated with the comparison side's knowledge of the address. No
/// field-by-field account diff is produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StateView {
    /// Accounts in dump order.
    pub entries: Vec<StateEntry>,
}

/// Build the state view.
pub fn state_view(ctx: &DiffContext) -> StateView {
    let entries = ctx
        .payload
        .reference
        .post_state()
        .into_iter()
        .map(|(address, account)| {
            let balance = account
                .balance
                .as_ref()
                .map(|v| ensure_hex_prefix(&v.to_string()))
                .unwrap_or_else(|| "undefined".to_string());
            let code = account
                .code
                .as_deref()
                .map(ensure_hex_prefix)
                .unwrap_or_else(|| "undefined".to_string());
            let in_comparison = ctx.payload.comparison.has_account(&address);
            StateEntry { address, balance, code, in_comparison }
        })
        .collect();

    StateView { entries }
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
    fn test_step_view_field_order_is_fixed() {
        let ctx = context(serde_json::json!({
            "reference": {
                "block": { "transactions": [{}] },
                "txTraces": [{ "structLogs": [{ "op": "STOP", "pc": 0, "gas": 1, "gasCost": 0, "depth": 1 }] }]
            },
            "comparison": {
                "block": { "transactions": [{}] },
                "txTraces": [{ "structLogs": [{ "op": "STOP", "pc": 0, "gas": 1, "gasCost": 0, "depth": 1 }] }]
            }
        }));
        let view = step_view(&ctx, 0, 0).unwrap();
        let fields: Vec<&str> = view.fields.rows.iter().map(|r| r.field.as_str()).collect();
        assert_eq!(fields, vec!["op", "pc", "gas", "gasCost", "depth"]);
        assert!(view.extras.is_empty());
    }

    #[test]
    fn test_step_view_out_of_range_step() {
        let ctx = context(serde_json::json!({
            "reference": {
                "block": { "transactions": [{}] },
                "txTraces": [{ "structLogs": [{ "op": "STOP" }] }]
            },
            "comparison": {
                "block": { "transactions": [{}] },
                "txTraces": [{ "structLogs": [{ "op": "STOP" }] }]
            }
        }));
        assert_eq!(
            step_view(&ctx, 0, 5),
            Err(RenderError::StepOutOfRange { index: 0, step: 5, count: 1 })
        );
    }

    #[test]
    fn test_transaction_view_prefixes_comparison_return_value() {
        let ctx = context(serde_json::json!({
            "reference": {
                "block": { "transactions": [{}] },
                "txTraces": [{ "gas": 21000, "returnValue": "0xAB" }],
                "receipts": [{ "cumulativeGasUsed": 21000, "bloom": "0x00" }]
            },
            "comparison": {
                "block": { "transactions": [{}] },
                "txTraces": [{ "gas": 21000, "returnValue": "ab" }],
                "receipts": [{ "cumulativeGasUsed": 21000, "bloom": "0x00" }]
            }
        }));
        let table = transaction_view(&ctx, 0).unwrap();
        let return_row = &table.rows[1];
        assert_eq!(return_row.field, "returnValue");
        assert_eq!(return_row.lhs, "0xab");
        assert_eq!(return_row.rhs, "0xab");
        assert!(!return_row.diverged);
    }

    #[test]
    fn test_state_view_normalizes_and_annotates() {
        let ctx = context(serde_json::json!({
            "reference": {
                "block": { "transactions": [] },
                "stateDump": { "after": [
                    { "address": "AA", "balance": "10", "code": "" },
                    { "address": "bb", "balance": "0x5", "code": "6000" }
                ]}
            },
            "comparison": {
                "block": { "transactions": [] },
                "accounts": { "0xaa": { "balance": "0xa" } }
            }
        }));
        let view = state_view(&ctx);
        assert_eq!(view.entries.len(), 2);
        assert_eq!(view.entries[0].address, "0xaa");
        assert_eq!(view.entries[0].balance, "0x10");
        assert!(view.entries[0].in_comparison);
        assert_eq!(view.entries[1].address, "0xbb");
        assert!(!view.entries[1].in_comparison);
    }
}
