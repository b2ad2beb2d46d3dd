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

//! The trace payload: two client bundles for the same block.

use super::account::AccountRecord;
use super::step::StepRecord;
use crate::value::{ensure_hex_prefix, RawValue};
use serde::Deserialize;
use std::collections::BTreeMap;

/// The whole input document: one bundle per client implementation.
///
/// The `nimbus`/`geth` aliases accept dumps keyed by client name.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TracePayload {
    /// Output of the reference implementation (first table column).
    #[serde(alias = "nimbus")]
    pub reference: TraceBundle,
    /// Output of the implementation under comparison (second table column).
    #[serde(alias = "geth")]
    pub comparison: TraceBundle,
}

impl TracePayload {
    /// Parse a payload from JSON text. Parsing from text (rather than from a
    /// `Value`) keeps nested-structure keys in document order.
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }
}

/// One client's complete output: block, per-transaction traces, receipts,
/// and post-execution state in whichever shape the client dumps it.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TraceBundle {
    /// The executed block. Only the transaction list's length is consumed.
    pub block: BlockInfo,
    /// Per-transaction opcode traces, by transaction index.
    pub tx_traces: Vec<TxTrace>,
    /// Per-transaction receipts, by transaction index.
    pub receipts: Vec<Receipt>,
    /// List-shaped post-state (`stateDump.after`), when the client dumps one.
    pub state_dump: Option<StateDump>,
    /// Map-shaped post-state keyed by 0x-prefixed address, when the client
    /// dumps one instead.
    pub accounts: Option<BTreeMap<String, AccountRecord>>,
}

impl TraceBundle {
    /// Number of transactions in the bundle's block.
    pub fn transaction_count(&self) -> usize {
        self.block.transactions.len()
    }

    /// Post-state accounts under 0x-prefixed lowercase addresses, regardless
    /// of which dump shape the bundle carries. Bundles without post-state
    /// yield an empty list.
    pub fn post_state(&self) -> Vec<(String, &AccountRecord)> {
        if let Some(dump) = &self.state_dump {
            dump.after
                .iter()
                .map(|account| {
                    let address = account.address.as_deref().unwrap_or_default();
                    (ensure_hex_prefix(address).to_lowercase(), account)
                })
                .collect()
        } else if let Some(accounts) = &self.accounts {
            accounts
                .iter()
                .map(|(address, account)| (ensure_hex_prefix(address).to_lowercase(), account))
                .collect()
        } else {
            Vec::new()
        }
    }

    /// Whether the bundle's post-state knows the given 0x-prefixed lowercase
    /// address.
    pub fn has_account(&self, address: &str) -> bool {
        self.post_state().iter().any(|(a, _)| a == address)
    }
}

/// The executed block, reduced to what the viewer consumes.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct BlockInfo {
    /// Transactions in the block; contents are opaque to the viewer.
    pub transactions: Vec<serde_json::Value>,
}

/// One transaction's trace: overall gas and return value plus the
/// opcode-level step log.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TxTrace {
    /// Gas used by the transaction.
    pub gas: Option<RawValue>,
    /// Return value in the client's own encoding.
    pub return_value: Option<RawValue>,
    /// Opcode-level step records.
    pub struct_logs: Vec<StepRecord>,
}

/// The receipt fields the viewer compares. Receipt logs are out of scope.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Receipt {
    /// Cumulative gas used up to and including this transaction.
    pub cumulative_gas_used: Option<RawValue>,
    /// Logs bloom filter.
    pub bloom: Option<RawValue>,
}

/// List-shaped post-state wrapper (`{ "after": [ ... ] }`).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct StateDump {
    /// Accounts after execution.
    pub after: Vec<AccountRecord>,
}
