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

//! Scalar values as they appear in a trace dump.
//!
//! Clients disagree on how they encode the same quantity: one dump may carry
//! `21000` where the other carries `"0x5208"`. Comparison happens on textual
//! forms, so values are kept in whatever representation the dump used and are
//! never re-encoded or numerically normalized.

use serde::Deserialize;
use serde_json::Number;
use std::fmt;

/// A scalar field value, preserved in its source representation.
///
/// Numbers keep their exact source text (`serde_json`'s `arbitrary_precision`
/// feature); strings are taken verbatim.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    /// JSON `null`.
    Null,
    /// JSON boolean.
    Bool(bool),
    /// JSON number, never re-encoded.
    Number(Number),
    /// JSON string.
    Text(String),
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawValue::Null => write!(f, "null"),
            RawValue::Bool(b) => write!(f, "{b}"),
            RawValue::Number(n) => write!(f, "{n}"),
            RawValue::Text(s) => write!(f, "{s}"),
        }
    }
}

impl RawValue {
    /// Loose textual form of an optional value. Absent fields render as the
    /// `undefined` placeholder rather than being distinguished from falsy
    /// values.
    pub fn display_or_undefined(value: Option<&Self>) -> String {
        match value {
            Some(v) => v.to_string(),
            None => "undefined".to_string(),
        }
    }
}

/// Prepend `0x` to a hex-ish string unless it already carries the prefix.
pub fn ensure_hex_prefix(text: &str) -> String {
    if text.starts_with("0x") || text.starts_with("0X") {
        text.to_string()
    } else {
        format!("0x{text}")
    }
}
