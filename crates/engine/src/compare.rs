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

//! The field comparator.
//!
//! Comparison is purely textual: both values are stringified and lowercased
//! first, so `21000` and `"0x5208"` are Unequal even though they denote the
//! same quantity. Absent fields normalize to the `undefined` placeholder and
//! are therefore indistinguishable from that literal string.

use tracediff_common::{RawValue, StepRecord};

/// The scalar fields every step record is compared on, in display order.
pub const CORE_FIELDS: [&str; 5] = ["op", "pc", "gas", "gasCost", "depth"];

/// Outcome of a single field comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    /// Normalized forms match.
    Equal,
    /// Normalized forms differ.
    Unequal,
}

/// Normalized textual form of an optional value: loose stringification,
/// then ASCII lowercase.
pub fn normalize(value: Option<&RawValue>) -> String {
    RawValue::display_or_undefined(value).to_lowercase()
}

/// Compare two optional values on their normalized forms.
pub fn compare(a: Option<&RawValue>, b: Option<&RawValue>) -> Comparison {
    if normalize(a) == normalize(b) {
        Comparison::Equal
    } else {
        Comparison::Unequal
    }
}

/// Whether a step pair diverges on any core field.
///
/// A missing comparison-side record normalizes every field to `undefined`,
/// which flags the step unless the reference side is equally empty. The
/// nested memory/stack/storage structures do not feed this flag.
pub fn step_diverges(a: &StepRecord, b: Option<&StepRecord>) -> bool {
    CORE_FIELDS
        .iter()
        .any(|field| compare(a.scalar(field), b.and_then(|b| b.scalar(field))) == Comparison::Unequal)
}
