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

//! Comparison tables as plain data.
//!
//! A table is a description of what to display: one row per field, both
//! sides already normalized, divergence precomputed. Front ends turn the
//! same table into terminal rows or HTML without re-deciding anything.

use crate::compare::{compare, normalize, Comparison};
use itertools::Itertools;
use tracediff_common::{NestedData, RawValue};

/// One rendered comparison row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompareRow {
    /// Field name or union key the row compares.
    pub field: String,
    /// Reference side, normalized.
    pub lhs: String,
    /// Comparison side, normalized.
    pub rhs: String,
    /// Whether the normalized sides differ.
    pub diverged: bool,
}

impl CompareRow {
    /// Build a row from two optional raw values.
    pub fn new(field: &str, a: Option<&RawValue>, b: Option<&RawValue>) -> Self {
        Self {
            field: field.to_string(),
            lhs: normalize(a),
            rhs: normalize(b),
            diverged: compare(a, b) == Comparison::Unequal,
        }
    }

    /// Build a row from already-rendered cell text. Both sides are
    /// normalized (lowercased) before comparison, matching [`CompareRow::new`].
    pub fn from_text(field: &str, lhs: &str, rhs: &str) -> Self {
        let lhs = lhs.to_lowercase();
        let rhs = rhs.to_lowercase();
        let diverged = lhs != rhs;
        Self { field: field.to_string(), lhs, rhs, diverged }
    }
}

/// A full comparison table: an optional section title plus rows in field
/// order. Building a table twice from the same inputs yields an identical
/// value; front ends replace prior content instead of appending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompareTable {
    /// Section title (`memory`, `stack`, `storage`), when the table is not
    /// the primary one of its view.
    pub title: Option<String>,
    /// Comparison rows, in field order.
    pub rows: Vec<CompareRow>,
}

impl CompareTable {
    /// Whether any row diverges.
    pub fn has_divergence(&self) -> bool {
        self.rows.iter().any(|row| row.diverged)
    }

    /// Number of diverged rows.
    pub fn divergence_count(&self) -> usize {
        self.rows.iter().filter(|row| row.diverged).count()
    }
}

/// Build a union-key table over two nested structures: one row per key
/// present on either side, reference-side key order first, then
/// comparison-only keys. Returns `None` when both sides are empty, in which
/// case no section is displayed at all.
pub fn union_table(title: &str, a: &NestedData, b: &NestedData) -> Option<CompareTable> {
    if a.is_empty() && b.is_empty() {
        return None;
    }

    let rows = a
        .keys()
        .chain(b.keys())
        .unique()
        .map(|key| CompareRow::new(key, a.get(key), b.get(key)))
        .collect();

    Some(CompareTable { title: Some(title.to_string()), rows })
}
