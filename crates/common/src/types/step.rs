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

//! One recorded instruction execution point within a transaction.

use crate::value::RawValue;
use serde::de::{MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer};
use std::fmt;

/// A single opcode-level step from a client's `structLogs`.
///
/// Scalar fields stay in their source representation ([`RawValue`]); the
/// nested structures deserialize from whichever shape the client emitted
/// (array or object, see [`NestedData`]).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StepRecord {
    /// Opcode mnemonic or numeric code.
    pub op: Option<RawValue>,
    /// Program counter.
    pub pc: Option<RawValue>,
    /// Gas remaining before the step.
    pub gas: Option<RawValue>,
    /// Gas charged by the step.
    pub gas_cost: Option<RawValue>,
    /// Call depth.
    pub depth: Option<RawValue>,
    /// Memory words, keyed by offset or index.
    pub memory: NestedData,
    /// Operand stack, keyed by slot index.
    pub stack: NestedData,
    /// Touched storage slots.
    pub storage: NestedData,
}

impl StepRecord {
    /// Look up a core scalar field by its dump name.
    pub fn scalar(&self, field: &str) -> Option<&RawValue> {
        match field {
            "op" => self.op.as_ref(),
            "pc" => self.pc.as_ref(),
            "gas" => self.gas.as_ref(),
            "gasCost" => self.gas_cost.as_ref(),
            "depth" => self.depth.as_ref(),
            _ => None,
        }
    }

    /// Borrow one of the step's nested structures.
    pub fn nested(&self, kind: NestedKind) -> &NestedData {
        match kind {
            NestedKind::Memory => &self.memory,
            NestedKind::Stack => &self.stack,
            NestedKind::Storage => &self.storage,
        }
    }
}

/// The three nested structures a step can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NestedKind {
    /// Linear memory contents.
    Memory,
    /// Operand stack contents.
    Stack,
    /// Touched storage slots.
    Storage,
}

impl NestedKind {
    /// All kinds, in display order.
    pub const ALL: [Self; 3] = [Self::Memory, Self::Stack, Self::Storage];

    /// Dump/display name of the structure.
    pub fn name(&self) -> &'static str {
        match self {
            NestedKind::Memory => "memory",
            NestedKind::Stack => "stack",
            NestedKind::Storage => "storage",
        }
    }
}

/// Ordered key/value view over a step's memory, stack, or storage.
///
/// Dumps disagree on shape: some clients emit arrays (memory words, stack
/// slots), others emit objects keyed by offset or slot. Both collapse into an
/// ordered key list here; array elements get their decimal index as key, and
/// object keys keep document order. `null` and absent both mean empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NestedData {
    entries: Vec<(String, RawValue)>,
}

impl NestedData {
    /// Whether the structure holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Keys in source order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Look up a value by key.
    pub fn get(&self, key: &str) -> Option<&RawValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }
}

impl<'de> Deserialize<'de> for NestedData {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct NestedDataVisitor;

        impl<'de> Visitor<'de> for NestedDataVisitor {
            type Value = NestedData;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an array, an object, or null")
            }

            fn visit_unit<E>(self) -> Result<Self::Value, E> {
                Ok(NestedData::default())
            }

            fn visit_none<E>(self) -> Result<Self::Value, E> {
                Ok(NestedData::default())
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let mut entries = Vec::new();
                while let Some(value) = seq.next_element::<RawValue>()? {
                    entries.push((entries.len().to_string(), value));
                }
                Ok(NestedData { entries })
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries = Vec::new();
                while let Some((key, value)) = map.next_entry::<String, RawValue>()? {
                    entries.push((key, value));
                }
                Ok(NestedData { entries })
            }
        }

        deserializer.deserialize_any(NestedDataVisitor)
    }
}
