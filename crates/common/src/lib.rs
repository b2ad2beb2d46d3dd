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

//! tracediff common - Shared functionality for tracediff components
//!
//! This crate holds the typed model of the trace payload (two client
//! bundles for the same block) and the logging setup shared by the
//! tracediff front ends.

/// Typed records for the payload: bundles, traces, steps, receipts, accounts
pub mod types;

/// Logging setup and utilities for consistent logging across components
pub mod logging;
/// Scalar trace values preserved in their source representation
pub mod value;

pub use types::*;
pub use value::*;
