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

//! tracediff engine - comparison and view-model layer
//!
//! Pure functions from (diff context, selection) to displayable view
//! descriptions: field comparison, table construction, cell chunking,
//! step/transaction/state views, and the navigation menu model. No I/O
//! and no rendering happen here; the TUI and web front ends consume the
//! same view data.

pub mod compare;
pub use compare::*;

pub mod context;
pub use context::*;

pub mod error;
pub use error::*;

pub mod format;
pub use format::*;

pub mod nav;
pub use nav::*;

pub mod summary;
pub use summary::*;

pub mod table;
pub use table::*;

pub mod views;
pub use views::*;
