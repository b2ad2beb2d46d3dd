// Copyright (C) 2025 Zhuo Zhang and Wuqi Zhang
// SPDX-License-Identifier: AGPL-3.0
//! Typed records for the trace payload.

mod account;
mod payload;
mod step;

pub use account::AccountRecord;
pub use payload::{BlockInfo, Receipt, StateDump, TraceBundle, TracePayload, TxTrace};
pub use step::{NestedData, NestedKind, StepRecord};
