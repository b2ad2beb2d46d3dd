//! End-to-end tests for the comparison engine over a realistic payload.

use tracediff_common::{logging, TracePayload};
use tracediff_engine::{
    menu_state, state_view, step_entries, step_view, summarize, transaction_view, DiffContext,
    MenuState, RenderError, ViewKind, ViewState,
};
use tracing::info;

/// A two-transaction payload with one divergent step and one divergent
/// receipt field; parsed from text so nested keys keep document order.
fn sample_context() -> DiffContext {
    let text = r#"{
        "reference": {
            "block": { "transactions": [{}, {}] },
            "txTraces": [
                {
                    "gas": 21000,
                    "returnValue": "0x",
                    "structLogs": [
                        { "op": "PUSH1", "pc": 0, "gas": 100, "gasCost": 3, "depth": 1,
                          "stack": ["0x60"], "memory": { "0x0": "00" } },
                        { "op": "STOP", "pc": 2, "gas": 97, "gasCost": 0, "depth": 1 }
                    ]
                },
                {
                    "gas": 50000,
                    "returnValue": "0xdeadbeef",
                    "structLogs": [
                        { "op": "CALLDATALOAD", "pc": 0, "gas": 400, "gasCost": 3, "depth": 1 }
                    ]
                }
            ],
            "receipts": [
                { "cumulativeGasUsed": "0x5208", "bloom": "0x00" },
                { "cumulativeGasUsed": "0x11170", "bloom": "0x00" }
            ],
            "stateDump": { "after": [
                { "address": "00000000000000000000000000000000000000aa", "balance": "10", "code": "" }
            ]}
        },
        "comparison": {
            "block": { "transactions": [{}, {}] },
            "txTraces": [
                {
                    "gas": 21000,
                    "returnValue": "",
                    "structLogs": [
                        { "op": "PUSH1", "pc": 0, "gas": 100, "gasCost": 3, "depth": 1,
                          "stack": ["0x60"], "memory": { "0x20": "00" } },
                        { "op": "STOP", "pc": 2, "gas": 96, "gasCost": 0, "depth": 1 }
                    ]
                },
                {
                    "gas": 50000,
                    "returnValue": "deadbeef",
                    "structLogs": [
                        { "op": "CALLDATALOAD", "pc": 0, "gas": 400, "gasCost": 3, "depth": 1 }
                    ]
                }
            ],
            "receipts": [
                { "cumulativeGasUsed": 21000, "bloom": "0x00" },
                { "cumulativeGasUsed": "0x11170", "bloom": "0x00" }
            ],
            "accounts": {
                "0x00000000000000000000000000000000000000aa": { "balance": "0xa", "code": "0x" }
            }
        }
    }"#;
    let payload = TracePayload::from_json(text).unwrap();
    DiffContext::new(payload, "nimbus", "geth")
}

#[test]
fn test_menu_reflects_transaction_count() {
    logging::ensure_test_logging(None);
    info!("Running test");
    let ctx = sample_context();

    assert_eq!(menu_state(ctx.transaction_count()), MenuState::Dropdown(vec![0, 1]));
    assert_eq!(menu_state(0), MenuState::Disabled);
    assert_eq!(menu_state(1), MenuState::Single);
}

#[test]
fn test_step_list_flags_divergent_steps() {
    logging::ensure_test_logging(None);
    let ctx = sample_context();

    let entries = step_entries(&ctx, 0).unwrap();
    assert_eq!(entries.len(), 2);
    // step 0 differs only in memory, which does not feed the flag
    assert!(!entries[0].diverged);
    // step 1 differs on gas (97 vs 96)
    assert!(entries[1].diverged);
    assert_eq!(entries[0].label(), "0 PUSH1");
}

#[test]
fn test_step_view_union_tables() {
    logging::ensure_test_logging(None);
    let ctx = sample_context();

    let view = step_view(&ctx, 0, 0).unwrap();

    // stack is identical on both sides but non-empty, so it is present;
    // memory keys {0x0} and {0x20} union to exactly two rows; storage is
    // empty on both sides and omitted entirely.
    assert_eq!(view.extras.len(), 2);
    let memory = &view.extras[0];
    assert_eq!(memory.title.as_deref(), Some("memory"));
    assert_eq!(memory.rows.len(), 2);
    assert_eq!(memory.rows[0].field, "0x0");
    assert_eq!(memory.rows[1].field, "0x20");
    assert!(memory.rows[0].diverged);

    let stack = &view.extras[1];
    assert_eq!(stack.title.as_deref(), Some("stack"));
    assert!(!stack.has_divergence());
}

#[test]
fn test_step_view_is_idempotent() {
    logging::ensure_test_logging(None);
    let ctx = sample_context();

    assert_eq!(step_view(&ctx, 0, 0).unwrap(), step_view(&ctx, 0, 0).unwrap());
    assert_eq!(transaction_view(&ctx, 1).unwrap(), transaction_view(&ctx, 1).unwrap());
}

#[test]
fn test_receipt_view_no_numeric_normalization() {
    logging::ensure_test_logging(None);
    let ctx = sample_context();

    let table = transaction_view(&ctx, 0).unwrap();
    let cumulative = table.rows.iter().find(|r| r.field == "cumulativeGasUsed").unwrap();
    // 0x5208 and 21000 denote the same gas, but textual forms differ
    assert_eq!(cumulative.lhs, "0x5208");
    assert_eq!(cumulative.rhs, "21000");
    assert!(cumulative.diverged);
}

#[test]
fn test_receipt_view_return_value_alignment() {
    logging::ensure_test_logging(None);
    let ctx = sample_context();

    // tx 0: "0x" vs "" + prefix -> both "0x"
    let table = transaction_view(&ctx, 0).unwrap();
    assert!(!table.rows[1].diverged);

    // tx 1: "0xdeadbeef" vs "deadbeef" + prefix -> both "0xdeadbeef"
    let table = transaction_view(&ctx, 1).unwrap();
    assert_eq!(table.rows[1].lhs, "0xdeadbeef");
    assert_eq!(table.rows[1].rhs, "0xdeadbeef");
    assert!(!table.rows[1].diverged);
}

#[test]
fn test_state_view_presence_lookup() {
    logging::ensure_test_logging(None);
    let ctx = sample_context();

    let view = state_view(&ctx);
    assert_eq!(view.entries.len(), 1);
    assert_eq!(view.entries[0].address, "0x00000000000000000000000000000000000000aa");
    assert_eq!(view.entries[0].balance, "0x10");
    assert_eq!(view.entries[0].code, "0x");
    assert!(view.entries[0].in_comparison);
}

#[test]
fn test_out_of_range_selection_fails_closed() {
    logging::ensure_test_logging(None);
    let ctx = sample_context();

    assert!(matches!(
        step_view(&ctx, 9, 0),
        Err(RenderError::TransactionOutOfRange { index: 9, .. })
    ));
    assert!(matches!(step_view(&ctx, 0, 9), Err(RenderError::StepOutOfRange { step: 9, .. })));
    assert!(matches!(
        transaction_view(&ctx, 2),
        Err(RenderError::TransactionOutOfRange { index: 2, .. })
    ));
}

#[test]
fn test_summary_counts_divergences() {
    logging::ensure_test_logging(None);
    let ctx = sample_context();

    let summaries = summarize(&ctx).unwrap();
    assert_eq!(summaries.len(), 2);
    assert_eq!(summaries[0].diverged_steps, 1);
    assert_eq!(summaries[0].receipt_divergences, 1);
    assert!(summaries[0].has_divergence());
    assert_eq!(summaries[1].diverged_steps, 0);
    assert_eq!(summaries[1].receipt_divergences, 0);
    assert!(!summaries[1].has_divergence());
}

#[test]
fn test_view_state_navigation() {
    logging::ensure_test_logging(None);
    let mut state = ViewState::default();
    assert_eq!(state.view, ViewKind::Opcodes);

    state.select_view(ViewKind::Transactions);
    state.select_transaction(1);
    state.select_step(3);
    assert_eq!(state.transaction, 1);
    assert_eq!(state.step, 3);

    // switching transactions resets the step cursor
    state.select_transaction(0);
    assert_eq!(state.step, 0);
}
