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

//! Post-execution account snapshots.

use crate::value::RawValue;
use serde::Deserialize;

/// One account from a client's post-execution state dump.
///
/// List-shaped dumps carry a bare-hex `address` per entry; map-shaped dumps
/// key entries by address instead, leaving the field empty. Unknown fields
/// (code hash, storage root, storage) are accepted and ignored.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AccountRecord {
    /// Dump-internal label, when present.
    pub name: Option<String>,
    /// Account address, bare hex in list-shaped dumps.
    pub address: Option<String>,
    /// Balance in the dump's own encoding.
    pub balance: Option<RawValue>,
    /// Nonce in the dump's own encoding.
    pub nonce: Option<RawValue>,
    /// Deployed code, possibly empty.
    pub code: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_list_shaped_account() {
        let account: AccountRecord = serde_json::from_value(json!({
            "name": "internalTx0",
            "address": "0000000000000000000000000000000000000004",
            "nonce": "0000000000000000",
            "balance": "0",
            "codeHash": "c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470",
            "code": "",
            "storageRoot": "56e81f171bcc55a6ff8345e692c0f86e5b48e01b996cadc001622fb5e363b421",
            "storage": {}
        }))
        .unwrap();
        assert_eq!(account.address.as_deref(), Some("0000000000000000000000000000000000000004"));
        assert_eq!(account.balance.as_ref().unwrap().to_string(), "0");
    }

    #[test]
    fn test_map_shaped_account_has_no_address_field() {
        let account: AccountRecord = serde_json::from_value(json!({
            "balance": "0x607c9cea65ef7e19dd8",
            "nonce": "0000000000000000",
            "code": "0x",
            "storage": {}
        }))
        .unwrap();
        assert!(account.address.is_none());
        assert_eq!(account.code.as_deref(), Some("0x"));
    }
}
