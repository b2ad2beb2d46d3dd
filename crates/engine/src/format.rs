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

//! Cell text segmentation.
//!
//! Bloom filters, code blobs, and memory words run far past any sensible
//! column width. Cells are cut into fixed-width chunks for display; this is
//! a formatting concern only, the underlying value is untouched.

/// Display width of a table cell segment, in characters.
pub const CELL_WIDTH: usize = 32;

/// Cut text into fixed-size chunks of `size` characters; the final chunk
/// carries the remainder. Empty input yields a single empty chunk.
pub fn chunk_text(text: &str, size: usize) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    if chars.is_empty() {
        return vec![String::new()];
    }
    chars.chunks(size).map(|chunk| chunk.iter().collect()).collect()
}

/// Segment cell text into [`CELL_WIDTH`]-character blocks when it exceeds
/// that length; shorter text stays a single unsegmented block.
pub fn split32(text: &str) -> Vec<String> {
    if text.chars().count() > CELL_WIDTH {
        chunk_text(text, CELL_WIDTH)
    } else {
        vec![text.to_string()]
    }
}
