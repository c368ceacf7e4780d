//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use carve::selection::{Location, Range};
use carve::GapBuffer;

/// Six 10-byte lines, `1abcdedgh\n` through `6nopqrstu\n`
pub const SIX_LINES: &str =
    "1abcdedgh\n2ijklmnop\n3qrstuvwx\n4yz abcde\n5fghijklm\n6nopqrstu\n";

/// Thirty 10-byte lines, `1abcdedgh\n` through `30z abcde\n`
pub const THIRTY_LINES: &str = concat!(
    "1abcdedgh\n2ijklmnop\n3qrstuvwx\n",
    "4yz abcde\n5fghijklm\n6nopqrstu\n",
    "7vwxyz ab\n8cdefghij\n9klmnopqr\n",
    "10stuvwxy\n11z abcde\n12fghijkl\n",
    "13mnopqrs\n14tuvwxyz\n15 abcdef\n",
    "16ghijklm\n17opqrstu\n18vwxzy a\n",
    "19bcdefgh\n20ijklmno\n21pqrstuv\n",
    "22wxyz ab\n23cdefghi\n24jklmnop\n",
    "25qrstuvw\n26yz abcd\n27efghijk\n",
    "28lmnopqr\n29stuvwxy\n30z abcde\n",
);

pub fn six_line_buffer() -> GapBuffer {
    GapBuffer::from_text(SIX_LINES)
}

pub fn thirty_line_buffer() -> GapBuffer {
    GapBuffer::from_text(THIRTY_LINES)
}

/// `[start, end)` in normalized form
pub fn test_range(buffer: &GapBuffer, start: isize, end: isize) -> Range {
    Range::new(Location::start_relative(start), Location::start_relative(end)).normalize(buffer)
}

/// Check the gap buffer's cached line/column against a fresh scan
pub fn assert_cursor_consistent(buffer: &GapBuffer) {
    let expected = buffer.coordinates(buffer.position()).unwrap();
    assert_eq!(
        (buffer.line(), buffer.column()),
        expected,
        "cursor at {} has stale line/column",
        buffer.position()
    );
    let (pre, post) = buffer.split();
    assert_eq!(pre.len(), buffer.position());
    assert_eq!([pre, post].concat(), buffer.contents());
}
