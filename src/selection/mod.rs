//! Locations and ranges over a [`GapBuffer`](crate::buffer::GapBuffer).
//!
//! Values here never hold a reference to their buffer; every operation that
//! needs the buffer's current length takes it as an argument. That keeps a
//! captured selection usable while the buffer is mutated through it.

mod location;
mod pattern;
mod range;

pub use location::{Anchor, EndRelative, Location, StartRelative};
pub use pattern::PatternMatch;
pub use range::Range;
