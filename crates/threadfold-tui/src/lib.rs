//! Reference terminal surface for the thread-folding engine.
//!
//! The engine core is rendering-agnostic; this crate shows one complete
//! surface: ratatui lines with hidden rows skipped and summaries drawn on
//! folded roots, plus crossterm key bindings for every engine operation.

pub mod keys;
pub mod render;
pub mod view;

pub use keys::{Action, action_for};
pub use render::{DisplayLines, folded_lines, visible_positions};
pub use view::ListView;
