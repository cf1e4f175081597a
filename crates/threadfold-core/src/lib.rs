//! Lazy thread folding for flat, line-addressed message lists.
//!
//! Threads are contiguous runs of lines starting at a root message. The
//! engine collapses a thread's descendants into a one-line summary
//! ("N hidden messages, M unread") on demand and restores them on demand,
//! without ever building a thread tree: thread boundaries are discovered by
//! short scans bounded by thread size.
//!
//! The host supplies the ordered line sequence ([`LineSource`]) and the
//! marked-message predicate ([`MarkQuery`]); the engine owns the fold
//! regions and the session state.

pub mod config;
pub mod cursor;
pub mod engine;
pub mod message;
pub mod range;
pub mod region;
pub mod state;

pub use config::FoldConfig;
pub use engine::{FOLDED_MARK_NOTICE, FoldEngine, MarkAttempt, wrap_mark};
pub use message::{Flag, LineSource, MarkQuery, Message, MessageId, MessageList, NoMarks, ThreadRole};
pub use region::{FoldRegion, RegionSet, RegionSurface};
pub use state::{FoldState, SessionState};
