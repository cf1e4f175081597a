//! Message records and the read-only accessors supplied by the host.
//!
//! The engine never owns the message list. The host renderer produces an
//! ordered sequence of display lines and attaches a fixed [`Message`] record
//! to the lines that carry one; header and separator lines carry none. The
//! engine reads that sequence through [`LineSource`] and consults the host's
//! marking subsystem through [`MarkQuery`]. It mutates neither.

use std::collections::HashSet;
use std::fmt;

use enum_map::{Enum, EnumMap};

/// Stable identity of a message, as assigned by the host's index.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MessageId(String);

impl MessageId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for MessageId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for MessageId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Per-message flags visible to the engine.
///
/// Only `Unread` affects folding; the others exist so the flag set is a real
/// set and hosts can round-trip their own flags through the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Enum)]
pub enum Flag {
    Unread,
    Flagged,
    Replied,
}

/// Role of a message within its thread, as computed by the host renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThreadRole {
    /// First message of a thread.
    Root,
    /// Descendant of a root in the same thread.
    Child,
    /// An orphan that is also the first child of its (missing) thread.
    /// Promoted to root-equivalent for folding purposes.
    OrphanFirstChild,
    /// Anything else (standalone, unthreaded).
    Other,
}

/// Fixed message record attached to a display line.
#[derive(Debug, Clone)]
pub struct Message {
    pub id: MessageId,
    pub flags: EnumMap<Flag, bool>,
    pub role: ThreadRole,
}

impl Message {
    pub fn new(id: impl Into<MessageId>, role: ThreadRole) -> Self {
        Self {
            id: id.into(),
            flags: EnumMap::default(),
            role,
        }
    }

    /// Builder-style flag setter.
    pub fn with_flag(mut self, flag: Flag) -> Self {
        self.flags[flag] = true;
        self
    }

    pub fn is_unread(&self) -> bool {
        self.flags[Flag::Unread]
    }
}

/// Read accessor onto the host renderer's ordered line sequence.
///
/// Positions are line indices in display order. The engine assumes the order
/// is stable between folding operations; after the host swaps the sequence
/// (a new query), it runs the reconciliation pass instead of trusting stale
/// positions.
pub trait LineSource {
    /// Total number of display lines.
    fn len(&self) -> usize;

    /// The message record attached to `pos`, if the line carries one.
    fn message(&self, pos: usize) -> Option<&Message>;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Marked-message predicate supplied by the host's marking subsystem.
///
/// Consulted only during the fold-range scan; the engine never marks or
/// unmarks anything itself.
pub trait MarkQuery {
    fn is_marked(&self, id: &MessageId) -> bool;
}

impl MarkQuery for HashSet<MessageId> {
    fn is_marked(&self, id: &MessageId) -> bool {
        self.contains(id)
    }
}

/// No messages marked. Useful for hosts without a marking subsystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoMarks;

impl MarkQuery for NoMarks {
    fn is_marked(&self, _id: &MessageId) -> bool {
        false
    }
}

/// The simplest owned [`LineSource`]: a vector of optional message records.
///
/// `None` entries model header or separator lines with no metadata.
#[derive(Debug, Clone, Default)]
pub struct MessageList {
    lines: Vec<Option<Message>>,
}

impl MessageList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: Message) {
        self.lines.push(Some(message));
    }

    /// Appends a line with no message metadata.
    pub fn push_blank(&mut self) {
        self.lines.push(None);
    }
}

impl LineSource for MessageList {
    fn len(&self) -> usize {
        self.lines.len()
    }

    fn message(&self, pos: usize) -> Option<&Message> {
        self.lines.get(pos).and_then(Option::as_ref)
    }
}

impl FromIterator<Option<Message>> for MessageList {
    fn from_iter<I: IntoIterator<Item = Option<Message>>>(iter: I) -> Self {
        Self {
            lines: iter.into_iter().collect(),
        }
    }
}
