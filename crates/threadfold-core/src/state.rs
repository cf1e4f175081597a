//! Session-scoped fold state: the global default and per-thread overrides.
//!
//! An explicit, constructible object rather than ambient module state, so
//! the engine stays testable in isolation and reentrant across multiple
//! simultaneous listings. Nothing here is persisted; the state lives for
//! the duration of the hosting session.

use std::collections::HashMap;

use crate::message::MessageId;

/// Recorded fold state for a single thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FoldState {
    Folded,
    Unfolded,
}

/// The process-wide default plus the override table.
///
/// Overrides are recorded only for threads the user folded or unfolded
/// individually; the two unconditional global operations clear the table
/// entirely.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    default_folded: bool,
    overrides: HashMap<MessageId, FoldState>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether new or unspecified threads should appear folded.
    pub fn default_folded(&self) -> bool {
        self.default_folded
    }

    pub fn set_default_folded(&mut self, folded: bool) {
        self.default_folded = folded;
    }

    /// Upserts the override for the thread rooted at `id`.
    pub fn save_override(&mut self, id: MessageId, state: FoldState) {
        self.overrides.insert(id, state);
    }

    pub fn lookup(&self, id: &MessageId) -> Option<FoldState> {
        self.overrides.get(id).copied()
    }

    /// Clears the override table. Invoked by the unconditional global
    /// toggles, which are not "individual" choices.
    pub fn reset_overrides(&mut self) {
        self.overrides.clear();
    }

    pub fn override_count(&self) -> usize {
        self.overrides.len()
    }
}
