//! Stateless navigation primitives over the ordered line sequence.
//!
//! A thread is never materialized: it is the half-open range from one root
//! line to the next. These scans walk line-by-line from a position, so each
//! call costs O(thread length), not O(sequence length). Sequence boundaries
//! yield fallbacks or sentinels, never errors.

use crate::message::{LineSource, ThreadRole};

/// True iff the line at `pos` starts a thread.
///
/// An orphan that is also a first child counts as a root; a line without
/// message metadata never does.
pub fn is_thread_root(source: &impl LineSource, pos: usize) -> bool {
    match source.message(pos) {
        Some(message) => matches!(
            message.role,
            ThreadRole::Root | ThreadRole::OrphanFirstChild
        ),
        None => false,
    }
}

/// Start of the thread containing `pos`.
///
/// Scans backward (inclusive) until a root is found; the start of the
/// sequence is a valid fallback root, so this never fails.
pub fn thread_start(source: &impl LineSource, pos: usize) -> usize {
    let mut pos = pos.min(source.len().saturating_sub(1));
    while pos > 0 && !is_thread_root(source, pos) {
        pos -= 1;
    }
    pos
}

/// Exclusive end of the thread containing `pos`: the next root at or after
/// `pos + 1`, or `source.len()` when the thread runs to the end of the
/// sequence.
pub fn next_thread_start(source: &impl LineSource, pos: usize) -> usize {
    let mut next = pos.saturating_add(1);
    while next < source.len() && !is_thread_root(source, next) {
        next += 1;
    }
    next.min(source.len())
}

/// Start of the thread before the one containing `pos`, or `None` when
/// already in the first thread.
pub fn prev_thread_start(source: &impl LineSource, pos: usize) -> Option<usize> {
    let start = thread_start(source, pos);
    if start == 0 {
        return None;
    }
    Some(thread_start(source, start - 1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::{Message, MessageList, ThreadRole};

    fn root(id: &str) -> Message {
        Message::new(id, ThreadRole::Root)
    }

    fn child(id: &str) -> Message {
        Message::new(id, ThreadRole::Child)
    }

    /// Two threads of three lines each, plus a trailing blank line.
    fn fixture() -> MessageList {
        let mut list = MessageList::new();
        list.push(root("r1"));
        list.push(child("c1a"));
        list.push(child("c1b"));
        list.push(root("r2"));
        list.push(child("c2a"));
        list.push(child("c2b"));
        list.push_blank();
        list
    }

    #[test]
    fn test_root_classification() {
        let list = fixture();
        assert!(is_thread_root(&list, 0));
        assert!(!is_thread_root(&list, 1));
        assert!(is_thread_root(&list, 3));
        assert!(!is_thread_root(&list, 6)); // blank line
        assert!(!is_thread_root(&list, 99)); // out of bounds
    }

    #[test]
    fn test_orphan_first_child_promoted_to_root() {
        let mut list = MessageList::new();
        list.push(root("r1"));
        list.push(child("c1"));
        list.push(Message::new("orphan", ThreadRole::OrphanFirstChild));
        list.push(child("c2"));

        assert!(is_thread_root(&list, 2));
        assert_eq!(thread_start(&list, 3), 2);
        assert_eq!(next_thread_start(&list, 0), 2);
    }

    #[test]
    fn test_thread_start_falls_back_to_sequence_start() {
        let mut list = MessageList::new();
        list.push_blank();
        list.push(child("stray"));
        assert_eq!(thread_start(&list, 1), 0);

        let empty = MessageList::new();
        assert_eq!(thread_start(&empty, 5), 0);
    }

    #[test]
    fn test_next_thread_start_sentinel_at_end() {
        let list = fixture();
        assert_eq!(next_thread_start(&list, 0), 3);
        // Final thread runs to the end of the sequence.
        assert_eq!(next_thread_start(&list, 3), list.len());
        assert_eq!(next_thread_start(&list, list.len()), list.len());
    }

    #[test]
    fn test_prev_thread_start() {
        let list = fixture();
        assert_eq!(prev_thread_start(&list, 4), Some(0));
        assert_eq!(prev_thread_start(&list, 3), Some(0));
        assert_eq!(prev_thread_start(&list, 2), None);
        assert_eq!(prev_thread_start(&list, 0), None);
    }

    #[test]
    fn test_boundaries_partition_the_sequence() {
        let list = fixture();
        let mut boundaries = vec![0];
        let mut pos = 0;
        while pos < list.len() {
            pos = next_thread_start(&list, pos);
            boundaries.push(pos);
        }

        // No gaps, no overlaps: consecutive boundaries are strictly
        // increasing and the last one is the sequence end.
        assert_eq!(boundaries, vec![0, 3, list.len()]);
        for pair in boundaries.windows(2) {
            assert!(pair[0] < pair[1]);
        }
    }
}
