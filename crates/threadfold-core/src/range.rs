//! Fold-range calculation: which descendant lines of a thread get hidden.
//!
//! Folding must never hide a message the user is engaged with. A marked
//! line always stops the scan; an unread line stops it unless the engine is
//! configured to fold unread messages. The stopping line stays visible.

use crate::message::{LineSource, MarkQuery};

/// Computed extent of a fold, before any region is attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FoldPlan {
    /// First hidden line (the line after the thread root).
    pub fold_beg: usize,
    /// Exclusive end of the hidden range.
    pub fold_end: usize,
    /// Number of hidden lines (`fold_end - fold_beg`).
    pub hidden: usize,
    /// Unread messages inside the hidden range, for the summary.
    pub unread: usize,
}

/// Decides which lines of the thread `[start, end)` should be hidden.
///
/// Returns `None` when the thread has no descendant lines (root only).
/// Otherwise scans forward from the line after the root and stops at:
///
/// - a line without message metadata,
/// - a marked line (checked before unread: a line that is both marked and
///   unread stops the scan as "marked"),
/// - an unread line, unless `fold_unread` is set,
/// - the thread end boundary.
///
/// When `fold_unread` is false no unread message is ever hidden, so the
/// reported `unread` count is forced to 0 rather than misleading the
/// summary.
pub fn plan(
    source: &impl LineSource,
    marks: &impl MarkQuery,
    start: usize,
    end: usize,
    fold_unread: bool,
) -> Option<FoldPlan> {
    let fold_beg = start + 1;
    if fold_beg >= end {
        return None;
    }

    let mut unread = 0;
    let mut fold_end = fold_beg;
    while fold_end < end {
        let Some(message) = source.message(fold_end) else {
            break;
        };
        if marks.is_marked(&message.id) {
            break;
        }
        if message.is_unread() {
            unread += 1;
            if !fold_unread {
                break;
            }
        }
        fold_end += 1;
    }

    if !fold_unread {
        unread = 0;
    }

    Some(FoldPlan {
        fold_beg,
        fold_end,
        hidden: fold_end - fold_beg,
        unread,
    })
}
