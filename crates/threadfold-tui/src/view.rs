//! List view state: cursor, notices, and dispatch into the fold engine.
//!
//! The view owns nothing but presentation state. Every fold operation goes
//! through the engine; marking goes through the engine's guard, and a
//! refusal surfaces as a transient notice instead of reaching the host's
//! mark command.

use threadfold_core::{
    FOLDED_MARK_NOTICE, FoldEngine, LineSource, MarkAttempt, MarkQuery, RegionSurface,
};

use crate::keys::Action;

/// Cursor, notice, and quit state for the folding list.
#[derive(Debug, Default)]
pub struct ListView {
    /// Cursor as a sequence position. Kept on a visible line.
    pub cursor: usize,
    /// Transient user-visible notice (e.g. a refused mark). Cleared on the
    /// next action.
    pub notice: Option<String>,
    quit: bool,
}

impl ListView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Applies one action.
    ///
    /// `mark_op` is the host's mark command; it is invoked only when the
    /// guard allows it.
    pub fn handle<S: RegionSurface>(
        &mut self,
        engine: &mut FoldEngine<S>,
        source: &impl LineSource,
        marks: &impl MarkQuery,
        action: Action,
        mark_op: &mut dyn FnMut(usize),
    ) {
        self.notice = None;
        match action {
            Action::CursorUp => {
                self.cursor = prev_visible(engine.surface(), self.cursor);
            }
            Action::CursorDown => {
                self.cursor = next_visible(source, engine.surface(), self.cursor);
            }
            Action::ThreadRoot => self.cursor = engine.thread_root(source, self.cursor),
            Action::PrevThreadRoot => {
                if let Some(pos) = engine.prev_thread_root(source, self.cursor) {
                    self.cursor = pos;
                }
            }
            Action::NextThreadRoot => {
                if let Some(pos) = engine.next_thread_root(source, self.cursor) {
                    self.cursor = pos;
                }
            }
            Action::Fold => engine.fold(source, marks, self.cursor, true),
            Action::Unfold => engine.unfold(source, self.cursor, true),
            Action::Toggle => engine.toggle(source, marks, self.cursor),
            Action::ToggleAndAdvance => {
                if let Some(pos) = engine.toggle_and_advance(source, marks, self.cursor) {
                    self.cursor = pos;
                }
            }
            Action::FoldAll => engine.fold_all(source, marks),
            Action::UnfoldAll => engine.unfold_all(),
            Action::ToggleAll => engine.toggle_all(source, marks),
            Action::Mark => {
                let pos = self.cursor;
                if engine.guard_mark(pos, || mark_op(pos)) == MarkAttempt::Refused {
                    self.notice = Some(FOLDED_MARK_NOTICE.to_string());
                }
            }
            Action::Quit => self.quit = true,
        }

        // A fold may have swallowed the cursor line; snap to the region's
        // root so the cursor stays on something visible.
        if let Some(root) = engine.surface().region_at(self.cursor).map(|r| r.root) {
            self.cursor = root;
        }
    }
}

/// Previous visible line, hopping over a hidden range to its root.
fn prev_visible(regions: &impl RegionSurface, pos: usize) -> usize {
    let prev = pos.saturating_sub(1);
    match regions.region_at(prev) {
        Some(region) => region.root,
        None => prev,
    }
}

/// Next visible line, hopping over a hidden range; stays put when nothing
/// visible follows.
fn next_visible(source: &impl LineSource, regions: &impl RegionSurface, pos: usize) -> usize {
    if source.is_empty() {
        return 0;
    }
    let last = source.len() - 1;
    let next = pos.saturating_add(1).min(last);
    match regions.region_at(next) {
        Some(region) if region.fold_end > last => pos,
        Some(region) => region.fold_end,
        None => next,
    }
}
