//! Fold orchestration: the user-facing fold/unfold/toggle operations.
//!
//! The engine composes the cursor, the range calculator, and the region
//! surface into the operations a host binds to keys. It owns the session
//! state and the surface exclusively; the line sequence and the mark
//! predicate are borrowed per call and never stored, so a new query on the
//! host side simply means calling [`FoldEngine::apply_all`] with the new
//! sequence.
//!
//! Nothing here fails: boundary conditions are no-ops or sentinel results.

use tracing::{debug, trace};

use crate::config::FoldConfig;
use crate::cursor;
use crate::message::{LineSource, MarkQuery, MessageId};
use crate::range;
use crate::region::{self, FoldRegion, RegionSet, RegionSurface};
use crate::state::{FoldState, SessionState};

/// Outcome of a guarded mark attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkAttempt {
    /// The delegate operation ran.
    Performed,
    /// The position is hidden inside a fold; the delegate was not invoked.
    Refused,
}

/// Notice surfaces show the user when marking is refused inside a fold.
pub const FOLDED_MARK_NOTICE: &str = "Cannot mark a hidden message; unfold the thread first";

/// The thread-folding engine.
///
/// Generic over the region surface so hosts with native annotation objects
/// can plug theirs in; [`RegionSet`] is the default in-memory store.
pub struct FoldEngine<S: RegionSurface = RegionSet> {
    config: FoldConfig,
    state: SessionState,
    surface: S,
}

impl FoldEngine<RegionSet> {
    /// Creates an engine backed by the in-memory region store.
    pub fn new(config: FoldConfig) -> Self {
        Self::with_surface(config, RegionSet::new())
    }
}

impl<S: RegionSurface> FoldEngine<S> {
    pub fn with_surface(config: FoldConfig, surface: S) -> Self {
        Self {
            config,
            state: SessionState::new(),
            surface,
        }
    }

    pub fn config(&self) -> &FoldConfig {
        &self.config
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Mutable session state, for hosts that record overrides directly.
    pub fn state_mut(&mut self) -> &mut SessionState {
        &mut self.state
    }

    // ------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------

    /// Root line of the thread containing `pos`.
    pub fn thread_root(&self, source: &impl LineSource, pos: usize) -> usize {
        cursor::thread_start(source, pos)
    }

    /// Root of the previous thread, or `None` when already in the first.
    pub fn prev_thread_root(&self, source: &impl LineSource, pos: usize) -> Option<usize> {
        cursor::prev_thread_start(source, pos)
    }

    /// Root of the next thread, or `None` when there is no further thread.
    pub fn next_thread_root(&self, source: &impl LineSource, pos: usize) -> Option<usize> {
        let next = cursor::next_thread_start(source, pos);
        (next < source.len()).then_some(next)
    }

    // ------------------------------------------------------------------
    // Per-thread operations
    // ------------------------------------------------------------------

    /// True when the thread containing `pos` is currently folded.
    pub fn is_folded(&self, source: &impl LineSource, pos: usize) -> bool {
        let start = cursor::thread_start(source, pos);
        let end = cursor::next_thread_start(source, start);
        self.surface.region_overlapping(start, end).is_some()
    }

    /// Folds the thread containing `pos`.
    ///
    /// No-op when the thread is already folded or when fewer than two
    /// lines would be hidden. With `persist`, an actual transition records
    /// an individual override for the thread.
    pub fn fold(
        &mut self,
        source: &impl LineSource,
        marks: &impl MarkQuery,
        pos: usize,
        persist: bool,
    ) {
        let start = cursor::thread_start(source, pos);
        let end = cursor::next_thread_start(source, start);
        if self.surface.region_overlapping(start, end).is_some() {
            return;
        }
        let Some(plan) = range::plan(source, marks, start, end, self.config.fold_unread) else {
            return;
        };
        if plan.hidden <= 1 {
            // A single hidden line is not worth a summary.
            return;
        }

        trace!(
            root = start,
            fold_beg = plan.fold_beg,
            fold_end = plan.fold_end,
            hidden = plan.hidden,
            "attaching fold region"
        );
        self.surface.attach(FoldRegion {
            root: start,
            fold_beg: plan.fold_beg,
            fold_end: plan.fold_end,
            hidden: plan.hidden,
            unread: plan.unread,
            summary: region::summary_text(plan.hidden, plan.unread),
        });

        if persist && let Some(id) = root_id(source, start) {
            self.state.save_override(id, FoldState::Folded);
        }
    }

    /// Unfolds the thread containing `pos`.
    ///
    /// Skipped entirely when the thread start is the last line of the
    /// sequence; otherwise a no-op when the thread is not folded.
    pub fn unfold(&mut self, source: &impl LineSource, pos: usize, persist: bool) {
        let start = cursor::thread_start(source, pos);
        // Nothing can be hidden below the last line.
        if start + 1 >= source.len() {
            return;
        }
        let end = cursor::next_thread_start(source, start);
        let Some(root) = self
            .surface
            .region_overlapping(start, end)
            .map(|region| region.root)
        else {
            return;
        };

        self.surface.detach(root);
        debug!(root, "thread unfolded");

        if persist && let Some(id) = root_id(source, start) {
            self.state.save_override(id, FoldState::Unfolded);
        }
    }

    /// Folds an unfolded thread, unfolds a folded one. Persisted.
    pub fn toggle(&mut self, source: &impl LineSource, marks: &impl MarkQuery, pos: usize) {
        if self.is_folded(source, pos) {
            self.unfold(source, pos, true);
        } else {
            self.fold(source, marks, pos, true);
        }
    }

    /// Toggles the thread containing `pos`, then returns the next thread
    /// root for the host cursor, if any.
    pub fn toggle_and_advance(
        &mut self,
        source: &impl LineSource,
        marks: &impl MarkQuery,
        pos: usize,
    ) -> Option<usize> {
        self.toggle(source, marks, pos);
        self.next_thread_root(source, pos)
    }

    // ------------------------------------------------------------------
    // Global operations
    // ------------------------------------------------------------------

    /// Unconditionally folds every thread.
    ///
    /// Clears the override table (a global toggle is not an individual
    /// choice) and makes "folded" the default for the reconciliation pass.
    pub fn fold_all(&mut self, source: &impl LineSource, marks: &impl MarkQuery) {
        debug!("folding all threads");
        self.state.reset_overrides();
        self.state.set_default_folded(true);

        let mut start = 0;
        while start < source.len() {
            let end = cursor::next_thread_start(source, start);
            self.fold(source, marks, start, false);
            start = end;
        }
    }

    /// Unconditionally unfolds every thread.
    pub fn unfold_all(&mut self) {
        debug!("unfolding all threads");
        self.state.reset_overrides();
        self.state.set_default_folded(false);
        self.surface.clear();
    }

    /// Folds everything when the global default is "unfolded", and vice
    /// versa.
    pub fn toggle_all(&mut self, source: &impl LineSource, marks: &impl MarkQuery) {
        if self.state.default_folded() {
            self.unfold_all();
        } else {
            self.fold_all(source, marks);
        }
    }

    /// Reconciles fold state after the underlying sequence changed.
    ///
    /// Visits every thread in sequence order: each takes the global
    /// default, except threads with an individual override, which are
    /// forced to their recorded state. The length sentinel from the cursor
    /// guarantees the final thread is visited even when no further root
    /// exists.
    pub fn apply_all(&mut self, source: &impl LineSource, marks: &impl MarkQuery) {
        debug!(
            default_folded = self.state.default_folded(),
            overrides = self.state.override_count(),
            "applying fold state to all threads"
        );
        let global = if self.state.default_folded() {
            FoldState::Folded
        } else {
            FoldState::Unfolded
        };

        let mut start = 0;
        while start < source.len() {
            let end = cursor::next_thread_start(source, start);
            let desired = root_id(source, start)
                .and_then(|id| self.state.lookup(&id))
                .unwrap_or(global);
            match desired {
                FoldState::Folded => self.fold(source, marks, start, false),
                FoldState::Unfolded => self.unfold(source, start, false),
            }
            start = end;
        }
    }

    // ------------------------------------------------------------------
    // Mark guard
    // ------------------------------------------------------------------

    /// Runs `delegate` unless `pos` is hidden inside a fold region.
    ///
    /// The host's mark command must consult this before acting; on
    /// [`MarkAttempt::Refused`] the surface shows [`FOLDED_MARK_NOTICE`]
    /// and the delegate is never invoked.
    pub fn guard_mark(&self, pos: usize, delegate: impl FnOnce()) -> MarkAttempt {
        if self.surface.region_at(pos).is_some() {
            debug!(pos, "mark refused inside folded region");
            return MarkAttempt::Refused;
        }
        delegate();
        MarkAttempt::Performed
    }
}

/// Higher-order form of the guard: wraps a mark operation into one that
/// checks the fold surface before delegating. Ordinary function
/// composition, no runtime patching.
pub fn wrap_mark<S, F>(mut delegate: F) -> impl FnMut(&S, usize) -> MarkAttempt
where
    S: RegionSurface,
    F: FnMut(usize),
{
    move |surface, pos| {
        if surface.region_at(pos).is_some() {
            return MarkAttempt::Refused;
        }
        delegate(pos);
        MarkAttempt::Performed
    }
}

fn root_id(source: &impl LineSource, start: usize) -> Option<MessageId> {
    source.message(start).map(|message| message.id.clone())
}
