//! Fold regions: the attachable annotation that collapses a line range.
//!
//! A region is pure data; how it is drawn belongs to the surface. The
//! [`RegionSurface`] trait is the seam between the engine and whatever
//! renders the list (terminal view, GUI widget): attach, detach, and
//! query-by-range. [`RegionSet`] is the in-memory implementation the engine
//! uses by default; surfaces that keep their own annotation objects
//! implement the trait instead.

use std::collections::BTreeMap;

/// A collapsed line range with its rendered summary.
///
/// Lines in `[fold_beg, fold_end)` are hidden; `root` is the line that
/// carries the summary text and the folded styling. At most one region
/// exists per thread: the engine always queries for an existing region
/// before attaching a new one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoldRegion {
    /// Line that stays visible and shows the summary.
    pub root: usize,
    /// First hidden line.
    pub fold_beg: usize,
    /// Exclusive end of the hidden range.
    pub fold_end: usize,
    /// Number of hidden lines.
    pub hidden: usize,
    /// Unread messages inside the hidden range.
    pub unread: usize,
    /// Rendered summary, e.g. `"4 hidden messages, 2 unread"`.
    pub summary: String,
}

impl FoldRegion {
    /// True when `pos` falls inside the hidden line range.
    pub fn contains(&self, pos: usize) -> bool {
        (self.fold_beg..self.fold_end).contains(&pos)
    }
}

/// Renders the one-line fold summary.
pub fn summary_text(hidden: usize, unread: usize) -> String {
    format!("{hidden} hidden messages, {unread} unread")
}

/// Abstract store of renderable fold regions.
///
/// All operations are idempotent: detaching an absent region or clearing an
/// empty surface has no effect.
pub trait RegionSurface {
    /// Attaches a region. Replaces any region already rooted at the same
    /// line.
    fn attach(&mut self, region: FoldRegion);

    /// Detaches the region rooted at `root`. Idempotent.
    fn detach(&mut self, root: usize);

    /// The region whose hidden range overlaps any line of `[beg, end)`.
    fn region_overlapping(&self, beg: usize, end: usize) -> Option<&FoldRegion>;

    /// The region rooted at exactly `root`.
    fn region_rooted_at(&self, root: usize) -> Option<&FoldRegion>;

    /// Detaches every region.
    fn clear(&mut self);

    /// The region whose hidden range covers `pos`.
    fn region_at(&self, pos: usize) -> Option<&FoldRegion> {
        self.region_overlapping(pos, pos + 1)
    }
}

/// In-memory region store keyed by root line.
#[derive(Debug, Clone, Default)]
pub struct RegionSet {
    regions: BTreeMap<usize, FoldRegion>,
}

impl RegionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Regions in root order.
    pub fn iter(&self) -> impl Iterator<Item = &FoldRegion> {
        self.regions.values()
    }
}

impl RegionSurface for RegionSet {
    fn attach(&mut self, region: FoldRegion) {
        self.regions.insert(region.root, region);
    }

    fn detach(&mut self, root: usize) {
        self.regions.remove(&root);
    }

    fn region_overlapping(&self, beg: usize, end: usize) -> Option<&FoldRegion> {
        self.regions
            .values()
            .find(|region| region.fold_beg < end && region.fold_end > beg)
    }

    fn region_rooted_at(&self, root: usize) -> Option<&FoldRegion> {
        self.regions.get(&root)
    }

    fn clear(&mut self) {
        self.regions.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn region(root: usize, fold_beg: usize, fold_end: usize) -> FoldRegion {
        let hidden = fold_end - fold_beg;
        FoldRegion {
            root,
            fold_beg,
            fold_end,
            hidden,
            unread: 0,
            summary: summary_text(hidden, 0),
        }
    }

    #[test]
    fn test_summary_text() {
        assert_eq!(summary_text(4, 2), "4 hidden messages, 2 unread");
    }

    #[test]
    fn test_contains_is_half_open() {
        let r = region(0, 1, 4);
        assert!(!r.contains(0));
        assert!(r.contains(1));
        assert!(r.contains(3));
        assert!(!r.contains(4));
    }

    #[test]
    fn test_region_overlapping() {
        let mut set = RegionSet::new();
        set.attach(region(0, 1, 4));
        set.attach(region(4, 5, 8));

        // Query by thread range finds the region inside it.
        assert_eq!(set.region_overlapping(0, 4).unwrap().root, 0);
        assert_eq!(set.region_overlapping(4, 8).unwrap().root, 4);
        // The hidden range of one thread never bleeds into the next.
        assert!(set.region_overlapping(8, 12).is_none());
    }

    #[test]
    fn test_region_at_covers_hidden_lines_only() {
        let mut set = RegionSet::new();
        set.attach(region(0, 1, 4));
        assert!(set.region_at(0).is_none()); // root stays visible
        assert!(set.region_at(2).is_some());
        assert!(set.region_at(4).is_none());
    }

    #[test]
    fn test_detach_is_idempotent() {
        let mut set = RegionSet::new();
        set.attach(region(0, 1, 4));
        set.detach(0);
        set.detach(0);
        assert!(set.is_empty());
    }

    #[test]
    fn test_clear_detaches_everything() {
        let mut set = RegionSet::new();
        set.attach(region(0, 1, 4));
        set.attach(region(4, 5, 8));
        set.clear();
        assert!(set.is_empty());
        assert!(set.region_overlapping(0, 8).is_none());
    }
}
