//! Rendering the folded list into ratatui lines.
//!
//! Hidden rows are skipped entirely; a folded root keeps its own text and
//! gains the dimmed summary, aligned to a fixed column so a screenful of
//! folded threads reads as a table.

use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use threadfold_core::{LineSource, RegionSurface};
use unicode_width::UnicodeWidthStr;

/// Column where fold summaries start, when the root text is short enough.
const SUMMARY_COLUMN: usize = 48;

/// Line text accessor for rendering; extends the metadata-only
/// [`LineSource`] the engine reads.
pub trait DisplayLines: LineSource {
    fn line_text(&self, pos: usize) -> &str;
}

/// Renders the sequence with folds applied.
///
/// `cursor` is a sequence position; its row is rendered reversed. The
/// caller is expected to keep the cursor on a visible line (see
/// [`crate::view::ListView`]).
pub fn folded_lines(
    source: &impl DisplayLines,
    regions: &impl RegionSurface,
    summary_prefix: &str,
    cursor: usize,
) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    let mut pos = 0;
    while pos < source.len() {
        let text = source.line_text(pos);
        let region = regions.region_rooted_at(pos);
        let mut line = if let Some(region) = region {
            let pad = SUMMARY_COLUMN.saturating_sub(text.width()).max(1);
            Line::from(vec![
                Span::raw(text.to_string()),
                Span::raw(" ".repeat(pad)),
                Span::styled(
                    format!("{summary_prefix}{}", region.summary),
                    Style::default().add_modifier(Modifier::DIM | Modifier::ITALIC),
                ),
            ])
        } else {
            Line::from(text.to_string())
        };
        if pos == cursor {
            line = line.style(Style::default().add_modifier(Modifier::REVERSED));
        }
        lines.push(line);

        // A region always hides lines below its root, but clamp anyway so a
        // malformed region from a foreign surface cannot stall the walk.
        pos = match region {
            Some(region) => region.fold_end.max(pos + 1),
            None => pos + 1,
        };
    }
    lines
}

/// Maps each rendered row back to its sequence position.
///
/// Row `i` of [`folded_lines`] shows the line at `visible_positions(..)[i]`.
pub fn visible_positions(
    source: &impl LineSource,
    regions: &impl RegionSurface,
) -> Vec<usize> {
    let mut rows = Vec::new();
    let mut pos = 0;
    while pos < source.len() {
        rows.push(pos);
        pos = match regions.region_rooted_at(pos) {
            Some(region) => region.fold_end.max(pos + 1),
            None => pos + 1,
        };
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use threadfold_core::{
        FoldConfig, FoldEngine, FoldRegion, Message, MessageList, NoMarks, RegionSet, ThreadRole,
    };

    /// A message list paired with one display string per line.
    struct FixtureList {
        list: MessageList,
        texts: Vec<String>,
    }

    impl FixtureList {
        fn new() -> Self {
            Self {
                list: MessageList::new(),
                texts: Vec::new(),
            }
        }

        fn push(&mut self, text: &str, message: Message) {
            self.list.push(message);
            self.texts.push(text.to_string());
        }
    }

    impl LineSource for FixtureList {
        fn len(&self) -> usize {
            self.list.len()
        }

        fn message(&self, pos: usize) -> Option<&Message> {
            self.list.message(pos)
        }
    }

    impl DisplayLines for FixtureList {
        fn line_text(&self, pos: usize) -> &str {
            &self.texts[pos]
        }
    }

    fn fixture() -> FixtureList {
        let mut fx = FixtureList::new();
        fx.push("r1 subject", Message::new("r1", ThreadRole::Root));
        fx.push("  c1a", Message::new("c1a", ThreadRole::Child));
        fx.push("  c1b", Message::new("c1b", ThreadRole::Child));
        fx.push("r2 subject", Message::new("r2", ThreadRole::Root));
        fx.push("  c2a", Message::new("c2a", ThreadRole::Child));
        fx.push("  c2b", Message::new("c2b", ThreadRole::Child));
        fx
    }

    fn rendered_text(line: &Line<'_>) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_unfolded_renders_every_line() {
        let fx = fixture();
        let engine = FoldEngine::new(FoldConfig::default());

        let lines = folded_lines(&fx, engine.surface(), "▸ ", 0);
        assert_eq!(lines.len(), 6);
        assert_eq!(rendered_text(&lines[1]), "  c1a");
    }

    #[test]
    fn test_folded_thread_collapses_to_summary_row() {
        let fx = fixture();
        let mut engine = FoldEngine::new(FoldConfig::default());
        engine.fold(&fx, &NoMarks, 0, true);

        let lines = folded_lines(&fx, engine.surface(), "▸ ", 0);
        assert_eq!(lines.len(), 4);

        let root_row = rendered_text(&lines[0]);
        assert!(root_row.starts_with("r1 subject"));
        assert!(root_row.contains("▸ 2 hidden messages, 0 unread"));
        // Hidden children are gone from the output.
        assert_eq!(rendered_text(&lines[1]), "r2 subject");
    }

    #[test]
    fn test_summary_is_aligned_and_dimmed() {
        let fx = fixture();
        let mut engine = FoldEngine::new(FoldConfig::default());
        engine.fold(&fx, &NoMarks, 0, true);

        let lines = folded_lines(&fx, engine.surface(), "▸ ", 3);
        let summary_span = lines[0].spans.last().unwrap();
        assert!(summary_span.style.add_modifier.contains(Modifier::DIM));

        // Root text (10 cells) padded out to the summary column.
        let pad_span = &lines[0].spans[1];
        assert_eq!(pad_span.content.as_ref().len(), 48 - "r1 subject".width());
    }

    #[test]
    fn test_cursor_row_is_reversed() {
        let fx = fixture();
        let engine = FoldEngine::new(FoldConfig::default());

        let lines = folded_lines(&fx, engine.surface(), "▸ ", 2);
        assert!(lines[2].style.add_modifier.contains(Modifier::REVERSED));
        assert!(!lines[0].style.add_modifier.contains(Modifier::REVERSED));
    }

    #[test]
    fn test_degenerate_region_does_not_stall_the_walk() {
        let fx = fixture();
        // A region whose hidden range sits at or before its root never
        // comes out of the engine, but a foreign surface could attach one.
        let mut regions = RegionSet::new();
        regions.attach(FoldRegion {
            root: 2,
            fold_beg: 2,
            fold_end: 2,
            hidden: 0,
            unread: 0,
            summary: String::new(),
        });

        let rows = visible_positions(&fx, &regions);
        assert_eq!(rows, vec![0, 1, 2, 3, 4, 5]);

        let lines = folded_lines(&fx, &regions, "▸ ", 0);
        assert_eq!(lines.len(), 6);
    }

    #[test]
    fn test_visible_positions_round_trips_rows() {
        let fx = fixture();
        let mut engine = FoldEngine::new(FoldConfig::default());
        engine.fold(&fx, &NoMarks, 3, true);

        let rows = visible_positions(&fx, engine.surface());
        assert_eq!(rows, vec![0, 1, 2, 3]);
        assert_eq!(rows.len(), folded_lines(&fx, engine.surface(), "", 0).len());
    }
}
