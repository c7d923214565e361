//! # Floor Layout
//!
//! Where the table cards sit on the virtual screen, for hit testing
//! drag input. Input coordinates arrive in the same space.
//!
//! ```text
//!   x: 0            320              480              640
//!      ┌────────────┬────────────────┬────────────────┐  y = 80  (viewport top)
//!      │            │    card 0      │    card 1      │
//!      │   menu     ├────────────────┼────────────────┤  y = 200
//!      │   panel    │    card 2      │    card 3      │
//!      │            ├────────────────┼────────────────┤  y = 320
//!      │            │    card 4      │    card 5      │
//!      └────────────┴────────────────┴────────────────┘  y = 440 (viewport bottom)
//!                   │    card 6      │    card 7      │  scrolled out of view
//!                   └────────────────┴────────────────┘
//! ```
//!
//! Cards follow the visible (filtered) table order, so the layout is
//! re-arranged on every render.

use tablepos_core::drag::{HitTest, Point, ScrollDirection, Viewport};
use tablepos_core::TableId;
use tracing::trace;

/// Card grid geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridGeometry {
    /// Left edge of the table list.
    pub origin_x: f64,
    pub card_width: f64,
    pub card_height: f64,
    pub columns: usize,
    pub viewport: Viewport,
}

impl Default for GridGeometry {
    fn default() -> Self {
        GridGeometry {
            origin_x: 320.0,
            card_width: 160.0,
            card_height: 120.0,
            columns: 2,
            viewport: Viewport {
                top: 80.0,
                bottom: 440.0,
            },
        }
    }
}

/// The scrollable table grid.
#[derive(Debug, Clone, Default)]
pub struct GridLayout {
    geometry: GridGeometry,
    cards: Vec<TableId>,
    scroll: f64,
}

impl GridLayout {
    pub fn new(geometry: GridGeometry) -> Self {
        GridLayout {
            geometry,
            cards: Vec::new(),
            scroll: 0.0,
        }
    }

    /// Lays the given tables out in order, keeping the scroll position
    /// where it still fits.
    pub fn arrange(&mut self, tables: impl IntoIterator<Item = TableId>) {
        self.cards = tables.into_iter().collect();
        self.scroll = self.scroll.min(self.max_scroll());
    }

    pub fn scroll_offset(&self) -> f64 {
        self.scroll
    }

    /// Scrolls by `step` pixels, clamped to the content. Returns whether
    /// the position changed.
    pub fn scroll_by(&mut self, direction: ScrollDirection, step: f64) -> bool {
        let before = self.scroll;
        let next = match direction {
            ScrollDirection::Up => before - step,
            ScrollDirection::Down => before + step,
        };
        self.scroll = next.clamp(0.0, self.max_scroll());
        trace!(offset = self.scroll, "List scrolled");
        self.scroll != before
    }

    /// Centre of a table's card in screen coordinates, if laid out.
    pub fn card_center(&self, table: TableId) -> Option<Point> {
        let index = self.cards.iter().position(|&id| id == table)?;
        let g = &self.geometry;
        let column = (index % g.columns) as f64;
        let row = (index / g.columns) as f64;

        Some(Point::new(
            g.origin_x + (column + 0.5) * g.card_width,
            g.viewport.top + (row + 0.5) * g.card_height - self.scroll,
        ))
    }

    fn content_height(&self) -> f64 {
        let rows = self.cards.len().div_ceil(self.geometry.columns.max(1));
        rows as f64 * self.geometry.card_height
    }

    fn max_scroll(&self) -> f64 {
        let visible = self.geometry.viewport.bottom - self.geometry.viewport.top;
        (self.content_height() - visible).max(0.0)
    }
}

impl HitTest for GridLayout {
    fn table_at(&self, at: Point) -> Option<TableId> {
        let g = &self.geometry;
        if at.y < g.viewport.top || at.y >= g.viewport.bottom || at.x < g.origin_x {
            return None;
        }

        let column = ((at.x - g.origin_x) / g.card_width) as usize;
        if column >= g.columns {
            return None;
        }
        let row = ((at.y - g.viewport.top + self.scroll) / g.card_height) as usize;

        self.cards.get(row * g.columns + column).copied()
    }

    fn scroll_viewport(&self) -> Option<Viewport> {
        Some(self.geometry.viewport)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eight_tables() -> GridLayout {
        let mut layout = GridLayout::default();
        layout.arrange(1..=8);
        layout
    }

    #[test]
    fn test_hit_test_grid() {
        let layout = eight_tables();
        assert_eq!(layout.table_at(Point::new(330.0, 90.0)), Some(1));
        assert_eq!(layout.table_at(Point::new(500.0, 90.0)), Some(2));
        assert_eq!(layout.table_at(Point::new(330.0, 210.0)), Some(3));
    }

    #[test]
    fn test_outside_grid_misses() {
        let layout = eight_tables();
        assert_eq!(layout.table_at(Point::new(100.0, 100.0)), None);
        assert_eq!(layout.table_at(Point::new(700.0, 100.0)), None);
        assert_eq!(layout.table_at(Point::new(330.0, 20.0)), None);
        assert_eq!(layout.table_at(Point::new(330.0, 500.0)), None);
    }

    #[test]
    fn test_card_center_round_trips() {
        let layout = eight_tables();
        for id in 1..=6 {
            let center = layout.card_center(id).unwrap();
            assert_eq!(layout.table_at(center), Some(id));
        }
        assert_eq!(layout.card_center(42), None);
    }

    #[test]
    fn test_scrolling_reveals_lower_rows() {
        let mut layout = eight_tables();
        let bottom_left = Point::new(330.0, 430.0);
        assert_eq!(layout.table_at(bottom_left), Some(5));

        assert!(layout.scroll_by(ScrollDirection::Down, 200.0));
        // Clamped to content height (480) minus viewport height (360).
        assert_eq!(layout.scroll_offset(), 120.0);
        assert_eq!(layout.table_at(bottom_left), Some(7));

        assert!(!layout.scroll_by(ScrollDirection::Down, 12.0));
        assert!(layout.scroll_by(ScrollDirection::Up, 500.0));
        assert_eq!(layout.scroll_offset(), 0.0);
    }

    #[test]
    fn test_fewer_cards_reset_scroll() {
        let mut layout = eight_tables();
        layout.scroll_by(ScrollDirection::Down, 120.0);
        layout.arrange([2, 4]);
        assert_eq!(layout.scroll_offset(), 0.0);
        assert_eq!(layout.table_at(Point::new(500.0, 90.0)), Some(4));
    }
}
