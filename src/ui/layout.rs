//! Layout helpers — split the terminal area into regions.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

use crate::app::viewport::NAV_ROWS;

/// Primary screen layout: the page, the fixed nav laid over its top rows,
/// and a bottom status bar.
pub struct AppLayout {
    pub page_area: Rect,
    pub nav_area: Rect,
    pub status_area: Rect,
}

impl AppLayout {
    /// Compute the layout from the full terminal area.
    pub fn from_area(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(1),    // page (takes all remaining space)
                Constraint::Length(1), // status bar
            ])
            .split(area);

        let page_area = chunks[0];
        let nav_area = Rect {
            height: NAV_ROWS.min(page_area.height),
            ..page_area
        };

        Self {
            page_area,
            nav_area,
            status_area: chunks[1],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nav_overlays_the_top_of_the_page() {
        let layout = AppLayout::from_area(Rect::new(0, 0, 80, 24));
        assert_eq!(layout.page_area, Rect::new(0, 0, 80, 23));
        assert_eq!(layout.nav_area, Rect::new(0, 0, 80, NAV_ROWS));
        assert_eq!(layout.status_area, Rect::new(0, 23, 80, 1));
    }
}
