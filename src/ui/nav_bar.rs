//! Fixed navigation bar: site title plus one label per section, with the
//! active section highlighted.  Docked over the hero it is transparent;
//! once floating it gets a solid background and a bottom border.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Widget},
};

use crate::core::tracker::ScrollSection;

use super::theme::Theme;

/// Gap between the title and the first label.
const TITLE_GAP: u16 = 3;

/// Horizontal extent of one rendered label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabelSpan {
    pub x: u16,
    pub width: u16,
}

/// Where each label lands inside `area`.  Labels that would overflow the
/// area are left out.
pub fn label_spans(title: &str, sections: &[ScrollSection], area: Rect) -> Vec<LabelSpan> {
    let right = area.x.saturating_add(area.width);
    let mut x = area.x + 1 + title.chars().count() as u16 + TITLE_GAP;
    let mut spans = Vec::with_capacity(sections.len());
    for section in sections {
        let width = section.label.chars().count() as u16 + 2;
        if x.saturating_add(width) > right {
            break;
        }
        spans.push(LabelSpan { x, width });
        x += width + 1;
    }
    spans
}

/// Section index under a click at (`column`, `row`), if any.
pub fn label_at(
    title: &str,
    sections: &[ScrollSection],
    area: Rect,
    column: u16,
    row: u16,
) -> Option<usize> {
    if row < area.y || row >= area.y.saturating_add(area.height) {
        return None;
    }
    label_spans(title, sections, area)
        .iter()
        .position(|s| column >= s.x && column < s.x + s.width)
}

pub struct NavBar<'a> {
    pub title: &'a str,
    pub sections: &'a [ScrollSection],
    pub active: Option<usize>,
    pub floating: bool,
}

impl Widget for NavBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width < 4 {
            return;
        }

        let base = if self.floating {
            Theme::nav_floating_style()
        } else {
            Theme::nav_docked_style()
        };
        if self.floating {
            buf.set_style(area, base);
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Theme::border_style())
                .render(area, buf);
        }

        let y = area.y + area.height.min(3) / 2;
        buf.set_line(
            area.x + 1,
            y,
            &Line::from(Span::styled(self.title, Theme::title_style())),
            area.width.saturating_sub(1),
        );

        let spans = label_spans(self.title, self.sections, area);
        for (idx, (span, section)) in spans.iter().zip(self.sections).enumerate() {
            let style = if self.active == Some(idx) {
                Theme::nav_active_style()
            } else {
                base
            };
            buf.set_string(span.x, y, format!(" {} ", section.label), style);
        }
    }
}
