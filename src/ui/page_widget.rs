//! Renders the visible slice of the laid-out page.
//!
//! Each section is a band of rows: a padding row, the heading, an underline
//! and then the body copy.  The backdrop container is painted with the
//! colour of whichever frame is currently opaque and captioned on its last
//! row.

use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget};

use crate::app::document::{Block, Document};
use crate::app::page::Page;
use crate::app::page_view::Derived;
use crate::core::background::frame_opacity;

use super::theme::Theme;

const HEADING_ROW: u16 = 1;
const UNDERLINE_ROW: u16 = 2;
const BODY_ROW: u16 = 3;

pub struct PageWidget<'a> {
    pub document: &'a Document,
    pub page: &'a Page,
    /// First document row at the top of the area.
    pub first_row: u32,
    pub derived: Derived,
}

impl PageWidget<'_> {
    /// The opaque backdrop frame, or the first one if none is.
    fn opaque_frame(&self) -> usize {
        let frames = self.page.backdrop.frames.len();
        (0..frames)
            .find(|&i| frame_opacity(i, self.derived.active_frame) >= 1.0)
            .unwrap_or(0)
    }

    fn render_row(&self, block: &Block, inner: u16, x: u16, y: u16, width: u16, buf: &mut Buffer) {
        let Some(copy) = self.page.sections.get(block.index) else {
            return;
        };
        let is_backdrop = block.id == self.page.backdrop.container;
        let frame = self.opaque_frame();

        let style = if is_backdrop {
            Theme::backdrop_style(frame)
        } else {
            Theme::section_style(block.index)
        };
        buf.set_style(Rect::new(x, y, width, 1), style);

        let text_x = x + 2;
        let text_w = width.saturating_sub(4);
        match inner {
            HEADING_ROW => {
                if self.derived.active_section == Some(block.index) {
                    buf.set_string(x, y, "▌", Theme::active_marker_style());
                }
                buf.set_stringn(text_x, y, copy.heading, text_w as usize, Theme::heading_style());
            }
            UNDERLINE_ROW => {
                let len = (copy.heading.chars().count() as u16).min(text_w);
                buf.set_string(text_x, y, "─".repeat(len as usize), Theme::border_style());
            }
            r if r >= BODY_ROW => {
                if let Some(line) = copy.body.get((r - BODY_ROW) as usize) {
                    buf.set_stringn(text_x, y, line, text_w as usize, style);
                }
            }
            _ => {}
        }

        if is_backdrop && inner + 1 == block.rows {
            let frames = self.page.backdrop.frames;
            if let Some(label) = frames.get(frame) {
                let caption = format!("◆ {label} {}/{}", frame + 1, frames.len());
                buf.set_stringn(text_x, y, caption, text_w as usize, Theme::caption_style());
            }
        }
    }
}

impl Widget for PageWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        for dy in 0..area.height {
            let row = self.first_row + dy as u32;
            let Some((block, inner)) = self.document.block_at_row(row) else {
                break;
            };
            self.render_row(block, inner, area.x, area.y + dy, area.width, buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::document::ROW_PX;
    use crate::app::page::SITE;

    fn row_text(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, y)].symbol())
            .collect::<String>()
    }

    fn render(first_row: u32, derived: Derived, height: u16) -> Buffer {
        let doc = Document::layout(&SITE);
        let area = Rect::new(0, 0, 80, height);
        let mut buf = Buffer::empty(area);
        PageWidget {
            document: &doc,
            page: &SITE,
            first_row,
            derived,
        }
        .render(area, &mut buf);
        buf
    }

    #[test]
    fn hero_heading_is_marked_when_active() {
        let active = Derived {
            active_section: Some(0),
            ..Derived::default()
        };
        let buf = render(0, active, 10);
        assert_eq!(buf[(0, 1)].symbol(), "▌");
        assert!(row_text(&buf, 1).contains("Energy that manages itself"));
        assert!(row_text(&buf, 2).trim_start().starts_with('─'));
        assert!(row_text(&buf, 3).contains("Metering, forecasting"));

        let idle = render(0, Derived::default(), 10);
        assert_eq!(idle[(0, 1)].symbol(), " ");
    }

    #[test]
    fn backdrop_uses_the_opaque_frame() {
        let doc = Document::layout(&SITE);
        let services = doc.block("services").unwrap();
        let first = (services.top / ROW_PX) as u32;
        let derived = Derived {
            active_frame: Some(1),
            ..Derived::default()
        };

        let buf = render(first, derived, services.rows);
        assert_eq!(buf[(40, 0)].style().bg, Theme::backdrop_style(1).bg);
        let last = row_text(&buf, services.rows - 1);
        assert!(last.contains("◆ Storage 2/3"), "caption row: {last:?}");
    }

    #[test]
    fn rendering_stops_at_document_end() {
        let doc = Document::layout(&SITE);
        let last_row = doc.total_rows() - 1;
        let buf = render(last_row, Derived::default(), 5);
        // Only the first row belongs to the document; the rest stay blank.
        assert_eq!(buf[(40, 0)].style().bg, Theme::section_style(4).bg);
        assert_eq!(row_text(&buf, 1).trim(), "");
    }
}
