//! Vertical layout of a [`Page`] in document coordinates.
//!
//! Sections stack top to bottom; each is measured in terminal rows and
//! converted to px with [`ROW_PX`] so the scroll constants keep their
//! meaning in the terminal.

use super::page::Page;

/// Document px per terminal row.
pub const ROW_PX: f64 = 16.0;

/// One laid-out section.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub id: &'static str,
    /// Index into the page's section list.
    pub index: usize,
    pub top: f64,
    pub height: f64,
    pub rows: u16,
}

#[derive(Debug, Clone, Default)]
pub struct Document {
    pub blocks: Vec<Block>,
    pub height: f64,
}

impl Document {
    pub fn layout(page: &Page) -> Self {
        let mut blocks = Vec::with_capacity(page.sections.len());
        let mut top = 0.0;
        for (index, section) in page.sections.iter().enumerate() {
            // heading + blank + body + top/bottom padding
            let content_rows = section.body.len() as u16 + 4;
            let rows = section.min_rows.max(content_rows);
            let height = rows as f64 * ROW_PX;
            blocks.push(Block {
                id: section.id,
                index,
                top,
                height,
                rows,
            });
            top += height;
        }
        Self { blocks, height: top }
    }

    pub fn block(&self, id: &str) -> Option<&Block> {
        self.blocks.iter().find(|b| b.id == id)
    }

    /// The block covering document row `row`, with the row's index inside it.
    pub fn block_at_row(&self, row: u32) -> Option<(&Block, u16)> {
        let y = row as f64 * ROW_PX;
        self.blocks
            .iter()
            .find(|b| y >= b.top && y < b.top + b.height)
            .map(|b| (b, ((y - b.top) / ROW_PX) as u16))
    }

    #[cfg(test)]
    pub fn total_rows(&self) -> u32 {
        (self.height / ROW_PX) as u32
    }
}
