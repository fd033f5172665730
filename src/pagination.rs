//! Pagination – a top-down page flow that places boxes at a cursor and
//! starts new pages when content reaches the bottom margin.
//!
//! Coordinates handed to the flow are relative to the content area (the page
//! minus its margins); boxes stored in the resulting [`LayoutConfig`] carry
//! page-absolute coordinates with the origin at the top-left of the page.

use crate::layout_config::*;

/// Default page margins in points.
pub const PAGE_MARGIN_PT: f32 = 36.0;

/// A position in the flow: page index plus distance below the top of the
/// content area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cursor {
    pub page: usize,
    pub y: f32,
}

impl Cursor {
    /// Whichever of the two positions comes later in the document.
    pub fn later(self, other: Cursor) -> Cursor {
        if (other.page, other.y) > (self.page, self.y) {
            other
        } else {
            self
        }
    }
}

/// Pre-wrapped text ready to be placed by [`PageFlow::text_lines`].
#[derive(Debug, Clone)]
pub struct TextBlock {
    pub lines: Vec<String>,
    pub font_size: f32,
    pub line_height: f32,
    pub color: [f32; 4],
}

pub struct PageFlow {
    config: LayoutConfig,
    margin: f32,
    content_width: f32,
    content_height: f32,
    cursor: Cursor,
}

impl PageFlow {
    pub fn new(title: &str, page_width: f32, page_height: f32, margin: f32) -> Self {
        let mut config = LayoutConfig {
            title: title.to_string(),
            page_width_pt: page_width,
            page_height_pt: page_height,
            pages: Vec::new(),
        };
        config.pages.push(PageLayout {
            page_index: 0,
            boxes: Vec::new(),
        });
        Self {
            config,
            margin,
            content_width: (page_width - 2.0 * margin).max(0.0),
            content_height: (page_height - 2.0 * margin).max(0.0),
            cursor: Cursor { page: 0, y: 0.0 },
        }
    }

    pub fn content_width(&self) -> f32 {
        self.content_width
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn move_cursor_to(&mut self, cursor: Cursor) {
        self.ensure_page(cursor.page);
        self.cursor = cursor;
    }

    /// Advance the cursor. Never creates a page by itself: a cursor below the
    /// bottom margin only forces a break once something is placed there.
    pub fn move_down(&mut self, dy: f32) {
        self.cursor.y += dy;
    }

    /// Continue on the following page, at the top of the content area.
    pub fn start_new_page(&mut self) {
        let next = self.cursor.page + 1;
        self.ensure_page(next);
        self.cursor = Cursor { page: next, y: 0.0 };
    }

    /// Break to a new page unless `height` still fits. A cursor already at
    /// the top of a page never breaks, so oversized content cannot loop.
    pub fn ensure_room(&mut self, height: f32) {
        if self.cursor.y > 0.0 && self.cursor.y + height > self.content_height {
            log::debug!(
                "page {} full at y={:.1}, {height:.1}pt needed",
                self.cursor.page,
                self.cursor.y
            );
            self.start_new_page();
        }
    }

    /// Place wrapped text at the cursor, `x` points from the left edge of the
    /// content area. Lines that do not fit continue on the next page at the
    /// same x. The cursor ends below the last line.
    pub fn text_lines(&mut self, x: f32, width: f32, block: TextBlock) {
        let lh = block.line_height.max(0.01);
        let mut remaining_lines = block.lines.as_slice();

        while !remaining_lines.is_empty() {
            self.ensure_room(lh);
            let fit = ((self.content_height - self.cursor.y) / lh).floor() as usize;
            let take = fit.clamp(1, remaining_lines.len());
            let (chunk, rest) = remaining_lines.split_at(take);

            let mut lbox = LayoutBox::new(
                self.margin + x,
                self.margin + self.cursor.y,
                width,
                take as f32 * lh,
            );
            lbox.text = Some(TextContent {
                lines: chunk
                    .iter()
                    .enumerate()
                    .map(|(i, line)| TextLine {
                        text: line.clone(),
                        y_offset: i as f32 * lh,
                    })
                    .collect(),
                font_size: block.font_size,
                color: block.color,
                line_height: lh,
            });
            self.push(lbox);
            self.cursor.y += take as f32 * lh;
            remaining_lines = rest;
        }
    }

    /// Horizontal rule at the cursor. The cursor does not move.
    pub fn rule(&mut self, x: f32, width: f32, thickness: f32, color: [f32; 4]) {
        self.ensure_room(0.0);
        let mut lbox = LayoutBox::new(self.margin + x, self.margin + self.cursor.y, width, 0.0);
        lbox.rule = Some(RuleStyle { thickness, color });
        self.push(lbox);
    }

    /// Image with its top edge at the cursor. The cursor does not move.
    pub fn image(&mut self, x: f32, width: f32, height: f32, image: ImageContent) {
        let mut lbox = LayoutBox::new(
            self.margin + x,
            self.margin + self.cursor.y,
            width,
            height,
        );
        lbox.image = Some(image);
        self.push(lbox);
    }

    pub fn finish(self) -> LayoutConfig {
        self.config
    }

    fn push(&mut self, lbox: LayoutBox) {
        self.ensure_page(self.cursor.page);
        self.config.pages[self.cursor.page].boxes.push(lbox);
    }

    fn ensure_page(&mut self, index: usize) {
        while self.config.pages.len() <= index {
            let page_index = self.config.pages.len();
            self.config.pages.push(PageLayout {
                page_index,
                boxes: Vec::new(),
            });
        }
    }
}
