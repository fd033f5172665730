//! Layout config – the intermediate representation between layout computation
//! and PDF rendering. This is the "frozen" structure that encodes exactly what
//! goes on each page.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// A complete document layout ready for rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Document title embedded in the PDF metadata.
    #[serde(default = "LayoutConfig::default_title")]
    pub title: String,
    /// Width of each page in PDF points (1 pt = 1/72 inch).
    pub page_width_pt: f32,
    /// Height of each page in PDF points.
    pub page_height_pt: f32,
    /// Ordered list of pages.
    pub pages: Vec<PageLayout>,
}

/// One page of content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageLayout {
    pub page_index: usize,
    pub boxes: Vec<LayoutBox>,
}

/// A positioned rectangle with one kind of content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutBox {
    /// Position relative to page top-left, in points.
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,

    pub text: Option<TextContent>,
    pub image: Option<ImageContent>,
    /// Horizontal rule along the top edge of the box.
    pub rule: Option<RuleStyle>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleStyle {
    pub thickness: f32,
    pub color: [f32; 4],
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextContent {
    /// Pre-wrapped lines of text.
    pub lines: Vec<TextLine>,
    pub font_size: f32,
    pub color: [f32; 4],
    pub line_height: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextLine {
    pub text: String,
    /// Y offset from the top of the text content area
    pub y_offset: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageContent {
    pub path: PathBuf,
    /// Intrinsic pixel size, used to scale the image into the box.
    pub px_width: u32,
    pub px_height: u32,
}

impl LayoutConfig {
    /// Create a US Letter layout config.
    pub fn letter() -> Self {
        Self {
            title: Self::default_title(),
            // Letter: 8.5in × 11in = 612 × 792 points
            page_width_pt: 612.0,
            page_height_pt: 792.0,
            pages: Vec::new(),
        }
    }

    fn default_title() -> String {
        "Metadata proof".to_string()
    }

    /// Serialise to JSON.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    /// Deserialise from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// All text lines of the document in reading order, page by page.
    pub fn text_lines(&self) -> Vec<&str> {
        self.pages
            .iter()
            .flat_map(|page| page.boxes.iter())
            .filter_map(|lbox| lbox.text.as_ref())
            .flat_map(|text| text.lines.iter().map(|line| line.text.as_str()))
            .collect()
    }

    /// All image boxes of the document, page by page.
    pub fn images(&self) -> Vec<(usize, &LayoutBox)> {
        self.pages
            .iter()
            .flat_map(|page| {
                page.boxes
                    .iter()
                    .filter(|lbox| lbox.image.is_some())
                    .map(move |lbox| (page.page_index, lbox))
            })
            .collect()
    }
}

impl LayoutBox {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
            text: None,
            image: None,
            rule: None,
        }
    }
}
