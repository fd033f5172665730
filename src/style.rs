//! Visual style of the proof document: colours and text/spacing metrics.

use serde::{Deserialize, Serialize};

/// RGBA colour (0.0 – 1.0).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const BLACK: Self = Self {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 1.0,
    };

    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim_start_matches('#');
        if !hex.is_ascii() {
            return None;
        }
        if hex.len() == 6 {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()? as f32 / 255.0;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()? as f32 / 255.0;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()? as f32 / 255.0;
            Some(Self { r, g, b, a: 1.0 })
        } else if hex.len() == 3 {
            let r = u8::from_str_radix(&hex[0..1].repeat(2), 16).ok()? as f32 / 255.0;
            let g = u8::from_str_radix(&hex[1..2].repeat(2), 16).ok()? as f32 / 255.0;
            let b = u8::from_str_radix(&hex[2..3].repeat(2), 16).ok()? as f32 / 255.0;
            Some(Self { r, g, b, a: 1.0 })
        } else {
            None
        }
    }

    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// Colours used to tell changed fields apart from unchanged ones.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub modified: Color,
    pub standard: Color,
}

impl Palette {
    pub fn for_flag(&self, modified: bool) -> Color {
        if modified {
            self.modified
        } else {
            self.standard
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            // #0000AA
            modified: Color {
                r: 0.0,
                g: 0.0,
                b: 170.0 / 255.0,
                a: 1.0,
            },
            standard: Color::BLACK,
        }
    }
}

/// Font sizes and spacing of the per-locale page, in points.
#[derive(Debug, Clone, PartialEq)]
pub struct ProofStyle {
    pub palette: Palette,
    pub heading_size: f32,
    /// Vertical gap between the heading rule and the columns.
    pub heading_gap: f32,
    pub body_size: f32,
    pub label_size: f32,
    pub field_size: f32,
    pub keyword_size: f32,
    pub notice_size: f32,
    /// Multiplier applied to the font size to get the line advance.
    pub line_height: f32,
    pub left_column_width: f32,
    pub keyword_indent: f32,
    /// Gap above and below the description/changelog divider.
    pub divider_gap: f32,
    pub label_gap: f32,
    pub keyword_label_gap: f32,
    pub rule_thickness: f32,
    /// Screenshot column width is the content width divided by this.
    pub screenshot_columns: f32,
    pub screenshot_padding: f32,
}

impl Default for ProofStyle {
    fn default() -> Self {
        Self {
            palette: Palette::default(),
            heading_size: 20.0,
            heading_gap: 30.0,
            body_size: 6.0,
            label_size: 8.0,
            field_size: 10.0,
            keyword_size: 8.0,
            notice_size: 14.0,
            line_height: 1.16,
            left_column_width: 200.0,
            keyword_indent: 5.0,
            divider_gap: 10.0,
            label_gap: 5.0,
            keyword_label_gap: 2.0,
            rule_thickness: 1.0,
            screenshot_columns: 6.0,
            screenshot_padding: 10.0,
        }
    }
}

impl ProofStyle {
    pub fn line_advance(&self, font_size: f32) -> f32 {
        font_size * self.line_height
    }
}
