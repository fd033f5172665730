//! PDF renderer – takes a [`LayoutConfig`] and produces PDF bytes using
//! `printpdf` (v0.8 ops-based API).

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use printpdf::*;

use crate::error::ProofError;
use crate::images;
use crate::layout_config::*;

const PT_TO_MM: f32 = 0.352778;

/// Render a LayoutConfig into PDF bytes.
///
/// Every referenced screenshot is read and embedded once, however often it
/// appears. An image that cannot be read or decoded fails the whole render.
pub fn render_pdf(config: &LayoutConfig) -> Result<Vec<u8>, ProofError> {
    let page_w = Mm(config.page_width_pt * PT_TO_MM);
    let page_h = Mm(config.page_height_pt * PT_TO_MM);

    let mut doc = PdfDocument::new(&config.title);

    // ── Pre-register all images ────────────────────────────────────────────
    let mut image_ids: HashMap<PathBuf, XObjectId> = HashMap::new();
    let mut img_warnings: Vec<PdfWarnMsg> = Vec::new();

    for page_layout in &config.pages {
        for lbox in &page_layout.boxes {
            let Some(img) = &lbox.image else { continue };
            if image_ids.contains_key(&img.path) {
                continue;
            }
            let raw = decode_image(&img.path, &mut img_warnings)?;
            image_ids.insert(img.path.clone(), doc.add_image(&raw));
        }
    }
    if !img_warnings.is_empty() {
        log::debug!("{} warning(s) while decoding images", img_warnings.len());
    }

    // ── Render pages ──────────────────────────────────────────────────────
    let mut pages = Vec::with_capacity(config.pages.len());

    for page_layout in &config.pages {
        let mut ops = Vec::new();

        for lbox in &page_layout.boxes {
            render_box(&mut ops, lbox, config.page_height_pt, &image_ids);
        }

        pages.push(PdfPage::new(page_w, page_h, ops));
    }

    // Ensure at least one page.
    if pages.is_empty() {
        pages.push(PdfPage::new(page_w, page_h, Vec::new()));
    }

    doc.with_pages(pages);
    let bytes = doc.save(&PdfSaveOptions::default(), &mut Vec::new());

    Ok(bytes)
}

fn decode_image(path: &Path, warnings: &mut Vec<PdfWarnMsg>) -> Result<RawImage, ProofError> {
    let bytes = images::read_bytes(path)?;
    RawImage::decode_from_bytes(&bytes, warnings).map_err(|message| ProofError::ImageDecode {
        path: path.to_path_buf(),
        message: message.to_string(),
    })
}

/// Convert a UTF-8 string to raw Windows-1252 bytes then wrap in a String so
/// printpdf writes the bytes unchanged into the PDF stream (builtin fonts use
/// WinAnsiEncoding, so each glyph is one byte 0x00–0xFF).
fn to_winlatin(s: &str) -> String {
    let bytes: Vec<u8> = s
        .chars()
        .map(|c| match c {
            '\u{20AC}' => 0x80, // euro
            '\u{201A}' => 0x82, // single low-9 quote
            '\u{201E}' => 0x84, // double low-9 quote
            '\u{2026}' => 0x85, // ellipsis
            '\u{2018}' => 0x91, // left single quote
            '\u{2019}' => 0x92, // right single quote
            '\u{201C}' => 0x93, // left double quote
            '\u{201D}' => 0x94, // right double quote
            '\u{2022}' => 0x95, // bullet
            '\u{2013}' => 0x96, // en-dash
            '\u{2014}' => 0x97, // em-dash
            '\u{2122}' => 0x99, // trademark
            '\u{00A0}' => 0x20, // non-breaking space -> space
            c if (c as u32) < 256 => c as u8,
            _ => b'?',
        })
        .collect();
    // SAFETY: non-UTF-8 for bytes 0x80-0xFF. The String is never inspected
    // as text: printpdf hands builtin-font text to lopdf as
    // `SimpleEncoding(b"WinAnsiEncoding")`, which writes the bytes unchanged
    // into the content stream. Pinned by `umlaut_reaches_ops_as_winansi_byte`.
    #[allow(unsafe_code)]
    unsafe {
        String::from_utf8_unchecked(bytes)
    }
}

fn rgb(color: &[f32; 4]) -> Color {
    Color::Rgb(Rgb {
        r: color[0],
        g: color[1],
        b: color[2],
        icc_profile: None,
    })
}

fn point(x: f32, y: f32) -> LinePoint {
    LinePoint {
        p: Point { x: Pt(x), y: Pt(y) },
        bezier: false,
    }
}

/// Render a LayoutBox into PDF ops.
fn render_box(
    ops: &mut Vec<Op>,
    lbox: &LayoutBox,
    page_height: f32,
    images: &HashMap<PathBuf, XObjectId>,
) {
    // PDF coordinate system: origin at bottom-left.
    // Our layout uses origin at top-left. Convert:
    let pdf_y = page_height - lbox.y;

    if let Some(rule) = &lbox.rule {
        ops.push(Op::SetOutlineColor {
            col: rgb(&rule.color),
        });
        ops.push(Op::SetOutlineThickness {
            pt: Pt(rule.thickness),
        });
        ops.push(Op::DrawLine {
            line: Line {
                points: vec![point(lbox.x, pdf_y), point(lbox.x + lbox.width, pdf_y)],
                is_closed: false,
            },
        });
    }

    if let Some(text) = &lbox.text {
        let font = BuiltinFont::Helvetica;
        for tline in &text.lines {
            if tline.text.is_empty() {
                continue;
            }
            // Baseline ≈ top of line + ascender (approx 0.75 × font_size)
            let ascender_offset = text.font_size * 0.75;
            let text_y = pdf_y - tline.y_offset - ascender_offset;

            ops.push(Op::StartTextSection);
            ops.push(Op::SetTextCursor {
                pos: Point {
                    x: Pt(lbox.x),
                    y: Pt(text_y),
                },
            });
            ops.push(Op::SetFontSizeBuiltinFont {
                size: Pt(text.font_size),
                font,
            });
            ops.push(Op::SetLineHeight {
                lh: Pt(text.line_height),
            });
            ops.push(Op::SetFillColor {
                col: rgb(&text.color),
            });
            ops.push(Op::WriteTextBuiltinFont {
                items: vec![TextItem::Text(to_winlatin(&tline.text))],
                font,
            });
            ops.push(Op::EndTextSection);
        }
    }

    // Image – embed from pre-registered XObject
    if let Some(img) = &lbox.image {
        if let Some(id) = images.get(&img.path) {
            // translate_y = bottom edge of image in PDF coordinates.
            let img_bottom_y = pdf_y - lbox.height;

            // At dpi=72 printpdf renders 1 px = 1 pt, so
            // scale = desired_pt / px_dim.
            let scale_x = if img.px_width > 0 {
                lbox.width / img.px_width as f32
            } else {
                1.0
            };
            let scale_y = if img.px_height > 0 {
                lbox.height / img.px_height as f32
            } else {
                1.0
            };

            ops.push(Op::UseXobject {
                id: id.clone(),
                transform: XObjectTransform {
                    translate_x: Some(Pt(lbox.x)),
                    translate_y: Some(Pt(img_bottom_y)),
                    dpi: Some(72.0),
                    scale_x: Some(scale_x),
                    scale_y: Some(scale_y),
                    rotate: None,
                },
            });
        }
    }
}
