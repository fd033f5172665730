//! Layout engine – turns a [`MetadataBundle`] into positioned boxes, one
//! locale per page (more when a locale overflows).
//!
//! Per locale the page holds a heading, a right-hand column with the
//! description and changelog, a left-hand column with URLs and keywords, and
//! below both columns the screenshots, one row per device class.

use std::path::Path;

use crate::error::ProofError;
use crate::fonts::wrap_text;
use crate::layout_config::{ImageContent, LayoutConfig};
use crate::metadata::{LocaleContent, MetadataBundle, ScreenshotGroup};
use crate::pagination::{PageFlow, TextBlock};
use crate::pipeline::PipelineConfig;
use crate::style::{Color, ProofStyle};

/// Shown in place of screenshots when a locale has none.
pub const NO_SCREENSHOTS_NOTICE: &str =
    "No screenshots passed. Is this correct? They will get removed from iTunesConnect.";

/// Lay out the whole bundle. `measure` returns the pixel size of a screenshot;
/// its errors abort the layout.
pub fn layout_bundle<F>(
    bundle: &MetadataBundle,
    config: &PipelineConfig,
    mut measure: F,
) -> Result<LayoutConfig, ProofError>
where
    F: FnMut(&Path) -> Result<(u32, u32), ProofError>,
{
    let mut flow = PageFlow::new(
        &config.title,
        config.effective_width(),
        config.effective_height(),
        config.page_margin,
    );

    for (index, (locale, content)) in bundle.iter().enumerate() {
        if index > 0 {
            flow.start_new_page();
        }
        LocaleLayout {
            flow: &mut flow,
            style: &config.style,
        }
        .layout(locale, content, &mut measure)?;
    }

    Ok(flow.finish())
}

struct LocaleLayout<'a> {
    flow: &'a mut PageFlow,
    style: &'a ProofStyle,
}

impl LocaleLayout<'_> {
    fn layout<F>(
        &mut self,
        locale: &str,
        content: &LocaleContent,
        measure: &mut F,
    ) -> Result<(), ProofError>
    where
        F: FnMut(&Path) -> Result<(u32, u32), ProofError>,
    {
        let style = self.style;
        let palette = style.palette;
        let width = self.flow.content_width();
        let title = content.title.text();

        log::info!("Exporting locale '{locale}' with title '{title}'");

        self.write(
            0.0,
            width,
            &format!("{locale}: {title}"),
            style.heading_size,
            palette.for_flag(content.title.modified),
        );
        self.flow
            .rule(0.0, width, style.rule_thickness, palette.standard.to_array());
        self.flow.move_down(style.heading_gap);

        let columns_top = self.flow.cursor();

        // Right column: description and changelog
        let right_x = style.left_column_width.min(width);
        let right_width = width - right_x;
        self.write(
            right_x,
            right_width,
            content.description.text(),
            style.body_size,
            palette.for_flag(content.description.modified),
        );
        self.flow.move_down(style.divider_gap);
        self.flow.rule(
            right_x,
            right_width,
            style.rule_thickness,
            palette.standard.to_array(),
        );
        self.flow.move_down(style.divider_gap);
        self.write(
            right_x,
            right_width,
            "Changelog:",
            style.label_size,
            palette.standard,
        );
        self.flow.move_down(style.label_gap);
        self.write(
            right_x,
            right_width,
            content.changelog.text(),
            style.body_size,
            palette.for_flag(content.changelog.modified),
        );
        let right_end = self.flow.cursor();

        // Left column: URLs and keywords
        self.flow.move_cursor_to(columns_top);
        let left_width = right_x;
        for (label, field) in content.url_fields() {
            let value = field.text();
            if value.is_empty() {
                continue;
            }
            self.write(
                0.0,
                left_width,
                &format!("{label}: {value}"),
                style.field_size,
                palette.for_flag(field.modified),
            );
        }

        let keywords = content.keywords.items();
        if !keywords.is_empty() {
            let color = palette.for_flag(content.keywords.modified);
            self.write(0.0, left_width, "Keywords:", style.field_size, color);
            self.flow.move_down(style.keyword_label_gap);
            let indent = style.keyword_indent.min(left_width);
            for keyword in keywords {
                self.write(
                    indent,
                    left_width - indent,
                    &format!("- {keyword}"),
                    style.keyword_size,
                    color,
                );
            }
        }
        let left_end = self.flow.cursor();

        self.flow.move_cursor_to(left_end.later(right_end));
        self.flow.move_down(style.screenshot_padding);

        let groups = content.screenshot_groups();
        if groups.is_empty() {
            log::warn!("No screenshots for locale '{locale}'");
            self.write(
                0.0,
                width,
                NO_SCREENSHOTS_NOTICE,
                style.notice_size,
                palette.standard,
            );
            return Ok(());
        }

        for group in &groups {
            self.screenshot_rows(group, measure)?;
        }
        Ok(())
    }

    /// One or more rows for a device class; a class that does not fit into a
    /// single row wraps onto the next one.
    fn screenshot_rows<F>(
        &mut self,
        group: &ScreenshotGroup<'_>,
        measure: &mut F,
    ) -> Result<(), ProofError>
    where
        F: FnMut(&Path) -> Result<(u32, u32), ProofError>,
    {
        let width = self.flow.content_width();
        let padding = self.style.screenshot_padding;
        let column_width = width / self.style.screenshot_columns;
        let per_row = (((width + padding) / (column_width + padding)).floor() as usize).max(1);

        for row in group.screenshots.chunks(per_row) {
            let mut placed = Vec::with_capacity(row.len());
            for shot in row {
                let (px_width, px_height) = measure(&shot.path)?;
                if px_width == 0 {
                    return Err(ProofError::ImageDecode {
                        path: shot.path.clone(),
                        message: "image has zero width".to_string(),
                    });
                }
                let height = column_width / px_width as f32 * px_height as f32;
                placed.push((
                    height,
                    ImageContent {
                        path: shot.path.clone(),
                        px_width,
                        px_height,
                    },
                ));
            }

            let row_height = placed.iter().map(|(h, _)| *h).fold(0.0f32, f32::max);
            self.flow.ensure_room(row_height);
            log::debug!(
                "{} screenshot(s) of '{}' at page {} y={:.1}",
                placed.len(),
                group.screen_size,
                self.flow.cursor().page,
                self.flow.cursor().y
            );

            for (index, (height, image)) in placed.into_iter().enumerate() {
                let x = index as f32 * (column_width + padding);
                self.flow.image(x, column_width, height, image);
            }
            self.flow.move_down(row_height + padding);
        }
        Ok(())
    }

    /// Wrap and place `text`; empty text places nothing.
    fn write(&mut self, x: f32, width: f32, text: &str, font_size: f32, color: Color) {
        if text.is_empty() {
            return;
        }
        self.flow.text_lines(
            x,
            width,
            TextBlock {
                lines: wrap_text(text, font_size, width),
                font_size,
                line_height: self.style.line_advance(font_size),
                color: color.to_array(),
            },
        );
    }
}
