//! Pipeline – ties together layout, rendering and file output into a single
//! function call.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::ProofError;
use crate::images;
use crate::layout::layout_bundle;
use crate::layout_config::LayoutConfig;
use crate::metadata::MetadataBundle;
use crate::pagination::PAGE_MARGIN_PT;
use crate::render::render_pdf;
use crate::style::ProofStyle;

/// Page orientation for the generated PDF.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PageOrientation {
    /// Portrait mode: height > width (default).
    #[default]
    Portrait,
    /// Landscape mode: width > height.
    Landscape,
}

/// Configuration for the proof renderer.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Document title embedded in the PDF metadata (default: "Metadata proof").
    pub title: String,
    /// Page width in points (default: US Letter = 612).
    pub page_width: f32,
    /// Page height in points (default: US Letter = 792).
    pub page_height: f32,
    /// Page margin in points (default: 36).
    pub page_margin: f32,
    /// Page orientation; swaps effective width/height when `Landscape`.
    pub orientation: PageOrientation,
    pub style: ProofStyle,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        let page = LayoutConfig::letter();
        Self {
            title: page.title,
            page_width: page.page_width_pt,
            page_height: page.page_height_pt,
            page_margin: PAGE_MARGIN_PT,
            orientation: PageOrientation::Portrait,
            style: ProofStyle::default(),
        }
    }
}

impl PipelineConfig {
    /// Effective page width after applying orientation.
    pub fn effective_width(&self) -> f32 {
        match self.orientation {
            PageOrientation::Portrait => self.page_width,
            PageOrientation::Landscape => self.page_height,
        }
    }

    /// Effective page height after applying orientation.
    pub fn effective_height(&self) -> f32 {
        match self.orientation {
            PageOrientation::Portrait => self.page_height,
            PageOrientation::Landscape => self.page_width,
        }
    }

    /// Create a Letter landscape config.
    pub fn letter_landscape() -> Self {
        Self {
            orientation: PageOrientation::Landscape,
            ..Self::default()
        }
    }
}

/// Compute the page layout of a bundle, reading screenshot headers for their
/// dimensions. No PDF is produced.
pub fn compute_layout_config(
    bundle: &MetadataBundle,
    config: &PipelineConfig,
) -> Result<LayoutConfig, ProofError> {
    layout_bundle(bundle, config, images::dimensions)
}

/// Full pipeline: bundle → PDF bytes.
///
/// Returns `(pdf_bytes, layout_config)`.
pub fn generate_pdf(
    bundle: &MetadataBundle,
    config: &PipelineConfig,
) -> Result<(Vec<u8>, LayoutConfig), ProofError> {
    let layout = compute_layout_config(bundle, config)?;
    let bytes = render_pdf(&layout)?;
    Ok((bytes, layout))
}

/// Renders metadata bundles into proof PDFs on disk.
#[derive(Debug, Clone, Default)]
pub struct Renderer {
    config: PipelineConfig,
}

impl Renderer {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    /// Write the proof of `bundle` to `{output_dir}/{unix_seconds}.pdf` and
    /// return that path. `None` writes to the system temp directory.
    ///
    /// A file rendered within the same second into the same directory is
    /// overwritten.
    pub fn render(
        &self,
        bundle: &MetadataBundle,
        output_dir: Option<&Path>,
    ) -> Result<PathBuf, ProofError> {
        let dir = output_dir.map_or_else(std::env::temp_dir, Path::to_path_buf);
        check_output_dir(&dir)?;

        let (bytes, layout) = generate_pdf(bundle, &self.config)?;

        let path = dir.join(format!("{}.pdf", unix_timestamp()));
        fs::write(&path, &bytes).map_err(|source| ProofError::OutputWrite {
            path: path.clone(),
            source,
        })?;

        let pages = layout.pages.len();
        log::info!(
            "Wrote '{}' ({} bytes, {} page{})",
            path.display(),
            bytes.len(),
            pages,
            if pages == 1 { "" } else { "s" }
        );
        Ok(path)
    }
}

/// Convenience: render with the default Letter config.
pub fn render(bundle: &MetadataBundle, output_dir: Option<&Path>) -> Result<PathBuf, ProofError> {
    Renderer::default().render(bundle, output_dir)
}

fn check_output_dir(dir: &Path) -> Result<(), ProofError> {
    let meta = fs::metadata(dir).map_err(|source| ProofError::OutputDir {
        path: dir.to_path_buf(),
        source,
    })?;
    if !meta.is_dir() {
        return Err(ProofError::OutputDir {
            path: dir.to_path_buf(),
            source: std::io::Error::other("not a directory"),
        });
    }
    Ok(())
}

fn unix_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}
