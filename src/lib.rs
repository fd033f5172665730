//! # metadata-proof – proofreading PDFs for localized app-store metadata
//!
//! Renders every locale of a [`MetadataBundle`] (title, description,
//! changelog, URLs, keywords and screenshots) onto its own page so the whole
//! submission can be checked before release. The pipeline stages are:
//!
//! 1. **Input** – ordered locale → content bundle ([`metadata`])
//! 2. **Layout** – headings, columns and screenshot rows ([`layout`])
//! 3. **Paginate** – page flow with overflow breaks ([`pagination`])
//! 4. **Render** – emit PDF bytes via printpdf ([`render`])
//! 5. **Output** – `{dir}/{unix_timestamp}.pdf` ([`pipeline`])

pub mod error;
pub mod fonts;
pub mod images;
pub mod layout;
pub mod layout_config;
pub mod metadata;
pub mod pagination;
pub mod pipeline;
pub mod render;
pub mod style;

// Re-exports for convenience
pub use error::ProofError;
pub use metadata::{Field, LocaleContent, MetadataBundle, Screenshot};
pub use pipeline::{render, PageOrientation, PipelineConfig, Renderer};
