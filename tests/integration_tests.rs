//! Integration tests for the metadata proof pipeline.
//!
//! These tests validate:
//! - One page per locale, plus overflow pages only
//! - Left column lines, keyword bullets and screenshot grouping
//! - PDF files land in the output directory with a timestamp name
//! - Unreadable images and unusable output directories are reported

use std::fs;
use std::path::{Path, PathBuf};

use metadata_proof::layout::NO_SCREENSHOTS_NOTICE;
use metadata_proof::layout_config::LayoutConfig;
use metadata_proof::pipeline::{compute_layout_config, generate_pdf};
use metadata_proof::render::render_pdf;
use metadata_proof::{
    Field, LocaleContent, MetadataBundle, PipelineConfig, ProofError, Renderer, Screenshot,
};
use sha2::{Digest, Sha256};
use tempfile::TempDir;

// =====================================================================
// Helpers
// =====================================================================

fn default_config() -> PipelineConfig {
    PipelineConfig::default()
}

fn assert_valid_pdf(bytes: &[u8]) {
    assert!(bytes.len() > 100, "PDF too small: {} bytes", bytes.len());
    assert_eq!(&bytes[0..5], b"%PDF-", "Missing PDF header");
}

fn write_png(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
    let path = dir.join(name);
    image::RgbImage::from_pixel(width, height, image::Rgb([40, 120, 200]))
        .save(&path)
        .unwrap();
    path
}

fn content(title: &str) -> LocaleContent {
    LocaleContent {
        title: Field::new(title.to_string()),
        description: Field::new("Track your runs and share them with friends.".to_string()),
        changelog: Field::modified("Bug fixes and performance improvements.".to_string()),
        support_url: Field::new("https://example.com/support".to_string()),
        privacy_url: Field::new("https://example.com/privacy".to_string()),
        keywords: Field::new(vec!["run".to_string(), "fitness".to_string()]),
        ..LocaleContent::default()
    }
}

fn bundle_of(locales: Vec<(&str, LocaleContent)>) -> MetadataBundle {
    locales.into_iter().collect()
}

fn fingerprint(layout: &LayoutConfig) -> String {
    let digest = Sha256::digest(layout.to_json().as_bytes());
    digest.iter().map(|b| format!("{b:02x}")).collect()
}

// =====================================================================
// Pagination
// =====================================================================

#[test]
fn one_page_per_locale() {
    let bundle = bundle_of(vec![
        ("en-US", content("Runner")),
        ("de-DE", content("Läufer")),
        ("fr-FR", content("Coureur")),
    ]);
    let layout = compute_layout_config(&bundle, &default_config()).unwrap();
    assert_eq!(layout.pages.len(), 3);
}

#[test]
fn overflow_adds_pages_but_keeps_locales_apart() {
    let dir = TempDir::new().unwrap();
    let mut long = content("Runner");
    long.screenshots = (0..4)
        .map(|i| {
            let path = write_png(dir.path(), &format!("tall{i}.png"), 20, 60);
            Screenshot::new(path, format!("device{i}"))
        })
        .collect();
    let bundle = bundle_of(vec![("en-US", long), ("de-DE", content("Läufer"))]);
    let layout = compute_layout_config(&bundle, &default_config()).unwrap();

    assert!(layout.pages.len() > 2, "got {} pages", layout.pages.len());
    let last = layout.pages.last().unwrap();
    let heading = &last.boxes[0].text.as_ref().unwrap().lines[0].text;
    assert!(heading.starts_with("de-DE: "), "{heading}");
}

// =====================================================================
// Text content
// =====================================================================

#[test]
fn heading_shows_locale_and_title() {
    let bundle = bundle_of(vec![("ja", content("Runner"))]);
    let layout = compute_layout_config(&bundle, &default_config()).unwrap();
    assert_eq!(layout.text_lines()[0], "ja: Runner");
}

#[test]
fn keywords_render_one_bullet_each_in_order() {
    let mut c = content("Runner");
    c.keywords = Field::new(vec![
        "zeta".to_string(),
        "alpha".to_string(),
        "mid".to_string(),
    ]);
    let bundle = bundle_of(vec![("en-US", c)]);
    let layout = compute_layout_config(&bundle, &default_config()).unwrap();
    let bullets: Vec<&str> = layout
        .text_lines()
        .into_iter()
        .filter(|line| line.starts_with("- "))
        .collect();
    assert_eq!(bullets, ["- zeta", "- alpha", "- mid"]);
}

#[test]
fn empty_fields_produce_no_left_column_line() {
    let mut c = content("Runner");
    c.support_url = Field::new(String::new());
    c.software_url = Field::default();
    c.keywords = Field::default();
    let bundle = bundle_of(vec![("en-US", c)]);
    let layout = compute_layout_config(&bundle, &default_config()).unwrap();
    let lines = layout.text_lines();

    assert!(lines.iter().all(|l| !l.starts_with("Support url")));
    assert!(lines.iter().all(|l| !l.starts_with("Software url")));
    assert!(lines.iter().all(|l| !l.starts_with("Keywords")));
    assert!(lines.contains(&"Privacy url: https://example.com/privacy"));
}

#[test]
fn missing_title_renders_blank() {
    let bundle = bundle_of(vec![("en-US", LocaleContent::default())]);
    let layout = compute_layout_config(&bundle, &default_config()).unwrap();
    // The space after the colon is trailing whitespace and is not drawn.
    assert_eq!(layout.text_lines()[0], "en-US:");
}

#[test]
fn double_spaces_survive_for_proofreading() {
    let mut c = content("Runner");
    c.description = Field::new("Track  your runs.".to_string());
    let bundle = bundle_of(vec![("en-US", c)]);
    let layout = compute_layout_config(&bundle, &default_config()).unwrap();
    assert!(layout.text_lines().contains(&"Track  your runs."));
}

// =====================================================================
// Screenshots
// =====================================================================

#[test]
fn zero_screenshots_render_notice_only() {
    let bundle = bundle_of(vec![("en-US", content("Runner"))]);
    let layout = compute_layout_config(&bundle, &default_config()).unwrap();
    assert!(layout.images().is_empty());
    assert!(layout.text_lines().contains(&NO_SCREENSHOTS_NOTICE));
}

#[test]
fn screenshot_grouping_ignores_input_order() {
    let dir = TempDir::new().unwrap();
    let shots = vec![
        Screenshot::new(write_png(dir.path(), "2.png", 64, 114), "iphone6"),
        Screenshot::new(write_png(dir.path(), "1.png", 64, 114), "iphone6"),
        Screenshot::new(write_png(dir.path(), "ipad.png", 96, 128), "ipad"),
        Screenshot::new(write_png(dir.path(), "3.png", 64, 114), "iphone6"),
    ];
    let mut reversed = shots.clone();
    reversed.reverse();

    let mut a = content("Runner");
    a.screenshots = shots;
    let mut b = content("Runner");
    b.screenshots = reversed;

    let config = default_config();
    let layout_a = compute_layout_config(&bundle_of(vec![("en-US", a)]), &config).unwrap();
    let layout_b = compute_layout_config(&bundle_of(vec![("en-US", b)]), &config).unwrap();
    assert_eq!(layout_a, layout_b);

    let names: Vec<String> = layout_a
        .images()
        .iter()
        .map(|(_, lbox)| {
            let img = lbox.image.as_ref().unwrap();
            img.path.file_name().unwrap().to_string_lossy().into_owned()
        })
        .collect();
    assert_eq!(names, ["ipad.png", "1.png", "2.png", "3.png"]);
}

#[test]
fn screenshot_height_follows_aspect_ratio() {
    let dir = TempDir::new().unwrap();
    let mut c = content("Runner");
    c.screenshots = vec![Screenshot::new(
        write_png(dir.path(), "s.png", 50, 100),
        "iphone6",
    )];
    let bundle = bundle_of(vec![("en-US", c)]);
    let layout = compute_layout_config(&bundle, &default_config()).unwrap();
    let (_, lbox) = layout.images()[0];
    // 540pt content width / 6 columns
    assert!((lbox.width - 90.0).abs() < 0.01);
    assert!((lbox.height - 180.0).abs() < 0.01);
}

// =====================================================================
// Output files
// =====================================================================

#[test]
fn render_writes_timestamped_pdf() {
    let dir = TempDir::new().unwrap();
    let mut c = content("Runner");
    c.screenshots = vec![Screenshot::new(
        write_png(dir.path(), "s.png", 32, 57),
        "iphone6",
    )];
    let bundle = bundle_of(vec![("en-US", c), ("de-DE", content("Läufer"))]);

    let out = TempDir::new().unwrap();
    let path = Renderer::default().render(&bundle, Some(out.path())).unwrap();

    assert_eq!(path.parent().unwrap(), out.path());
    assert_eq!(path.extension().unwrap(), "pdf");
    let stem = path.file_stem().unwrap().to_str().unwrap();
    assert!(stem.parse::<u64>().is_ok(), "stem {stem:?} is not a unix timestamp");
    assert_valid_pdf(&fs::read(&path).unwrap());
}

#[test]
fn rerender_produces_identical_layout() {
    let dir = TempDir::new().unwrap();
    let mut c = content("Runner");
    c.screenshots = vec![Screenshot::new(
        write_png(dir.path(), "s.png", 32, 57),
        "iphone6",
    )];
    let bundle = bundle_of(vec![("en-US", c)]);

    let (bytes1, layout1) = generate_pdf(&bundle, &default_config()).unwrap();
    let (bytes2, layout2) = generate_pdf(&bundle, &default_config()).unwrap();
    assert_eq!(fingerprint(&layout1), fingerprint(&layout2));

    // printpdf embeds timestamps, so byte-exact equality isn't guaranteed.
    let diff = (bytes1.len() as i64 - bytes2.len() as i64).unsigned_abs();
    assert!(diff < 200, "PDF outputs differ significantly: {diff} bytes");

    // File names only have second resolution: two renders into the same
    // directory within one second share a name, and the second replaces the
    // first. Distinct files are only guaranteed across seconds.
    let out = TempDir::new().unwrap();
    let first = metadata_proof::render(&bundle, Some(out.path())).unwrap();
    let second = metadata_proof::render(&bundle, Some(out.path())).unwrap();
    assert!(second.exists());
    let files = fs::read_dir(out.path()).unwrap().count();
    if first == second {
        assert_eq!(files, 1);
    } else {
        assert!(first.exists());
        assert_eq!(files, 2);
    }
}

#[test]
fn screenshot_without_extension_renders() {
    let dir = TempDir::new().unwrap();
    let png = write_png(dir.path(), "s.png", 30, 60);
    let bare = dir.path().join("shot_no_ext");
    fs::copy(&png, &bare).unwrap();

    let mut c = content("Runner");
    c.screenshots = vec![Screenshot::new(&bare, "iphone6")];
    let bundle = bundle_of(vec![("en-US", c)]);

    let out = TempDir::new().unwrap();
    let path = Renderer::default().render(&bundle, Some(out.path())).unwrap();
    assert_valid_pdf(&fs::read(&path).unwrap());
}

#[test]
fn unreadable_image_aborts_without_output() {
    let mut c = content("Runner");
    c.screenshots = vec![Screenshot::new("/nonexistent/shot.png", "iphone6")];
    let bundle = bundle_of(vec![("en-US", c)]);

    let out = TempDir::new().unwrap();
    let err = Renderer::default().render(&bundle, Some(out.path())).unwrap_err();
    assert!(matches!(err, ProofError::ImageRead { .. }), "{err:?}");
    assert_eq!(fs::read_dir(out.path()).unwrap().count(), 0);
}

#[test]
fn missing_output_dir_is_an_error() {
    let out = TempDir::new().unwrap();
    let missing = out.path().join("does-not-exist");
    let bundle = bundle_of(vec![("en-US", content("Runner"))]);
    let err = Renderer::default().render(&bundle, Some(&missing)).unwrap_err();
    assert!(matches!(err, ProofError::OutputDir { .. }), "{err:?}");
}

// =====================================================================
// JSON input and layout config round-trip
// =====================================================================

#[test]
fn bundle_from_json_renders() {
    let dir = TempDir::new().unwrap();
    let shot = write_png(dir.path(), "s.png", 32, 57);
    let json = format!(
        r#"{{
            "en-US": {{
                "title": {{ "value": "Runner", "modified": true }},
                "description": {{ "value": "Run." }},
                "version_whats_new": null,
                "keywords": {{ "value": ["run"] }},
                "screenshots": [ {{ "path": {path}, "screen_size": "iphone6" }} ]
            }},
            "de-DE": {{ "title": {{ "value": "Läufer" }} }}
        }}"#,
        path = serde_json::to_string(&shot).unwrap()
    );
    let bundle = MetadataBundle::from_json(&json).unwrap();
    let (bytes, layout) = generate_pdf(&bundle, &default_config()).unwrap();
    assert_valid_pdf(&bytes);
    assert_eq!(layout.pages.len(), 2);
    assert_eq!(layout.images().len(), 1);
}

#[test]
fn invalid_json_is_metadata_error() {
    let err = MetadataBundle::from_json("[1, 2, 3]").unwrap_err();
    assert!(matches!(err, ProofError::Metadata(_)), "{err:?}");
}

#[test]
fn render_from_layout_config_json() {
    let bundle = bundle_of(vec![("en-US", content("Runner"))]);
    let layout = compute_layout_config(&bundle, &default_config()).unwrap();
    let parsed = LayoutConfig::from_json(&layout.to_json()).unwrap();
    assert_eq!(parsed.pages.len(), layout.pages.len());
    assert_eq!(parsed.text_lines(), layout.text_lines());
    assert_valid_pdf(&render_pdf(&parsed).unwrap());
}

#[test]
fn landscape_pages_are_wider() {
    let bundle = bundle_of(vec![("en-US", content("Runner"))]);
    let layout = compute_layout_config(&bundle, &PipelineConfig::letter_landscape()).unwrap();
    assert!(layout.page_width_pt > layout.page_height_pt);
}
