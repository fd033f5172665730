//! Metadata bundle – the read-only input of the proof renderer.
//!
//! A bundle maps locale codes to the content submitted for that locale. The
//! map keeps insertion order (also when loaded from JSON) because the proof
//! document lists locales in exactly that order.

use std::fmt;
use std::path::PathBuf;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ProofError;

/// One metadata value plus the flag telling whether it changed since the
/// previous submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Field<T> {
    pub value: Option<T>,
    pub modified: bool,
}

impl<T> Default for Field<T> {
    fn default() -> Self {
        Self {
            value: None,
            modified: false,
        }
    }
}

impl<T> Field<T> {
    pub fn new(value: T) -> Self {
        Self {
            value: Some(value),
            modified: false,
        }
    }

    /// A value flagged as changed.
    pub fn modified(value: T) -> Self {
        Self {
            value: Some(value),
            modified: true,
        }
    }
}

impl Field<String> {
    /// The value, or `""` when absent.
    pub fn text(&self) -> &str {
        self.value.as_deref().unwrap_or("")
    }
}

impl Field<Vec<String>> {
    /// The list, or an empty slice when absent.
    pub fn items(&self) -> &[String] {
        self.value.as_deref().unwrap_or(&[])
    }
}

/// A screenshot file and the device class it was captured on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Screenshot {
    pub path: PathBuf,
    pub screen_size: String,
}

impl Screenshot {
    pub fn new(path: impl Into<PathBuf>, screen_size: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            screen_size: screen_size.into(),
        }
    }
}

/// Screenshots of one device class, sorted by path.
#[derive(Debug, Clone, PartialEq)]
pub struct ScreenshotGroup<'a> {
    pub screen_size: &'a str,
    pub screenshots: Vec<&'a Screenshot>,
}

/// Everything submitted for a single locale.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocaleContent {
    #[serde(deserialize_with = "nullable")]
    pub title: Field<String>,
    #[serde(deserialize_with = "nullable")]
    pub description: Field<String>,
    #[serde(alias = "version_whats_new", deserialize_with = "nullable")]
    pub changelog: Field<String>,
    #[serde(deserialize_with = "nullable")]
    pub support_url: Field<String>,
    #[serde(deserialize_with = "nullable")]
    pub privacy_url: Field<String>,
    #[serde(deserialize_with = "nullable")]
    pub software_url: Field<String>,
    #[serde(deserialize_with = "nullable")]
    pub keywords: Field<Vec<String>>,
    #[serde(deserialize_with = "nullable")]
    pub screenshots: Vec<Screenshot>,
}

impl LocaleContent {
    /// The key/value lines of the left column, in display order. Labels are
    /// derived from the field names (`support_url` → `Support url`).
    pub fn url_fields(&self) -> [(&'static str, &Field<String>); 3] {
        [
            ("Support url", &self.support_url),
            ("Privacy url", &self.privacy_url),
            ("Software url", &self.software_url),
        ]
    }

    /// Screenshots grouped contiguously by screen size, ordered by
    /// `(screen_size, path)`. The result does not depend on input order.
    pub fn screenshot_groups(&self) -> Vec<ScreenshotGroup<'_>> {
        let mut sorted: Vec<&Screenshot> = self.screenshots.iter().collect();
        sorted.sort_by(|a, b| {
            (a.screen_size.as_str(), &a.path).cmp(&(b.screen_size.as_str(), &b.path))
        });

        let mut groups: Vec<ScreenshotGroup<'_>> = Vec::new();
        for shot in sorted {
            let same_size = groups
                .last()
                .is_some_and(|group| group.screen_size == shot.screen_size);
            if same_size {
                if let Some(group) = groups.last_mut() {
                    group.screenshots.push(shot);
                }
            } else {
                groups.push(ScreenshotGroup {
                    screen_size: &shot.screen_size,
                    screenshots: vec![shot],
                });
            }
        }
        groups
    }
}

/// `null` is accepted wherever a field is expected and means "empty".
fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Ordered mapping from locale code to its content.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetadataBundle {
    locales: Vec<(String, LocaleContent)>,
}

impl MetadataBundle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a locale. Re-inserting an existing locale replaces its content
    /// but keeps its original position.
    pub fn insert(&mut self, locale: impl Into<String>, content: LocaleContent) {
        let locale = locale.into();
        match self.locales.iter_mut().find(|(code, _)| *code == locale) {
            Some(entry) => entry.1 = content,
            None => self.locales.push((locale, content)),
        }
    }

    pub fn get(&self, locale: &str) -> Option<&LocaleContent> {
        self.locales
            .iter()
            .find(|(code, _)| code == locale)
            .map(|(_, content)| content)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &LocaleContent)> {
        self.locales
            .iter()
            .map(|(code, content)| (code.as_str(), content))
    }

    pub fn len(&self) -> usize {
        self.locales.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locales.is_empty()
    }

    /// Parse a bundle from a JSON object keyed by locale code.
    pub fn from_json(json: &str) -> Result<Self, ProofError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}

impl<S: Into<String>> FromIterator<(S, LocaleContent)> for MetadataBundle {
    fn from_iter<I: IntoIterator<Item = (S, LocaleContent)>>(iter: I) -> Self {
        let mut bundle = Self::new();
        for (locale, content) in iter {
            bundle.insert(locale, content);
        }
        bundle
    }
}

impl Serialize for MetadataBundle {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.locales.len()))?;
        for (locale, content) in &self.locales {
            map.serialize_entry(locale, content)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for MetadataBundle {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct BundleVisitor;

        impl<'de> Visitor<'de> for BundleVisitor {
            type Value = MetadataBundle;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of locale codes to locale metadata")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut bundle = MetadataBundle::new();
                while let Some((locale, content)) = map.next_entry::<String, LocaleContent>()? {
                    bundle.insert(locale, content);
                }
                Ok(bundle)
            }
        }

        deserializer.deserialize_map(BundleVisitor)
    }
}
