// src/pipeline/outline.rs
use std::collections::HashMap;

use serde_json::Value;

use crate::extractors::json::JsonMap;

/// Section titles used when none are configured.
pub const DEFAULT_SECTIONS: [&str; 3] = [
    "1. Objectives and Key Results:",
    "2. Key Points:",
    "3. Conclusion",
];

pub fn default_sections() -> Vec<String> {
    DEFAULT_SECTIONS.iter().map(|s| s.to_string()).collect()
}

/// Generation guidance: section title -> key points. Immutable once built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Outline {
    points: HashMap<String, Vec<String>>,
}

impl Outline {
    /// Builds an outline from an extracted JSON object. Arrays become key-point
    /// lists, a lone string becomes a single point, nested objects become
    /// `key: value` points and null becomes no points.
    pub fn from_json(map: &JsonMap) -> Self {
        let points = map
            .iter()
            .map(|(title, value)| (title.clone(), key_points(value)))
            .collect();
        Self { points }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Key points for `section`. Falls back to a loose title match (case,
    /// surrounding whitespace and a trailing colon ignored) because models
    /// often echo titles slightly differently. Missing sections give `&[]`.
    pub fn key_points(&self, section: &str) -> &[String] {
        if let Some(points) = self.points.get(section) {
            return points;
        }
        let wanted = normalize_title(section);
        self.points
            .iter()
            .find(|(title, _)| normalize_title(title) == wanted)
            .map(|(_, points)| points.as_slice())
            .unwrap_or(&[])
    }

    /// Sections from `expected` that have no key points in this outline.
    pub fn missing_sections<'a>(&self, expected: &'a [String]) -> Vec<&'a str> {
        expected
            .iter()
            .filter(|s| self.key_points(s).is_empty())
            .map(|s| s.as_str())
            .collect()
    }
}

fn normalize_title(title: &str) -> String {
    title.trim().trim_end_matches(':').trim_end().to_lowercase()
}

fn key_points(value: &Value) -> Vec<String> {
    match value {
        Value::Null => Vec::new(),
        Value::Array(items) => items.iter().filter_map(point_text).collect(),
        Value::Object(map) => map
            .iter()
            .filter_map(|(k, v)| point_text(v).map(|text| format!("{}: {}", k, text)))
            .collect(),
        other => point_text(other).into_iter().collect(),
    }
}

fn point_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) if s.trim().is_empty() => None,
        Value::String(s) => Some(s.trim().to_string()),
        other => Some(other.to_string()),
    }
}

/// Generated markup per section, kept in section order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionContent {
    entries: Vec<(String, String)>,
}

impl SectionContent {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a section; a repeated title replaces the earlier text in place.
    pub fn insert(&mut self, section: impl Into<String>, markup: impl Into<String>) {
        let section = section.into();
        let markup = markup.into();
        match self.entries.iter_mut().find(|(title, _)| *title == section) {
            Some(entry) => entry.1 = markup,
            None => self.entries.push((section, markup)),
        }
    }

    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(title, _)| title.as_str())
    }

    /// Markup in section order, ready for the document builder.
    pub fn markup(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(_, markup)| markup.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
