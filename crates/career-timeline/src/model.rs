use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::dates::EndDate;
use crate::error::EntryIssue;
use crate::span::EmploymentSpan;

// --- Document shape as stored in career.json ---

/// Top-level career document: `{ "timeline": [ { "category": ..., "entries": [...] } ] }`.
#[derive(Debug, Clone, Deserialize)]
pub struct TimelineDocument {
    pub timeline: Vec<CategoryRecord>,
}

/// One section of the document. Entries stay untyped until classification.
#[derive(Debug, Clone, Deserialize)]
pub struct CategoryRecord {
    pub category: String,
    #[serde(default)]
    pub entries: Vec<Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmploymentRecord {
    pub organization: String,
    pub city: Option<String>,
    pub region: Option<String>,
    pub country: Option<String>,
    pub jobs: Vec<JobRecord>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JobRecord {
    pub title: String,
    pub start: String,
    pub end: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConferenceRecord {
    pub organization: String,
    pub event_name: String,
    pub date: String,
    pub spokesperson: LinkRecord,
    pub venue: LinkRecord,
    pub city: Option<String>,
    pub region: Option<String>,
    pub country: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub location: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LinkRecord {
    pub name: String,
    #[serde(default)]
    pub link: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CertificateRecord {
    pub name: String,
    pub issuer: String,
    pub start: String,
    pub end: Option<String>,
    pub file: Option<String>,
}

// --- Normalized, immutable model ---

/// Entry discriminant. Documents may state it explicitly via `"kind"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Employment,
    Conference,
    Certificate,
}

impl EntryKind {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "employment" => Some(EntryKind::Employment),
            "conference" => Some(EntryKind::Conference),
            "certificate" => Some(EntryKind::Certificate),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EntryKind::Employment => "employment",
            EntryKind::Conference => "conference",
            EntryKind::Certificate => "certificate",
        }
    }
}

/// A category with its filter identifier computed once at load time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Category {
    /// Display name, e.g. "Open Source"
    pub name: String,
    /// Slug used for filtering, e.g. "open-source"
    pub id: String,
}

/// City / region / country triple shared by employment and conference entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Place {
    pub city: Option<String>,
    pub region: Option<String>,
    pub country: Option<String>,
}

impl Place {
    /// "City, Region, Country" with missing or blank parts dropped.
    pub fn label(&self) -> String {
        [&self.city, &self.region, &self.country]
            .into_iter()
            .filter_map(|part| part.as_deref())
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub name: String,
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    pub title: String,
    pub start: NaiveDate,
    pub end: EndDate,
    pub kind: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Employment {
    pub organization: String,
    pub place: Place,
    /// Jobs in document order.
    pub jobs: Vec<Job>,
    pub span: EmploymentSpan,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conference {
    pub organization: String,
    pub event_name: String,
    pub date: NaiveDate,
    pub spokesperson: Link,
    pub venue: Link,
    pub place: Place,
    pub kind: Option<String>,
    pub location: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Certificate {
    pub name: String,
    pub issuer: String,
    pub start: NaiveDate,
    pub end: EndDate,
    pub file: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    Employment(Employment),
    Conference(Conference),
    Certificate(Certificate),
}

impl Entry {
    pub fn kind(&self) -> EntryKind {
        match self {
            Entry::Employment(_) => EntryKind::Employment,
            Entry::Conference(_) => EntryKind::Conference,
            Entry::Certificate(_) => EntryKind::Certificate,
        }
    }
}

/// An entry together with its owning category and document position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimelineEntry {
    /// Index into `Timeline::categories`.
    pub category: usize,
    /// Position across the whole document, used to keep sorting stable.
    pub position: usize,
    pub entry: Entry,
}

/// The normalized result of one load. Built once, never mutated by rendering.
#[derive(Debug, Clone, Default)]
pub struct Timeline {
    pub categories: Vec<Category>,
    pub entries: Vec<TimelineEntry>,
    /// Entries that were skipped during normalization.
    pub issues: Vec<EntryIssue>,
}

impl Timeline {
    pub fn category_of(&self, entry: &TimelineEntry) -> Option<&Category> {
        self.categories.get(entry.category)
    }
}
