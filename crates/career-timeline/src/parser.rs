/// Normalization of the raw career document into the immutable `Timeline` model.
///
/// Entries carry no mandatory type tag, so the kind is inferred from which fields are
/// present:
/// - `jobs` array → employment
/// - `eventName` → conference appearance
/// - `name` + `issuer` → certificate
///
/// An optional `"kind"` field is validated against the inferred shape. Entries that match
/// no shape, disagree with their declared kind, or carry malformed dates are skipped with
/// a warning and recorded in `Timeline::issues`; the parser never aborts the whole load.
use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use crate::dates::{parse_end_date, parse_event_date, parse_month_year, MalformedDate};
use crate::error::EntryIssue;
use crate::filter::ALL_ID;
use crate::model::{
    Category, CategoryRecord, Certificate, CertificateRecord, Conference, ConferenceRecord,
    Employment, EmploymentRecord, Entry, EntryKind, Job, Link, LinkRecord, Place, Timeline,
    TimelineDocument, TimelineEntry,
};
use crate::span::compute_employment_span;

/// Why a single entry was rejected, before category/index context is attached.
#[derive(Debug)]
enum Rejection {
    Shape(String),
    Date(MalformedDate),
}

impl From<MalformedDate> for Rejection {
    fn from(e: MalformedDate) -> Self {
        Rejection::Date(e)
    }
}

/// Infer an entry's kind from field presence. `None` means the entry matches no shape.
pub fn classify_entry(entry: &Value) -> Option<EntryKind> {
    let obj = entry.as_object()?;
    if obj.get("jobs").is_some_and(Value::is_array) {
        Some(EntryKind::Employment)
    } else if obj.contains_key("eventName") {
        Some(EntryKind::Conference)
    } else if obj.contains_key("name") && obj.contains_key("issuer") {
        Some(EntryKind::Certificate)
    } else {
        None
    }
}

/// Build the normalized timeline. `today` resolves ongoing spans to month counts.
pub fn normalize(document: TimelineDocument, today: NaiveDate) -> Timeline {
    let mut timeline = Timeline::default();
    let mut position = 0;

    for CategoryRecord { category, entries } in document.timeline {
        let category_index = intern_category(&mut timeline.categories, &category);

        for (index, value) in entries.into_iter().enumerate() {
            match normalize_entry(value, today) {
                Ok(entry) => {
                    debug!(
                        category = %category,
                        index,
                        kind = entry.kind().as_str(),
                        "entry accepted"
                    );
                    timeline.entries.push(TimelineEntry {
                        category: category_index,
                        position,
                        entry,
                    });
                    position += 1;
                }
                Err(rejection) => {
                    let issue = match rejection {
                        Rejection::Shape(reason) => EntryIssue::MalformedEntry {
                            category: category.clone(),
                            index,
                            reason,
                        },
                        Rejection::Date(e) => EntryIssue::MalformedDate {
                            category: category.clone(),
                            index,
                            value: e.value,
                            expected: e.expected,
                        },
                    };
                    warn!(category = %category, index, issue = %issue, "skipping timeline entry");
                    timeline.issues.push(issue);
                }
            }
        }
    }

    debug!(
        categories = timeline.categories.len(),
        entries = timeline.entries.len(),
        skipped = timeline.issues.len(),
        "timeline normalized"
    );
    timeline
}

/// Return the index of the category with this display name, adding it if new.
///
/// Sections merge only when their trimmed names match case-insensitively. Distinct names
/// always get distinct ids: a slug already held by another category gets a numeric
/// suffix ("c", "c-2", ...).
fn intern_category(categories: &mut Vec<Category>, name: &str) -> usize {
    let name = name.trim();
    if let Some(pos) = categories
        .iter()
        .position(|c| c.name.to_lowercase() == name.to_lowercase())
    {
        return pos;
    }

    let base = match slugify(name) {
        slug if slug.is_empty() => format!("category-{}", categories.len() + 1),
        slug if slug == ALL_ID => format!("category-{slug}"),
        slug => slug,
    };
    let id = unique_id(categories, base);
    categories.push(Category {
        name: name.to_string(),
        id,
    });
    categories.len() - 1
}

fn unique_id(categories: &[Category], base: String) -> String {
    let taken = |id: &str| categories.iter().any(|c| c.id == id);
    if !taken(base.as_str()) {
        return base;
    }
    let mut n = 2;
    loop {
        let candidate = format!("{base}-{n}");
        if !taken(candidate.as_str()) {
            return candidate;
        }
        n += 1;
    }
}

fn normalize_entry(value: Value, today: NaiveDate) -> Result<Entry, Rejection> {
    let inferred = classify_entry(&value);

    if let Some(declared) = value.get("kind") {
        let declared = declared
            .as_str()
            .and_then(EntryKind::parse)
            .ok_or_else(|| Rejection::Shape(format!("unknown kind {declared}")))?;
        if inferred != Some(declared) {
            return Err(Rejection::Shape(format!(
                "declared kind {} does not match entry fields",
                declared.as_str()
            )));
        }
    }

    let kind = inferred
        .ok_or_else(|| Rejection::Shape("entry matches no known shape".to_string()))?;

    match kind {
        EntryKind::Employment => employment(decode(value)?, today).map(Entry::Employment),
        EntryKind::Conference => conference(decode(value)?).map(Entry::Conference),
        EntryKind::Certificate => certificate(decode(value)?).map(Entry::Certificate),
    }
}

fn decode<T: DeserializeOwned>(value: Value) -> Result<T, Rejection> {
    serde_json::from_value(value).map_err(|e| Rejection::Shape(e.to_string()))
}

fn employment(record: EmploymentRecord, today: NaiveDate) -> Result<Employment, Rejection> {
    let jobs = record
        .jobs
        .into_iter()
        .map(|job| {
            Ok(Job {
                start: parse_month_year(&job.start)?,
                end: parse_end_date(job.end.as_deref())?,
                title: job.title,
                kind: non_blank(job.kind),
                location: non_blank(job.location),
                description: non_blank(job.description),
            })
        })
        .collect::<Result<Vec<_>, MalformedDate>>()?;

    let span = compute_employment_span(&jobs, today)
        .ok_or_else(|| Rejection::Shape("employment entry has no jobs".to_string()))?;

    Ok(Employment {
        organization: record.organization,
        place: Place {
            city: record.city,
            region: record.region,
            country: record.country,
        },
        jobs,
        span,
    })
}

fn conference(record: ConferenceRecord) -> Result<Conference, Rejection> {
    Ok(Conference {
        date: parse_event_date(&record.date)?,
        organization: record.organization,
        event_name: record.event_name,
        spokesperson: link(record.spokesperson),
        venue: link(record.venue),
        place: Place {
            city: record.city,
            region: record.region,
            country: record.country,
        },
        kind: non_blank(record.kind),
        location: non_blank(record.location),
    })
}

fn certificate(record: CertificateRecord) -> Result<Certificate, Rejection> {
    Ok(Certificate {
        start: parse_month_year(&record.start)?,
        end: parse_end_date(record.end.as_deref())?,
        name: record.name,
        issuer: record.issuer,
        file: non_blank(record.file),
    })
}

fn link(record: LinkRecord) -> Link {
    Link {
        name: record.name,
        url: non_blank(record.link),
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

/// Lower-case slug used as the category filter id: "Open Source" → "open-source".
pub fn slugify(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut last_dash = false;
    for ch in s.chars() {
        let lc = ch.to_ascii_lowercase();
        if lc.is_ascii_alphanumeric() {
            out.push(lc);
            last_dash = false;
        } else if !last_dash {
            out.push('-');
            last_dash = true;
        }
    }
    out.trim_matches('-').to_string()
}
