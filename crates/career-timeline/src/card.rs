/// Card projection: one display-ready record per timeline entry.
///
/// All text taken from the document is HTML-escaped here; downstream rendering only
/// concatenates the prepared fragments.
use chrono::NaiveDate;
use timeline_common::html::escape;

use crate::dates::{format_duration, format_event_date, format_month_year, months_between, SortKey};
use crate::model::{Category, Certificate, Conference, Employment, Entry, Job, Link, TimelineEntry};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardView {
    pub title_html: String,
    pub meta_html: String,
    pub body_html: String,
    pub sort_key: SortKey,
    pub category_id: String,
    /// Document position, the tie-breaker for equal sort keys.
    pub position: usize,
}

pub fn build_card(entry: &TimelineEntry, category: &Category, today: NaiveDate) -> CardView {
    let (title_html, meta_html, body_html, sort_key) = match &entry.entry {
        Entry::Employment(e) => employment_card(e, today),
        Entry::Conference(c) => conference_card(c),
        Entry::Certificate(c) => certificate_card(c),
    };
    CardView {
        title_html,
        meta_html,
        body_html,
        sort_key,
        category_id: category.id.clone(),
        position: entry.position,
    }
}

type Parts = (String, String, String, SortKey);

fn employment_card(e: &Employment, today: NaiveDate) -> Parts {
    let title = format!(r#"<h5 class="card-title">{}</h5>"#, escape(&e.organization));

    let mut meta = subtitle(&e.place.label());
    meta.push_str(&format!(
        "<p><strong>Service Time:</strong> {}</p>",
        format_duration(e.span.total_months)
    ));
    meta.push_str(&format!(
        r#"<p class="text-muted small">{} - {}</p>"#,
        format_month_year(e.span.start),
        e.span.end.label()
    ));

    let mut jobs: Vec<&Job> = e.jobs.iter().collect();
    jobs.sort_by(|a, b| b.start.cmp(&a.start));
    let body = jobs.into_iter().map(|job| job_html(job, today)).collect();

    (title, meta, body, e.span.end.sort_key())
}

fn job_html(job: &Job, today: NaiveDate) -> String {
    let range = format!("{} - {}", format_month_year(job.start), job.end.label());
    let meta = [Some(range.as_str()), job.kind.as_deref(), job.location.as_deref()]
        .into_iter()
        .flatten()
        .map(escape)
        .collect::<Vec<_>>()
        .join(" | ");
    let duration = format_duration(months_between(job.start, job.end.resolve(today)));
    let description = job
        .description
        .as_deref()
        .map(|d| format!(r#"<p class="mt-1">{}</p>"#, escape(d)))
        .unwrap_or_default();

    format!(
        r#"<div class="mb-2"><strong>{}</strong><br><small class="text-muted">{meta}</small><br><small class="text-muted">Duration: {duration}</small>{description}</div>"#,
        escape(&job.title)
    )
}

fn conference_card(c: &Conference) -> Parts {
    let title = format!(r#"<h5 class="card-title">{}</h5>"#, escape(&c.event_name));

    let place = c.place.label();
    let host = if place.is_empty() {
        c.organization.clone()
    } else {
        format!("{} · {}", c.organization, place)
    };
    let mut meta = subtitle(&host);
    let details = [c.kind.as_deref(), c.location.as_deref()]
        .into_iter()
        .flatten()
        .map(escape)
        .collect::<Vec<_>>();
    meta.push_str(&format!("<p><strong>Date:</strong> {}", format_event_date(c.date)));
    if !details.is_empty() {
        meta.push_str(&format!(" | {}", details.join(" | ")));
    }
    meta.push_str("</p>");

    let body = format!(
        "<p><strong>Speaker:</strong> {}</p><p><strong>Venue:</strong> {}</p>",
        link_html(&c.spokesperson),
        link_html(&c.venue)
    );

    (title, meta, body, SortKey::Dated(c.date))
}

fn certificate_card(c: &Certificate) -> Parts {
    let title = format!(r#"<h5 class="card-title">{}</h5>"#, escape(&c.name));

    let mut meta = subtitle(&c.issuer);
    meta.push_str(&format!(
        "<p><strong>Valid:</strong> {} - {}</p>",
        format_month_year(c.start),
        c.end.label()
    ));

    let body = c
        .file
        .as_deref()
        .map(|file| {
            format!(
                r#"<a class="card-link" href="{}" target="_blank" rel="noopener">View certificate</a>"#,
                escape(file)
            )
        })
        .unwrap_or_default();

    (title, meta, body, c.end.sort_key())
}

fn subtitle(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    format!(r#"<h6 class="card-subtitle mb-2 text-muted">{}</h6>"#, escape(text))
}

fn link_html(link: &Link) -> String {
    match &link.url {
        Some(url) => format!(
            r#"<a href="{}" target="_blank" rel="noopener">{}</a>"#,
            escape(url),
            escape(&link.name)
        ),
        None => escape(&link.name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dates::EndDate;
    use crate::model::Place;
    use crate::span::compute_employment_span;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn today() -> NaiveDate {
        ymd(2024, 6, 15)
    }

    fn category() -> Category {
        Category {
            name: "Engineering".to_string(),
            id: "engineering".to_string(),
        }
    }

    fn job(title: &str, start: NaiveDate, end: EndDate) -> Job {
        Job {
            title: title.to_string(),
            start,
            end,
            kind: Some("Full-time".to_string()),
            location: None,
            description: Some("Built <things>".to_string()),
        }
    }

    fn employment(jobs: Vec<Job>) -> TimelineEntry {
        let span = compute_employment_span(&jobs, today()).unwrap();
        TimelineEntry {
            category: 0,
            position: 4,
            entry: Entry::Employment(Employment {
                organization: "Initech & Co".to_string(),
                place: Place {
                    city: Some("Austin".to_string()),
                    region: Some("TX".to_string()),
                    country: None,
                },
                jobs,
                span,
            }),
        }
    }

    #[test]
    fn employment_card_lists_jobs_newest_first() {
        let entry = employment(vec![
            job("Engineer", ymd(2019, 1, 1), EndDate::Ended(ymd(2020, 6, 1))),
            job("Senior Engineer", ymd(2020, 7, 1), EndDate::Ended(ymd(2021, 6, 1))),
        ]);
        let card = build_card(&entry, &category(), today());

        assert_eq!(card.title_html, r#"<h5 class="card-title">Initech &amp; Co</h5>"#);
        assert!(card.meta_html.contains("Austin, TX"));
        assert!(card.meta_html.contains("<strong>Service Time:</strong> 2 years 6 months"));
        assert!(card.meta_html.contains("01-2019 - 06-2021"));
        let senior = card.body_html.find("Senior Engineer").unwrap();
        let junior = card.body_html.find("<strong>Engineer</strong>").unwrap();
        assert!(senior < junior);
        assert!(card.body_html.contains("07-2020 - 06-2021 | Full-time"));
        assert!(card.body_html.contains("Duration: 1 year"));
        assert!(card.body_html.contains("Built &lt;things&gt;"));
        assert_eq!(card.sort_key, SortKey::Dated(ymd(2021, 6, 1)));
        assert_eq!(card.category_id, "engineering");
        assert_eq!(card.position, 4);
    }

    #[test]
    fn ongoing_employment_sorts_current() {
        let entry = employment(vec![job("Lead", ymd(2022, 1, 1), EndDate::Ongoing)]);
        let card = build_card(&entry, &category(), today());
        assert_eq!(card.sort_key, SortKey::Current);
        assert!(card.meta_html.contains("01-2022 - Current"));
        assert!(card.body_html.contains("Duration: 2 years 6 months"));
    }

    #[test]
    fn conference_card_links_people_and_places() {
        let entry = TimelineEntry {
            category: 0,
            position: 0,
            entry: Entry::Conference(Conference {
                organization: "Rust Foundation".to_string(),
                event_name: "RustConf".to_string(),
                date: ymd(2023, 9, 12),
                spokesperson: Link {
                    name: "Jane".to_string(),
                    url: Some("https://example.org/jane".to_string()),
                },
                venue: Link {
                    name: "Hall A".to_string(),
                    url: None,
                },
                place: Place::default(),
                kind: Some("Talk".to_string()),
                location: None,
            }),
        };
        let card = build_card(&entry, &category(), today());
        assert!(card.title_html.contains("RustConf"));
        assert!(card.meta_html.contains("<strong>Date:</strong> 12-09-2023 | Talk"));
        let speaker = r#"<a href="https://example.org/jane" target="_blank" rel="noopener">Jane</a>"#;
        assert!(card.body_html.contains(speaker));
        assert!(card.body_html.contains("<strong>Venue:</strong> Hall A"));
        assert_eq!(card.sort_key, SortKey::Dated(ymd(2023, 9, 12)));
    }

    #[test]
    fn certificate_card_without_end_is_current() {
        let entry = TimelineEntry {
            category: 0,
            position: 1,
            entry: Entry::Certificate(Certificate {
                name: "CKA".to_string(),
                issuer: "ACME".to_string(),
                start: ymd(2020, 1, 1),
                end: EndDate::Ongoing,
                file: Some("/assets/certs/cka.pdf".to_string()),
            }),
        };
        let card = build_card(&entry, &category(), today());
        assert!(card.meta_html.contains("ACME"));
        assert!(card.meta_html.contains("01-2020 - Current"));
        assert!(card.body_html.contains(r#"href="/assets/certs/cka.pdf""#));
        assert_eq!(card.sort_key, SortKey::Current);
    }

    #[test]
    fn certificate_card_with_end_sorts_by_end() {
        let entry = TimelineEntry {
            category: 0,
            position: 1,
            entry: Entry::Certificate(Certificate {
                name: "CKA".to_string(),
                issuer: "ACME".to_string(),
                start: ymd(2020, 1, 1),
                end: EndDate::Ended(ymd(2023, 1, 1)),
                file: None,
            }),
        };
        let card = build_card(&entry, &category(), today());
        assert_eq!(card.sort_key, SortKey::Dated(ymd(2023, 1, 1)));
        assert!(card.body_html.is_empty());
    }
}
