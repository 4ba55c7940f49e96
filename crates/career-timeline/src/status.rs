/// "Currently" status block: every job without an end date.
use timeline_common::html::escape;

use crate::dom::{Container, Element};
use crate::model::{Entry, Timeline};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentJob {
    pub title: String,
    pub organization: String,
}

/// Open jobs across all employment entries, in document order.
pub fn current_jobs(timeline: &Timeline) -> Vec<CurrentJob> {
    timeline
        .entries
        .iter()
        .filter_map(|e| match &e.entry {
            Entry::Employment(employment) => Some(employment),
            _ => None,
        })
        .flat_map(|employment| {
            employment
                .jobs
                .iter()
                .filter(|job| job.end.is_ongoing())
                .map(|job| CurrentJob {
                    title: job.title.clone(),
                    organization: employment.organization.clone(),
                })
        })
        .collect()
}

pub fn render_current_jobs(jobs: &[CurrentJob], container: &mut Container) {
    container.clear();
    if jobs.is_empty() {
        container.append(Element::new("p", &[]).with_inner_html("No current jobs available."));
        return;
    }
    for job in jobs {
        container.append(Element::new("div", &["current-job-item"]).with_inner_html(format!(
            "<strong>{}</strong> at {}",
            escape(&job.title),
            escape(&job.organization)
        )));
    }
}
