use chrono::NaiveDate;

use crate::dates::{months_between, EndDate};
use crate::model::Job;

/// Overall `[start, end]` range of an employment entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmploymentSpan {
    pub start: NaiveDate,
    pub end: EndDate,
    pub total_months: i64,
}

/// Earliest job start to the latest job end, or ongoing if any job has no end.
///
/// Returns `None` for an empty job list.
pub fn compute_employment_span(jobs: &[Job], today: NaiveDate) -> Option<EmploymentSpan> {
    let start = jobs.iter().map(|job| job.start).min()?;

    let end = if jobs.iter().any(|job| job.end.is_ongoing()) {
        EndDate::Ongoing
    } else {
        jobs.iter()
            .filter_map(|job| match job.end {
                EndDate::Ended(date) => Some(date),
                EndDate::Ongoing => None,
            })
            .max()
            .map(EndDate::Ended)?
    };

    Some(EmploymentSpan {
        start,
        end,
        total_months: months_between(start, end.resolve(today)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, 1).unwrap()
    }

    fn job(start: NaiveDate, end: EndDate) -> Job {
        Job {
            title: "Engineer".to_string(),
            start,
            end,
            kind: None,
            location: None,
            description: None,
        }
    }

    #[test]
    fn closed_span_uses_earliest_start_and_latest_end() {
        let jobs = vec![
            job(ymd(2020, 7), EndDate::Ended(ymd(2021, 6))),
            job(ymd(2019, 1), EndDate::Ended(ymd(2020, 6))),
        ];
        let span = compute_employment_span(&jobs, ymd(2030, 1)).unwrap();
        assert_eq!(span.start, ymd(2019, 1));
        assert_eq!(span.end, EndDate::Ended(ymd(2021, 6)));
        assert_eq!(span.total_months, 30);
    }

    #[test]
    fn any_open_job_makes_span_current() {
        let jobs = vec![
            job(ymd(2022, 3), EndDate::Ongoing),
            job(ymd(2018, 5), EndDate::Ended(ymd(2022, 2))),
        ];
        let today = ymd(2024, 2);
        let span = compute_employment_span(&jobs, today).unwrap();
        assert_eq!(span.start, ymd(2018, 5));
        assert_eq!(span.end, EndDate::Ongoing);
        assert_eq!(span.end.label(), "Current");
        assert_eq!(span.total_months, months_between(ymd(2018, 5), today));
    }

    #[test]
    fn open_job_listed_first_or_last_gives_same_span() {
        let a = vec![
            job(ymd(2018, 5), EndDate::Ended(ymd(2022, 2))),
            job(ymd(2022, 3), EndDate::Ongoing),
        ];
        let b: Vec<Job> = a.iter().rev().cloned().collect();
        let today = ymd(2024, 2);
        assert_eq!(
            compute_employment_span(&a, today),
            compute_employment_span(&b, today)
        );
    }

    #[test]
    fn empty_jobs_have_no_span() {
        assert!(compute_employment_span(&[], ymd(2024, 1)).is_none());
    }
}
