/// Load-then-render service. Each call fetches the document again, normalizes it and
/// renders a fresh page. A failed load yields the static error page; it is never retried.
use chrono::NaiveDate;
use timeline_common::error::CommonError;
use timeline_common::source::{DataSource, DocumentLoader};
use tracing::{error, info};

use crate::filter::FilterState;
use crate::model::TimelineDocument;
use crate::parser;
use crate::render::{render_error_page, render_page, PageOptions};

pub enum RenderOutcome {
    Rendered {
        html: String,
        entries: usize,
        skipped: usize,
    },
    Failed {
        html: String,
        error: CommonError,
    },
}

impl RenderOutcome {
    pub fn html(&self) -> &str {
        match self {
            RenderOutcome::Rendered { html, .. } | RenderOutcome::Failed { html, .. } => html,
        }
    }
}

pub struct TimelineRenderer {
    loader: DocumentLoader,
    source: DataSource,
    options: PageOptions,
}

impl TimelineRenderer {
    pub fn new(loader: DocumentLoader, source: DataSource, options: PageOptions) -> Self {
        Self {
            loader,
            source,
            options,
        }
    }

    pub fn source(&self) -> &DataSource {
        &self.source
    }

    pub async fn load_data(&self) -> Result<TimelineDocument, CommonError> {
        self.loader.load(&self.source).await
    }

    /// Render with today's date resolving ongoing ranges.
    pub async fn render(&self, category: Option<&str>) -> RenderOutcome {
        self.render_at(category, chrono::Local::now().date_naive()).await
    }

    pub async fn render_at(&self, category: Option<&str>, today: NaiveDate) -> RenderOutcome {
        let document = match self.load_data().await {
            Ok(document) => document,
            Err(e) => {
                error!(
                    source = %self.source.describe(),
                    error = %e,
                    "failed to load timeline data"
                );
                return RenderOutcome::Failed {
                    html: render_error_page(&self.options),
                    error: e,
                };
            }
        };

        let timeline = parser::normalize(document, today);
        let filter = FilterState::from_param(category, &timeline.categories);
        let html = render_page(&timeline, &filter, &self.options, today);

        info!(
            categories = timeline.categories.len(),
            entries = timeline.entries.len(),
            skipped = timeline.issues.len(),
            filter = filter.data_value(),
            "timeline rendered"
        );
        RenderOutcome::Rendered {
            html,
            entries: timeline.entries.len(),
            skipped: timeline.issues.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::path::PathBuf;

    use timeline_common::source::LoaderConfig;

    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    fn renderer(source: DataSource) -> TimelineRenderer {
        TimelineRenderer::new(
            DocumentLoader::new(LoaderConfig::default()).unwrap(),
            source,
            PageOptions {
                title: "Jane Doe".to_string(),
            },
        )
    }

    fn write_document(body: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(body.as_bytes()).unwrap();
        file
    }

    #[tokio::test]
    async fn renders_loaded_document() {
        let file = write_document(
            r#"{"timeline":[{"category":"Engineering","entries":[
                {"organization":"Initech","jobs":[{"title":"Engineer","start":"01-2019"}]},
                {"mystery":true}
            ]}]}"#,
        );
        let outcome = renderer(DataSource::File(file.path().to_path_buf()))
            .render_at(None, today())
            .await;

        match &outcome {
            RenderOutcome::Rendered { entries, skipped, .. } => {
                assert_eq!(*entries, 1);
                assert_eq!(*skipped, 1);
            }
            RenderOutcome::Failed { error, .. } => panic!("unexpected failure: {error}"),
        }
        assert!(outcome.html().contains("<title>Jane Doe</title>"));
        assert!(outcome.html().contains("<strong>Engineer</strong> at Initech"));
    }

    #[tokio::test]
    async fn missing_document_renders_error_page() {
        let outcome = renderer(DataSource::File(PathBuf::from("/no/such/career.json")))
            .render_at(None, today())
            .await;
        assert!(matches!(outcome, RenderOutcome::Failed { .. }));
        assert!(outcome.html().contains("Failed to load timeline data."));
    }

    #[tokio::test]
    async fn invalid_json_renders_error_page() {
        let file = write_document("{\"timeline\": [");
        let outcome = renderer(DataSource::File(file.path().to_path_buf()))
            .render_at(None, today())
            .await;
        match outcome {
            RenderOutcome::Failed { error, html } => {
                assert!(matches!(error, CommonError::Parse(_)));
                assert!(html.contains("text-danger"));
            }
            RenderOutcome::Rendered { .. } => panic!("expected failure"),
        }
    }

    #[tokio::test]
    async fn rerender_reflects_updated_document() {
        let file = write_document(r#"{"timeline":[]}"#);
        let r = renderer(DataSource::File(file.path().to_path_buf()));
        let first = r.render_at(None, today()).await.html().to_string();
        assert!(!first.contains(r#"class="col category-card"#));

        std::fs::write(
            file.path(),
            r#"{"timeline":[{"category":"Certs","entries":[{"name":"CKA","issuer":"CNCF","start":"01-2020"}]}]}"#,
        )
        .unwrap();
        let second = r.render_at(None, today()).await.html().to_string();
        assert!(second.contains(r#"data-category="certs""#));
    }
}
