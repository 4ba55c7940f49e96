mod card;
mod config;
mod dates;
mod dom;
mod error;
mod filter;
mod model;
mod parser;
mod render;
mod renderer;
mod server;
mod span;
mod status;

use std::io::Write;
use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use timeline_common::source::DocumentLoader;

use config::Config;
use error::AppError;
use render::PageOptions;
use renderer::{RenderOutcome, TimelineRenderer};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let config = Config::from_env()?;
    info!(
        source = %config.data_source.describe(),
        timeout_secs = config.loader.timeout.as_secs(),
        "career timeline configured"
    );

    let loader = DocumentLoader::new(config.loader.clone()).map_err(AppError::from)?;
    let renderer = TimelineRenderer::new(
        loader,
        config.data_source.clone(),
        PageOptions {
            title: config.title.clone(),
        },
    );

    if let Some(addr) = &config.listen_addr {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        info!(addr = %addr, "serving timeline over http");
        axum::serve(listener, server::build_router(Arc::new(renderer)))
            .await
            .inspect_err(|e| tracing::error!(error = %e, "http server error"))?;
        return Ok(());
    }

    let outcome = renderer.render(None).await;
    write_page(&config, outcome.html())?;

    match outcome {
        RenderOutcome::Failed { error, .. } => Err(AppError::from(error).into()),
        RenderOutcome::Rendered { entries, skipped, .. } => {
            info!(entries, skipped, "one-shot render complete");
            Ok(())
        }
    }
}

fn write_page(config: &Config, html: &str) -> Result<(), AppError> {
    match &config.output {
        Some(path) => {
            std::fs::write(path, html).map_err(|e| AppError::Output {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;
            info!(path = %path.display(), "timeline page written");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(html.as_bytes())
                .and_then(|()| stdout.flush())
                .map_err(|e| AppError::Output {
                    path: "<stdout>".to_string(),
                    message: e.to_string(),
                })?;
        }
    }
    Ok(())
}
