/// Page rendering: cards into `#timeline-root`, filter buttons into `#category-buttons`,
/// the status block into `#currentJobsList`.
///
/// Every render starts from the immutable `Timeline` and produces a fresh page; nothing
/// from a previous render is reused.
use chrono::NaiveDate;
use timeline_common::html::escape;

use crate::card::{build_card, CardView};
use crate::dom::{Container, Element};
use crate::filter::{FilterBar, FilterState};
use crate::model::{Category, Timeline};
use crate::status::{current_jobs, render_current_jobs};

pub const TIMELINE_ROOT_ID: &str = "timeline-root";
pub const CATEGORY_BUTTONS_ID: &str = "category-buttons";
pub const CURRENT_JOBS_ID: &str = "currentJobsList";

pub const LOAD_FAILURE_MESSAGE: &str = "Failed to load timeline data.";

const BOOTSTRAP_CSS: &str = "https://cdn.jsdelivr.net/npm/bootstrap@5.3.3/dist/css/bootstrap.min.css";

/// Click handling for the filter bar. Mirrors `FilterBar::click`: highlight the clicked
/// button and toggle card visibility in place.
const FILTER_SCRIPT: &str = r#"document.addEventListener('DOMContentLoaded', function () {
  var bar = document.getElementById('category-buttons');
  var root = document.getElementById('timeline-root');
  if (!bar || !root) return;
  bar.addEventListener('click', function (event) {
    var button = event.target.closest('button[data-category]');
    if (!button) return;
    var target = button.getAttribute('data-category');
    bar.querySelectorAll('button[data-category]').forEach(function (b) {
      var active = b === button;
      b.classList.toggle('btn-primary', active);
      b.classList.toggle('btn-outline-primary', !active);
    });
    root.querySelectorAll('.category-card[data-category]').forEach(function (card) {
      var show = target === 'all' || card.getAttribute('data-category') === target;
      card.style.display = show ? '' : 'none';
    });
  });
});"#;

#[derive(Debug, Clone)]
pub struct PageOptions {
    pub title: String,
}

impl Default for PageOptions {
    fn default() -> Self {
        Self {
            title: "Career Timeline".to_string(),
        }
    }
}

pub fn timeline_container() -> Container {
    Container::new(TIMELINE_ROOT_ID, &["row", "row-cols-1", "row-cols-md-2"])
}

pub fn buttons_container() -> Container {
    Container::new(CATEGORY_BUTTONS_ID, &["mb-3"])
}

/// One card per entry, in document order.
pub fn build_cards(timeline: &Timeline, today: NaiveDate) -> Vec<CardView> {
    timeline
        .entries
        .iter()
        .filter_map(|entry| {
            timeline
                .category_of(entry)
                .map(|category| build_card(entry, category, today))
        })
        .collect()
}

/// Clear `container` and append the cards most recent first. Equal sort keys keep
/// document order.
pub fn render_all(mut cards: Vec<CardView>, container: &mut Container) {
    container.clear();
    cards.sort_by(|a, b| {
        b.sort_key
            .cmp(&a.sort_key)
            .then_with(|| a.position.cmp(&b.position))
    });
    for card in cards {
        container.append(card_element(card));
    }
}

fn card_element(card: CardView) -> Element {
    let inner = format!(
        r#"<div class="card h-100"><div class="card-body">{}{}{}</div></div>"#,
        card.title_html, card.meta_html, card.body_html
    );
    Element::new("div", &["col", "category-card"])
        .with_class(&card.category_id)
        .with_class("mb-4")
        .with_attribute("data-category", card.category_id)
        .with_inner_html(inner)
}

/// Clear `container` and fill it with "All" plus one button per category. The returned
/// bar starts in the `All` state with the "All" button active.
pub fn build_filters(categories: &[Category], container: &mut Container) -> FilterBar {
    container.clear();
    let bar = FilterBar::new(categories);
    for button in bar.buttons() {
        container.append(
            Element::new("button", &["btn", "btn-sm", "me-2"])
                .with_attribute("type", "button")
                .with_attribute("data-category", button.target.data_value())
                .with_inner_html(escape(&button.label)),
        );
    }
    bar
}

/// Replace the container content with the static load-failure message.
pub fn render_load_failure(container: &mut Container) {
    container.clear();
    container.append(Element::new("p", &["text-danger"]).with_inner_html(LOAD_FAILURE_MESSAGE));
}

/// Render the full page for `timeline` with `filter` applied.
pub fn render_page(
    timeline: &Timeline,
    filter: &FilterState,
    options: &PageOptions,
    today: NaiveDate,
) -> String {
    let mut root = timeline_container();
    render_all(build_cards(timeline, today), &mut root);

    let mut buttons = buttons_container();
    let mut bar = build_filters(&timeline.categories, &mut buttons);
    bar.apply(&mut buttons, &mut root);
    if filter != &FilterState::All {
        bar.click(filter, &mut buttons, &mut root);
    }

    let mut status = Container::new(CURRENT_JOBS_ID, &[]);
    render_current_jobs(&current_jobs(timeline), &mut status);

    page(options, &status.to_html(), &buttons.to_html(), &root.to_html())
}

/// Page shown when the document could not be fetched or parsed.
pub fn render_error_page(options: &PageOptions) -> String {
    let mut root = timeline_container();
    render_load_failure(&mut root);
    page(options, "", &buttons_container().to_html(), &root.to_html())
}

fn page(options: &PageOptions, status_html: &str, buttons_html: &str, root_html: &str) -> String {
    let title = escape(&options.title);
    let status_section = if status_html.is_empty() {
        String::new()
    } else {
        format!(r#"<section class="mb-4"><h2 class="h5">Currently</h2>{status_html}</section>"#)
    };
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<link href="{BOOTSTRAP_CSS}" rel="stylesheet">
</head>
<body>
<main class="container py-4">
<h1 class="mb-4">{title}</h1>
{status_section}
{buttons_html}
{root_html}
</main>
<script>{FILTER_SCRIPT}</script>
</body>
</html>
"#
    )
}
