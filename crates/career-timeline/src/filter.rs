/// Category filter state machine.
///
/// States are `All` plus one per category; the bar starts at `All`. Clicking a button
/// moves to that button's target (clicking the active one again changes nothing) and
/// toggles visibility of the already-rendered cards. No re-sort, no re-render.
use tracing::{debug, warn};

use crate::dom::Container;
use crate::model::Category;

/// `data-category` value of the "All" button.
pub const ALL_ID: &str = "all";

const ACTIVE_CLASS: &str = "btn-primary";
const INACTIVE_CLASS: &str = "btn-outline-primary";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FilterState {
    #[default]
    All,
    Category(String),
}

impl FilterState {
    pub fn data_value(&self) -> &str {
        match self {
            FilterState::All => ALL_ID,
            FilterState::Category(id) => id,
        }
    }

    pub fn matches(&self, category_id: &str) -> bool {
        match self {
            FilterState::All => true,
            FilterState::Category(id) => id == category_id,
        }
    }

    /// Resolve a `?category=` value. Unknown ids fall back to `All`.
    pub fn from_param(param: Option<&str>, categories: &[Category]) -> Self {
        match param.map(str::trim) {
            None | Some("") => FilterState::All,
            Some(ALL_ID) => FilterState::All,
            Some(id) if categories.iter().any(|c| c.id == id) => {
                FilterState::Category(id.to_string())
            }
            Some(id) => {
                warn!(category = id, "unknown category filter, showing all");
                FilterState::All
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterButton {
    pub label: String,
    pub target: FilterState,
}

#[derive(Debug, Clone)]
pub struct FilterBar {
    buttons: Vec<FilterButton>,
    state: FilterState,
}

impl FilterBar {
    /// "All" followed by one button per distinct category, in document order.
    pub fn new(categories: &[Category]) -> Self {
        let mut buttons = vec![FilterButton {
            label: "All".to_string(),
            target: FilterState::All,
        }];
        for category in categories {
            let target = FilterState::Category(category.id.clone());
            if buttons.iter().any(|b| b.target == target) {
                continue;
            }
            buttons.push(FilterButton {
                label: category.name.clone(),
                target,
            });
        }
        Self {
            buttons,
            state: FilterState::All,
        }
    }

    pub fn buttons(&self) -> &[FilterButton] {
        &self.buttons
    }

    #[cfg(test)]
    pub fn state(&self) -> &FilterState {
        &self.state
    }

    /// Handle a click on the button targeting `target`.
    ///
    /// Returns `true` when the state changed. Targets without a button are ignored.
    pub fn click(
        &mut self,
        target: &FilterState,
        buttons: &mut Container,
        cards: &mut Container,
    ) -> bool {
        if !self.buttons.iter().any(|b| &b.target == target) {
            warn!(category = target.data_value(), "click on unknown filter ignored");
            return false;
        }
        let changed = &self.state != target;
        self.state = target.clone();
        self.apply(buttons, cards);
        debug!(
            category = self.state.data_value(),
            changed,
            visible = cards.visible_children().count(),
            "filter selected"
        );
        changed
    }

    /// Sync button highlighting and card visibility to the current state.
    pub fn apply(&self, buttons: &mut Container, cards: &mut Container) {
        let active = self.state.data_value();
        for button in buttons.children_mut() {
            let is_active = button.data_category() == Some(active);
            button.set_class(ACTIVE_CLASS, is_active);
            button.set_class(INACTIVE_CLASS, !is_active);
        }
        for card in cards.children_mut() {
            let show = card
                .data_category()
                .is_some_and(|id| self.state.matches(id));
            card.set_hidden(!show);
        }
    }
}
