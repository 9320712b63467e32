//! View state owned by the browsing session.
//!
//! [`ViewState`] is the single source of truth for what the user is looking
//! at. It never holds fetched data; [`ViewState::current_queries`] derives the
//! requests the current view depends on, and anything cached under other keys
//! is simply not shown.

use crate::config::BrowserConfig;
use crate::query::QueryKey;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Browse,
    Search,
    Special,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Browse, Tab::Search, Tab::Special];

    pub fn label(&self) -> &'static str {
        match self {
            Tab::Browse => "Browse",
            Tab::Search => "Search",
            Tab::Special => "Chef's Special",
        }
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Tab {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "browse" => Ok(Tab::Browse),
            "search" => Ok(Tab::Search),
            "special" => Ok(Tab::Special),
            other => Err(format!("unknown tab '{}'", other)),
        }
    }
}

/// Filter input and layout toggle for one chip list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListFilter {
    pub query: String,
    pub expanded: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    pub tab: Tab,
    /// Ingredient searched on the Search tab
    pub term: String,
    pub category: String,
    pub area: String,
    /// `Some` while the detail drawer is mounted
    pub selected_id: Option<String>,
    /// Bumped to ask for a different random recipe
    pub nonce: u64,
    pub category_filter: ListFilter,
    pub area_filter: ListFilter,
}

impl Default for ViewState {
    fn default() -> Self {
        Self::from_config(&BrowserConfig::default())
    }
}

impl ViewState {
    pub fn from_config(config: &BrowserConfig) -> Self {
        Self {
            tab: Tab::Browse,
            term: config.default_term.clone(),
            category: config.default_category.clone(),
            area: config.default_area.clone(),
            selected_id: None,
            nonce: 0,
            category_filter: ListFilter::default(),
            area_filter: ListFilter::default(),
        }
    }

    pub fn set_tab(&mut self, tab: Tab) {
        self.tab = tab;
    }

    pub fn set_term(&mut self, term: impl Into<String>) {
        self.term = term.into();
    }

    pub fn select_category(&mut self, category: impl Into<String>) {
        self.category = category.into();
    }

    pub fn select_area(&mut self, area: impl Into<String>) {
        self.area = area.into();
    }

    pub fn set_category_query(&mut self, query: impl Into<String>) {
        self.category_filter.query = query.into();
    }

    pub fn set_area_query(&mut self, query: impl Into<String>) {
        self.area_filter.query = query.into();
    }

    pub fn toggle_category_expanded(&mut self) {
        self.category_filter.expanded = !self.category_filter.expanded;
    }

    pub fn toggle_area_expanded(&mut self) {
        self.area_filter.expanded = !self.area_filter.expanded;
    }

    pub fn select_meal(&mut self, id: impl Into<String>) {
        self.selected_id = Some(id.into());
    }

    pub fn clear_selection(&mut self) {
        self.selected_id = None;
    }

    pub fn roll_special(&mut self) {
        self.nonce += 1;
    }

    pub fn search_key(&self) -> Option<QueryKey> {
        (!self.term.trim().is_empty()).then(|| QueryKey::ByIngredient(self.term.clone()))
    }

    pub fn special_key(&self) -> QueryKey {
        QueryKey::Random(self.nonce)
    }

    pub fn detail_key(&self) -> Option<QueryKey> {
        self.selected_id.clone().map(QueryKey::Lookup)
    }

    /// Every request the view currently depends on
    pub fn current_queries(&self) -> Vec<QueryKey> {
        let mut keys = vec![
            QueryKey::Categories,
            QueryKey::Areas,
            QueryKey::ByCategory(self.category.clone()),
            QueryKey::ByArea(self.area.clone()),
        ];
        keys.extend(self.search_key());
        keys.push(self.special_key());
        keys.extend(self.detail_key());
        keys
    }
}
