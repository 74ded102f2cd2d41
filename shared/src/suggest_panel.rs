//! State machine of the search box dropdown: typing, keyboard selection,
//! submission and navigation to the fleet listing.

use crate::{
    fleet_query::FleetQuery,
    history::{KeyValueStore, SearchHistory},
    suggest::{is_suggest_query, Suggestion},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Enter,
    Escape,
}

/// What the caller should do after an interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelOutcome {
    Nothing,
    /// Push the new catalog state.
    Navigate(FleetQuery),
    Closed,
}

/// One selectable row of the open panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelItem<'a> {
    Popular(&'a str),
    History(&'a str),
    Suggestion(&'a Suggestion),
}

#[derive(Debug)]
pub struct SuggestPanel<S> {
    query: String,
    is_open: bool,
    suggestions: Vec<Suggestion>,
    popular: Vec<String>,
    history: SearchHistory<S>,
    selected: Option<usize>,
    location: FleetQuery,
}

impl<S: KeyValueStore> SuggestPanel<S> {
    /// The query starts from the `search` param of the current location.
    pub fn new(popular: Vec<String>, history: SearchHistory<S>, location: FleetQuery) -> Self {
        Self {
            query: location.filter.search.clone().unwrap_or_default(),
            is_open: false,
            suggestions: Vec::new(),
            popular,
            history,
            selected: None,
            location,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn suggestions(&self) -> &[Suggestion] {
        &self.suggestions
    }

    pub fn history(&self) -> &[String] {
        self.history.entries()
    }

    pub fn location(&self) -> &FleetQuery {
        &self.location
    }

    /// Focus: shows the panel without touching the query.
    pub fn open(&mut self) {
        self.is_open = true;
    }

    /// Typing. Returns whether a suggest computation should be scheduled.
    pub fn set_query(&mut self, query: &str) -> bool {
        self.query = query.to_string();
        self.is_open = true;
        self.selected = None;
        if is_suggest_query(query) {
            true
        } else {
            self.suggestions.clear();
            false
        }
    }

    /// Installs results computed for `query_for`; stale results are dropped.
    pub fn set_suggestions(&mut self, query_for: &str, suggestions: Vec<Suggestion>) -> bool {
        if query_for != self.query {
            tracing::debug!("dropping stale suggestions for `{}`", query_for);
            return false;
        }
        self.suggestions = suggestions;
        self.selected = None;
        true
    }

    /// Rows in keyboard order: popular then history for an empty query,
    /// suggestions otherwise.
    pub fn items(&self) -> Vec<PanelItem<'_>> {
        if self.query.is_empty() {
            self.popular
                .iter()
                .map(|text| PanelItem::Popular(text))
                .chain(self.history.entries().iter().map(|text| PanelItem::History(text)))
                .collect()
        } else {
            self.suggestions.iter().map(PanelItem::Suggestion).collect()
        }
    }

    pub fn handle_key(&mut self, key: Key) -> PanelOutcome {
        if !self.is_open {
            return PanelOutcome::Nothing;
        }
        let count = self.items().len();
        match key {
            Key::Down => {
                if count > 0 {
                    self.selected = Some(self.selected.map_or(0, |idx| (idx + 1) % count));
                }
                PanelOutcome::Nothing
            },
            Key::Up => {
                if count > 0 {
                    self.selected = Some(match self.selected {
                        None | Some(0) => count - 1,
                        Some(idx) => idx - 1,
                    });
                }
                PanelOutcome::Nothing
            },
            Key::Enter => self.activate_selected(),
            Key::Escape => {
                self.is_open = false;
                self.selected = None;
                PanelOutcome::Closed
            },
        }
    }

    fn activate_selected(&mut self) -> PanelOutcome {
        let chosen = self.selected.and_then(|idx| match self.items().get(idx).copied()? {
            PanelItem::Popular(text) | PanelItem::History(text) => {
                Some(Activation::Text(text.to_string()))
            },
            PanelItem::Suggestion(suggestion) => Some(Activation::Suggestion(suggestion.clone())),
        });
        match chosen {
            Some(Activation::Text(text)) => {
                self.query = text.clone();
                self.submit(&text)
            },
            Some(Activation::Suggestion(suggestion)) => self.select(&suggestion),
            None => {
                let query = self.query.clone();
                self.submit(&query)
            },
        }
    }

    /// Click on a suggestion. Vehicles submit their name as free text;
    /// brands and body types navigate to the structured filter instead.
    pub fn select(&mut self, suggestion: &Suggestion) -> PanelOutcome {
        self.query = suggestion.text().to_string();
        match suggestion {
            Suggestion::Vehicle {
                text, ..
            } => {
                let text = text.clone();
                self.submit(&text)
            },
            Suggestion::Brand {
                brand, ..
            } => {
                let next = self.location.with_brand(Some(*brand)).with_search(None);
                self.navigate(next)
            },
            Suggestion::Category {
                category, ..
            } => {
                let next = self.location.with_category(Some(*category)).with_search(None);
                self.navigate(next)
            },
        }
    }

    /// Explicit free-text submission; blank queries do nothing.
    pub fn submit(&mut self, query: &str) -> PanelOutcome {
        if query.trim().is_empty() {
            return PanelOutcome::Nothing;
        }
        self.history.push(query);
        let next = self.location.with_search(Some(query));
        self.navigate(next)
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
        self.selected = None;
    }

    fn navigate(&mut self, next: FleetQuery) -> PanelOutcome {
        self.location = next.clone();
        self.is_open = false;
        self.selected = None;
        PanelOutcome::Navigate(next)
    }
}

enum Activation {
    Text(String),
    Suggestion(Suggestion),
}
