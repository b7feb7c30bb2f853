// Search session
//
// Holds the transient selections a presentation layer keeps between
// renders: debounced search text, filter criteria and sort order. The store
// stays unaware of all of it.

use std::time::{Duration, Instant};

use tracing::debug;

use crate::debounce::Debouncer;
use crate::filter::{Criterion, Filter};
use crate::models::{Priority, Status, Task};
use crate::query::{Query, SortOrder};

#[derive(Debug, Clone)]
pub struct SearchSession {
    input: Debouncer<String>,
    query: Query,
}

impl SearchSession {
    pub fn new(debounce: Duration) -> Self {
        Self {
            input: Debouncer::new(debounce),
            query: Query::default(),
        }
    }

    /// Record a keystroke; the search text applies once input pauses
    pub fn type_query(&mut self, text: impl Into<String>, now: Instant) {
        self.input.push(text.into(), now);
    }

    /// Apply pending search text if it is due. Returns true if the query changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.input.poll(now) {
            Some(text) => self.apply_search(text),
            None => false,
        }
    }

    /// Apply pending search text immediately (e.g. on Enter)
    pub fn commit_query(&mut self) -> bool {
        match self.input.flush() {
            Some(text) => self.apply_search(text),
            None => false,
        }
    }

    pub fn has_pending_input(&self) -> bool {
        self.input.is_pending()
    }

    /// When pending input becomes due, for scheduling the next tick
    pub fn next_deadline(&self) -> Option<Instant> {
        self.input.deadline()
    }

    pub fn set_priority(&mut self, priority: Criterion<Priority>) {
        self.query.filter.priority = priority;
    }

    pub fn set_status(&mut self, status: Criterion<Status>) {
        self.query.filter.status = status;
    }

    /// Flip between ascending and descending due dates
    pub fn toggle_order(&mut self) -> SortOrder {
        self.query.order = self.query.order.toggled();
        self.query.order
    }

    /// Applied search text (not any pending input)
    pub fn search_text(&self) -> &str {
        &self.query.search
    }

    pub fn filter(&self) -> &Filter {
        &self.query.filter
    }

    pub fn order(&self) -> SortOrder {
        self.query.order
    }

    pub fn query(&self) -> &Query {
        &self.query
    }

    /// Tasks to display for the current selections
    pub fn view(&self, tasks: &[Task]) -> Vec<Task> {
        self.query.apply(tasks)
    }

    fn apply_search(&mut self, text: String) -> bool {
        if text == self.query.search {
            return false;
        }
        debug!(search = %text, "Applying search text");
        self.query.search = text;
        true
    }
}

impl Default for SearchSession {
    fn default() -> Self {
        Self::new(crate::debounce::DEFAULT_DEBOUNCE)
    }
}
