// Query engine
//
// Pure functions over a snapshot of tasks. None of them touch the store; the
// caller composes them as search → filter → sort.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::filter::{Criterion, Filter};
use crate::models::{ParseFieldError, Priority, Status, Task};

/// Due-date sort direction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn toggled(self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortOrder::Asc => write!(f, "asc"),
            SortOrder::Desc => write!(f, "desc"),
        }
    }
}

impl FromStr for SortOrder {
    type Err = ParseFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortOrder::Asc),
            "desc" | "descending" => Ok(SortOrder::Desc),
            _ => Err(ParseFieldError::SortOrder(s.to_string())),
        }
    }
}

/// Case-insensitive substring match on title or description.
///
/// An empty query returns the input as is.
pub fn search(tasks: &[Task], query: &str) -> Vec<Task> {
    if query.is_empty() {
        return tasks.to_vec();
    }
    let needle = query.to_lowercase();
    tasks
        .iter()
        .filter(|t| t.title.to_lowercase().contains(&needle) || t.description.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

pub fn filter(tasks: &[Task], priority: Criterion<Priority>, status: Criterion<Status>) -> Vec<Task> {
    filter_by(tasks, &Filter::new(priority, status))
}

pub fn filter_by(tasks: &[Task], filter: &Filter) -> Vec<Task> {
    tasks.iter().filter(|t| filter.matches(t)).cloned().collect()
}

/// Stable sort by due date as a calendar date.
///
/// Tasks whose due date is not a readable date go last in either order.
pub fn sort(tasks: &[Task], order: SortOrder) -> Vec<Task> {
    let mut keyed: Vec<_> = tasks.iter().map(|t| (t.due_on(), t)).collect();
    keyed.sort_by(|(a, _), (b, _)| match (a, b) {
        (Some(a), Some(b)) => match order {
            SortOrder::Asc => a.cmp(b),
            SortOrder::Desc => b.cmp(a),
        },
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
    keyed.into_iter().map(|(_, t)| t.clone()).collect()
}

/// A composed search, filter and sort
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    pub search: String,
    pub filter: Filter,
    pub order: SortOrder,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.search = text.into();
        self
    }

    pub fn priority(mut self, priority: Criterion<Priority>) -> Self {
        self.filter.priority = priority;
        self
    }

    pub fn status(mut self, status: Criterion<Status>) -> Self {
        self.filter.status = status;
        self
    }

    pub fn order(mut self, order: SortOrder) -> Self {
        self.order = order;
        self
    }

    /// Run search → filter → sort over a snapshot
    pub fn apply(&self, tasks: &[Task]) -> Vec<Task> {
        let found = search(tasks, &self.search);
        let filtered = filter_by(&found, &self.filter);
        sort(&filtered, self.order)
    }
}
