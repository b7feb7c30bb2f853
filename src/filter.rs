// Exact-match filtering on enumerated task fields

use std::fmt;
use std::str::FromStr;

use crate::models::{Priority, Status, Task};

/// A filter criterion: either every value, or exactly one
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Criterion<T> {
    #[default]
    All,
    Only(T),
}

impl<T: PartialEq> Criterion<T> {
    pub fn matches(&self, value: &T) -> bool {
        match self {
            Criterion::All => true,
            Criterion::Only(expected) => expected == value,
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Criterion::All)
    }
}

impl<T> From<Option<T>> for Criterion<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => Criterion::Only(v),
            None => Criterion::All,
        }
    }
}

impl<T: fmt::Display> fmt::Display for Criterion<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Criterion::All => write!(f, "All"),
            Criterion::Only(v) => write!(f, "{}", v),
        }
    }
}

/// `"All"` (any case) selects everything, anything else parses as `T`
impl<T: FromStr> FromStr for Criterion<T> {
    type Err = T::Err;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(Criterion::All)
        } else {
            s.parse().map(Criterion::Only)
        }
    }
}

/// Priority and status criteria, AND-combined
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Filter {
    pub priority: Criterion<Priority>,
    pub status: Criterion<Status>,
}

impl Filter {
    pub fn new(priority: Criterion<Priority>, status: Criterion<Status>) -> Self {
        Self { priority, status }
    }

    pub fn matches(&self, task: &Task) -> bool {
        self.priority.matches(&task.priority) && self.status.matches(&task.status)
    }

    /// True when neither field is constrained
    pub fn is_all(&self) -> bool {
        self.priority.is_all() && self.status.is_all()
    }
}
