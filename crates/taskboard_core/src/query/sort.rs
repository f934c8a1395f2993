//! Task ordering.
//!
//! # Invariants
//! - Sorting never mutates stored order; callers get a new sequence.
//! - Descending order reverses the comparator, not the output, and the sort
//!   is stable, so ties keep stored order in both directions.

use crate::model::task::Task;
use std::cmp::Ordering;
use std::fmt::{Display, Formatter};

/// Sort key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortCriteria {
    #[default]
    DueDate,
    Priority,
    Title,
    CreatedAt,
}

impl SortCriteria {
    /// Maps a criteria name to a key; unknown names fall back to `DueDate`.
    pub fn from_name(name: &str) -> Self {
        match name.trim() {
            "priority" => Self::Priority,
            "title" => Self::Title,
            "createdAt" | "created_at" => Self::CreatedAt,
            _ => Self::DueDate,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::DueDate => "dueDate",
            Self::Priority => "priority",
            Self::Title => "title",
            Self::CreatedAt => "createdAt",
        }
    }

    /// Ascending comparison of two tasks under this key.
    pub fn compare(self, a: &Task, b: &Task) -> Ordering {
        match self {
            // Undated tasks go last.
            Self::DueDate => match (a.due_date, b.due_date) {
                (Some(left), Some(right)) => left.cmp(&right),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            },
            Self::Priority => a.priority.rank().cmp(&b.priority.rank()),
            Self::Title => compare_titles(&a.title, &b.title),
            Self::CreatedAt => a.created_at().cmp(&b.created_at()),
        }
    }
}

impl Display for SortCriteria {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sort key plus direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub criteria: SortCriteria,
    pub ascending: bool,
}

impl Default for SortSpec {
    fn default() -> Self {
        Self {
            criteria: SortCriteria::DueDate,
            ascending: true,
        }
    }
}

impl SortSpec {
    pub fn new(criteria: SortCriteria, ascending: bool) -> Self {
        Self {
            criteria,
            ascending,
        }
    }

    pub fn compare(&self, a: &Task, b: &Task) -> Ordering {
        let ordering = self.criteria.compare(a, b);
        if self.ascending {
            ordering
        } else {
            ordering.reverse()
        }
    }

    /// Stable in-place sort of a borrowed task sequence.
    pub fn apply(&self, tasks: &mut [&Task]) {
        tasks.sort_by(|a, b| self.compare(a, b));
    }
}

// Approximates locale collation: case-folded first, raw text as tie-break.
fn compare_titles(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}
