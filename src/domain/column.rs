use crate::domain::task::{numeric_suffix, TaskId};
use crate::error::CareflowError;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Unique identifier for a column (e.g., col1, col2)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ColumnId(String);

impl ColumnId {
    const PREFIX: &'static str = "col";

    /// Creates a new ColumnId from a counter
    pub fn new(counter: u32) -> Self {
        Self(format!("{}{}", Self::PREFIX, counter))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub(crate) fn counter(&self) -> Option<u32> {
        numeric_suffix(&self.0, Self::PREFIX)
    }
}

impl FromStr for ColumnId {
    type Err = CareflowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().is_empty() {
            return Err(CareflowError::InvalidColumnId(s.to_string()));
        }
        Ok(Self(s.to_string()))
    }
}

impl From<&str> for ColumnId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for ColumnId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Display for ColumnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A column of the board: a workflow stage holding an ordered list of task ids
///
/// The tasks themselves live in the board's arena; the position of an id in
/// `task_ids` is its display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub(crate) id: ColumnId,
    pub(crate) title: String,
    pub(crate) task_ids: Vec<TaskId>,
}

impl Column {
    pub(crate) fn new(id: ColumnId, title: String) -> Self {
        Self {
            id,
            title,
            task_ids: Vec::new(),
        }
    }

    pub fn id(&self) -> &ColumnId {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn task_ids(&self) -> &[TaskId] {
        &self.task_ids
    }

    pub fn len(&self) -> usize {
        self.task_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.task_ids.is_empty()
    }

    pub(crate) fn remove_task(&mut self, id: &TaskId) -> bool {
        match self.task_ids.iter().position(|t| t == id) {
            Some(pos) => {
                self.task_ids.remove(pos);
                true
            }
            None => false,
        }
    }
}
